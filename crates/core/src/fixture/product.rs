use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Fixture, FixtureKind};
use crate::types::{ProductStatus, TierSet, Visibility};

/// A simple catalog product seeded for storefront tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductFixture {
    pub id: String,
    /// Globally unique stock-keeping unit.
    pub sku: String,
    pub name: String,
    pub price: Decimal,
    /// Stock level. Zero seeds an out-of-stock product.
    pub qty: u32,
    #[serde(default)]
    pub status: Option<ProductStatus>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub weight: Option<Decimal>,
    /// Storefront URL key; the page objects open `/{url_key}.html`.
    #[serde(default)]
    pub url_key: Option<String>,
    #[serde(default)]
    pub tax_class_id: Option<u32>,
    #[serde(default)]
    pub attribute_set_id: Option<u32>,
    pub tier: TierSet,
}

impl ProductFixture {
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.qty > 0
    }

    #[must_use]
    pub fn status_or_default(&self) -> ProductStatus {
        self.status.unwrap_or_default()
    }

    #[must_use]
    pub fn visibility_or_default(&self) -> Visibility {
        self.visibility.unwrap_or_default()
    }

    /// URL key, falling back to a slug derived from the SKU.
    #[must_use]
    pub fn url_key_or_default(&self) -> String {
        self.url_key
            .clone()
            .unwrap_or_else(|| self.sku.to_lowercase().replace('_', "-"))
    }
}

impl Fixture for ProductFixture {
    const KIND: FixtureKind = FixtureKind::Product;

    fn id(&self) -> &str {
        &self.id
    }

    fn natural_key(&self) -> &str {
        &self.sku
    }

    fn tiers(&self) -> &TierSet {
        &self.tier
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;
    use crate::types::Tier;

    const BASIC: &str = r#"
id: simple-basic
sku: TEST_SIMPLE_001
name: Basic Test Product
price: 19.99
qty: 10
tier: [A, B, C]
"#;

    #[test]
    fn test_parse_minimal_product() {
        let product: ProductFixture = serde_yaml::from_str(BASIC).unwrap();
        assert_eq!(product.sku, "TEST_SIMPLE_001");
        assert_eq!(product.price, dec!(19.99));
        assert!(product.in_stock());
        assert_eq!(product.status_or_default(), ProductStatus::Enabled);
        assert_eq!(product.visibility_or_default(), Visibility::CatalogSearch);
        assert!(product.in_tier(Tier::A));
        assert_eq!(product.natural_key(), "TEST_SIMPLE_001");
    }

    #[test]
    fn test_default_url_key_from_sku() {
        let product: ProductFixture = serde_yaml::from_str(BASIC).unwrap();
        assert_eq!(product.url_key_or_default(), "test-simple-001");
    }

    #[test]
    fn test_zero_qty_is_out_of_stock() {
        let yaml = BASIC.replace("qty: 10", "qty: 0");
        let product: ProductFixture = serde_yaml::from_str(&yaml).unwrap();
        assert!(!product.in_stock());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = format!("{BASIC}colour: red\n");
        assert!(serde_yaml::from_str::<ProductFixture>(&yaml).is_err());
    }

    #[test]
    fn test_negative_qty_rejected() {
        let yaml = BASIC.replace("qty: 10", "qty: -1");
        assert!(serde_yaml::from_str::<ProductFixture>(&yaml).is_err());
    }
}
