use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Fixture, FixtureKind};
use crate::types::{DiscountType, TierSet};

/// Days a seeded coupon stays valid when the manifest does not say.
pub const DEFAULT_VALID_DAYS: u32 = 365;

/// A coupon code backed by a cart price rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CouponFixture {
    pub id: String,
    pub code: String,
    #[serde(rename = "type")]
    pub discount_type: DiscountType,
    pub discount_amount: Decimal,
    /// Cart subtotal the rule requires before it applies.
    #[serde(default)]
    pub minimum_order: Option<Decimal>,
    #[serde(default)]
    pub apply_to_shipping: bool,
    #[serde(default)]
    pub free_shipping: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub uses_per_coupon: Option<u32>,
    #[serde(default)]
    pub uses_per_customer: Option<u32>,
    #[serde(default)]
    pub valid_days: Option<u32>,
    pub tier: TierSet,
}

impl CouponFixture {
    #[must_use]
    pub fn valid_days_or_default(&self) -> u32 {
        self.valid_days.unwrap_or(DEFAULT_VALID_DAYS)
    }
}

impl Fixture for CouponFixture {
    const KIND: FixtureKind = FixtureKind::Coupon;

    fn id(&self) -> &str {
        &self.id
    }

    fn natural_key(&self) -> &str {
        &self.code
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

    #[test]
    fn test_parse_fixed_coupon_with_minimum() {
        let yaml = r#"
id: coupon-fixed-5
code: TESTFIXED5
type: fixed
discount_amount: 5
minimum_order: 50.00
tier: [B, C]
"#;
        let coupon: CouponFixture = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(coupon.discount_type, DiscountType::Fixed);
        assert_eq!(coupon.minimum_order, Some(dec!(50.00)));
        assert!(!coupon.free_shipping);
        assert_eq!(coupon.valid_days_or_default(), DEFAULT_VALID_DAYS);
        assert_eq!(coupon.natural_key(), "TESTFIXED5");
    }

    #[test]
    fn test_unknown_discount_type_rejected() {
        let yaml = r#"
id: coupon-bogo
code: BOGO
type: buy_one_get_one
discount_amount: 100
tier: [C]
"#;
        assert!(serde_yaml::from_str::<CouponFixture>(yaml).is_err());
    }
}
