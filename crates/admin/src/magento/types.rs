//! Wire types for the admin REST API.
//!
//! `Remote*` types are what the platform returns; `*Payload` types are the
//! request bodies built by [`super::conversions`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storecheck_core::{CouponId, CustomerId, OrderId, ProductId, RuleId};

// =============================================================================
// Responses
// =============================================================================

/// Envelope returned by every list/search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults<T> {
    pub items: Option<Vec<T>>,
    #[serde(default)]
    pub total_count: u64,
}

impl<T> SearchResults<T> {
    /// Items, treating a `null` list as empty.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteProduct {
    pub id: ProductId,
    pub sku: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub status: Option<u8>,
    #[serde(default)]
    pub type_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteCustomer {
    pub id: CustomerId,
    pub email: String,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
}

/// A cart price rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteRule {
    pub rule_id: RuleId,
    pub name: String,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteCoupon {
    pub coupon_id: CouponId,
    pub rule_id: RuleId,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteOrder {
    pub entity_id: OrderId,
    pub increment_id: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub grand_total: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
}

/// One entry of `GET /store/storeConfigs`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    pub id: i64,
    pub code: String,
    pub website_id: i64,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub base_currency_code: Option<String>,
}

/// Error body returned with non-2xx responses.
///
/// `message` may contain placeholders: `%1`, `%2`, ... when `parameters` is
/// a list, `%name` when it is an object.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub parameters: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The message with its placeholders substituted.
    #[must_use]
    pub fn render(&self) -> String {
        let mut message = self.message.clone();
        match &self.parameters {
            Some(serde_json::Value::Array(values)) => {
                // Replace from the highest index down so `%1` never eats `%10`.
                for (index, value) in values.iter().enumerate().rev() {
                    message = message.replace(&format!("%{}", index + 1), &param_text(value));
                }
            }
            Some(serde_json::Value::Object(map)) => {
                for (name, value) in map {
                    message = message.replace(&format!("%{name}"), &param_text(value));
                }
            }
            _ => {}
        }
        message
    }
}

fn param_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// =============================================================================
// Request payloads
// =============================================================================

/// Body of `POST /products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPayload {
    pub product: ProductBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductBody {
    pub sku: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub status: u8,
    pub visibility: u8,
    pub type_id: String,
    pub attribute_set_id: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub weight: Decimal,
    pub extension_attributes: ProductExtension,
    pub custom_attributes: Vec<CustomAttribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductExtension {
    pub stock_item: StockItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockItem {
    pub qty: u32,
    pub is_in_stock: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomAttribute {
    pub attribute_code: String,
    pub value: String,
}

impl CustomAttribute {
    pub fn new(code: &str, value: impl Into<String>) -> Self {
        Self {
            attribute_code: code.to_string(),
            value: value.into(),
        }
    }
}

/// Body of `POST /customers`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct CustomerPayload {
    pub customer: CustomerBody,
    pub password: String,
}

impl std::fmt::Debug for CustomerPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerPayload")
            .field("customer", &self.customer)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerBody {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub website_id: u32,
    pub group_id: u32,
    pub addresses: Vec<AddressBody>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressBody {
    pub firstname: String,
    pub lastname: String,
    pub street: Vec<String>,
    pub city: String,
    pub region: RegionBody,
    pub postcode: String,
    pub country_id: String,
    pub telephone: String,
    pub default_shipping: bool,
    pub default_billing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionBody {
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<u32>,
}

/// Body of `POST /salesRules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RulePayload {
    pub rule: RuleBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleBody {
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub website_ids: Vec<u32>,
    pub customer_group_ids: Vec<u32>,
    pub coupon_type: String,
    pub uses_per_coupon: u32,
    pub uses_per_customer: u32,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub simple_action: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,
    pub apply_to_shipping: bool,
    pub simple_free_shipping: String,
    pub stop_rules_processing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<RuleCondition>,
}

/// A node of a sales rule condition tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleCondition {
    pub condition_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregator_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    pub value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<RuleCondition>,
}

/// Body of `POST /coupons`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CouponPayload {
    pub coupon: CouponBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CouponBody {
    pub rule_id: RuleId,
    pub code: String,
    pub is_primary: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_render_positional_parameters() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"message":"The \"%1\" SKU already exists, %2.","parameters":["TEST_SIMPLE_001","sorry"]}"#,
        )
        .unwrap();
        assert_eq!(
            body.render(),
            "The \"TEST_SIMPLE_001\" SKU already exists, sorry."
        );
    }

    #[test]
    fn test_render_named_parameters() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"message":"No such entity with %fieldName = %fieldValue","parameters":{"fieldName":"sku","fieldValue":"TEST_X"}}"#,
        )
        .unwrap();
        assert_eq!(body.render(), "No such entity with sku = TEST_X");
    }

    #[test]
    fn test_render_without_parameters() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message":"Consumer is not authorized."}"#).unwrap();
        assert_eq!(body.render(), "Consumer is not authorized.");
    }

    #[test]
    fn test_render_numeric_parameter() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message":"Rule %1 not found","parameters":[42]}"#).unwrap();
        assert_eq!(body.render(), "Rule 42 not found");
    }

    #[test]
    fn test_search_results_null_items() {
        let results: SearchResults<RemoteRule> =
            serde_json::from_str(r#"{"items":null,"total_count":0}"#).unwrap();
        assert!(results.into_items().is_empty());
    }

    #[test]
    fn test_search_results_missing_items() {
        let results: SearchResults<RemoteProduct> =
            serde_json::from_str(r#"{"total_count":0}"#).unwrap();
        assert_eq!(results.total_count, 0);
        assert!(results.into_items().is_empty());
    }

    #[test]
    fn test_parse_remote_product() {
        let json = r#"{
            "id": 2041,
            "sku": "TEST_SIMPLE_001",
            "name": "Basic Test Product",
            "price": 19.99,
            "status": 1,
            "type_id": "simple",
            "attribute_set_id": 4
        }"#;
        let product: RemoteProduct = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(2041));
        assert_eq!(product.price, Some(rust_decimal::dec!(19.99)));
    }

    #[test]
    fn test_customer_payload_debug_redacts_password() {
        let payload = CustomerPayload {
            customer: CustomerBody {
                email: "qa@storecheck.test".to_string(),
                firstname: "Q".to_string(),
                lastname: "A".to_string(),
                website_id: 1,
                group_id: 1,
                addresses: vec![],
            },
            password: "Storecheck#2024".to_string(),
        };
        let debug = format!("{payload:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("Storecheck#2024"));
    }
}
