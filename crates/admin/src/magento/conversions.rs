//! Conversions from fixture records to admin API request bodies.
//!
//! The mapping is deterministic: the same fixture (and the same `today` for
//! coupons) always produces the same payload.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use storecheck_core::{Address, CouponFixture, CustomerFixture, ProductFixture, RuleId};

use super::types::{
    AddressBody, CouponBody, CouponPayload, CustomAttribute, CustomerBody, CustomerPayload,
    ProductBody, ProductExtension, ProductPayload, RegionBody, RuleBody, RuleCondition,
    RulePayload, StockItem,
};

const PRODUCT_TYPE_SIMPLE: &str = "simple";
const DEFAULT_ATTRIBUTE_SET_ID: u32 = 4;
const DEFAULT_TAX_CLASS_ID: u32 = 2;
const DEFAULT_WEIGHT: Decimal = Decimal::ONE;

const MAIN_WEBSITE_ID: u32 = 1;
const GENERAL_GROUP_ID: u32 = 1;

/// NOT LOGGED IN, General, Wholesale, Retailer.
const ALL_CUSTOMER_GROUPS: [u32; 4] = [0, 1, 2, 3];
const COUPON_TYPE_SPECIFIC: &str = "SPECIFIC_COUPON";

const COMBINE_CONDITION: &str = "Magento\\SalesRule\\Model\\Rule\\Condition\\Combine";
const ADDRESS_CONDITION: &str = "Magento\\SalesRule\\Model\\Rule\\Condition\\Address";

/// Build the `POST /products` body for a fixture.
#[must_use]
pub fn convert_product(fixture: &ProductFixture) -> ProductPayload {
    let mut custom_attributes = vec![CustomAttribute::new(
        "tax_class_id",
        fixture
            .tax_class_id
            .unwrap_or(DEFAULT_TAX_CLASS_ID)
            .to_string(),
    )];
    if let Some(description) = &fixture.description {
        custom_attributes.push(CustomAttribute::new("description", description.clone()));
    }
    custom_attributes.push(CustomAttribute::new("url_key", fixture.url_key_or_default()));

    ProductPayload {
        product: ProductBody {
            sku: fixture.sku.clone(),
            name: fixture.name.clone(),
            price: fixture.price,
            status: fixture.status_or_default().code(),
            visibility: fixture.visibility_or_default().code(),
            type_id: PRODUCT_TYPE_SIMPLE.to_string(),
            attribute_set_id: fixture.attribute_set_id.unwrap_or(DEFAULT_ATTRIBUTE_SET_ID),
            weight: fixture.weight.unwrap_or(DEFAULT_WEIGHT),
            extension_attributes: ProductExtension {
                stock_item: StockItem {
                    qty: fixture.qty,
                    is_in_stock: fixture.in_stock(),
                },
            },
            custom_attributes,
        },
    }
}

/// Build the `POST /customers` body for a fixture.
#[must_use]
pub fn convert_customer(fixture: &CustomerFixture) -> CustomerPayload {
    CustomerPayload {
        customer: CustomerBody {
            email: fixture.email.to_string(),
            firstname: fixture.firstname.clone(),
            lastname: fixture.lastname.clone(),
            website_id: MAIN_WEBSITE_ID,
            group_id: GENERAL_GROUP_ID,
            addresses: fixture
                .addresses
                .iter()
                .map(|a| convert_address(a, fixture))
                .collect(),
        },
        password: fixture.password.clone(),
    }
}

fn convert_address(address: &Address, customer: &CustomerFixture) -> AddressBody {
    AddressBody {
        firstname: address.firstname_or(customer).to_string(),
        lastname: address.lastname_or(customer).to_string(),
        street: address.street.clone(),
        city: address.city.clone(),
        region: RegionBody {
            region: address.region.clone(),
            region_id: address.region_id,
        },
        postcode: address.postcode.clone(),
        country_id: address.country.clone(),
        telephone: address.telephone.clone(),
        default_shipping: address.is_default_shipping(),
        default_billing: address.is_default_billing(),
    }
}

/// Build the `POST /salesRules` body for a coupon fixture.
///
/// The rule is valid from `today` for the fixture's `valid_days`.
#[must_use]
pub fn convert_rule(fixture: &CouponFixture, rule_name: String, today: NaiveDate) -> RulePayload {
    let to_date = today
        .checked_add_days(Days::new(u64::from(fixture.valid_days_or_default())))
        .unwrap_or(NaiveDate::MAX);

    RulePayload {
        rule: RuleBody {
            name: rule_name,
            description: fixture
                .description
                .clone()
                .unwrap_or_else(|| format!("storecheck fixture coupon {}", fixture.code)),
            is_active: true,
            website_ids: vec![MAIN_WEBSITE_ID],
            customer_group_ids: ALL_CUSTOMER_GROUPS.to_vec(),
            coupon_type: COUPON_TYPE_SPECIFIC.to_string(),
            uses_per_coupon: fixture.uses_per_coupon.unwrap_or(0),
            uses_per_customer: fixture.uses_per_customer.unwrap_or(0),
            from_date: today,
            to_date,
            simple_action: fixture.discount_type.simple_action().to_string(),
            discount_amount: fixture.discount_amount,
            apply_to_shipping: fixture.apply_to_shipping,
            simple_free_shipping: if fixture.free_shipping { "1" } else { "0" }.to_string(),
            stop_rules_processing: false,
            condition: fixture.minimum_order.map(minimum_subtotal_condition),
        },
    }
}

/// "Subtotal equals or greater than `minimum`", wrapped in an all-of combine.
fn minimum_subtotal_condition(minimum: Decimal) -> RuleCondition {
    RuleCondition {
        condition_type: COMBINE_CONDITION.to_string(),
        aggregator_type: Some("all".to_string()),
        attribute_name: None,
        operator: None,
        value: "1".to_string(),
        conditions: vec![RuleCondition {
            condition_type: ADDRESS_CONDITION.to_string(),
            aggregator_type: None,
            attribute_name: Some("base_subtotal".to_string()),
            operator: Some(">=".to_string()),
            value: minimum.to_string(),
            conditions: Vec::new(),
        }],
    }
}

/// Build the `POST /coupons` body linking `code` to an existing rule.
#[must_use]
pub fn convert_coupon(rule_id: RuleId, code: &str) -> CouponPayload {
    CouponPayload {
        coupon: CouponBody {
            rule_id,
            code: code.to_string(),
            is_primary: true,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;
    use storecheck_core::{ManifestStore, PERCENT_COUPON_ID};

    use super::*;

    fn store() -> ManifestStore {
        ManifestStore::load().unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn attribute<'a>(payload: &'a ProductPayload, code: &str) -> Option<&'a str> {
        payload
            .product
            .custom_attributes
            .iter()
            .find(|a| a.attribute_code == code)
            .map(|a| a.value.as_str())
    }

    #[test]
    fn test_basic_product_mapping() {
        let store = store();
        let payload = convert_product(store.basic_product().unwrap());
        let body = &payload.product;

        assert_eq!(body.sku, "TEST_SIMPLE_001");
        assert_eq!(body.price, dec!(19.99));
        assert_eq!(body.status, 1);
        assert_eq!(body.visibility, 4);
        assert_eq!(body.type_id, "simple");
        assert_eq!(body.attribute_set_id, 4);
        assert_eq!(body.extension_attributes.stock_item.qty, 10);
        assert!(body.extension_attributes.stock_item.is_in_stock);
        assert_eq!(attribute(&payload, "tax_class_id"), Some("2"));
    }

    #[test]
    fn test_out_of_stock_product() {
        let store = store();
        let fixture = store.products().by_natural_key("TEST_OOS_001").unwrap();
        let payload = convert_product(fixture);
        assert_eq!(payload.product.extension_attributes.stock_item.qty, 0);
        assert!(!payload.product.extension_attributes.stock_item.is_in_stock);
    }

    #[test]
    fn test_disabled_product_codes() {
        let store = store();
        let fixture = store.products().by_natural_key("TEST_DISABLED_001").unwrap();
        let payload = convert_product(fixture);
        assert_eq!(payload.product.status, 2);
        assert_eq!(payload.product.visibility, 1);
    }

    #[test]
    fn test_product_json_shape() {
        let store = store();
        let json = serde_json::to_value(convert_product(store.basic_product().unwrap())).unwrap();
        assert_eq!(json["product"]["price"], serde_json::json!(19.99));
        assert_eq!(
            json["product"]["extension_attributes"]["stock_item"]["is_in_stock"],
            serde_json::json!(true)
        );
    }

    #[test]
    fn test_customer_address_flags() {
        let store = store();
        let fixture = store.customers().by_natural_key("qa.multi@storecheck.test").unwrap();
        let payload = convert_customer(fixture);
        let addresses = &payload.customer.addresses;

        assert_eq!(payload.customer.website_id, 1);
        assert_eq!(payload.customer.group_id, 1);
        assert_eq!(addresses.len(), fixture.addresses.len());
        assert_eq!(
            addresses.iter().filter(|a| a.default_shipping).count(),
            1,
            "exactly one default shipping address"
        );
        assert_eq!(addresses.iter().filter(|a| a.default_billing).count(), 1);
    }

    #[test]
    fn test_combined_address_type_sets_both_defaults() {
        let store = store();
        let payload = convert_customer(store.default_customer().unwrap());
        let first = payload.customer.addresses.first().unwrap();
        assert!(first.default_shipping);
        assert!(first.default_billing);
        assert_eq!(first.firstname, store.default_customer().unwrap().firstname);
    }

    #[test]
    fn test_customer_without_addresses() {
        let store = store();
        let fixture = store.customers().by_natural_key("qa.bare@storecheck.test").unwrap();
        assert!(convert_customer(fixture).customer.addresses.is_empty());
    }

    #[test]
    fn test_percentage_rule_mapping() {
        let store = store();
        let coupon = store.coupons().require(PERCENT_COUPON_ID).unwrap();
        let payload = convert_rule(coupon, "E2E Coupon TEST10".to_string(), day("2026-01-01"));
        let rule = &payload.rule;

        assert_eq!(rule.name, "E2E Coupon TEST10");
        assert_eq!(rule.simple_action, "by_percent");
        assert_eq!(rule.discount_amount, dec!(10));
        assert_eq!(rule.coupon_type, "SPECIFIC_COUPON");
        assert_eq!(rule.website_ids, vec![1]);
        assert_eq!(rule.customer_group_ids, vec![0, 1, 2, 3]);
        assert_eq!(rule.simple_free_shipping, "0");
        assert_eq!(rule.from_date, day("2026-01-01"));
        assert_eq!(rule.to_date, day("2027-01-01"));
        assert!(rule.condition.is_none());
    }

    #[test]
    fn test_fixed_rule_with_minimum_order() {
        let store = store();
        let coupon = store.coupons().by_natural_key("TESTFIXED5").unwrap();
        let payload = convert_rule(coupon, "E2E Coupon TESTFIXED5".to_string(), day("2026-01-01"));
        let rule = &payload.rule;

        assert_eq!(rule.simple_action, "cart_fixed");
        let condition = rule.condition.as_ref().unwrap();
        let subtotal = condition.conditions.first().unwrap();
        assert_eq!(subtotal.attribute_name.as_deref(), Some("base_subtotal"));
        assert_eq!(subtotal.operator.as_deref(), Some(">="));
        assert_eq!(subtotal.value.parse::<Decimal>().unwrap(), dec!(50));
    }

    #[test]
    fn test_free_shipping_rule() {
        let store = store();
        let coupon = store.coupons().by_natural_key("TESTFREESHIP").unwrap();
        let rule = convert_rule(coupon, String::new(), day("2026-01-01")).rule;
        assert_eq!(rule.simple_free_shipping, "1");
        assert!(rule.apply_to_shipping);
        assert_eq!(rule.uses_per_customer, 1);
    }

    #[test]
    fn test_rule_json_dates() {
        let store = store();
        let coupon = store.percent_coupon().unwrap();
        let json =
            serde_json::to_value(convert_rule(coupon, String::new(), day("2026-03-05"))).unwrap();
        assert_eq!(json["rule"]["from_date"], "2026-03-05");
        assert!(json["rule"].get("condition").is_none());
    }

    #[test]
    fn test_coupon_links_rule() {
        let payload = convert_coupon(RuleId::new(77), "TEST10");
        assert_eq!(payload.coupon.rule_id, RuleId::new(77));
        assert!(payload.coupon.is_primary);
    }
}
