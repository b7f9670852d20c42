//! Tier B regression specs.
//!
//! Seed first with `seed-all B`, then run with
//! `cargo test -p storecheck-e2e --test regression -- --ignored`.

mod common;

use storecheck_admin::{AdminClient, HarnessConfig};
use storecheck_core::{CustomerFixture, ProductFixture};
use storecheck_e2e::{CardDetails, CartPage, CheckoutPage, ProductPage, Storefront, WebDriverBrowser};

const SHIPPING_METHOD: &str = "flatrate_flatrate";
const OFFLINE_PAYMENT_METHOD: &str = "checkmo";

/// Card gateway in sandbox mode; override with `CARD_PAYMENT_METHOD`.
const DEFAULT_CARD_PAYMENT_METHOD: &str = "payflowpro";

/// Add `product` to the cart and fill the shipping step as a guest.
async fn reach_payment_step<'a>(
    sf: &'a Storefront<WebDriverBrowser>,
    product: &ProductFixture,
    customer: &CustomerFixture,
) -> CheckoutPage<'a, WebDriverBrowser> {
    let address = customer
        .shipping_address()
        .expect("customer fixture has a shipping address");

    ProductPage::open_fixture(sf, product)
        .await
        .expect("Product page did not render")
        .add_to_cart()
        .await
        .expect("Add to cart failed");

    let checkout = CartPage::open(sf)
        .await
        .expect("Cart did not render")
        .proceed_to_checkout()
        .await
        .expect("Checkout did not render");

    checkout
        .fill_guest_email(customer.email.as_str())
        .await
        .expect("guest email");
    checkout
        .fill_shipping_address(customer, address)
        .await
        .expect("shipping address");
    checkout
        .select_shipping_method(SHIPPING_METHOD)
        .await
        .expect("shipping method");
    checkout.continue_to_payment().await.expect("payment step");
    checkout
}

/// Read the order back through the admin API.
async fn assert_order_recorded(order_number: &str, product: &ProductFixture, customer: &CustomerFixture) {
    let config = HarnessConfig::from_env().expect("Admin configuration missing");
    let admin = AdminClient::connect(&config)
        .await
        .expect("Admin authentication failed");
    let order = admin
        .find_order_by_increment_id(order_number)
        .await
        .expect("Order search failed")
        .expect("Order not visible in the admin API");

    assert_eq!(order.increment_id, order_number);
    assert_eq!(order.customer_email.as_deref(), Some(customer.email.as_str()));
    assert!(order.grand_total.is_some_and(|total| total >= product.price));
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "Requires a seeded storefront, a WebDriver server and admin credentials"]
async fn test_guest_checkout_creates_order() {
    let session = common::session().await;
    let sf = session.storefront();
    let store = common::manifests();
    let product = store.basic_product().expect("basic product fixture");
    let customer = store.default_customer().expect("default customer fixture");

    let checkout = reach_payment_step(sf, product, customer).await;
    checkout
        .select_payment_method(OFFLINE_PAYMENT_METHOD)
        .await
        .expect("payment method");

    let order_number = checkout
        .place_order()
        .await
        .expect("Order was not placed")
        .order_number()
        .await
        .expect("order number");
    assert!(!order_number.is_empty());

    assert_order_recorded(&order_number, product, customer).await;
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "Requires a storefront with a sandbox card gateway, a WebDriver server and admin credentials"]
async fn test_card_checkout_creates_order() {
    let method = std::env::var("CARD_PAYMENT_METHOD")
        .unwrap_or_else(|_| DEFAULT_CARD_PAYMENT_METHOD.to_string());
    let session = common::session().await;
    let sf = session.storefront();
    let store = common::manifests();
    let product = store.basic_product().expect("basic product fixture");
    let customer = store.default_customer().expect("default customer fixture");

    let checkout = reach_payment_step(sf, product, customer).await;
    checkout
        .select_payment_method(&method)
        .await
        .expect("card payment method");
    checkout
        .fill_card(&CardDetails::test_visa())
        .await
        .expect("card form");

    let order_number = checkout
        .place_order()
        .await
        .expect("Card payment was not accepted")
        .order_number()
        .await
        .expect("order number");
    assert!(!order_number.is_empty());

    assert_order_recorded(&order_number, product, customer).await;
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "Requires a seeded storefront and a WebDriver server"]
async fn test_minimum_order_coupon_rejected_below_threshold() {
    let session = common::session().await;
    let sf = session.storefront();
    let store = common::manifests();
    let product = store.basic_product().expect("basic product fixture");
    let coupon = store
        .coupons()
        .by_natural_key("TESTFIXED5")
        .expect("fixed coupon fixture");
    let minimum = coupon.minimum_order.expect("fixed coupon has a minimum");
    assert!(product.price < minimum);

    ProductPage::open_fixture(sf, product)
        .await
        .expect("Product page did not render")
        .add_to_cart()
        .await
        .expect("Add to cart failed");

    let cart = CartPage::open(sf).await.expect("Cart did not render");
    let result = cart.apply_coupon(&coupon.code).await.expect("Coupon form failed");
    assert!(!result.applied, "coupon applied below minimum: {}", result.message);
}
