//! Locator tables for the storefront.
//!
//! Each chain lists the theme's `data-testid` first, then the stock Luma
//! markup, then visible text as a last resort.

use crate::locator::{LocatorChain, Selector, chain};

/// Elements shared by every page.
pub mod common {
    use super::{LocatorChain, Selector, chain};

    pub const LOADING_MASK: LocatorChain = chain!("loading indicator" => [
        Selector::css(".loading-mask"),
        Selector::css("[data-role='loader']"),
        Selector::css("body._block-content-loading"),
    ]);

    pub const PAGE_TITLE: LocatorChain = chain!("page title" => [
        Selector::test_id("page-title"),
        Selector::css("h1.page-title span.base"),
        Selector::css("[data-ui-id='page-title-wrapper']"),
    ]);

    pub const SUCCESS_MESSAGE: LocatorChain = chain!("success message" => [
        Selector::test_id("message-success"),
        Selector::css("[data-ui-id='message-success']"),
        Selector::css(".message-success"),
    ]);

    pub const ERROR_MESSAGE: LocatorChain = chain!("error message" => [
        Selector::test_id("message-error"),
        Selector::css("[data-ui-id='message-error']"),
        Selector::css(".message-error"),
    ]);

    /// Either outcome of a form post that answers with a page message.
    pub const ANY_MESSAGE: LocatorChain = chain!("page message" => [
        Selector::css("[data-ui-id='message-success']"),
        Selector::css(".message-success"),
        Selector::css("[data-ui-id='message-error']"),
        Selector::css(".message-error"),
    ]);
}

/// Header and minicart.
pub mod header {
    use super::{LocatorChain, Selector, chain};

    pub const MINICART: LocatorChain = chain!("minicart toggle" => [
        Selector::test_id("minicart"),
        Selector::css("a.action.showcart"),
    ]);

    pub const MINICART_COUNT: LocatorChain = chain!("minicart item count" => [
        Selector::test_id("minicart-count"),
        Selector::css(".minicart-wrapper .counter-number"),
    ]);

    pub const SEARCH_INPUT: LocatorChain = chain!("search input" => [
        Selector::test_id("search"),
        Selector::css("#search"),
    ]);
}

/// Product detail page.
pub mod product {
    use super::{LocatorChain, Selector, chain};

    pub const PRICE: LocatorChain = chain!("product price" => [
        Selector::test_id("product-price"),
        Selector::css(".product-info-main .price-box .price"),
    ]);

    pub const QTY: LocatorChain = chain!("quantity input" => [
        Selector::test_id("qty"),
        Selector::css("#qty"),
    ]);

    pub const ADD_TO_CART: LocatorChain = chain!("add to cart button" => [
        Selector::test_id("add-to-cart"),
        Selector::css("#product-addtocart-button"),
        Selector::text("Add to Cart"),
    ]);

    pub const OUT_OF_STOCK: LocatorChain = chain!("out of stock label" => [
        Selector::test_id("stock-unavailable"),
        Selector::css(".product-info-stock-sku .stock.unavailable"),
    ]);
}

/// Shopping cart page.
pub mod cart {
    use super::{LocatorChain, Selector, chain};

    pub const LINE_ITEMS: LocatorChain = chain!("cart line items" => [
        Selector::test_id("cart-item"),
        Selector::css("#shopping-cart-table tbody.cart.item"),
    ]);

    pub const EMPTY: LocatorChain = chain!("empty cart notice" => [
        Selector::test_id("cart-empty"),
        Selector::css(".cart-empty"),
    ]);

    pub const DISCOUNT_TOGGLE: LocatorChain = chain!("discount code toggle" => [
        Selector::test_id("discount-toggle"),
        Selector::css("#block-discount-heading"),
        Selector::text("Apply Discount Code"),
    ]);

    pub const COUPON_INPUT: LocatorChain = chain!("coupon code input" => [
        Selector::test_id("coupon-code"),
        Selector::css("#coupon_code"),
    ]);

    pub const APPLY_COUPON: LocatorChain = chain!("apply coupon button" => [
        Selector::test_id("apply-coupon"),
        Selector::css("#discount-coupon-form button.action.apply"),
        Selector::text("Apply Discount"),
    ]);

    pub const DISCOUNT_AMOUNT: LocatorChain = chain!("discount total" => [
        Selector::test_id("discount-amount"),
        Selector::css(".cart-totals tr.totals td[data-th='Discount'] .price"),
        Selector::css(".cart-totals .discount .amount .price"),
    ]);

    pub const GRAND_TOTAL: LocatorChain = chain!("grand total" => [
        Selector::test_id("grand-total"),
        Selector::css(".cart-totals .grand .amount .price"),
    ]);

    pub const PROCEED_TO_CHECKOUT: LocatorChain = chain!("proceed to checkout button" => [
        Selector::test_id("proceed-to-checkout"),
        Selector::css("button[data-role='proceed-to-checkout']"),
        Selector::text("Proceed to Checkout"),
    ]);
}

/// One-page checkout: shipping step and payment step.
pub mod checkout {
    use super::{LocatorChain, Selector, chain};

    pub const EMAIL: LocatorChain = chain!("guest email" => [
        Selector::test_id("customer-email"),
        Selector::css("#customer-email"),
    ]);

    pub const FIRSTNAME: LocatorChain = chain!("shipping first name" => [
        Selector::css("#shipping-new-address-form input[name='firstname']"),
    ]);

    pub const LASTNAME: LocatorChain = chain!("shipping last name" => [
        Selector::css("#shipping-new-address-form input[name='lastname']"),
    ]);

    pub const STREET: [LocatorChain; 2] = [
        chain!("street line 1" => [
            Selector::css("#shipping-new-address-form input[name='street[0]']"),
        ]),
        chain!("street line 2" => [
            Selector::css("#shipping-new-address-form input[name='street[1]']"),
        ]),
    ];

    pub const CITY: LocatorChain = chain!("shipping city" => [
        Selector::css("#shipping-new-address-form input[name='city']"),
    ]);

    pub const COUNTRY: LocatorChain = chain!("shipping country" => [
        Selector::css("#shipping-new-address-form select[name='country_id']"),
    ]);

    pub const REGION_SELECT: LocatorChain = chain!("shipping region list" => [
        Selector::css("#shipping-new-address-form select[name='region_id']"),
    ]);

    pub const REGION_INPUT: LocatorChain = chain!("shipping region text" => [
        Selector::css("#shipping-new-address-form input[name='region']"),
    ]);

    pub const POSTCODE: LocatorChain = chain!("shipping postcode" => [
        Selector::css("#shipping-new-address-form input[name='postcode']"),
    ]);

    pub const TELEPHONE: LocatorChain = chain!("shipping telephone" => [
        Selector::css("#shipping-new-address-form input[name='telephone']"),
    ]);

    pub const SHIPPING_METHODS: LocatorChain = chain!("shipping methods" => [
        Selector::test_id("shipping-method"),
        Selector::css("#checkout-shipping-method-load input[type='radio']"),
    ]);

    pub const NEXT: LocatorChain = chain!("continue to payment button" => [
        Selector::test_id("shipping-next"),
        Selector::css("button[data-role='opc-continue']"),
        Selector::text("Next"),
    ]);

    pub const PAYMENT_METHODS: LocatorChain = chain!("payment methods" => [
        Selector::test_id("payment-method"),
        Selector::css("#checkout-payment-method-load .payment-method"),
    ]);

    pub const PLACE_ORDER: LocatorChain = chain!("place order button" => [
        Selector::test_id("place-order"),
        Selector::css(".payment-method._active button.action.checkout"),
        Selector::text("Place Order"),
    ]);

    /// Radio for a carrier/method code such as `flatrate_flatrate`.
    #[must_use]
    pub fn shipping_method(code: &str) -> LocatorChain {
        LocatorChain::dynamic(
            format!("shipping method {code}"),
            vec![
                Selector::TestId(format!("shipping-method-{code}").into()),
                Selector::Css(format!("#checkout-shipping-method-load input[value='{code}']").into()),
            ],
        )
    }

    /// Radio for a payment method code such as `checkmo`.
    #[must_use]
    pub fn payment_method(code: &str) -> LocatorChain {
        LocatorChain::dynamic(
            format!("payment method {code}"),
            vec![
                Selector::TestId(format!("payment-method-{code}").into()),
                Selector::Css(format!("input#{code}").into()),
                Selector::Css(format!("input[name='payment[method]'][value='{code}']").into()),
            ],
        )
    }
}

/// Card form of the payment gateway.
pub mod payment {
    use super::{LocatorChain, Selector, chain};

    pub const CARD_NUMBER: LocatorChain = chain!("card number" => [
        Selector::test_id("cc-number"),
        Selector::css(".payment-method._active input[name='payment[cc_number]']"),
    ]);

    pub const EXP_MONTH: LocatorChain = chain!("card expiry month" => [
        Selector::test_id("cc-exp-month"),
        Selector::css(".payment-method._active select[name='payment[cc_exp_month]']"),
    ]);

    pub const EXP_YEAR: LocatorChain = chain!("card expiry year" => [
        Selector::test_id("cc-exp-year"),
        Selector::css(".payment-method._active select[name='payment[cc_exp_year]']"),
    ]);

    pub const CVV: LocatorChain = chain!("card verification number" => [
        Selector::test_id("cc-cid"),
        Selector::css(".payment-method._active input[name='payment[cc_cid]']"),
    ]);
}

/// Order confirmation page.
pub mod success {
    use super::{LocatorChain, Selector, chain};

    pub const ORDER_NUMBER: LocatorChain = chain!("order number" => [
        Selector::test_id("order-number"),
        Selector::css(".checkout-success .order-number strong"),
        Selector::css(".checkout-success p span"),
    ]);

    pub const CONTINUE_SHOPPING: LocatorChain = chain!("continue shopping link" => [
        Selector::css(".checkout-success a.action.continue"),
        Selector::text("Continue Shopping"),
    ]);
}
