//! Product detail page.

use rust_decimal::Decimal;
use storecheck_core::ProductFixture;
use tracing::info;

use super::{Storefront, parse_price};
use crate::browser::Browser;
use crate::error::BrowserError;
use crate::locators::{common, product};

pub struct ProductPage<'a, B> {
    sf: &'a Storefront<B>,
}

impl<'a, B: Browser> ProductPage<'a, B> {
    /// Open `{url_key}.html` and wait for the add-to-cart button.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError` if the page does not render a buyable product.
    pub async fn open(sf: &'a Storefront<B>, url_key: &str) -> Result<Self, BrowserError> {
        sf.goto(&format!("{url_key}.html")).await?;
        sf.visible(&product::ADD_TO_CART).await?;
        Ok(Self { sf })
    }

    /// Open the page of a seeded product.
    ///
    /// # Errors
    ///
    /// See [`ProductPage::open`].
    pub async fn open_fixture(
        sf: &'a Storefront<B>,
        fixture: &ProductFixture,
    ) -> Result<Self, BrowserError> {
        Self::open(sf, &fixture.url_key_or_default()).await
    }

    /// # Errors
    ///
    /// Returns `BrowserError` if the title is not displayed.
    pub async fn title(&self) -> Result<String, BrowserError> {
        self.sf.text(&common::PAGE_TITLE).await
    }

    /// Displayed final price.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError::ElementNotFound` if the price block is missing
    /// or unreadable.
    pub async fn price(&self) -> Result<Decimal, BrowserError> {
        let text = self.sf.text(&product::PRICE).await?;
        parse_price(&text).ok_or_else(|| {
            BrowserError::ElementNotFound(format!("{} (unreadable: {text:?})", product::PRICE.name()))
        })
    }

    /// # Errors
    ///
    /// Returns `BrowserError` if the quantity input is not displayed.
    pub async fn set_quantity(&self, qty: u32) -> Result<(), BrowserError> {
        self.sf.fill(&product::QTY, &qty.to_string()).await
    }

    /// # Errors
    ///
    /// Returns `BrowserError` if the lookup fails.
    pub async fn is_out_of_stock(&self) -> Result<bool, BrowserError> {
        self.sf.is_visible(&product::OUT_OF_STOCK).await
    }

    /// Click add-to-cart and return the confirmation message.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError::Timeout` if no success message appears.
    pub async fn add_to_cart(&self) -> Result<String, BrowserError> {
        self.sf.click(&product::ADD_TO_CART).await?;
        self.sf.settle().await?;
        let message = self.sf.text(&common::SUCCESS_MESSAGE).await?;
        info!(%message, "Added to cart");
        Ok(message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;
    use crate::testing::{Effect, storefront};

    #[tokio::test]
    async fn test_open_and_read() {
        let sf = storefront();
        sf.browser().add("#product-addtocart-button", "Add to Cart", true);
        sf.browser().add("h1.page-title span.base", "Storecheck Simple", true);
        sf.browser().add(".product-info-main .price-box .price", "$19.99", true);

        let page = ProductPage::open(&sf, "storecheck-simple").await.unwrap();
        assert_eq!(
            sf.browser().navigations(),
            vec!["https://shop.test/storecheck-simple.html"]
        );
        assert_eq!(page.title().await.unwrap(), "Storecheck Simple");
        assert_eq!(page.price().await.unwrap(), dec!(19.99));
        assert!(!page.is_out_of_stock().await.unwrap());
    }

    #[tokio::test]
    async fn test_add_to_cart_returns_message() {
        let sf = storefront();
        let button = sf.browser().add("add-to-cart", "Add to Cart", true);
        let qty = sf.browser().add("#qty", "", true);
        let message = sf.browser().add(
            ".message-success",
            " You added Storecheck Simple to your shopping cart. ",
            false,
        );
        sf.browser().on_click(button, Effect::Show(message));

        let page = ProductPage::open(&sf, "storecheck-simple").await.unwrap();
        page.set_quantity(2).await.unwrap();
        assert_eq!(sf.browser().value_of(qty), "2");

        let text = page.add_to_cart().await.unwrap();
        assert_eq!(text, "You added Storecheck Simple to your shopping cart.");
    }

    #[tokio::test]
    async fn test_unreadable_price() {
        let sf = storefront();
        sf.browser().add("add-to-cart", "Add to Cart", true);
        sf.browser().add("product-price", "Call for price", true);
        let page = ProductPage::open(&sf, "x").await.unwrap();
        let err = page.price().await.unwrap_err();
        assert!(matches!(err, BrowserError::ElementNotFound(ref m) if m.contains("Call for price")));
    }
}
