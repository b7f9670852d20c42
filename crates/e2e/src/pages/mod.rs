//! Page objects for the storefront.
//!
//! Every page borrows a [`Storefront`], which owns the browser session and
//! the wait budget. Interactions wait for the loading mask to clear first.

pub mod cart;
pub mod checkout;
pub mod product;
pub mod success;

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;
use url::Url;

use crate::browser::Browser;
use crate::error::BrowserError;
use crate::locator::{self, ElementState, LocatorChain, Wait};
use crate::locators::common;

pub use cart::{CartPage, CouponResult};
pub use checkout::{CardDetails, CheckoutPage};
pub use product::ProductPage;
pub use success::SuccessPage;

/// A browser session pointed at one storefront.
pub struct Storefront<B> {
    browser: B,
    base_url: Url,
    wait: Wait,
}

impl<B: Browser> Storefront<B> {
    /// `base_url` must end with `/` for relative paths to join under it.
    #[must_use]
    pub const fn new(browser: B, base_url: Url, wait: Wait) -> Self {
        Self {
            browser,
            base_url,
            wait,
        }
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Navigate to `path` relative to the storefront root and settle.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError` if the URL is invalid, navigation fails or the
    /// page never settles.
    pub async fn goto(&self, path: &str) -> Result<(), BrowserError> {
        let url = self.base_url.join(path)?;
        self.browser.navigate(url.as_str()).await?;
        self.settle().await
    }

    /// Wait until no loading indicator is displayed.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError::Timeout` if a loader stays up past the budget.
    pub async fn settle(&self) -> Result<(), BrowserError> {
        locator::wait_for(&self.browser, &common::LOADING_MASK, ElementState::Hidden, self.wait)
            .await?;
        Ok(())
    }

    /// Wait for `chain` to be displayed and return it.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError::Timeout` if it never shows.
    pub async fn visible(&self, chain: &LocatorChain) -> Result<B::Element, BrowserError> {
        locator::wait_for(&self.browser, chain, ElementState::Visible, self.wait)
            .await?
            .ok_or_else(|| BrowserError::ElementNotFound(chain.name().to_string()))
    }

    /// Whether `chain` is displayed right now.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError` if the browser rejects a lookup.
    pub async fn is_visible(&self, chain: &LocatorChain) -> Result<bool, BrowserError> {
        locator::is_visible(&self.browser, chain).await
    }

    /// # Errors
    ///
    /// Returns `BrowserError` if the element never shows or the click fails.
    pub async fn click(&self, chain: &LocatorChain) -> Result<(), BrowserError> {
        self.settle().await?;
        let element = self.visible(chain).await?;
        debug!(locator = chain.name(), "Click");
        self.browser.click(&element).await
    }

    /// # Errors
    ///
    /// Returns `BrowserError` if the field never shows or typing fails.
    pub async fn fill(&self, chain: &LocatorChain, value: &str) -> Result<(), BrowserError> {
        self.settle().await?;
        let element = self.visible(chain).await?;
        self.browser.fill(&element, value).await
    }

    /// # Errors
    ///
    /// Returns `BrowserError` if the select never shows or has no such option.
    pub async fn select(&self, chain: &LocatorChain, value: &str) -> Result<(), BrowserError> {
        self.settle().await?;
        let element = self.visible(chain).await?;
        self.browser.select_option(&element, value).await
    }

    /// Trimmed visible text of `chain`.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError` if the element never shows.
    pub async fn text(&self, chain: &LocatorChain) -> Result<String, BrowserError> {
        let element = self.visible(chain).await?;
        Ok(self.browser.text(&element).await?.trim().to_string())
    }

    /// Number of elements `chain` currently resolves to.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError` if the browser rejects a lookup.
    pub async fn count(&self, chain: &LocatorChain) -> Result<usize, BrowserError> {
        Ok(locator::resolve(&self.browser, chain).await?.len())
    }
}

/// Parse a rendered price such as `$1,234.50` into a decimal.
#[must_use]
pub fn parse_price(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    Decimal::from_str(&cleaned).ok()
}
