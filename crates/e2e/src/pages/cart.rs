//! Shopping cart page.

use tracing::{info, warn};

use super::{CheckoutPage, Storefront};
use crate::browser::Browser;
use crate::error::BrowserError;
use crate::locators::{cart, common};

/// What the storefront answered to a coupon submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponResult {
    pub applied: bool,
    pub message: String,
}

pub struct CartPage<'a, B> {
    sf: &'a Storefront<B>,
}

impl<'a, B: Browser> CartPage<'a, B> {
    /// # Errors
    ///
    /// Returns `BrowserError` if navigation fails or the page never settles.
    pub async fn open(sf: &'a Storefront<B>) -> Result<Self, BrowserError> {
        sf.goto("checkout/cart/").await?;
        Ok(Self { sf })
    }

    /// # Errors
    ///
    /// Returns `BrowserError` if the lookup fails.
    pub async fn line_count(&self) -> Result<usize, BrowserError> {
        self.sf.count(&cart::LINE_ITEMS).await
    }

    /// # Errors
    ///
    /// Returns `BrowserError` if the lookup fails.
    pub async fn is_empty(&self) -> Result<bool, BrowserError> {
        self.sf.is_visible(&cart::EMPTY).await
    }

    /// Submit `code` in the discount block. A rejected code is reported in
    /// the result, not as an error.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError` if the form cannot be used or no message
    /// appears.
    pub async fn apply_coupon(&self, code: &str) -> Result<CouponResult, BrowserError> {
        // The discount block starts collapsed on Luma
        if !self.sf.is_visible(&cart::COUPON_INPUT).await? {
            self.sf.click(&cart::DISCOUNT_TOGGLE).await?;
        }
        self.sf.fill(&cart::COUPON_INPUT, code).await?;
        self.sf.click(&cart::APPLY_COUPON).await?;
        self.sf.settle().await?;

        let message = self.sf.text(&common::ANY_MESSAGE).await?;
        let applied = self.sf.is_visible(&common::SUCCESS_MESSAGE).await?;
        if applied {
            info!(code, %message, "Coupon applied");
        } else {
            warn!(code, %message, "Coupon rejected");
        }
        Ok(CouponResult { applied, message })
    }

    /// # Errors
    ///
    /// Returns `BrowserError` if no discount row is displayed.
    pub async fn discount_text(&self) -> Result<String, BrowserError> {
        self.sf.text(&cart::DISCOUNT_AMOUNT).await
    }

    /// # Errors
    ///
    /// Returns `BrowserError` if the totals block is not displayed.
    pub async fn grand_total_text(&self) -> Result<String, BrowserError> {
        self.sf.text(&cart::GRAND_TOTAL).await
    }

    /// # Errors
    ///
    /// Returns `BrowserError` if the button is missing or checkout never
    /// renders.
    pub async fn proceed_to_checkout(&self) -> Result<CheckoutPage<'a, B>, BrowserError> {
        self.sf.click(&cart::PROCEED_TO_CHECKOUT).await?;
        CheckoutPage::wait(self.sf).await
    }
}
