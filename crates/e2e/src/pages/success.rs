//! Order confirmation page.

use tracing::info;

use super::Storefront;
use crate::browser::Browser;
use crate::error::BrowserError;
use crate::locators::success;

pub struct SuccessPage<'a, B> {
    sf: &'a Storefront<B>,
}

impl<'a, B: Browser> SuccessPage<'a, B> {
    /// Wait for the confirmation to render after an order is placed.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError::Timeout` if no order number appears.
    pub async fn wait(sf: &'a Storefront<B>) -> Result<Self, BrowserError> {
        sf.settle().await?;
        sf.visible(&success::ORDER_NUMBER).await?;
        Ok(Self { sf })
    }

    /// Order increment id, without the leading `#` some themes print.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError` if the number is not displayed.
    pub async fn order_number(&self) -> Result<String, BrowserError> {
        let raw = self.sf.text(&success::ORDER_NUMBER).await?;
        let number = raw.trim_start_matches('#').trim().to_string();
        info!(order = %number, "Order confirmed");
        Ok(number)
    }

    /// # Errors
    ///
    /// Returns `BrowserError` if the link is not displayed.
    pub async fn continue_shopping(&self) -> Result<(), BrowserError> {
        self.sf.click(&success::CONTINUE_SHOPPING).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::storefront;

    #[tokio::test]
    async fn test_order_number_strips_hash() {
        let sf = storefront();
        sf.browser().add(".checkout-success .order-number strong", "#000000042", true);
        let page = SuccessPage::wait(&sf).await.unwrap();
        assert_eq!(page.order_number().await.unwrap(), "000000042");
    }

    #[tokio::test]
    async fn test_wait_times_out_without_confirmation() {
        let sf = storefront();
        let err = SuccessPage::wait(&sf).await.err().unwrap();
        assert!(matches!(err, BrowserError::Timeout { ref locator, .. } if locator == "order number"));
    }
}
