//! One-page checkout.

use storecheck_core::{Address, CustomerFixture};
use tracing::{debug, info};

use super::{Storefront, SuccessPage};
use crate::browser::Browser;
use crate::error::BrowserError;
use crate::locators::{checkout, payment};

/// Card entered in the gateway's card form.
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub number: String,
    /// Two digits, `01`-`12`.
    pub exp_month: String,
    /// Four digits.
    pub exp_year: String,
    pub cvv: String,
}

impl CardDetails {
    /// Visa test number accepted by sandbox gateways.
    #[must_use]
    pub fn test_visa() -> Self {
        Self {
            number: "4111111111111111".to_string(),
            exp_month: "12".to_string(),
            exp_year: "2030".to_string(),
            cvv: "123".to_string(),
        }
    }

    fn masked(&self) -> String {
        let tail = self.number.len().saturating_sub(4);
        format!("****{}", self.number.get(tail..).unwrap_or_default())
    }
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &self.masked())
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}

pub struct CheckoutPage<'a, B> {
    sf: &'a Storefront<B>,
}

impl<'a, B: Browser> CheckoutPage<'a, B> {
    /// Navigate straight to checkout.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError` if the shipping step never renders.
    pub async fn open(sf: &'a Storefront<B>) -> Result<Self, BrowserError> {
        sf.goto("checkout/").await?;
        Self::wait(sf).await
    }

    /// Wait for the shipping step of a checkout already being loaded.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError` if the shipping step never renders.
    pub async fn wait(sf: &'a Storefront<B>) -> Result<Self, BrowserError> {
        sf.settle().await?;
        sf.visible(&checkout::FIRSTNAME).await?;
        Ok(Self { sf })
    }

    /// # Errors
    ///
    /// Returns `BrowserError` if the email field is not displayed.
    pub async fn fill_guest_email(&self, email: &str) -> Result<(), BrowserError> {
        self.sf.fill(&checkout::EMAIL, email).await
    }

    /// Fill the new-address form from a fixture address. Names fall back to
    /// the customer's.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError` if a field is missing.
    pub async fn fill_shipping_address(
        &self,
        customer: &CustomerFixture,
        address: &Address,
    ) -> Result<(), BrowserError> {
        let sf = self.sf;
        sf.fill(&checkout::FIRSTNAME, address.firstname_or(customer))
            .await?;
        sf.fill(&checkout::LASTNAME, address.lastname_or(customer))
            .await?;
        for (line, chain) in address.street.iter().zip(checkout::STREET.iter()) {
            sf.fill(chain, line).await?;
        }
        sf.fill(&checkout::CITY, &address.city).await?;

        // Country drives which region control is rendered
        sf.select(&checkout::COUNTRY, &address.country).await?;
        sf.settle().await?;
        match address.region_id {
            Some(id) if sf.is_visible(&checkout::REGION_SELECT).await? => {
                sf.select(&checkout::REGION_SELECT, &id.to_string()).await?;
            }
            _ => sf.fill(&checkout::REGION_INPUT, &address.region).await?,
        }

        sf.fill(&checkout::POSTCODE, &address.postcode).await?;
        sf.fill(&checkout::TELEPHONE, &address.telephone).await?;
        debug!(city = %address.city, country = %address.country, "Shipping address filled");
        Ok(())
    }

    /// Pick a shipping method by its `carrier_method` code.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError` if the method is not offered.
    pub async fn select_shipping_method(&self, code: &str) -> Result<(), BrowserError> {
        self.sf.settle().await?;
        self.sf.visible(&checkout::SHIPPING_METHODS).await?;
        self.sf.click(&checkout::shipping_method(code)).await
    }

    /// Leave the shipping step and wait for payment methods.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError` if the payment step never renders.
    pub async fn continue_to_payment(&self) -> Result<(), BrowserError> {
        self.sf.click(&checkout::NEXT).await?;
        self.sf.settle().await?;
        self.sf.visible(&checkout::PAYMENT_METHODS).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `BrowserError` if the method is not offered.
    pub async fn select_payment_method(&self, code: &str) -> Result<(), BrowserError> {
        self.sf.click(&checkout::payment_method(code)).await?;
        self.sf.settle().await
    }

    /// # Errors
    ///
    /// Returns `BrowserError` if the card form is not displayed.
    pub async fn fill_card(&self, card: &CardDetails) -> Result<(), BrowserError> {
        self.sf.fill(&payment::CARD_NUMBER, &card.number).await?;
        self.sf.select(&payment::EXP_MONTH, &card.exp_month).await?;
        self.sf.select(&payment::EXP_YEAR, &card.exp_year).await?;
        self.sf.fill(&payment::CVV, &card.cvv).await?;
        debug!(card = ?card, "Card entered");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `BrowserError` if the order is not confirmed.
    pub async fn place_order(&self) -> Result<SuccessPage<'a, B>, BrowserError> {
        self.sf.click(&checkout::PLACE_ORDER).await?;
        info!("Order submitted");
        SuccessPage::wait(self.sf).await
    }
}
