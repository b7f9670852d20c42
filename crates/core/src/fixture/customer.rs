use serde::{Deserialize, Serialize};

use super::{Fixture, FixtureKind};
use crate::types::{Email, TierSet};

/// A registered storefront customer seeded for login and checkout tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerFixture {
    pub id: String,
    pub email: Email,
    /// Plaintext test credential used by the login page object.
    pub password: String,
    pub firstname: String,
    pub lastname: String,
    #[serde(default)]
    pub addresses: Vec<Address>,
    pub tier: TierSet,
}

impl CustomerFixture {
    /// First address whose type tag mentions shipping.
    #[must_use]
    pub fn shipping_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default_shipping())
    }

    /// First address whose type tag mentions billing.
    #[must_use]
    pub fn billing_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default_billing())
    }
}

impl Fixture for CustomerFixture {
    const KIND: FixtureKind = FixtureKind::Customer;

    fn id(&self) -> &str {
        &self.id
    }

    fn natural_key(&self) -> &str {
        self.email.as_str()
    }

    fn tiers(&self) -> &TierSet {
        &self.tier
    }
}

/// A postal address attached to a customer fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Address {
    /// Free-form tag such as `shipping`, `billing` or `shipping_billing`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    pub street: Vec<String>,
    pub city: String,
    pub region: String,
    #[serde(default)]
    pub region_id: Option<u32>,
    pub postcode: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    pub telephone: String,
}

impl Address {
    #[must_use]
    pub fn is_default_shipping(&self) -> bool {
        self.kind.contains("shipping")
    }

    #[must_use]
    pub fn is_default_billing(&self) -> bool {
        self.kind.contains("billing")
    }

    /// Address first name, falling back to the owning customer's.
    #[must_use]
    pub fn firstname_or<'a>(&'a self, customer: &'a CustomerFixture) -> &'a str {
        self.firstname.as_deref().unwrap_or(&customer.firstname)
    }

    /// Address last name, falling back to the owning customer's.
    #[must_use]
    pub fn lastname_or<'a>(&'a self, customer: &'a CustomerFixture) -> &'a str {
        self.lastname.as_deref().unwrap_or(&customer.lastname)
    }
}
