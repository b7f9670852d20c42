//! Declarative test-data records.
//!
//! A fixture is identified locally by `id` and remotely by its natural key
//! (SKU, email or coupon code). The reconciler only ever uses the natural
//! key to decide whether a fixture already exists on the platform.

mod coupon;
mod customer;
mod product;

pub use coupon::{CouponFixture, DEFAULT_VALID_DAYS};
pub use customer::{Address, CustomerFixture};
pub use product::ProductFixture;

use serde::{Deserialize, Serialize};

use crate::types::{Tier, TierSet};

/// The three kinds of fixture a manifest can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureKind {
    Product,
    Customer,
    Coupon,
}

impl FixtureKind {
    /// Name of the natural key for this kind, used in messages.
    #[must_use]
    pub const fn natural_key_name(self) -> &'static str {
        match self {
            Self::Product => "sku",
            Self::Customer => "email",
            Self::Coupon => "code",
        }
    }

    /// Default manifest file name for this kind.
    #[must_use]
    pub const fn manifest_file(self) -> &'static str {
        match self {
            Self::Product => "products.yaml",
            Self::Customer => "customers.yaml",
            Self::Coupon => "coupons.yaml",
        }
    }
}

impl std::fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Product => write!(f, "product"),
            Self::Customer => write!(f, "customer"),
            Self::Coupon => write!(f, "coupon"),
        }
    }
}

/// Common accessors shared by every fixture record.
pub trait Fixture {
    /// Which manifest this record lives in.
    const KIND: FixtureKind;

    /// Local identity, unique within the manifest.
    fn id(&self) -> &str;

    /// Remote identity, unique within the manifest.
    fn natural_key(&self) -> &str;

    /// Tiers this fixture belongs to.
    fn tiers(&self) -> &TierSet;

    /// Whether this fixture is part of `tier`.
    fn in_tier(&self, tier: Tier) -> bool {
        self.tiers().contains(tier)
    }
}
