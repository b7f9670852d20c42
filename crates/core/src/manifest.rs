//! Manifest store and tier selection.
//!
//! Manifests are YAML sequences of fixture records, one file per kind. The
//! default manifests are compiled into this crate; a directory can override
//! any of them at load time. Once loaded, a [`ManifestStore`] is read-only.
//!
//! ```
//! use storecheck_core::{Fixture, ManifestStore, Tier};
//!
//! let store = ManifestStore::load().unwrap();
//! let smoke = store.select_for_tier(Tier::A);
//! assert!(smoke.products.iter().all(|p| p.in_tier(Tier::A)));
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::fixture::{CouponFixture, CustomerFixture, Fixture, FixtureKind, ProductFixture};
use crate::types::Tier;

/// Id of the product every storefront test relies on.
pub const BASIC_PRODUCT_ID: &str = "simple-basic";
/// Id of the customer used for login and registered checkout.
pub const DEFAULT_CUSTOMER_ID: &str = "customer-default";
/// Id of the coupon used by the smoke coupon test.
pub const PERCENT_COUPON_ID: &str = "coupon-percent-10";

const EMBEDDED_PRODUCTS: &str = include_str!("../manifests/products.yaml");
const EMBEDDED_CUSTOMERS: &str = include_str!("../manifests/customers.yaml");
const EMBEDDED_COUPONS: &str = include_str!("../manifests/coupons.yaml");

/// Errors raised while loading or querying manifests.
///
/// All of these are configuration errors: the run should stop before any
/// remote call is made.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {kind} manifest: {source}")]
    Parse {
        kind: FixtureKind,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: FixtureKind, id: String },

    #[error("duplicate {kind} {} '{key}'", .kind.natural_key_name())]
    DuplicateKey { kind: FixtureKind, key: String },

    #[error("{kind} '{id}' has an empty tier list")]
    EmptyTier { kind: FixtureKind, id: String },

    #[error("{kind} '{id}' not found in manifest")]
    NotFound { kind: FixtureKind, id: String },
}

/// An ordered, validated list of fixtures of one kind.
#[derive(Debug, Clone)]
pub struct Manifest<T> {
    entries: Vec<T>,
}

impl<T: Fixture> Manifest<T> {
    /// Validate `entries` and wrap them.
    ///
    /// # Errors
    ///
    /// Returns an error if an id or natural key repeats, or a fixture has no
    /// tiers.
    pub fn new(entries: Vec<T>) -> Result<Self, ManifestError> {
        validate(&entries)?;
        Ok(Self { entries })
    }

    /// Parse and validate a YAML manifest.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Parse` for malformed YAML, or any error from
    /// [`Manifest::new`].
    pub fn from_yaml(yaml: &str) -> Result<Self, ManifestError>
    where
        T: DeserializeOwned,
    {
        let entries: Vec<T> = serde_yaml::from_str(yaml).map_err(|source| ManifestError::Parse {
            kind: T::KIND,
            source,
        })?;
        Self::new(entries)
    }

    /// Every fixture, in declaration order.
    #[must_use]
    pub fn all(&self) -> &[T] {
        &self.entries
    }

    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.id() == id)
    }

    #[must_use]
    pub fn by_natural_key(&self, key: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.natural_key() == key)
    }

    /// Look up a fixture that must exist.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::NotFound` if no fixture has this id.
    pub fn require(&self, id: &str) -> Result<&T, ManifestError> {
        self.by_id(id).ok_or_else(|| ManifestError::NotFound {
            kind: T::KIND,
            id: id.to_owned(),
        })
    }

    /// The sub-sequence of fixtures that belong to `tier`, in manifest order.
    #[must_use]
    pub fn select_for_tier(&self, tier: Tier) -> Vec<&T> {
        self.entries.iter().filter(|e| e.in_tier(tier)).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fixtures of every kind selected for one tier.
#[derive(Debug, Clone)]
pub struct TierSelection<'a> {
    pub tier: Tier,
    pub products: Vec<&'a ProductFixture>,
    pub customers: Vec<&'a CustomerFixture>,
    pub coupons: Vec<&'a CouponFixture>,
}

impl TierSelection<'_> {
    #[must_use]
    pub fn total(&self) -> usize {
        self.products.len() + self.customers.len() + self.coupons.len()
    }
}

/// All three manifests, loaded once at process start.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    products: Manifest<ProductFixture>,
    customers: Manifest<CustomerFixture>,
    coupons: Manifest<CouponFixture>,
}

impl ManifestStore {
    /// Load the manifests compiled into this crate.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded manifest is invalid or a well-known
    /// fixture is missing.
    pub fn load() -> Result<Self, ManifestError> {
        Self::from_manifests(
            Manifest::from_yaml(EMBEDDED_PRODUCTS)?,
            Manifest::from_yaml(EMBEDDED_CUSTOMERS)?,
            Manifest::from_yaml(EMBEDDED_COUPONS)?,
        )
    }

    /// Load manifests from `dir`, falling back to the embedded copy for any
    /// kind whose file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, or a well-known
    /// fixture is missing.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let dir = dir.as_ref();
        let products = read_override(dir, FixtureKind::Product)?;
        let customers = read_override(dir, FixtureKind::Customer)?;
        let coupons = read_override(dir, FixtureKind::Coupon)?;

        Self::from_manifests(
            Manifest::from_yaml(products.as_deref().unwrap_or(EMBEDDED_PRODUCTS))?,
            Manifest::from_yaml(customers.as_deref().unwrap_or(EMBEDDED_CUSTOMERS))?,
            Manifest::from_yaml(coupons.as_deref().unwrap_or(EMBEDDED_COUPONS))?,
        )
    }

    /// Assemble a store from already-validated manifests.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::NotFound` if a well-known fixture is missing.
    pub fn from_manifests(
        products: Manifest<ProductFixture>,
        customers: Manifest<CustomerFixture>,
        coupons: Manifest<CouponFixture>,
    ) -> Result<Self, ManifestError> {
        let store = Self {
            products,
            customers,
            coupons,
        };
        store.basic_product()?;
        store.default_customer()?;
        store.percent_coupon()?;
        Ok(store)
    }

    #[must_use]
    pub const fn products(&self) -> &Manifest<ProductFixture> {
        &self.products
    }

    #[must_use]
    pub const fn customers(&self) -> &Manifest<CustomerFixture> {
        &self.customers
    }

    #[must_use]
    pub const fn coupons(&self) -> &Manifest<CouponFixture> {
        &self.coupons
    }

    /// The basic in-stock product every storefront test uses.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::NotFound` if the manifest lacks it.
    pub fn basic_product(&self) -> Result<&ProductFixture, ManifestError> {
        self.products.require(BASIC_PRODUCT_ID)
    }

    /// The default registered customer.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::NotFound` if the manifest lacks it.
    pub fn default_customer(&self) -> Result<&CustomerFixture, ManifestError> {
        self.customers.require(DEFAULT_CUSTOMER_ID)
    }

    /// The percentage coupon used by the smoke suite.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::NotFound` if the manifest lacks it.
    pub fn percent_coupon(&self) -> Result<&CouponFixture, ManifestError> {
        self.coupons.require(PERCENT_COUPON_ID)
    }

    /// Select every kind of fixture for `tier`.
    #[must_use]
    pub fn select_for_tier(&self, tier: Tier) -> TierSelection<'_> {
        TierSelection {
            tier,
            products: self.products.select_for_tier(tier),
            customers: self.customers.select_for_tier(tier),
            coupons: self.coupons.select_for_tier(tier),
        }
    }
}

fn validate<T: Fixture>(entries: &[T]) -> Result<(), ManifestError> {
    let mut ids = HashSet::new();
    let mut keys = HashSet::new();

    for entry in entries {
        if !ids.insert(entry.id()) {
            return Err(ManifestError::DuplicateId {
                kind: T::KIND,
                id: entry.id().to_owned(),
            });
        }
        if !keys.insert(entry.natural_key()) {
            return Err(ManifestError::DuplicateKey {
                kind: T::KIND,
                key: entry.natural_key().to_owned(),
            });
        }
        if entry.tiers().is_empty() {
            return Err(ManifestError::EmptyTier {
                kind: T::KIND,
                id: entry.id().to_owned(),
            });
        }
    }
    Ok(())
}

fn read_override(dir: &Path, kind: FixtureKind) -> Result<Option<String>, ManifestError> {
    let path = dir.join(kind.manifest_file());
    if !path.exists() {
        return Ok(None);
    }
    std::fs::read_to_string(&path)
        .map(Some)
        .map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })
}
