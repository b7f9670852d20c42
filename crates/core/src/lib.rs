//! Storecheck Core - fixture manifests and shared types.
//!
//! This crate provides the declarative test data used across all storecheck
//! components:
//! - `admin` - Admin REST client and the fixture reconciler
//! - `cli` - `seed-all` and `delete-fixtures` binaries
//! - `e2e` - Page objects and storefront specs
//!
//! # Architecture
//!
//! The core crate contains only types and the in-memory manifest store - no
//! network I/O. Manifests are embedded at compile time and may be overridden
//! from a directory at load.
//!
//! # Modules
//!
//! - [`types`] - Newtypes for remote ids, emails, tiers and catalog enums
//! - [`fixture`] - Product, customer and coupon fixture records
//! - [`manifest`] - Manifest store and tier selection

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod fixture;
pub mod manifest;
pub mod types;

pub use fixture::*;
pub use manifest::{
    BASIC_PRODUCT_ID, DEFAULT_CUSTOMER_ID, Manifest, ManifestError, ManifestStore,
    PERCENT_COUPON_ID, TierSelection,
};
pub use types::*;
