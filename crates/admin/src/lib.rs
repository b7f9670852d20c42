//! storecheck admin library.
//!
//! Talks to the commerce platform's admin REST API and reconciles the
//! fixture manifests from `storecheck-core` against it.
//!
//! # Security
//!
//! This crate holds admin credentials for the target environment:
//! - Admin username/password from `ADMIN_USER` / `ADMIN_PASS`
//! - A bearer token with full catalog, customer and promotion access
//!
//! Only point it at disposable test environments.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod magento;
pub mod reconcile;

pub use config::{ConfigError, HarnessConfig, SweepPatterns};
pub use magento::{AdminApiError, AdminClient, CommerceApi};
pub use reconcile::{
    CleanupReport, DeleteOutcome, DeleteRecord, FixtureOutcome, Outcome, Reconciler, SeedReport,
};
