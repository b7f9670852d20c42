//! storecheck CLI - fixture seeding and cleanup.
//!
//! # Usage
//!
//! ```bash
//! # Seed the default tier (TEST_TIER, else B)
//! seed-all
//!
//! # Seed the smoke tier
//! seed-all A
//!
//! # Show what the pattern sweep would delete
//! delete-fixtures --dry
//!
//! # Delete exactly the tier C fixtures
//! delete-fixtures --tier C
//! ```
//!
//! Both binaries read `BASE_URL`, `ADMIN_USER` and `ADMIN_PASS` (a `.env`
//! file is honoured) and exit non-zero when configuration is missing or the
//! admin credentials are rejected.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod commands;

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
