//! Magento-compatible admin REST API client.
//!
//! # Architecture
//!
//! - Two-step authentication: admin username/password → bearer token → API
//! - JSON request/response bodies; list endpoints wrap results in `items`
//! - Searches use `searchCriteria` query parameters built by [`SearchCriteria`]
//! - [`CommerceApi`] is the seam the reconciler depends on, so it can run
//!   against the real platform or an in-memory double
//!
//! # Example
//!
//! ```rust,ignore
//! use storecheck_admin::magento::{AdminClient, CommerceApi};
//!
//! let client = AdminClient::connect(&config).await?;
//! if client.find_product("TEST_SIMPLE_001").await?.is_none() {
//!     // seed it
//! }
//! ```

pub mod auth;
pub mod client;
pub mod conversions;
pub mod search;
pub mod types;

pub use client::AdminClient;
pub use search::{Condition, SearchCriteria};
pub use types::*;

use storecheck_core::{CustomerId, RuleId};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur when interacting with the admin API.
#[derive(Debug, Error)]
pub enum AdminApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Admin credentials were rejected.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// No bearer token available (authentication required).
    #[error("No access token - admin authentication required")]
    NoAccessToken,

    /// The token was rejected by an API call.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The platform rejected the request.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },

    /// The configured URL could not be joined with an endpoint path.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The client could not be built from the harness configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Operations the fixture reconciler needs from the commerce platform.
///
/// Lookups return `Ok(None)` when the natural key does not exist remotely.
/// Search methods take SQL `LIKE` patterns.
#[allow(async_fn_in_trait)]
pub trait CommerceApi {
    async fn find_product(&self, sku: &str) -> Result<Option<RemoteProduct>, AdminApiError>;
    async fn create_product(&self, payload: &ProductPayload) -> Result<RemoteProduct, AdminApiError>;
    async fn search_products(&self, sku_like: &str) -> Result<Vec<RemoteProduct>, AdminApiError>;
    async fn delete_product(&self, sku: &str) -> Result<(), AdminApiError>;

    async fn find_customer(&self, email: &str) -> Result<Option<RemoteCustomer>, AdminApiError>;
    async fn create_customer(
        &self,
        payload: &CustomerPayload,
    ) -> Result<RemoteCustomer, AdminApiError>;
    async fn search_customers(
        &self,
        email_like: &str,
    ) -> Result<Vec<RemoteCustomer>, AdminApiError>;
    async fn delete_customer(&self, id: CustomerId) -> Result<(), AdminApiError>;

    async fn find_coupon(&self, code: &str) -> Result<Option<RemoteCoupon>, AdminApiError>;
    async fn create_rule(&self, payload: &RulePayload) -> Result<RemoteRule, AdminApiError>;
    async fn create_coupon(&self, payload: &CouponPayload) -> Result<RemoteCoupon, AdminApiError>;
    async fn search_rules(&self, name_like: &str) -> Result<Vec<RemoteRule>, AdminApiError>;
    async fn delete_rule(&self, id: RuleId) -> Result<(), AdminApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = AdminApiError::Api {
            status: 400,
            message: "URL key for specified store already exists.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (HTTP 400): URL key for specified store already exists."
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = AdminApiError::NotFound("product TEST_SIMPLE_001".to_string());
        assert_eq!(err.to_string(), "Not found: product TEST_SIMPLE_001");
    }
}
