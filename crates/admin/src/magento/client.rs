//! Admin REST API client.
//!
//! Every call goes through [`AdminClient::request`], which attaches the
//! bearer token and maps non-2xx responses onto [`AdminApiError`].

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use storecheck_core::{CustomerId, RuleId};
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};
use url::Url;

use super::auth::{AdminToken, authenticate};
use super::search::SearchCriteria;
use super::types::{
    CouponPayload, CustomerPayload, ErrorBody, ProductPayload, RemoteCoupon, RemoteCustomer,
    RemoteOrder, RemoteProduct, RemoteRule, RulePayload, SearchResults, StoreConfig,
};
use super::{AdminApiError, CommerceApi};
use crate::config::HarnessConfig;

/// Rows requested per page by sweep searches.
const SWEEP_PAGE_SIZE: u32 = 500;

/// Admin REST API client.
///
/// Cheap to clone. The bearer token is cached in memory and re-obtained with
/// the stored credentials once it is close to expiry or was rejected.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    rest_root: Url,
    username: String,
    password: SecretString,
    token: RwLock<Option<AdminToken>>,
}

impl AdminClient {
    /// Create a client without a token.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError::Config` if the REST root cannot be built and
    /// `AdminApiError::Http` if the HTTP client cannot be created.
    pub fn new(config: &HarnessConfig) -> Result<Self, AdminApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(AdminClientInner {
                client,
                rest_root: config.rest_root()?,
                username: config.admin_user.clone(),
                password: config.admin_pass.clone(),
                token: RwLock::new(None),
            }),
        })
    }

    /// Create a client and obtain a token.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError::AuthenticationFailed` if the credentials are
    /// rejected, or any error from [`AdminClient::new`].
    pub async fn connect(config: &HarnessConfig) -> Result<Self, AdminApiError> {
        let client = Self::new(config)?;
        client.authenticate().await?;
        Ok(client)
    }

    /// REST root every endpoint path is joined onto.
    #[must_use]
    pub fn rest_root(&self) -> &Url {
        &self.inner.rest_root
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Obtain a fresh token with the configured admin credentials.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError::AuthenticationFailed` if the credentials are
    /// rejected.
    #[instrument(skip(self), fields(username = %self.inner.username))]
    pub async fn authenticate(&self) -> Result<(), AdminApiError> {
        let token = authenticate(
            &self.inner.client,
            &self.inner.rest_root,
            &self.inner.username,
            &self.inner.password,
        )
        .await?;

        debug!(expires_at = %token.expires_at, "Admin token obtained");
        *self.inner.token.write().await = Some(token);
        Ok(())
    }

    /// Check if we have a valid (non-expired) token.
    pub async fn has_valid_token(&self) -> bool {
        self.inner
            .token
            .read()
            .await
            .as_ref()
            .is_some_and(|token| !token.is_expired())
    }

    async fn access_token(&self) -> Result<String, AdminApiError> {
        if !self.has_valid_token().await {
            debug!("No usable admin token, authenticating");
            self.authenticate().await?;
        }
        self.inner
            .token
            .read()
            .await
            .as_ref()
            .map(|token| token.token.expose_secret().to_string())
            .ok_or(AdminApiError::NoAccessToken)
    }

    // =========================================================================
    // Request Execution
    // =========================================================================

    fn endpoint(&self, path: &str, criteria: Option<&SearchCriteria>) -> Result<Url, AdminApiError> {
        let mut url = self.inner.rest_root.join(path)?;
        if let Some(criteria) = criteria {
            url.query_pairs_mut().extend_pairs(criteria.query_pairs());
        }
        Ok(url)
    }

    /// Send an authorized request and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError::Unauthorized` on 401, `AdminApiError::NotFound`
    /// on 404 and `AdminApiError::Api` for any other non-2xx status.
    async fn request<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T, AdminApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let access_token = self.access_token().await?;

        let mut builder = self
            .inner
            .client
            .request(method, url)
            .header("Authorization", format!("Bearer {access_token}"));
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&text)?);
        }

        let message = error_message(status, &text);
        match status {
            StatusCode::UNAUTHORIZED => {
                // The next call authenticates again.
                *self.inner.token.write().await = None;
                Err(AdminApiError::Unauthorized(message))
            }
            StatusCode::NOT_FOUND => Err(AdminApiError::NotFound(message)),
            _ => Err(AdminApiError::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        criteria: Option<&SearchCriteria>,
    ) -> Result<T, AdminApiError> {
        let url = self.endpoint(path, criteria)?;
        self.request::<(), T>(Method::GET, url, None).await
    }

    /// Like `get`, but a 404 is `Ok(None)`.
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, AdminApiError> {
        match self.get(path, None).await {
            Ok(value) => Ok(Some(value)),
            Err(AdminApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn search<T: DeserializeOwned>(
        &self,
        path: &str,
        criteria: &SearchCriteria,
    ) -> Result<Vec<T>, AdminApiError> {
        let results: SearchResults<T> = self.get(path, Some(criteria)).await?;
        Ok(results.into_items())
    }

    /// Fetch every page of a search before returning.
    async fn search_all<T: DeserializeOwned>(
        &self,
        path: &str,
        criteria: &SearchCriteria,
        page_size: u32,
    ) -> Result<Vec<T>, AdminApiError> {
        let per_page = usize::try_from(page_size).unwrap_or(usize::MAX);
        let mut collected = Vec::new();
        for page in 1.. {
            let criteria = criteria.clone().page_size(page_size).current_page(page);
            let results: SearchResults<T> = self.get(path, Some(&criteria)).await?;
            let total = usize::try_from(results.total_count).unwrap_or(usize::MAX);
            let items = results.into_items();
            let fetched = items.len();
            collected.extend(items);

            // Past the last page the platform repeats it, so stop on the count.
            if fetched < per_page || collected.len() >= total {
                debug!(path, pages = page, total, "Search complete");
                break;
            }
        }
        Ok(collected)
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AdminApiError> {
        let url = self.endpoint(path, None)?;
        self.request(Method::POST, url, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), AdminApiError> {
        let url = self.endpoint(path, None)?;
        let deleted: bool = self.request::<(), bool>(Method::DELETE, url, None).await?;
        if !deleted {
            warn!(path, "Delete endpoint answered false");
        }
        Ok(())
    }

    // =========================================================================
    // Orders and store health
    // =========================================================================

    /// Find an order by its storefront-visible increment id.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError` if the search fails.
    #[instrument(skip(self))]
    pub async fn find_order_by_increment_id(
        &self,
        increment_id: &str,
    ) -> Result<Option<RemoteOrder>, AdminApiError> {
        let criteria = SearchCriteria::eq("increment_id", increment_id).page_size(1);
        let orders: Vec<RemoteOrder> = self.search("orders", &criteria).await?;
        Ok(orders.into_iter().next())
    }

    /// Fetch store configuration; used as a connectivity check.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError` if the platform cannot be reached or the token
    /// is rejected.
    #[instrument(skip(self))]
    pub async fn store_configs(&self) -> Result<Vec<StoreConfig>, AdminApiError> {
        self.get("store/storeConfigs", None).await
    }
}

impl CommerceApi for AdminClient {
    #[instrument(skip(self))]
    async fn find_product(&self, sku: &str) -> Result<Option<RemoteProduct>, AdminApiError> {
        self.get_optional(&product_path(sku)).await
    }

    #[instrument(skip(self, payload), fields(sku = %payload.product.sku))]
    async fn create_product(&self, payload: &ProductPayload) -> Result<RemoteProduct, AdminApiError> {
        self.post("products", payload).await
    }

    #[instrument(skip(self))]
    async fn search_products(&self, sku_like: &str) -> Result<Vec<RemoteProduct>, AdminApiError> {
        let criteria = SearchCriteria::like("sku", sku_like);
        self.search_all("products", &criteria, SWEEP_PAGE_SIZE).await
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, sku: &str) -> Result<(), AdminApiError> {
        self.delete(&product_path(sku)).await
    }

    #[instrument(skip(self))]
    async fn find_customer(&self, email: &str) -> Result<Option<RemoteCustomer>, AdminApiError> {
        let criteria = SearchCriteria::eq("email", email).page_size(1);
        let customers: Vec<RemoteCustomer> = self.search("customers/search", &criteria).await?;
        Ok(customers.into_iter().next())
    }

    #[instrument(skip(self, payload), fields(email = %payload.customer.email))]
    async fn create_customer(
        &self,
        payload: &CustomerPayload,
    ) -> Result<RemoteCustomer, AdminApiError> {
        self.post("customers", payload).await
    }

    #[instrument(skip(self))]
    async fn search_customers(
        &self,
        email_like: &str,
    ) -> Result<Vec<RemoteCustomer>, AdminApiError> {
        let criteria = SearchCriteria::like("email", email_like);
        self.search_all("customers/search", &criteria, SWEEP_PAGE_SIZE).await
    }

    #[instrument(skip(self))]
    async fn delete_customer(&self, id: CustomerId) -> Result<(), AdminApiError> {
        self.delete(&format!("customers/{id}")).await
    }

    #[instrument(skip(self))]
    async fn find_coupon(&self, code: &str) -> Result<Option<RemoteCoupon>, AdminApiError> {
        let criteria = SearchCriteria::eq("code", code).page_size(1);
        let coupons: Vec<RemoteCoupon> = self.search("coupons/search", &criteria).await?;
        Ok(coupons.into_iter().next())
    }

    #[instrument(skip(self, payload), fields(name = %payload.rule.name))]
    async fn create_rule(&self, payload: &RulePayload) -> Result<RemoteRule, AdminApiError> {
        self.post("salesRules", payload).await
    }

    #[instrument(skip(self, payload), fields(code = %payload.coupon.code, rule_id = %payload.coupon.rule_id))]
    async fn create_coupon(&self, payload: &CouponPayload) -> Result<RemoteCoupon, AdminApiError> {
        self.post("coupons", payload).await
    }

    #[instrument(skip(self))]
    async fn search_rules(&self, name_like: &str) -> Result<Vec<RemoteRule>, AdminApiError> {
        let criteria = SearchCriteria::like("name", name_like);
        self.search_all("salesRules/search", &criteria, SWEEP_PAGE_SIZE).await
    }

    #[instrument(skip(self))]
    async fn delete_rule(&self, id: RuleId) -> Result<(), AdminApiError> {
        self.delete(&format!("salesRules/{id}")).await
    }
}

/// `products/{sku}` with the SKU percent-encoded as a single path segment.
fn product_path(sku: &str) -> String {
    format!("products/{}", urlencoding::encode(sku))
}

/// Human-readable message for a failed response.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body).map_or_else(
        |_| {
            if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body.trim().to_string()
            }
        },
        |error| error.render(),
    )
}
