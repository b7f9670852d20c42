//! Admin token authentication.
//!
//! `POST integration/admin/token` exchanges admin credentials for a bearer
//! token. The platform answers with a bare JSON string.

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::instrument;
use url::Url;

use super::AdminApiError;
use super::types::ErrorBody;

/// Path of the token endpoint relative to the REST root.
const TOKEN_PATH: &str = "integration/admin/token";

/// Default admin token lifetime on the platform.
const TOKEN_LIFETIME_HOURS: i64 = 4;

/// Refresh this long before the platform would reject the token.
const EXPIRY_BUFFER_SECS: i64 = 60;

/// Bearer token for admin API calls.
#[derive(Debug, Clone)]
pub struct AdminToken {
    pub token: SecretString,
    pub obtained_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AdminToken {
    fn issued_now(token: String) -> Self {
        let now = Utc::now();
        Self {
            token: SecretString::from(token),
            obtained_at: now,
            expires_at: now + Duration::hours(TOKEN_LIFETIME_HOURS),
        }
    }

    /// Whether the token should be replaced before the next call.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() + Duration::seconds(EXPIRY_BUFFER_SECS) >= self.expires_at
    }
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Exchange admin credentials for a token.
///
/// # Errors
///
/// Returns `AdminApiError::AuthenticationFailed` if the credentials are
/// rejected or the endpoint answers with anything but a token.
#[instrument(skip(client, password), fields(username = %username))]
pub async fn authenticate(
    client: &reqwest::Client,
    rest_root: &Url,
    username: &str,
    password: &SecretString,
) -> Result<AdminToken, AdminApiError> {
    let url = rest_root.join(TOKEN_PATH)?;

    let response = client
        .post(url)
        .json(&TokenRequest {
            username,
            password: password.expose_secret(),
        })
        .send()
        .await?;

    let status = response.status();

    if status.is_success() {
        let token: String = response.json().await?;
        if token.trim().is_empty() {
            return Err(AdminApiError::AuthenticationFailed(
                "empty token in response".to_string(),
            ));
        }
        return Ok(AdminToken::issued_now(token));
    }

    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map_or_else(|_| format!("HTTP {status}: {text}"), |body| body.render());

    Err(AdminApiError::AuthenticationFailed(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_not_expired() {
        let token = AdminToken::issued_now("abc".to_string());
        assert!(!token.is_expired());
        assert_eq!(token.expires_at - token.obtained_at, Duration::hours(4));
    }

    #[test]
    fn test_token_inside_buffer_is_expired() {
        let mut token = AdminToken::issued_now("abc".to_string());
        token.expires_at = Utc::now() + Duration::seconds(30);
        assert!(token.is_expired());
    }

    #[test]
    fn test_token_debug_redacted() {
        let token = AdminToken::issued_now("super-secret-token".to_string());
        assert!(!format!("{token:?}").contains("super-secret-token"));
    }
}
