//! Harness configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BASE_URL` - Storefront base URL (falls back to `url`)
//! - `ADMIN_USER` - Admin username for the integration token
//! - `ADMIN_PASS` - Admin password for the integration token
//!
//! ## Optional
//! - `TEST_TIER` - Fixture tier `A`, `B` or `C` (default: B)
//! - `STORE_CODE` - Store code in REST paths (default: all)
//! - `ADMIN_API_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `FIXTURE_DIR` - Directory overriding the embedded manifests
//! - `SWEEP_SKU_PREFIX` - SKU prefix removed by cleanup (default: `TEST_`)
//! - `SWEEP_EMAIL_DOMAIN` - Email suffix removed by cleanup (default: `@storecheck.test`)
//! - `SWEEP_COUPON_PREFIX` - Sales-rule name prefix (default: `E2E Coupon `)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use storecheck_core::{ManifestError, ManifestStore, Tier};
use thiserror::Error;
use url::Url;

const DEFAULT_STORE_CODE: &str = "all";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SKU_PREFIX: &str = "TEST_";
const DEFAULT_EMAIL_DOMAIN: &str = "@storecheck.test";
const DEFAULT_COUPON_PREFIX: &str = "E2E Coupon ";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Configuration shared by the seeding and cleanup tools.
#[derive(Clone)]
pub struct HarnessConfig {
    /// Storefront base URL, always ending in `/`.
    pub base_url: Url,
    /// Store code used in `rest/{store_code}/V1` paths.
    pub store_code: String,
    /// Admin username.
    pub admin_user: String,
    /// Admin password.
    pub admin_pass: SecretString,
    /// Tier used when the command line does not name one.
    pub tier: Tier,
    /// Timeout applied to every admin API request.
    pub request_timeout: Duration,
    /// Directory overriding the embedded manifests.
    pub fixture_dir: Option<PathBuf>,
    /// Patterns the cleanup sweep matches against.
    pub sweep: SweepPatterns,
}

impl std::fmt::Debug for HarnessConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarnessConfig")
            .field("base_url", &self.base_url.as_str())
            .field("store_code", &self.store_code)
            .field("admin_user", &self.admin_user)
            .field("admin_pass", &"[REDACTED]")
            .field("tier", &self.tier)
            .field("request_timeout", &self.request_timeout)
            .field("fixture_dir", &self.fixture_dir)
            .field("sweep", &self.sweep)
            .finish()
    }
}

/// Natural-key patterns that identify records created by this harness.
///
/// Seeding names sales rules with `coupon_rule_prefix` so that the sweep can
/// find them again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepPatterns {
    pub sku_prefix: String,
    pub email_domain: String,
    pub coupon_rule_prefix: String,
}

impl Default for SweepPatterns {
    fn default() -> Self {
        Self {
            sku_prefix: DEFAULT_SKU_PREFIX.to_string(),
            email_domain: DEFAULT_EMAIL_DOMAIN.to_string(),
            coupon_rule_prefix: DEFAULT_COUPON_PREFIX.to_string(),
        }
    }
}

impl SweepPatterns {
    /// `LIKE` pattern matching every seeded SKU.
    #[must_use]
    pub fn sku_like(&self) -> String {
        format!("{}%", like_escape(&self.sku_prefix))
    }

    /// `LIKE` pattern matching every seeded customer email.
    #[must_use]
    pub fn email_like(&self) -> String {
        format!("%{}", like_escape(&self.email_domain))
    }

    /// `LIKE` pattern matching every seeded sales rule name.
    #[must_use]
    pub fn rule_like(&self) -> String {
        format!("{}%", like_escape(&self.coupon_rule_prefix))
    }

    /// Sales rule name for a coupon code.
    #[must_use]
    pub fn rule_name(&self, code: &str) -> String {
        format!("{}{code}", self.coupon_rule_prefix)
    }

    #[must_use]
    pub fn matches_sku(&self, sku: &str) -> bool {
        starts_with_ignore_case(sku, &self.sku_prefix)
    }

    #[must_use]
    pub fn matches_email(&self, email: &str) -> bool {
        email
            .to_lowercase()
            .ends_with(&self.email_domain.to_lowercase())
    }

    #[must_use]
    pub fn matches_rule_name(&self, name: &str) -> bool {
        starts_with_ignore_case(name, &self.coupon_rule_prefix)
    }
}

impl HarnessConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let raw_base = env
            .optional("BASE_URL")
            .or_else(|| env.optional("url"))
            .ok_or_else(|| ConfigError::MissingEnvVar("BASE_URL".to_string()))?;
        let base_url = parse_base_url(&raw_base)?;

        let admin_user = env.required("ADMIN_USER")?;
        let admin_pass = SecretString::from(env.required("ADMIN_PASS")?);

        let tier = env
            .or_default("TEST_TIER", "B")
            .parse::<Tier>()
            .map_err(|e| ConfigError::InvalidEnvVar("TEST_TIER".to_string(), e.to_string()))?;

        let timeout_secs = env
            .or_default("ADMIN_API_TIMEOUT_SECS", &DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ADMIN_API_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        let defaults = SweepPatterns::default();
        let sweep = SweepPatterns {
            sku_prefix: env.or_default("SWEEP_SKU_PREFIX", &defaults.sku_prefix),
            email_domain: env.or_default("SWEEP_EMAIL_DOMAIN", &defaults.email_domain),
            coupon_rule_prefix: env.or_default("SWEEP_COUPON_PREFIX", &defaults.coupon_rule_prefix),
        };
        if sweep.sku_prefix.is_empty() || sweep.email_domain.is_empty() || sweep.coupon_rule_prefix.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "SWEEP_*".to_string(),
                "sweep patterns must not be empty".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            store_code: env.or_default("STORE_CODE", DEFAULT_STORE_CODE),
            admin_user,
            admin_pass,
            tier,
            request_timeout: Duration::from_secs(timeout_secs),
            fixture_dir: env.optional("FIXTURE_DIR").map(PathBuf::from),
            sweep,
        })
    }

    /// Admin REST root, e.g. `https://shop.test/rest/all/V1/`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the store code produces an
    /// invalid URL.
    pub fn rest_root(&self) -> Result<Url, ConfigError> {
        self.base_url
            .join(&format!("rest/{}/V1/", self.store_code))
            .map_err(|e| ConfigError::InvalidEnvVar("STORE_CODE".to_string(), e.to_string()))
    }

    /// Load the fixture manifests, honouring `FIXTURE_DIR`.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError` if a manifest is invalid or a well-known
    /// fixture is missing.
    pub fn load_manifests(&self) -> Result<ManifestStore, ManifestError> {
        match &self.fixture_dir {
            Some(dir) => ManifestStore::load_from_dir(dir),
            None => ManifestStore::load(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable, treating empty values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

/// Parse a base URL and force a trailing slash so `join` keeps the path.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash)
        .map_err(|e| ConfigError::InvalidEnvVar("BASE_URL".to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "BASE_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Escape SQL `LIKE` wildcards so a prefix matches literally.
fn like_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value.to_lowercase().starts_with(&prefix.to_lowercase())
}
