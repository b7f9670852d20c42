//! Browser session configuration.
//!
//! Loaded from environment variables (`.env` honoured):
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BASE_URL` (or `url`) | required |
//! | `WEBDRIVER_URL` | `http://localhost:4444` |
//! | `HEADLESS` | `true` |
//! | `UI_WAIT_TIMEOUT_SECS` | `10` |

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;
use crate::locator::Wait;

const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";
const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 10;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Storefront root, always ending in `/`.
    pub base_url: Url,
    pub webdriver_url: Url,
    pub headless: bool,
    /// Budget for every explicit wait.
    pub wait: Wait,
}

impl BrowserConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the storefront URL is missing or a value is
    /// malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the storefront URL is missing or a value is
    /// malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_base = get("BASE_URL")
            .or_else(|| get("url"))
            .ok_or_else(|| ConfigError::MissingEnvVar("BASE_URL".to_string()))?;
        let base_url = parse_url("BASE_URL", &raw_base)?;

        let webdriver_url = parse_url(
            "WEBDRIVER_URL",
            &get("WEBDRIVER_URL").unwrap_or_else(|| DEFAULT_WEBDRIVER_URL.to_string()),
        )?;

        let headless = match get("HEADLESS") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::InvalidEnvVar("HEADLESS".to_string(), raw))?,
            None => true,
        };

        let timeout_secs = match get("UI_WAIT_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("UI_WAIT_TIMEOUT_SECS".to_string(), e.to_string())
            })?,
            None => DEFAULT_WAIT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            webdriver_url,
            headless,
            wait: Wait::new(Duration::from_secs(timeout_secs), POLL_INTERVAL),
        })
    }
}

fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lookup(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let config = BrowserConfig::from_lookup(lookup(&[("BASE_URL", "https://shop.test")])).unwrap();
        assert_eq!(config.base_url.as_str(), "https://shop.test/");
        assert_eq!(config.webdriver_url.as_str(), "http://localhost:4444/");
        assert!(config.headless);
        assert_eq!(config.wait.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_headed_and_custom_wait() {
        let config = BrowserConfig::from_lookup(lookup(&[
            ("url", "https://shop.test/en"),
            ("HEADLESS", "false"),
            ("UI_WAIT_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.as_str(), "https://shop.test/en/");
        assert!(!config.headless);
        assert_eq!(config.wait.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_base_url() {
        let err = BrowserConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "BASE_URL"));
    }

    #[test]
    fn test_invalid_headless() {
        let err = BrowserConfig::from_lookup(lookup(&[
            ("BASE_URL", "https://shop.test"),
            ("HEADLESS", "maybe"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "HEADLESS"));
    }
}
