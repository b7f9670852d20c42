//! Browser automation errors.

use std::time::Duration;

use thiserror::Error;

use crate::locator::ElementState;

/// Environment configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Errors raised while driving the storefront.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// No candidate of a locator chain matched.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// A wait budget expired before the element reached the wanted state.
    #[error("Timed out after {waited:?} waiting for {locator} to be {state}")]
    Timeout {
        locator: String,
        state: ElementState,
        waited: Duration,
    },

    /// The WebDriver session rejected a command.
    #[error("WebDriver error: {0}")]
    Driver(#[from] fantoccini::error::CmdError),

    /// A WebDriver session could not be started.
    #[error("WebDriver session error: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    /// In-page script evaluation returned something unexpected.
    #[error("Script error: {0}")]
    Script(String),

    /// A storefront URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = BrowserError::Timeout {
            locator: "add to cart button".to_string(),
            state: ElementState::Visible,
            waited: Duration::from_millis(1500),
        };
        assert_eq!(
            err.to_string(),
            "Timed out after 1.5s waiting for add to cart button to be visible"
        );
    }
}
