//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input is not of the form `local@domain`.
    #[error("email must look like local@domain: {0}")]
    Malformed(String),
}

/// A customer email address, the natural key of a customer fixture.
///
/// Manifest entries are validated on load so a typo in a fixture file fails
/// before any remote call is made. Cleanup matches on the domain suffix.
///
/// ```
/// use storecheck_core::Email;
///
/// assert!(Email::parse("qa.default@storecheck.test").is_ok());
/// assert!(Email::parse("qa.default").is_err());
/// assert!(Email::parse("@storecheck.test").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 254 characters,
    /// or does not have a non-empty local part and domain around one @.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        match s.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(s.to_owned()))
            }
            _ => Err(EmailError::Malformed(s.to_owned())),
        }
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the domain part of the email (after the @).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }

    /// Whether the address ends with `suffix`, compared case-insensitively.
    ///
    /// `suffix` is usually a domain including the @ (`@storecheck.test`).
    #[must_use]
    pub fn has_suffix(&self, suffix: &str) -> bool {
        self.0.to_lowercase().ends_with(&suffix.to_lowercase())
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixture_addresses() {
        assert!(Email::parse("qa.default@storecheck.test").is_ok());
        assert!(Email::parse("qa+multi@storecheck.test").is_ok());
        assert!(Email::parse("a@b.c").is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
        assert!(matches!(
            Email::parse("no-at-symbol"),
            Err(EmailError::Malformed(_))
        ));
        assert!(matches!(
            Email::parse("@storecheck.test"),
            Err(EmailError::Malformed(_))
        ));
        assert!(matches!(Email::parse("qa@"), Err(EmailError::Malformed(_))));
        assert!(matches!(
            Email::parse("qa@one@two.test"),
            Err(EmailError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@storecheck.test", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_domain_and_suffix() {
        let email = Email::parse("QA.Default@StoreCheck.test").unwrap();
        assert_eq!(email.domain(), "StoreCheck.test");
        assert!(email.has_suffix("@storecheck.test"));
        assert!(!email.has_suffix("@example.com"));
    }

    #[test]
    fn test_deserialize_validates() {
        let parsed: Email = serde_json::from_str("\"qa@storecheck.test\"").unwrap();
        assert_eq!(parsed.as_str(), "qa@storecheck.test");

        let result: Result<Email, _> = serde_json::from_str("\"not-an-email\"");
        assert!(result.is_err());
    }
}
