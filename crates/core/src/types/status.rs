//! Catalog and promotion enums used by fixture manifests.
//!
//! Each enum maps a human-readable manifest token onto the numeric or string
//! code the platform's admin API expects.

use serde::{Deserialize, Serialize};

/// Product status token in a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Enabled,
    Disabled,
}

impl ProductStatus {
    /// Platform status code (`1` enabled, `2` disabled).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Enabled => 1,
            Self::Disabled => 2,
        }
    }
}

/// Where a product is visible in the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    NotVisible,
    Catalog,
    Search,
    #[default]
    CatalogSearch,
}

impl Visibility {
    /// Platform visibility code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::NotVisible => 1,
            Self::Catalog => 2,
            Self::Search => 3,
            Self::CatalogSearch => 4,
        }
    }
}

/// How a coupon discount is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Percentage off each matching item.
    Percentage,
    /// Fixed amount off the whole cart.
    Fixed,
}

impl DiscountType {
    /// Sales-rule `simple_action` value.
    #[must_use]
    pub const fn simple_action(self) -> &'static str {
        match self {
            Self::Percentage => "by_percent",
            Self::Fixed => "cart_fixed",
        }
    }
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Percentage => write!(f, "percentage"),
            Self::Fixed => write!(f, "fixed"),
        }
    }
}
