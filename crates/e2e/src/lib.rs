//! Storecheck E2E - storefront page objects and browser specs.
//!
//! # Architecture
//!
//! ```text
//! specs (tests/) ──► pages ──► locators (data) ──► locator waits ──► Browser
//!                                                                     │
//!                                                 WebDriverBrowser ◄──┘
//! ```
//!
//! Page objects never hold raw selectors. Each element is a
//! [`locator::LocatorChain`] in [`locators`], and every interaction goes
//! through an explicit wait with the budget from [`BrowserConfig`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod browser;
pub mod config;
pub mod error;
pub mod graphql;
pub mod locator;
pub mod locators;
pub mod pages;
pub mod webdriver;

#[cfg(test)]
mod testing;

pub use browser::Browser;
pub use config::BrowserConfig;
pub use error::{BrowserError, ConfigError};
pub use locator::{ElementState, LocatorChain, Selector, Wait};
pub use pages::{
    CardDetails, CartPage, CheckoutPage, CouponResult, ProductPage, Storefront, SuccessPage,
};
pub use webdriver::WebDriverBrowser;
