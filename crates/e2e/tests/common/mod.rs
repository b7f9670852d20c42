//! Shared setup for the live storefront specs.
//!
//! These specs need:
//! - A storefront at `BASE_URL` seeded with `seed-all` for the matching tier
//! - A WebDriver server at `WEBDRIVER_URL` (chromedriver or geckodriver)
//! - For regression specs, `ADMIN_USER` / `ADMIN_PASS` to read orders back
//!
//! Specs run on the multi-threaded runtime so [`Session`] can end the
//! WebDriver session from `Drop`, including while a failed assertion unwinds.

#![allow(dead_code)]

use storecheck_core::ManifestStore;
use storecheck_e2e::{BrowserConfig, Storefront, WebDriverBrowser};
use tokio::runtime::Handle;
use tracing::warn;

/// Install a test-friendly subscriber once per binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

/// A live storefront session, closed when dropped.
pub struct Session {
    sf: Storefront<WebDriverBrowser>,
}

impl Session {
    pub const fn storefront(&self) -> &Storefront<WebDriverBrowser> {
        &self.sf
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let browser = self.sf.browser().clone();
        let handle = Handle::current();
        tokio::task::block_in_place(|| {
            if let Err(e) = handle.block_on(browser.close()) {
                warn!(error = %e, "Failed to close WebDriver session");
            }
        });
    }
}

/// Open a WebDriver session against the configured storefront.
pub async fn session() -> Session {
    init_tracing();
    let config = BrowserConfig::from_env().expect("Browser configuration missing");
    let browser = WebDriverBrowser::connect(&config)
        .await
        .expect("Failed to start WebDriver session");
    Session {
        sf: Storefront::new(browser, config.base_url, config.wait),
    }
}

pub fn manifests() -> ManifestStore {
    ManifestStore::load().expect("Embedded manifests failed to load")
}
