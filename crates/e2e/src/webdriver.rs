//! WebDriver-backed [`Browser`] using `fantoccini`.

use fantoccini::elements::Element;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::Value;
use tracing::{debug, info};

use crate::browser::Browser;
use crate::config::BrowserConfig;
use crate::error::BrowserError;
use crate::locator::{Query, Selector};

/// A live WebDriver session.
#[derive(Clone)]
pub struct WebDriverBrowser {
    client: Client,
}

impl WebDriverBrowser {
    /// Open a session against `config.webdriver_url`.
    ///
    /// Capabilities for both Chrome and Firefox are sent so either driver
    /// can serve the session.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError::Session` if the driver refuses the session.
    pub async fn connect(config: &BrowserConfig) -> Result<Self, BrowserError> {
        let mut caps = serde_json::Map::new();

        let (chrome_args, firefox_args): (Vec<&str>, Vec<&str>) = if config.headless {
            info!("Starting browser in headless mode");
            (
                vec!["--headless=new", "--window-size=1440,900"],
                vec!["--headless", "--width=1440", "--height=900"],
            )
        } else {
            info!("Starting browser in headed mode");
            (vec!["--window-size=1440,900"], vec![])
        };
        caps.insert(
            "goog:chromeOptions".to_string(),
            serde_json::json!({ "args": chrome_args }),
        );
        caps.insert(
            "moz:firefoxOptions".to_string(),
            serde_json::json!({ "args": firefox_args, "log": {"level": "error"} }),
        );

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(config.webdriver_url.as_str())
            .await?;
        debug!(webdriver = %config.webdriver_url, "Browser connected");

        Ok(Self { client })
    }

    /// End the WebDriver session.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError::Driver` if the driver rejects the close.
    pub async fn close(self) -> Result<(), BrowserError> {
        self.client.close().await?;
        Ok(())
    }
}

impl Browser for WebDriverBrowser {
    type Element = Element;

    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        debug!(url, "Navigating");
        self.client.goto(url).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        Ok(self.client.current_url().await?.to_string())
    }

    async fn find_all(&self, selector: &Selector) -> Result<Vec<Element>, BrowserError> {
        let found = match selector.to_query() {
            Query::Css(css) => self.client.find_all(Locator::Css(&css)).await?,
            Query::XPath(xpath) => self.client.find_all(Locator::XPath(&xpath)).await?,
        };
        Ok(found)
    }

    async fn click(&self, element: &Element) -> Result<(), BrowserError> {
        element.click().await?;
        Ok(())
    }

    async fn fill(&self, element: &Element, value: &str) -> Result<(), BrowserError> {
        element.clear().await?;
        element.send_keys(value).await?;
        Ok(())
    }

    async fn select_option(&self, element: &Element, value: &str) -> Result<(), BrowserError> {
        element.select_by_value(value).await?;
        Ok(())
    }

    async fn text(&self, element: &Element) -> Result<String, BrowserError> {
        Ok(element.text().await?)
    }

    async fn is_displayed(&self, element: &Element) -> Result<bool, BrowserError> {
        Ok(element.is_displayed().await?)
    }

    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value, BrowserError> {
        Ok(self.client.execute(script, args).await?)
    }

    async fn execute_async(&self, script: &str, args: Vec<Value>) -> Result<Value, BrowserError> {
        Ok(self.client.execute_async(script, args).await?)
    }
}
