//! Browser capability.
//!
//! Page objects and waits are written against [`Browser`] so they can run on
//! a real WebDriver session ([`crate::webdriver::WebDriverBrowser`]) or an
//! in-memory double.

use serde_json::Value;

use crate::error::BrowserError;
use crate::locator::Selector;

#[allow(async_fn_in_trait)]
pub trait Browser {
    /// Handle to a DOM element found by [`Browser::find_all`].
    type Element: Clone;

    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    async fn current_url(&self) -> Result<String, BrowserError>;

    /// All elements matching `selector`; empty when none match.
    async fn find_all(&self, selector: &Selector) -> Result<Vec<Self::Element>, BrowserError>;

    async fn click(&self, element: &Self::Element) -> Result<(), BrowserError>;

    /// Replace the element's value with `value`.
    async fn fill(&self, element: &Self::Element, value: &str) -> Result<(), BrowserError>;

    /// Choose the `<option>` whose value attribute is `value`.
    async fn select_option(&self, element: &Self::Element, value: &str)
    -> Result<(), BrowserError>;

    async fn text(&self, element: &Self::Element) -> Result<String, BrowserError>;

    async fn is_displayed(&self, element: &Self::Element) -> Result<bool, BrowserError>;

    /// Evaluate a synchronous script in the page.
    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value, BrowserError>;

    /// Evaluate a script that reports its result through the callback passed
    /// as its last argument.
    async fn execute_async(&self, script: &str, args: Vec<Value>) -> Result<Value, BrowserError>;
}
