//! Locator chains and explicit waits.
//!
//! A [`LocatorChain`] is an ordered list of candidate selectors for one
//! logical element. Candidates are tried in order and the first that
//! matches wins, so a theme that adds `data-testid` attributes is picked up
//! without losing the stock CSS fallback.

use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::trace;

use crate::browser::Browser;
use crate::error::BrowserError;

/// Selector type for locating elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `data-testid` attribute value.
    TestId(Cow<'static, str>),
    /// CSS selector (e.g. `#product-addtocart-button`).
    Css(Cow<'static, str>),
    /// Exact visible text, whitespace-normalised.
    Text(Cow<'static, str>),
    XPath(Cow<'static, str>),
}

impl Selector {
    #[must_use]
    pub const fn test_id(id: &'static str) -> Self {
        Self::TestId(Cow::Borrowed(id))
    }

    #[must_use]
    pub const fn css(selector: &'static str) -> Self {
        Self::Css(Cow::Borrowed(selector))
    }

    #[must_use]
    pub const fn text(text: &'static str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }

    #[must_use]
    pub const fn xpath(xpath: &'static str) -> Self {
        Self::XPath(Cow::Borrowed(xpath))
    }

    /// The selector in the two dialects WebDriver understands.
    #[must_use]
    pub fn to_query(&self) -> Query {
        match self {
            Self::TestId(id) => Query::Css(format!("[data-testid=\"{id}\"]")),
            Self::Css(css) => Query::Css(css.to_string()),
            Self::Text(text) => Query::XPath(format!(
                "//*[normalize-space(.)={}][not(*[normalize-space(.)={}])]",
                xpath_literal(text),
                xpath_literal(text)
            )),
            Self::XPath(xpath) => Query::XPath(xpath.to_string()),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TestId(id) => write!(f, "testid={id}"),
            Self::Css(css) => write!(f, "css={css}"),
            Self::Text(text) => write!(f, "text={text}"),
            Self::XPath(xpath) => write!(f, "xpath={xpath}"),
        }
    }
}

/// A selector lowered to a WebDriver locator strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Css(String),
    XPath(String),
}

/// Quote `value` as an `XPath` 1.0 string literal.
fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    if !value.contains('"') {
        return format!("\"{value}\"");
    }
    let parts: Vec<String> = value.split('\'').map(|p| format!("'{p}'")).collect();
    format!("concat({})", parts.join(", \"'\", "))
}

/// Ordered candidate selectors for one logical element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorChain {
    name: Cow<'static, str>,
    candidates: Cow<'static, [Selector]>,
}

impl LocatorChain {
    /// A chain known at compile time, for locator tables.
    #[must_use]
    pub const fn fixed(name: &'static str, candidates: &'static [Selector]) -> Self {
        Self {
            name: Cow::Borrowed(name),
            candidates: Cow::Borrowed(candidates),
        }
    }

    /// A chain built at runtime (e.g. for a specific shipping method code).
    #[must_use]
    pub fn dynamic(name: impl Into<String>, candidates: Vec<Selector>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            candidates: Cow::Owned(candidates),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn candidates(&self) -> &[Selector] {
        &self.candidates
    }
}

/// Build a compile-time [`LocatorChain`] for a locator table.
///
/// ```ignore
/// pub const QTY: LocatorChain = chain!("quantity input" => [
///     Selector::test_id("qty"),
///     Selector::css("#qty"),
/// ]);
/// ```
macro_rules! chain {
    ($name:literal => [$($selector:expr),+ $(,)?]) => {{
        const CANDIDATES: &[$crate::locator::Selector] = &[$($selector),+];
        $crate::locator::LocatorChain::fixed($name, CANDIDATES)
    }};
}
pub(crate) use chain;

/// Resolve `chain` to the elements of its first matching candidate.
///
/// Returns an empty list when no candidate matches.
///
/// # Errors
///
/// Returns `BrowserError` if the browser rejects a lookup.
pub async fn resolve<B: Browser>(
    browser: &B,
    chain: &LocatorChain,
) -> Result<Vec<B::Element>, BrowserError> {
    for selector in chain.candidates() {
        let found = browser.find_all(selector).await?;
        if !found.is_empty() {
            trace!(locator = chain.name(), %selector, count = found.len(), "Resolved");
            return Ok(found);
        }
    }
    Ok(Vec::new())
}

/// Like [`resolve`] but fails when nothing matches.
///
/// # Errors
///
/// Returns `BrowserError::ElementNotFound` when no candidate matches.
pub async fn resolve_one<B: Browser>(
    browser: &B,
    chain: &LocatorChain,
) -> Result<B::Element, BrowserError> {
    resolve(browser, chain)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| BrowserError::ElementNotFound(chain.name().to_string()))
}

/// Condition a wait polls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    /// Present in the DOM.
    Attached,
    /// Present and displayed.
    Visible,
    /// Absent or not displayed.
    Hidden,
}

impl fmt::Display for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attached => write!(f, "attached"),
            Self::Visible => write!(f, "visible"),
            Self::Hidden => write!(f, "hidden"),
        }
    }
}

/// Budget for one explicit wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wait {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Wait {
    #[must_use]
    pub const fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }
}

impl Default for Wait {
    fn default() -> Self {
        Self::new(Duration::from_secs(10), Duration::from_millis(100))
    }
}

/// Poll until `chain` reaches `state` or the budget is spent.
///
/// Returns the matching element for `Attached` and `Visible`, and `None`
/// for `Hidden`. Every candidate of the chain is considered.
///
/// # Errors
///
/// Returns `BrowserError::Timeout` when the budget expires and any browser
/// error raised while polling.
pub async fn wait_for<B: Browser>(
    browser: &B,
    chain: &LocatorChain,
    state: ElementState,
    wait: Wait,
) -> Result<Option<B::Element>, BrowserError> {
    let started = Instant::now();

    loop {
        if let Some(found) = probe(browser, chain, state).await? {
            return Ok(found);
        }

        let waited = started.elapsed();
        if waited >= wait.timeout {
            return Err(BrowserError::Timeout {
                locator: chain.name().to_string(),
                state,
                waited,
            });
        }
        sleep(wait.poll_interval.min(wait.timeout - waited)).await;
    }
}

/// One poll. `Some(..)` means the state holds.
async fn probe<B: Browser>(
    browser: &B,
    chain: &LocatorChain,
    state: ElementState,
) -> Result<Option<Option<B::Element>>, BrowserError> {
    match state {
        ElementState::Attached => Ok(resolve(browser, chain).await?.into_iter().next().map(Some)),
        ElementState::Visible => Ok(first_displayed(browser, chain).await?.map(Some)),
        ElementState::Hidden => Ok(first_displayed(browser, chain)
            .await?
            .is_none()
            .then_some(None)),
    }
}

/// Whether any candidate of `chain` is displayed right now. Does not wait.
///
/// # Errors
///
/// Returns `BrowserError` if the browser rejects a lookup.
pub async fn is_visible<B: Browser>(browser: &B, chain: &LocatorChain) -> Result<bool, BrowserError> {
    Ok(first_displayed(browser, chain).await?.is_some())
}

async fn first_displayed<B: Browser>(
    browser: &B,
    chain: &LocatorChain,
) -> Result<Option<B::Element>, BrowserError> {
    for selector in chain.candidates() {
        for element in browser.find_all(selector).await? {
            // A node detached between lookup and check counts as not displayed.
            if browser.is_displayed(&element).await.unwrap_or(false) {
                return Ok(Some(element));
            }
        }
    }
    Ok(None)
}
