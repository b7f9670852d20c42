//! Storefront GraphQL calls made from inside the page.
//!
//! Requests run through the browser's `fetch` so they share the session's
//! cookies and origin.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, instrument};
use url::Url;

use crate::browser::Browser;
use crate::error::BrowserError;

const FETCH_SCRIPT: &str = r"
const [endpoint, body, done] = arguments;
fetch(endpoint, {
    method: 'POST',
    credentials: 'same-origin',
    headers: { 'Content-Type': 'application/json', 'Accept': 'application/json' },
    body: JSON.stringify(body),
})
    .then((response) => response.json())
    .then(done)
    .catch((error) => done({ errors: [{ message: String(error) }] }));
";

const CREATE_EMPTY_CART: &str = "mutation { createEmptyCart }";

#[derive(Debug, Deserialize)]
struct Response<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateEmptyCart {
    create_empty_cart: Option<String>,
}

/// Run `query` against `{base_url}graphql` from inside the page.
///
/// # Errors
///
/// Returns `BrowserError::Script` if the script fails, the server answers
/// with errors, or `data` has an unexpected shape.
pub async fn execute<B, T>(
    browser: &B,
    base_url: &Url,
    query: &str,
    variables: Value,
) -> Result<T, BrowserError>
where
    B: Browser,
    T: DeserializeOwned,
{
    let endpoint = base_url.join("graphql")?;
    let body = json!({ "query": query, "variables": variables });
    let raw = browser
        .execute_async(FETCH_SCRIPT, vec![json!(endpoint.as_str()), body])
        .await?;
    parse_response(raw)
}

/// Create an empty guest cart and return its masked id.
///
/// # Errors
///
/// Returns `BrowserError::Script` if the mutation fails.
#[instrument(skip(browser))]
pub async fn create_guest_cart<B: Browser>(browser: &B, base_url: &Url) -> Result<String, BrowserError> {
    let data: CreateEmptyCart = execute(browser, base_url, CREATE_EMPTY_CART, json!({})).await?;
    let cart_id = data
        .create_empty_cart
        .filter(|id| !id.is_empty())
        .ok_or_else(|| BrowserError::Script("createEmptyCart returned no cart id".to_string()))?;
    debug!(%cart_id, "Guest cart created");
    Ok(cart_id)
}

fn parse_response<T: DeserializeOwned>(raw: Value) -> Result<T, BrowserError> {
    let response: Response<T> = serde_json::from_value(raw)
        .map_err(|e| BrowserError::Script(format!("Malformed GraphQL response: {e}")))?;

    if !response.errors.is_empty() {
        let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(BrowserError::Script(messages.join("; ")));
    }
    response
        .data
        .ok_or_else(|| BrowserError::Script("GraphQL response has no data".to_string()))
}
