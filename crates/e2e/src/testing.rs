//! In-memory [`Browser`] for unit tests.
//!
//! Elements are keyed by the raw string inside a [`Selector`] (the test id,
//! the CSS text, the visible text or the XPath), so tests register exactly
//! the candidate they want a chain to hit.
#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::browser::Browser;
use crate::error::BrowserError;
use crate::locator::{Selector, Wait};
use crate::pages::Storefront;

/// A storefront at `https://shop.test/` over a fresh [`FakeBrowser`] with a
/// short wait budget.
pub fn storefront() -> Storefront<FakeBrowser> {
    Storefront::new(
        FakeBrowser::new(),
        Url::parse("https://shop.test/").unwrap(),
        Wait::new(Duration::from_millis(60), Duration::from_millis(5)),
    )
}

/// DOM change triggered by clicking an element.
#[derive(Debug, Clone)]
pub enum Effect {
    Show(usize),
    Hide(usize),
    Navigate(String),
}

#[derive(Debug)]
struct FakeElement {
    key: String,
    text: String,
    displayed: bool,
    value: String,
    show_after: Option<u32>,
}

#[derive(Debug, Default)]
struct State {
    elements: Vec<FakeElement>,
    lookups: Vec<String>,
    clicks: Vec<usize>,
    url: String,
    navigations: Vec<String>,
    on_click: HashMap<usize, Vec<Effect>>,
    script_results: VecDeque<Value>,
    scripts: Vec<(String, Vec<Value>)>,
}

#[derive(Debug, Default)]
pub struct FakeBrowser {
    state: Mutex<State>,
}

fn key_of(selector: &Selector) -> &str {
    match selector {
        Selector::TestId(s) | Selector::Css(s) | Selector::Text(s) | Selector::XPath(s) => s,
    }
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element reachable through the selector string `key`.
    pub fn add(&self, key: &str, text: &str, displayed: bool) -> usize {
        let mut state = self.state.lock().unwrap();
        state.elements.push(FakeElement {
            key: key.to_string(),
            text: text.to_string(),
            displayed,
            value: String::new(),
            show_after: None,
        });
        state.elements.len() - 1
    }

    /// Make `id` displayed once it has been checked `polls` times.
    pub fn show_after(&self, id: usize, polls: u32) {
        self.state.lock().unwrap().elements[id].show_after = Some(polls);
    }

    pub fn on_click(&self, id: usize, effect: Effect) {
        self.state
            .lock()
            .unwrap()
            .on_click
            .entry(id)
            .or_default()
            .push(effect);
    }

    pub fn push_script_result(&self, value: Value) {
        self.state.lock().unwrap().script_results.push_back(value);
    }

    pub fn selector_of(&self, id: usize) -> String {
        self.state.lock().unwrap().elements[id].key.clone()
    }

    pub fn value_of(&self, id: usize) -> String {
        self.state.lock().unwrap().elements[id].value.clone()
    }

    pub fn lookups(&self) -> Vec<String> {
        self.state.lock().unwrap().lookups.clone()
    }

    pub fn clicks(&self) -> Vec<usize> {
        self.state.lock().unwrap().clicks.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().unwrap().navigations.clone()
    }

    pub fn scripts(&self) -> Vec<(String, Vec<Value>)> {
        self.state.lock().unwrap().scripts.clone()
    }
}

impl Browser for FakeBrowser {
    type Element = usize;

    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        let mut state = self.state.lock().unwrap();
        state.url = url.to_string();
        state.navigations.push(url.to_string());
        Ok(())
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        Ok(self.state.lock().unwrap().url.clone())
    }

    async fn find_all(&self, selector: &Selector) -> Result<Vec<usize>, BrowserError> {
        let key = key_of(selector);
        let mut state = self.state.lock().unwrap();
        state.lookups.push(key.to_string());
        Ok(state
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.key == key)
            .map(|(id, _)| id)
            .collect())
    }

    async fn click(&self, element: &usize) -> Result<(), BrowserError> {
        let mut state = self.state.lock().unwrap();
        state.clicks.push(*element);
        for effect in state.on_click.get(element).cloned().unwrap_or_default() {
            match effect {
                Effect::Show(id) => state.elements[id].displayed = true,
                Effect::Hide(id) => state.elements[id].displayed = false,
                Effect::Navigate(url) => {
                    state.url.clone_from(&url);
                    state.navigations.push(url);
                }
            }
        }
        Ok(())
    }

    async fn fill(&self, element: &usize, value: &str) -> Result<(), BrowserError> {
        self.state.lock().unwrap().elements[*element].value = value.to_string();
        Ok(())
    }

    async fn select_option(&self, element: &usize, value: &str) -> Result<(), BrowserError> {
        self.fill(element, value).await
    }

    async fn text(&self, element: &usize) -> Result<String, BrowserError> {
        Ok(self.state.lock().unwrap().elements[*element].text.clone())
    }

    async fn is_displayed(&self, element: &usize) -> Result<bool, BrowserError> {
        let mut state = self.state.lock().unwrap();
        let el = &mut state.elements[*element];
        match el.show_after {
            Some(0) => {
                el.displayed = true;
                el.show_after = None;
            }
            Some(n) => el.show_after = Some(n - 1),
            None => {}
        }
        Ok(el.displayed)
    }

    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value, BrowserError> {
        let mut state = self.state.lock().unwrap();
        state.scripts.push((script.to_string(), args));
        Ok(state.script_results.pop_front().unwrap_or(Value::Null))
    }

    async fn execute_async(&self, script: &str, args: Vec<Value>) -> Result<Value, BrowserError> {
        self.execute(script, args).await
    }
}
