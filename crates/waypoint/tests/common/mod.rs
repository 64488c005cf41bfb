//! In-memory transports shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use waypoint::{BrowserSession, ClickTarget, Fetcher, Locator, TransportError};

/// Serves canned pages by address and counts fetches.
#[derive(Default, Clone)]
pub struct PageFetcher {
    pages: HashMap<String, String>,
    pub fetches: Arc<Mutex<Vec<String>>>,
}

impl PageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, markup: &str) -> Self {
        self.pages.insert(url.to_string(), markup.to_string());
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for PageFetcher {
    async fn fetch(&self, locator: &Locator) -> Result<String, TransportError> {
        self.fetches.lock().unwrap().push(locator.to_string());
        self.pages
            .get(locator.as_str())
            .cloned()
            .ok_or_else(|| TransportError::Status {
                url: locator.to_string(),
                status: 404,
            })
    }
}

/// A fake browser tab: clicking a label swaps in the page registered for it.
pub struct ScriptedSession {
    url: String,
    markup: String,
    pages: HashMap<String, String>,
    transitions: HashMap<String, (String, String)>,
    pub clicks: Vec<ClickTarget>,
    pub ready_checks: Arc<AtomicUsize>,
    /// Labels that vanish from the live page right before they are clicked.
    pub vanishing: Vec<String>,
}

impl ScriptedSession {
    pub fn new() -> Self {
        Self {
            url: "about:blank".to_string(),
            markup: String::new(),
            pages: HashMap::new(),
            transitions: HashMap::new(),
            clicks: Vec::new(),
            ready_checks: Arc::new(AtomicUsize::new(0)),
            vanishing: Vec::new(),
        }
    }

    pub fn page(mut self, url: &str, markup: &str) -> Self {
        self.pages.insert(url.to_string(), markup.to_string());
        self
    }

    /// Clicking `label` moves the session to `url` showing `markup`.
    pub fn on_click(mut self, label: &str, url: &str, markup: &str) -> Self {
        self.transitions
            .insert(label.to_string(), (url.to_string(), markup.to_string()));
        self
    }

    pub fn ready_count(&self) -> usize {
        self.ready_checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserSession for ScriptedSession {
    async fn open(&mut self, locator: &Locator) -> Result<(), TransportError> {
        let markup = self
            .pages
            .get(locator.as_str())
            .cloned()
            .ok_or_else(|| TransportError::Browser(format!("no page at {locator}")))?;
        self.url = locator.to_string();
        self.markup = markup;
        Ok(())
    }

    async fn click(&mut self, target: &ClickTarget) -> Result<bool, TransportError> {
        if self.vanishing.contains(&target.label) {
            return Ok(false);
        }
        self.clicks.push(target.clone());
        match self.transitions.get(&target.label) {
            Some((url, markup)) => {
                self.url = url.clone();
                self.markup = markup.clone();
                Ok(true)
            }
            None => Ok(true),
        }
    }

    async fn page_markup(&mut self) -> Result<String, TransportError> {
        Ok(self.markup.clone())
    }

    async fn current_locator(&mut self) -> Result<Locator, TransportError> {
        Ok(Locator::new(self.url.clone()))
    }

    async fn is_ready(&mut self) -> Result<bool, TransportError> {
        self.ready_checks.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

/// A terminal page in the shape bookmakers use: one row per team.
pub fn odds_page(rows: &[(&str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(team, odd)| {
            format!(
                r#"<tr class="market-row"><td class="selection">{team}</td><td><span class="price odds">{odd}</span></td></tr>"#
            )
        })
        .collect();
    format!(
        r#"<html><body><div class="header"><a href="/">Home</a></div><table>{body}</table></body></html>"#
    )
}
