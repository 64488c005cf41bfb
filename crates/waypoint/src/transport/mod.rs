//! Transport collaborators: how documents are fetched and how a live page is
//! driven.
//!
//! The navigation engine only sees these two traits, so tests substitute
//! in-memory fakes and production plugs in [`http::HttpFetcher`] and
//! [`chromium::ChromiumSession`].

pub mod chromium;
pub mod http;

use crate::document::ClickTarget;
use crate::error::TransportError;
use crate::locator::Locator;
use async_trait::async_trait;

pub use chromium::{find_chromium, ChromiumBrowser, ChromiumSession};
pub use http::HttpFetcher;

/// Fetches the markup a locator points at.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, locator: &Locator) -> Result<String, TransportError>;
}

/// A stateful, interactive page (one browser tab).
#[async_trait]
pub trait BrowserSession: Send {
    /// Load `locator` in the session.
    async fn open(&mut self, locator: &Locator) -> Result<(), TransportError>;
    /// Click the first element matching `target`. `false` when no such
    /// element exists on the live page.
    async fn click(&mut self, target: &ClickTarget) -> Result<bool, TransportError>;
    /// Snapshot of the page's current markup.
    async fn page_markup(&mut self) -> Result<String, TransportError>;
    /// The page's current address.
    async fn current_locator(&mut self) -> Result<Locator, TransportError>;
    /// Whether the page reports that it finished loading.
    async fn is_ready(&mut self) -> Result<bool, TransportError>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    async fn fetch(&self, locator: &Locator) -> Result<String, TransportError> {
        (**self).fetch(locator).await
    }
}

#[async_trait]
impl<S: BrowserSession + ?Sized> BrowserSession for Box<S> {
    async fn open(&mut self, locator: &Locator) -> Result<(), TransportError> {
        (**self).open(locator).await
    }
    async fn click(&mut self, target: &ClickTarget) -> Result<bool, TransportError> {
        (**self).click(target).await
    }
    async fn page_markup(&mut self) -> Result<String, TransportError> {
        (**self).page_markup().await
    }
    async fn current_locator(&mut self) -> Result<Locator, TransportError> {
        (**self).current_locator().await
    }
    async fn is_ready(&mut self) -> Result<bool, TransportError> {
        (**self).is_ready().await
    }
}
