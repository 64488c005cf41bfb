// Copyright 2026 Waypoint Contributors
// SPDX-License-Identifier: Apache-2.0

//! Waypoint — follow a trail of textual waypoints through a website and
//! harvest the entity → value table found at the end of it, without knowing
//! the page layout in advance.

pub mod document;
pub mod error;
pub mod extract;
pub mod locator;
pub mod navigation;
pub mod source;
pub mod transport;

pub use document::{ClickTarget, HtmlDocument, StructuralSchema, TextNode};
pub use error::{ScrapeError, ScrapeResult, TransportError};
pub use extract::{
    extract, harvest, infer_schema, EntityValueMap, TableSchema, ValuePattern,
    DEFAULT_VALUE_PATTERN,
};
pub use locator::{Locator, Waypoint};
pub use navigation::{InteractiveNavigator, Navigator, StaticNavigator, WaitPolicy};
pub use source::{Source, DEFAULT_SAMPLE_LABEL};
pub use transport::{BrowserSession, ChromiumBrowser, Fetcher, HttpFetcher};
