//! Locators and waypoints.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Opaque, immutable reference to a document — in practice an absolute address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve a link destination found on this document.
    ///
    /// Absolute hrefs pass through; relative ones are joined onto `self`.
    /// When `self` is not a parseable URL the href is taken verbatim.
    pub fn join(&self, href: &str) -> Locator {
        let href = href.trim();
        match Url::parse(&self.0).and_then(|base| base.join(href)) {
            Ok(url) => Locator(url.to_string()),
            Err(_) => Locator(href.to_string()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Locator {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One textual label to follow. A path is an ordered `Vec<Waypoint>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Waypoint(String);

impl Waypoint {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Waypoint {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Waypoint {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Build a path from anything string-like.
pub fn path<I, S>(labels: I) -> Vec<Waypoint>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    labels.into_iter().map(Waypoint::new).collect()
}
