//! One site: where to start, which waypoints to follow, how to follow them,
//! and which sample tokens anchor its table.

use crate::document::HtmlDocument;
use crate::error::ScrapeResult;
use crate::extract::{extract, EntityValueMap, ValuePattern};
use crate::locator::{Locator, Waypoint};
use crate::navigation::Navigator;
use std::time::Instant;

/// A label expected on every terminal page of the bundled sites.
pub const DEFAULT_SAMPLE_LABEL: &str = "Germany";

/// A site binding, built once and collected from repeatedly.
pub struct Source {
    name: String,
    start: Locator,
    path: Vec<Waypoint>,
    navigator: Box<dyn Navigator>,
    sample_label: String,
    value_pattern: ValuePattern,
}

impl Source {
    pub fn new(
        name: impl Into<String>,
        start: Locator,
        path: Vec<Waypoint>,
        navigator: Box<dyn Navigator>,
        sample_label: impl Into<String>,
        value_pattern: ValuePattern,
    ) -> Self {
        Self {
            name: name.into(),
            start,
            path,
            navigator,
            sample_label: sample_label.into(),
            value_pattern,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> &Locator {
        &self.start
    }

    pub fn path(&self) -> &[Waypoint] {
        &self.path
    }

    pub fn strategy(&self) -> &'static str {
        self.navigator.strategy()
    }

    /// Navigate to the terminal page and harvest its table.
    ///
    /// Errors propagate unchanged; retrying and isolating failures is the
    /// caller's business.
    pub async fn collect(&mut self) -> ScrapeResult<EntityValueMap> {
        let started = Instant::now();
        let terminal = self.navigator.navigate(&self.start, &self.path).await?;
        let markup = self.navigator.terminal_markup(&terminal).await?;
        let table = extract_table(&markup, &self.sample_label, &self.value_pattern)?;

        tracing::info!(
            source = %self.name,
            terminal = %terminal,
            entities = table.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "collected table"
        );
        Ok(table)
    }
}

fn extract_table(
    markup: &str,
    sample_label: &str,
    value_pattern: &ValuePattern,
) -> ScrapeResult<EntityValueMap> {
    let doc = HtmlDocument::parse(markup);
    extract(&doc, sample_label, value_pattern)
}
