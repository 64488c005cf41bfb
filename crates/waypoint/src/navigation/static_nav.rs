use super::Navigator;
use crate::document::{href, HtmlDocument};
use crate::error::{ScrapeError, ScrapeResult};
use crate::locator::{Locator, Waypoint};
use crate::transport::Fetcher;
use async_trait::async_trait;

/// Fetch-and-reparse navigation: one document per hop, no browser state.
pub struct StaticNavigator<F> {
    fetcher: F,
}

impl<F: Fetcher> StaticNavigator<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }
}

/// Find the link to follow for `waypoint` on the document at `current`.
///
/// An `<a>` whose whole text is the label wins. Failing that, the first text
/// node reading the label is taken and its closest `<a>` ancestor followed,
/// which covers links whose label is wrapped together with other content.
pub fn resolve_waypoint(
    markup: &str,
    current: &Locator,
    waypoint: &Waypoint,
) -> ScrapeResult<Locator> {
    let doc = HtmlDocument::parse(markup);
    let label = waypoint.label().trim();

    let destination = doc
        .find_anchors_with_exact_text(label)
        .into_iter()
        .find_map(href)
        .or_else(|| {
            let node = doc.find_text_matching(|text| text == label)?;
            HtmlDocument::nearest_anchor(&node).and_then(href)
        });

    match destination {
        Some(dest) => Ok(current.join(dest)),
        None => Err(ScrapeError::navigation(label, current.as_str())),
    }
}

#[async_trait]
impl<F: Fetcher> Navigator for StaticNavigator<F> {
    async fn navigate(&mut self, start: &Locator, path: &[Waypoint]) -> ScrapeResult<Locator> {
        let mut current = start.clone();
        for (step, waypoint) in path.iter().enumerate() {
            tracing::debug!(step, %waypoint, url = %current, "following waypoint");
            let markup = self.fetcher.fetch(&current).await?;
            current = resolve_waypoint(&markup, &current, waypoint)?;
        }
        Ok(current)
    }

    async fn terminal_markup(&mut self, terminal: &Locator) -> ScrapeResult<String> {
        Ok(self.fetcher.fetch(terminal).await?)
    }

    fn strategy(&self) -> &'static str {
        "static"
    }
}
