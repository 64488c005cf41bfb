use super::{Navigator, WaitPolicy};
use crate::document::{ClickTarget, HtmlDocument};
use crate::error::{ScrapeError, ScrapeResult};
use crate::locator::{Locator, Waypoint};
use crate::transport::BrowserSession;
use async_trait::async_trait;

/// Click-through navigation over one live session.
///
/// The session belongs to this navigator for its whole life and is reused
/// across collections; nothing else may drive it.
pub struct InteractiveNavigator<S> {
    session: S,
    wait: WaitPolicy,
}

impl<S: BrowserSession> InteractiveNavigator<S> {
    pub fn new(session: S) -> Self {
        Self {
            session,
            wait: WaitPolicy::default(),
        }
    }

    pub fn with_wait_policy(mut self, wait: WaitPolicy) -> Self {
        self.wait = wait;
        self
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Best-effort description of where the session is, for error messages.
    async fn location(&mut self) -> String {
        match self.session.current_locator().await {
            Ok(locator) => locator.to_string(),
            Err(_) => "<interactive session>".to_string(),
        }
    }
}

/// Pick the element to click for `label` on a snapshot of the live page.
pub fn locate_clickable(markup: &str, label: &str) -> Option<ClickTarget> {
    HtmlDocument::parse(markup).find_clickable(label)
}

#[async_trait]
impl<S: BrowserSession> Navigator for InteractiveNavigator<S> {
    async fn navigate(&mut self, start: &Locator, path: &[Waypoint]) -> ScrapeResult<Locator> {
        self.session.open(start).await?;

        for (step, waypoint) in path.iter().enumerate() {
            tracing::debug!(step, %waypoint, "clicking waypoint");
            let markup = self.session.page_markup().await?;
            let Some(target) = locate_clickable(&markup, waypoint.label()) else {
                let here = self.location().await;
                return Err(ScrapeError::navigation(waypoint.label(), here));
            };

            if !self.session.click(&target).await? {
                // gone from the live page between snapshot and click
                let here = self.location().await;
                return Err(ScrapeError::navigation(waypoint.label(), here));
            }
            self.wait.settle(step, &mut self.session).await?;
        }

        tracing::debug!("reached the end of the path");
        Ok(self.session.current_locator().await?)
    }

    async fn terminal_markup(&mut self, _terminal: &Locator) -> ScrapeResult<String> {
        Ok(self.session.page_markup().await?)
    }

    fn strategy(&self) -> &'static str {
        "interactive"
    }
}
