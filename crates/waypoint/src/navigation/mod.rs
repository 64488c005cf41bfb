//! Goal-directed navigation through an ordered list of textual waypoints.
//!
//! Two strategies share the [`Navigator`] contract:
//!
//! - [`StaticNavigator`] fetches and re-parses one document per hop and
//!   follows link destinations. Cheap, and enough for server-rendered sites.
//! - [`InteractiveNavigator`] drives one live browser session, clicking the
//!   element carrying each label and waiting for the page to settle. Needed
//!   when links only appear after client-side scripts run.
//!
//! Both stop at the first waypoint they cannot match, with
//! [`ScrapeError::Navigation`](crate::error::ScrapeError::Navigation). There
//! is no retry and no skipping.

mod interactive;
mod static_nav;
mod wait;

pub use interactive::{locate_clickable, InteractiveNavigator};
pub use static_nav::{resolve_waypoint, StaticNavigator};
pub use wait::{WaitPolicy, DEFAULT_CLICK_WAIT};

use crate::error::ScrapeResult;
use crate::locator::{Locator, Waypoint};
use async_trait::async_trait;

#[async_trait]
pub trait Navigator: Send {
    /// Follow `path` from `start` and return where it ends.
    ///
    /// The static strategy returns the terminal locator without fetching it.
    /// The interactive strategy leaves its session on the terminal page and
    /// returns the session's current address.
    async fn navigate(&mut self, start: &Locator, path: &[Waypoint]) -> ScrapeResult<Locator>;

    /// Markup of the terminal document reached by [`navigate`](Self::navigate).
    async fn terminal_markup(&mut self, terminal: &Locator) -> ScrapeResult<String>;

    /// Short name used in logs and listings.
    fn strategy(&self) -> &'static str;
}

#[async_trait]
impl<N: Navigator + ?Sized> Navigator for Box<N> {
    async fn navigate(&mut self, start: &Locator, path: &[Waypoint]) -> ScrapeResult<Locator> {
        (**self).navigate(start, path).await
    }

    async fn terminal_markup(&mut self, terminal: &Locator) -> ScrapeResult<String> {
        (**self).terminal_markup(terminal).await
    }

    fn strategy(&self) -> &'static str {
        (**self).strategy()
    }
}
