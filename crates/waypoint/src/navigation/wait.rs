use crate::error::TransportError;
use crate::transport::BrowserSession;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Delay after each click when nothing else is configured.
pub const DEFAULT_CLICK_WAIT: Duration = Duration::from_secs(5);

/// How long to let a page settle after a simulated click.
///
/// There is no reliable "content loaded" signal for script-driven pages, so
/// the default is a flat delay.
#[derive(Clone)]
pub enum WaitPolicy {
    /// The same delay after every click.
    Fixed(Duration),
    /// Delay computed from the zero-based step index.
    PerStep(Arc<dyn Fn(usize) -> Duration + Send + Sync>),
    /// Poll the page's ready state every `poll` until it reports complete.
    /// Gives up after `timeout` and carries on with a warning.
    UntilReady { poll: Duration, timeout: Duration },
}

impl WaitPolicy {
    pub fn per_step<F>(f: F) -> Self
    where
        F: Fn(usize) -> Duration + Send + Sync + 'static,
    {
        WaitPolicy::PerStep(Arc::new(f))
    }

    /// Wait after the click of step `step`.
    pub async fn settle<S>(&self, step: usize, session: &mut S) -> Result<(), TransportError>
    where
        S: BrowserSession + ?Sized,
    {
        match self {
            WaitPolicy::Fixed(delay) => sleep(*delay).await,
            WaitPolicy::PerStep(f) => sleep(f(step)).await,
            WaitPolicy::UntilReady { poll, timeout } => {
                let start = Instant::now();
                loop {
                    sleep(*poll).await;
                    if session.is_ready().await? {
                        break;
                    }
                    if start.elapsed() >= *timeout {
                        tracing::warn!(
                            step,
                            timeout_ms = timeout.as_millis() as u64,
                            "page not ready in time, continuing"
                        );
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

async fn sleep(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        WaitPolicy::Fixed(DEFAULT_CLICK_WAIT)
    }
}

impl fmt::Debug for WaitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitPolicy::Fixed(d) => f.debug_tuple("Fixed").field(d).finish(),
            WaitPolicy::PerStep(_) => f.write_str("PerStep(..)"),
            WaitPolicy::UntilReady { poll, timeout } => f
                .debug_struct("UntilReady")
                .field("poll", poll)
                .field("timeout", timeout)
                .finish(),
        }
    }
}
