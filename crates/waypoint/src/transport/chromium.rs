//! Chromium-backed interactive sessions using chromiumoxide.

use super::BrowserSession;
use crate::document::ClickTarget;
use crate::error::TransportError;
use crate::locator::Locator;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Find the Chromium binary path.
pub fn find_chromium() -> Option<PathBuf> {
    // 1. WAYPOINT_CHROMIUM_PATH env
    if let Ok(p) = std::env::var("WAYPOINT_CHROMIUM_PATH") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. ~/.waypoint/chromium/
    if let Some(home) = dirs::home_dir() {
        let candidates = if cfg!(target_os = "macos") {
            vec![
                home.join(".waypoint/chromium/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing"),
                home.join(".waypoint/chromium/chrome"),
            ]
        } else {
            vec![
                home.join(".waypoint/chromium/chrome-linux64/chrome"),
                home.join(".waypoint/chromium/chrome"),
            ]
        };
        for c in candidates {
            if c.exists() {
                return Some(c);
            }
        }
    }

    // 3. System PATH
    for name in ["google-chrome", "chromium", "chromium-browser"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    // 4. Common macOS location
    if cfg!(target_os = "macos") {
        let common =
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// A launched Chromium process. Each source gets its own page from it.
pub struct ChromiumBrowser {
    browser: Browser,
    handler: JoinHandle<()>,
    nav_timeout_ms: u64,
}

impl ChromiumBrowser {
    /// Launch Chromium. `headless = false` opens a visible window, which
    /// helps when working out a new site's waypoints.
    pub async fn launch(headless: bool, nav_timeout_ms: u64) -> Result<Self, TransportError> {
        let chrome_path = find_chromium().ok_or_else(|| {
            TransportError::Browser(
                "Chromium not found. Set WAYPOINT_CHROMIUM_PATH or install Chrome.".into(),
            )
        })?;

        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");
        builder = if headless {
            builder.arg("--headless=new")
        } else {
            builder.with_head()
        };
        let config = builder
            .build()
            .map_err(|e| TransportError::Browser(format!("failed to build browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| TransportError::Browser(format!("failed to launch Chromium: {e}")))?;

        // Spawn the handler task
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        Ok(Self {
            browser,
            handler,
            nav_timeout_ms,
        })
    }

    /// Open a fresh tab, exclusively owned by the returned session.
    pub async fn new_session(&self) -> Result<ChromiumSession, TransportError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| TransportError::Browser(format!("failed to create new page: {e}")))?;
        Ok(ChromiumSession {
            page,
            nav_timeout_ms: self.nav_timeout_ms,
        })
    }

    /// Close the browser process.
    pub async fn close(mut self) -> Result<(), TransportError> {
        self.browser
            .close()
            .await
            .map_err(|e| TransportError::Browser(format!("failed to close Chromium: {e}")))?;
        self.handler.abort();
        Ok(())
    }
}

/// A single Chromium tab driven through waypoints.
pub struct ChromiumSession {
    page: Page,
    nav_timeout_ms: u64,
}

impl ChromiumSession {
    async fn evaluate<T: serde::de::DeserializeOwned>(
        &self,
        script: &str,
    ) -> Result<T, TransportError> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| TransportError::Browser(format!("JS execution failed: {e}")))?
            .into_value()
            .map_err(|e| TransportError::Browser(format!("failed to convert JS result: {e:?}")))
    }
}

/// Page script clicking the first `tag` element whose trimmed text is `label`.
pub fn click_script(target: &ClickTarget) -> String {
    // JSON string literals are valid JS string literals, quotes and all.
    let tag = serde_json::Value::from(target.tag.as_str());
    let label = serde_json::Value::from(target.label.as_str());
    format!(
        "(() => {{ \
           const el = Array.from(document.querySelectorAll({tag})) \
             .find(e => e.textContent.trim() === {label}); \
           if (!el) return false; \
           el.click(); \
           return true; \
         }})()"
    )
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn open(&mut self, locator: &Locator) -> Result<(), TransportError> {
        let start = Instant::now();
        let result = tokio::time::timeout(
            Duration::from_millis(self.nav_timeout_ms),
            self.page.goto(locator.as_str()),
        )
        .await;

        match result {
            Ok(Ok(_)) => {
                if let Err(e) = self.page.wait_for_navigation().await {
                    tracing::debug!(url = %locator, "start page may be half-loaded: {e}");
                }
                tracing::debug!(
                    url = %locator,
                    load_ms = start.elapsed().as_millis() as u64,
                    "session opened"
                );
                Ok(())
            }
            Ok(Err(e)) => Err(TransportError::Request {
                url: locator.to_string(),
                message: e.to_string(),
            }),
            Err(_) => Err(TransportError::Timeout {
                url: locator.to_string(),
                timeout_ms: self.nav_timeout_ms,
            }),
        }
    }

    async fn click(&mut self, target: &ClickTarget) -> Result<bool, TransportError> {
        self.evaluate(&click_script(target)).await
    }

    async fn page_markup(&mut self) -> Result<String, TransportError> {
        self.evaluate("document.documentElement.outerHTML").await
    }

    async fn current_locator(&mut self) -> Result<Locator, TransportError> {
        let url = self
            .page
            .url()
            .await
            .map_err(|e| TransportError::Browser(format!("failed to get URL: {e}")))?
            .unwrap_or_default();
        Ok(Locator::new(url))
    }

    async fn is_ready(&mut self) -> Result<bool, TransportError> {
        self.evaluate("document.readyState === 'complete'").await
    }
}
