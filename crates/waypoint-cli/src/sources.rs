//! Turning configuration into live `Source`s.

use crate::config::{AppConfig, SourceConfig, Strategy};
use anyhow::Result;
use std::time::Duration;
use waypoint::{
    ChromiumBrowser, HttpFetcher, InteractiveNavigator, Navigator, Source, StaticNavigator,
    ValuePattern, WaitPolicy,
};

/// Built sources plus the browser backing any interactive ones.
///
/// The browser must outlive its tabs, so it travels with them.
pub struct SourceSet {
    pub sources: Vec<Source>,
    browser: Option<ChromiumBrowser>,
}

impl SourceSet {
    /// Build every selected source. Chromium is launched only if some
    /// source needs it; each interactive source gets a tab of its own.
    pub async fn build<'a, I>(config: &AppConfig, selected: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a SourceConfig>,
    {
        let mut browser = None;
        let mut sources = Vec::new();
        for source_config in selected {
            match build_source(config, source_config, &mut browser).await {
                Ok(source) => sources.push(source),
                Err(e) => {
                    // tabs first, then the browser they belong to
                    drop(sources);
                    if let Some(launched) = browser.take() {
                        if let Err(close_err) = launched.close().await {
                            tracing::warn!("failed to close Chromium: {close_err}");
                        }
                    }
                    return Err(
                        e.context(format!("failed to set up source {}", source_config.name))
                    );
                }
            }
        }
        Ok(Self { sources, browser })
    }

    /// Shut the browser down, if one was launched.
    pub async fn close(self) -> Result<()> {
        if let Some(browser) = self.browser {
            browser.close().await?;
        }
        Ok(())
    }
}

async fn build_source(
    config: &AppConfig,
    source: &SourceConfig,
    browser: &mut Option<ChromiumBrowser>,
) -> Result<Source> {
    let value_pattern = ValuePattern::new(config.value_pattern_for(source))?;

    let navigator: Box<dyn Navigator> = match source.strategy {
        Strategy::Static => Box::new(StaticNavigator::new(HttpFetcher::new(config.timeout_ms))),
        Strategy::Interactive => {
            let launched = match browser.take() {
                Some(b) => b,
                None => {
                    tracing::info!("launching Chromium (headless: {})", config.headless);
                    ChromiumBrowser::launch(config.headless, config.timeout_ms).await?
                }
            };
            let session = launched.new_session().await;
            *browser = Some(launched);
            Box::new(
                InteractiveNavigator::new(session?).with_wait_policy(WaitPolicy::Fixed(
                    Duration::from_millis(config.click_wait_ms),
                )),
            )
        }
    };

    Ok(Source::new(
        source.name.clone(),
        source.start.clone(),
        source.path.clone(),
        navigator,
        config.sample_label_for(source),
        value_pattern,
    ))
}
