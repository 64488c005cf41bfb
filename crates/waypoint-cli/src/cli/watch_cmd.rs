//! `waypoint watch` — poll every enabled source and print the table.

use crate::config::AppConfig;
use crate::output::{print_json, render_table};
use crate::scheduler::Scheduler;
use crate::sources::SourceSet;
use anyhow::{bail, Result};
use std::time::Duration;

/// Run the polling loop.
pub async fn run(
    config: &AppConfig,
    interval_secs: Option<u64>,
    teams: Option<Vec<String>>,
    once: bool,
    json: bool,
) -> Result<()> {
    let enabled: Vec<_> = config.enabled_sources().collect();
    if enabled.is_empty() {
        bail!("no enabled sources in configuration");
    }

    let interval = Duration::from_secs(interval_secs.unwrap_or(config.interval_secs));
    let teams = teams.unwrap_or_else(|| config.teams.clone());

    let mut set = SourceSet::build(config, enabled).await?;
    let mut scheduler = Scheduler::new(std::mem::take(&mut set.sources));
    tracing::info!(
        "watching {} source(s) every {}s",
        scheduler.sources().len(),
        interval.as_secs()
    );

    let result = scheduler
        .run(interval, once, |snapshot| {
            if json {
                print_json(snapshot)
            } else {
                print!("{}", render_table(snapshot, &teams));
                Ok(())
            }
        })
        .await;

    set.close().await?;
    result
}
