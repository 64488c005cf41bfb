//! Polling scheduler: owns the sources and collects from all of them on
//! every tick, keeping one broken site from stopping the others.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use waypoint::{EntityValueMap, Source};

/// A source that failed during a tick.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub source: String,
    pub error: String,
    pub retryable: bool,
}

/// Everything one tick collected.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub taken_at: DateTime<Utc>,
    /// Source name → its table. Failed sources are absent.
    pub table: BTreeMap<String, EntityValueMap>,
    pub failures: Vec<Failure>,
}

impl Snapshot {
    /// Every entity any source reported, sorted.
    pub fn entities(&self) -> Vec<String> {
        self.table
            .values()
            .flat_map(|t| t.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Owns a set of sources and polls them sequentially.
pub struct Scheduler {
    sources: Vec<Source>,
}

impl Scheduler {
    pub fn new(sources: Vec<Source>) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Collect once from every source.
    pub async fn tick(&mut self) -> Snapshot {
        let mut table = BTreeMap::new();
        let mut failures = Vec::new();

        for source in &mut self.sources {
            tracing::debug!(
                source = source.name(),
                start = %source.start(),
                hops = source.path().len(),
                strategy = source.strategy(),
                "collecting"
            );
            match source.collect().await {
                Ok(scores) => {
                    table.insert(source.name().to_string(), scores);
                }
                Err(e) => {
                    tracing::warn!("Error collecting data from {}: {e}", source.name());
                    failures.push(Failure {
                        source: source.name().to_string(),
                        error: e.to_string(),
                        retryable: e.is_retryable(),
                    });
                }
            }
        }

        Snapshot {
            taken_at: Utc::now(),
            table,
            failures,
        }
    }

    /// Tick every `interval` until Ctrl-C (or once, if `once`), handing each
    /// snapshot to `on_snapshot`.
    pub async fn run<F>(&mut self, interval: Duration, once: bool, mut on_snapshot: F) -> Result<()>
    where
        F: FnMut(&Snapshot) -> Result<()>,
    {
        loop {
            let snapshot = self.tick().await;
            on_snapshot(&snapshot)?;

            if once {
                return Ok(());
            }

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("interrupted, stopping");
                    return Ok(());
                }
            }
        }
    }
}
