//! `waypoint collect <source>` — one collection from one source.

use crate::config::AppConfig;
use crate::output::{print_json, render_source};
use crate::sources::SourceSet;
use anyhow::{Context, Result};

/// Collect once and print every entity the source lists, in page order.
pub async fn run(config: &AppConfig, name: &str, json: bool) -> Result<()> {
    let source_config = config
        .source(name)
        .with_context(|| format!("unknown source: {name}"))?;

    let mut set = SourceSet::build(config, [source_config]).await?;
    let mut collected = Vec::with_capacity(1);
    for source in &mut set.sources {
        collected.push(source.collect().await);
    }
    set.close().await?;

    let table = collected
        .pop()
        .context("no source was built")?
        .with_context(|| format!("collecting from {}", source_config.name))?;

    if json {
        print_json(&serde_json::json!({
            "source": source_config.name,
            "table": table,
        }))
    } else {
        print!("{}", render_source(&table));
        Ok(())
    }
}
