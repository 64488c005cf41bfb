//! `waypoint sources` — list configured sources.

use crate::config::{AppConfig, Strategy};
use crate::output::print_json;
use anyhow::Result;

/// Print each source with its strategy and waypoint path.
pub fn run(config: &AppConfig, json: bool) -> Result<()> {
    if json {
        return print_json(&config.sources);
    }

    for source in &config.sources {
        let strategy = match source.strategy {
            Strategy::Static => "static",
            Strategy::Interactive => "interactive",
        };
        let state = if source.enabled { "" } else { " (disabled)" };
        let path: Vec<&str> = source.path.iter().map(|w| w.label()).collect();
        println!("{}{state}", source.name);
        println!("  start:    {}", source.start);
        println!("  strategy: {strategy}");
        println!("  path:     {}", path.join(" > "));
    }
    Ok(())
}
