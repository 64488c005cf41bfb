//! Configuration loading and resolution.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use waypoint::{Locator, ValuePattern, Waypoint, DEFAULT_SAMPLE_LABEL, DEFAULT_VALUE_PATTERN};

/// How a source walks its waypoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Fetch each page over HTTP and follow link destinations.
    #[default]
    Static,
    /// Drive a browser tab and click each label.
    Interactive,
}

/// One site to collect from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub start: Locator,
    pub path: Vec<Waypoint>,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Overrides the global sample label for this site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_label: Option<String>,
    /// Overrides the global value pattern for this site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_pattern: Option<String>,
}

fn default_true() -> bool {
    true
}

impl SourceConfig {
    fn new(name: &str, start: &str, path: &[&str], strategy: Strategy) -> Self {
        Self {
            name: name.to_string(),
            start: Locator::new(start),
            path: waypoint::locator::path(path.iter().copied()),
            strategy,
            enabled: true,
            sample_label: None,
            value_pattern: None,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Per-request timeout for page fetches and browser navigation.
    pub timeout_ms: u64,
    /// Run Chromium without a window.
    pub headless: bool,
    /// Delay after each click in interactive sources.
    pub click_wait_ms: u64,
    pub sample_label: String,
    pub value_pattern: String,
    /// Entities to print; empty means every entity seen.
    pub teams: Vec<String>,
    /// Seconds between polling passes.
    pub interval_secs: u64,
    pub sources: Vec<SourceConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut skybet = SourceConfig::new(
            "SkyBet",
            "https://www.skybet.com/",
            &[
                "Football",
                "Competitions",
                "World Cup 2018",
                "Outrights",
                "World Cup 2018 Winner",
            ],
            Strategy::Interactive,
        );
        skybet.enabled = false;

        Self {
            timeout_ms: 10_000,
            headless: true,
            click_wait_ms: 5_000,
            sample_label: DEFAULT_SAMPLE_LABEL.to_string(),
            value_pattern: DEFAULT_VALUE_PATTERN.to_string(),
            teams: vec!["Germany".into(), "France".into(), "Argentina".into()],
            interval_secs: 5 * 60,
            sources: vec![
                SourceConfig::new(
                    "WilliamHill",
                    "http://sports.williamhill.com/",
                    &[
                        "Football",
                        "World Cup 2018",
                        "World Cup 2018 - To Reach The Quarter Finals",
                    ],
                    Strategy::Static,
                ),
                SourceConfig::new(
                    "PaddyPower",
                    "http://www.paddypower.com",
                    &["Football Betting", "Outrights", "World Cup 2018"],
                    Strategy::Static,
                ),
                skybet,
            ],
        }
    }
}

impl AppConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&raw)
            .with_context(|| format!("invalid config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that could only fail later.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for source in &self.sources {
            if !seen.insert(source.name.as_str()) {
                bail!("duplicate source name: {}", source.name);
            }
            ValuePattern::new(self.value_pattern_for(source))
                .with_context(|| format!("bad value pattern for source {}", source.name))?;
        }
        Ok(())
    }

    pub fn source(&self, name: &str) -> Option<&SourceConfig> {
        self.sources
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn enabled_sources(&self) -> impl Iterator<Item = &SourceConfig> {
        self.sources.iter().filter(|s| s.enabled)
    }

    pub fn sample_label_for<'a>(&'a self, source: &'a SourceConfig) -> &'a str {
        source.sample_label.as_deref().unwrap_or(&self.sample_label)
    }

    pub fn value_pattern_for<'a>(&'a self, source: &'a SourceConfig) -> &'a str {
        source.value_pattern.as_deref().unwrap_or(&self.value_pattern)
    }
}

/// Resolve the configuration file path.
///
/// Order: explicit flag, `WAYPOINT_CONFIG`, `./waypoint.json`,
/// `~/.waypoint/config.json`. `None` means the built-in defaults apply.
pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }

    if let Ok(env_path) = std::env::var("WAYPOINT_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    let cwd_config = PathBuf::from("waypoint.json");
    if cwd_config.exists() {
        return Some(cwd_config);
    }

    dirs::home_dir()
        .map(|home| home.join(".waypoint").join("config.json"))
        .filter(|p| p.exists())
}

/// Load the configuration, falling back to the built-in sources.
pub fn load(explicit: Option<&str>) -> Result<AppConfig> {
    match resolve_config_path(explicit) {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            AppConfig::from_file(&path)
        }
        None => {
            tracing::debug!("no config file found, using built-in sources");
            Ok(AppConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_carry_bundled_sites() {
        let config = AppConfig::default();
        config.validate().unwrap();
        let enabled: Vec<&str> = config.enabled_sources().map(|s| s.name.as_str()).collect();
        assert_eq!(enabled, vec!["WilliamHill", "PaddyPower"]);
        let sky = config.source("skybet").unwrap();
        assert_eq!(sky.strategy, Strategy::Interactive);
        assert_eq!(sky.path.len(), 5);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "timeout_ms": 2500,
                "teams": [],
                "sources": [
                    {{ "name": "Local", "start": "http://localhost:8080/",
                       "path": ["Football", "Outrights"],
                       "value_pattern": "\\d+\\.\\d+" }},
                    {{ "name": "Live", "start": "https://live.example.com/",
                       "path": ["Winner"], "strategy": "interactive", "enabled": false }}
                ]
            }}"#
        )
        .unwrap();

        let config = load(file.path().to_str()).unwrap();
        assert_eq!(config.timeout_ms, 2500);
        assert!(config.teams.is_empty());
        assert_eq!(config.click_wait_ms, 5_000);
        let local = config.source("Local").unwrap();
        assert_eq!(local.strategy, Strategy::Static);
        assert!(local.enabled);
        assert_eq!(config.value_pattern_for(local), r"\d+\.\d+");
        assert_eq!(config.sample_label_for(local), "Germany");
        assert_eq!(config.enabled_sources().count(), 1);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut config = AppConfig::default();
        let copy = config.sources[0].clone();
        config.sources.push(copy);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_pattern_rejected() {
        let mut config = AppConfig::default();
        config.sources[0].value_pattern = Some("(unclosed".into());
        let err = config.validate().unwrap_err();
        assert!(format!("{err:#}").contains("WilliamHill"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(load(missing.to_str()).is_err());
    }
}
