//! Waypoint command line — configuration, logging, polling and output
//! around the `waypoint` core.

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;
pub mod scheduler;
pub mod sources;

pub use config::{load as load_config, AppConfig, SourceConfig, Strategy};
pub use scheduler::{Failure, Scheduler, Snapshot};
pub use sources::SourceSet;
