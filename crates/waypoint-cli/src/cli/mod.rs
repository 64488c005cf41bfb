//! Subcommand implementations for the `waypoint` binary.

pub mod collect_cmd;
pub mod doctor;
pub mod sources_cmd;
pub mod watch_cmd;
