// Copyright 2026 Waypoint Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use waypoint_cli::{cli, load_config, logging, output};

#[derive(Parser)]
#[command(
    name = "waypoint",
    about = "Waypoint — follow link labels to a table and keep it fresh",
    version,
    after_help = "Run 'waypoint <command> --help' for details on each command.\nRun 'waypoint' with no command to watch every enabled source."
)]
struct Cli {
    /// Configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll every enabled source and print the combined table
    Watch {
        /// Seconds between polls
        #[arg(long)]
        interval: Option<u64>,
        /// Teams to show, comma separated (e.g. "Germany,France")
        #[arg(long, value_delimiter = ',')]
        teams: Option<Vec<String>>,
        /// Poll once and exit
        #[arg(long)]
        once: bool,
    },
    /// Collect once from a single source and print its whole table
    Collect {
        /// Source name, as listed by `waypoint sources`
        source: String,
    },
    /// List configured sources
    Sources,
    /// Check environment and diagnose issues
    Doctor,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref(), cli.verbose);

    let result = run(&cli).await;

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if cli.json {
            output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }))?;
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }

    result
}

async fn run(args: &Cli) -> Result<()> {
    match &args.command {
        Some(Commands::Doctor) => return cli::doctor::run(),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "waypoint", &mut std::io::stdout());
            return Ok(());
        }
        _ => {}
    }

    let config = load_config(args.config.as_deref())?;

    match &args.command {
        None => cli::watch_cmd::run(&config, None, None, false, args.json).await,
        Some(Commands::Watch {
            interval,
            teams,
            once,
        }) => cli::watch_cmd::run(&config, *interval, teams.clone(), *once, args.json).await,
        Some(Commands::Collect { source }) => {
            cli::collect_cmd::run(&config, source, args.json).await
        }
        Some(Commands::Sources) => cli::sources_cmd::run(&config, args.json),
        Some(Commands::Doctor) | Some(Commands::Completions { .. }) => Ok(()),
    }
}
