//! CLI command definitions

use agenda_domain::OutputFormat as DomainOutputFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for replayed events
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One readable line per event
    Text,
    /// One JSON object per event
    Json,
}

impl From<OutputFormat> for DomainOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => DomainOutputFormat::Text,
            OutputFormat::Json => DomainOutputFormat::Json,
        }
    }
}

/// CLI arguments for agenda-vote
#[derive(Parser, Debug)]
#[command(name = "agenda-vote")]
#[command(author, version, about = "Agenda vote helper - replay a table through the agenda procedure")]
#[command(long_about = r#"
agenda-vote walks an agenda through its phases: outcome type, "when"
reactions, "after" reactions and the weighted vote. Seats may pass early;
early passes are applied when their phase begins.

A scenario file describes the seats, the speaker, the cards on the table
and the events to replay (see demos/ for an example).

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./agenda.toml       Project-level config
3. ~/.config/agenda-vote/config.toml   Global config

Example:
  agenda-vote demos/mutiny.json
  agenda-vote -o json demos/mutiny.json
  agenda-vote -vv --log-dir ./logs demos/mutiny.json
"#)]
pub struct Cli {
    /// Scenario file to replay (not required with --show-config)
    pub scenario: Option<PathBuf>,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print the final outcome of each agenda
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}
