//! CLI module for nina-status
//!
//! Provides the command-line interface for the status snapshot tool.

pub mod fetch;
pub mod list;

use clap::{Parser, Subcommand};

/// Read-only status snapshot of a N.I.N.A. Advanced API device
#[derive(Parser, Debug)]
#[command(name = "nina-status")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    NINA_STATUS_SPEC          OpenAPI spec path (default: api-1.json)
    NINA_STATUS_BASE_URL      Device API base URL (default: http://astromele3.lan:1888/v2/api)
    NINA_STATUS_CONFIG        JSON run configuration file
    NINA_STATUS_OUTPUT_DIR    Output directory (default: .)
    NINA_STATUS_MODE          Output mode: combined, per-endpoint, both (default: combined)
    NINA_STATUS_DEVICE_NAME   Device name used in output files (default: astromele3)
    NINA_STATUS_LOG_LEVEL     Log level (default: warn)
    NO_COLOR                  Disable colored log output
"#)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute (defaults to `fetch`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Arguments for the default `fetch` command (ignored when a subcommand is given)
    #[command(flatten)]
    pub fetch: fetch::FetchArgs,
}

impl Cli {
    /// 実行するサブコマンド（省略時は fetch）
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Fetch(self.fetch))
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every status endpoint and write the results
    Fetch(fetch::FetchArgs),
    /// List GET endpoints and how they are classified (no network access)
    List(list::ListArgs),
}
