//! nina-status entry point

use clap::Parser;
use nina_status::cli::{Cli, Commands};
use nina_status::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let result = match cli.into_command() {
        Commands::Fetch(args) => nina_status::cli::fetch::execute(&args).await,
        Commands::List(args) => nina_status::cli::list::execute(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
