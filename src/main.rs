//! apictl - CLI companion for managing API projects

use clap::Parser;
use env_logger::Env;

mod aws;
mod cli;
mod config;
mod error;
mod openapi;
mod pipeline;
mod process;
mod project;
mod templates;
mod workspace;

use cli::args::GlobalOptions;
use cli::{AwsCommands, Cli, Commands};
use error::Result;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the level picked from `--verbose`
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Aws(AwsCommands::Init(args)) => cli::aws::init(&args, &opts),
        Commands::Version => {
            println!("apictl version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            cli::completions::generate(shell, &mut std::io::stdout())
        }
    }
}
