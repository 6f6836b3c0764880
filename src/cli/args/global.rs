//! Global CLI options shared across all commands
//!
//! Carries the global flags to command handlers explicitly instead of
//! through process-wide state.

use crate::cli::Cli;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; config file values are merged in by the
/// handlers.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Verbose logging and AWS CLI debug passthrough
    pub verbose: bool,

    /// Custom config directory (defaults to ~/.apictl)
    pub config_dir: Option<String>,

    /// AWS CLI program override
    pub aws_cli: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            verbose: cli.verbose,
            config_dir: cli.config_dir.clone(),
            aws_cli: cli.aws_cli.clone(),
        }
    }

    /// Get config directory as `Option<&str>`.
    pub fn config_dir_ref(&self) -> Option<&str> {
        self.config_dir.as_deref()
    }
}
