//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod aws;
pub mod completions;

/// apictl - manage API projects for the API-management platform
#[derive(Parser, Debug)]
#[command(name = "apictl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (also runs the AWS CLI with --debug)
    #[arg(long, global = true, env = "APICTL_VERBOSE", hide_env = true)]
    pub verbose: bool,

    /// Override config directory location
    #[arg(long, global = true, env = "APICTL_CONFIG_DIR", hide_env = true)]
    pub config_dir: Option<String>,

    /// AWS CLI program to run
    #[arg(long, global = true, env = "APICTL_AWS_CLI", hide = true)]
    pub aws_cli: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Work with APIs hosted on AWS API Gateway
    #[command(subcommand)]
    Aws(AwsCommands),

    /// Display version information
    Version,

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   apictl completion bash > /etc/bash_completion.d/apictl
  zsh:    apictl completion zsh > \"${fpath[1]}/_apictl\"
  fish:   apictl completion fish > ~/.config/fish/completions/apictl.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// AWS API Gateway subcommands
#[derive(Subcommand, Debug)]
pub enum AwsCommands {
    /// Initialize an API project from an AWS API
    #[command(
        long_about = "Download the OpenAPI definition of an API from AWS API Gateway \
                      and initialize an API project from it",
        after_help = "EXAMPLES:\n  \
            apictl aws init -n PetStore -s Demo\n  \
            apictl aws init --name PetStore --stage Demo\n  \
            apictl aws init --name Shopping --stage Live --force\n\n\
            Both --name and --stage are required. The AWS CLI must be installed and configured \
            (https://docs.aws.amazon.com/cli/latest/userguide/cli-chap-welcome.html)."
    )]
    Init(AwsInitArgs),
}

/// Arguments of `aws init`
#[derive(Args, Debug, Clone)]
pub struct AwsInitArgs {
    /// Name of the API to get from AWS API Gateway
    #[arg(long, short = 'n')]
    pub name: String,

    /// Stage name of the API to get from AWS API Gateway
    #[arg(long, short = 's')]
    pub stage: String,

    /// Overwrite the project directory if it already exists
    #[arg(long, short = 'f')]
    pub force: bool,
}
