//! AWS command implementations

use colored::Colorize;
use log::info;

use crate::cli::AwsInitArgs;
use crate::cli::args::GlobalOptions;
use crate::config::{Config, DefaultTemplates};
use crate::error::Result;
use crate::pipeline::{self, InitRequest};
use crate::process::SystemRunner;

/// Run `aws init`: pull an API from API Gateway and scaffold a project.
pub fn init(args: &AwsInitArgs, opts: &GlobalOptions) -> Result<()> {
    let config_dir = Config::resolve_dir(opts.config_dir_ref())?;
    let config = Config::load_from_dir(&config_dir)?.with_cli_override(opts.aws_cli.clone());
    let base_dir = std::env::current_dir()?;

    let request = InitRequest {
        api_name: args.name.clone(),
        stage: args.stage.clone(),
        force: args.force,
        base_dir,
        aws_cli: config.aws.cli,
        export_type: config.aws.export_type,
        verbose: opts.verbose,
    };

    // Fail on an existing directory before touching the AWS CLI
    if pipeline::preflight(&request)? {
        println!(
            "{} {} already exists, running command in forced mode",
            "⚠".yellow(),
            request.project_dir().display()
        );
    }

    let templates = DefaultTemplates::load(&config_dir)?;

    println!(
        "Initializing a new API project in {}",
        request.base_dir.display().to_string().cyan()
    );
    let outcome = pipeline::run(&request, &SystemRunner, templates)?;
    info!("Rest API ID: {}", outcome.api_id);

    if outcome.security.is_empty() {
        info!("No AWS specific security schemes detected");
    }
    for scheme in outcome.security.iter() {
        println!(
            "  {} AWS security detected, see Docs/{}",
            "○".dimmed(),
            scheme.doc_name()
        );
    }

    println!(
        "\n{} Project initialized: {}",
        "✓".green(),
        outcome.project_dir.display().to_string().bold()
    );
    println!("Open README file to learn more");

    Ok(())
}
