//! AWS CLI wrapper
//!
//! Drives the `aws apigateway` commands needed to pull an API's OpenAPI
//! document out of API Gateway.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{EnvironmentError, Error, Result, TransportError};
use crate::process::{CommandOutput, CommandRunner};

pub mod listing;

pub use listing::RestApiListing;

const API_GATEWAY: &str = "apigateway";
const UNKNOWN_VERSION: &str = "unknown";

/// Format requested from `get-export`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportType {
    /// OpenAPI 3
    #[default]
    Oas30,
    /// Swagger 2
    Swagger,
}

impl ExportType {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportType::Oas30 => "oas30",
            ExportType::Swagger => "swagger",
        }
    }
}

impl fmt::Display for ExportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The AWS CLI, run through a [`CommandRunner`]
pub struct AwsCli<'a, R: CommandRunner> {
    runner: &'a R,
    program: String,
    verbose: bool,
}

impl<'a, R: CommandRunner> AwsCli<'a, R> {
    pub fn new(runner: &'a R, program: impl Into<String>, verbose: bool) -> Self {
        Self {
            runner,
            program: program.into(),
            verbose,
        }
    }

    /// Check the CLI is installed and return its version banner.
    pub fn check_version(&self) -> Result<String> {
        info!("Executing aws version command");
        let output = self
            .runner
            .run(&self.program, &["--version".to_string()], false)
            .map_err(|e| match e {
                missing @ Error::Environment(_) => missing,
                other => EnvironmentError::VersionCheck(other.to_string()).into(),
            })?;
        if !output.success() {
            return Err(EnvironmentError::VersionCheck(match output.code {
                Some(code) => format!("exit status {code}"),
                None => "terminated by signal".to_string(),
            })
            .into());
        }

        // AWS CLI v1 prints its version banner to stderr
        let version = match output.joined().trim() {
            "" => UNKNOWN_VERSION.to_string(),
            banner => banner.to_string(),
        };
        info!("AWS CLI version : {}", version);
        Ok(version)
    }

    /// List the REST APIs of the configured account and region.
    pub fn list_rest_apis(&self) -> Result<RestApiListing> {
        info!("Executing aws get-rest-apis command");
        let args = self.with_common_flags(vec![
            API_GATEWAY.to_string(),
            "get-rest-apis".to_string(),
        ]);
        let output = self
            .run_with_spinner(&args, "Fetching APIs from AWS API Gateway...")?
            .check()?;

        let listing = RestApiListing::from_json(&output.joined())?;
        info!("{} APIs were extracted", listing.len());
        Ok(listing)
    }

    /// Export a stage of an API as an OpenAPI document written to `dest`.
    pub fn export(
        &self,
        api_id: &str,
        stage: &str,
        export_type: ExportType,
        dest: &Path,
    ) -> Result<()> {
        info!("Executing aws get-export command");
        let args = self.with_common_flags(vec![
            API_GATEWAY.to_string(),
            "get-export".to_string(),
            "--rest-api-id".to_string(),
            api_id.to_string(),
            "--stage-name".to_string(),
            stage.to_string(),
            "--export-type".to_string(),
            export_type.to_string(),
            dest.to_string_lossy().into_owned(),
        ]);
        let output = self
            .run_with_spinner(&args, "Exporting API definition...")?
            .check()?;

        for line in &output.stdout {
            debug!("{}", line);
        }

        if !dest.is_file() {
            return Err(TransportError::MissingExport(dest.to_path_buf()).into());
        }
        Ok(())
    }

    fn with_common_flags(&self, mut args: Vec<String>) -> Vec<String> {
        args.push("--output".to_string());
        args.push("json".to_string());
        if self.verbose {
            args.push("--debug".to_string());
        }
        args
    }

    fn run_with_spinner(&self, args: &[String], message: &str) -> Result<CommandOutput> {
        // Debug output goes to the terminal in verbose mode, so no spinner there
        let spinner = (!self.verbose).then(|| spinner(message));
        let result = self.runner.run(&self.program, args, self.verbose);
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        result
    }
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
