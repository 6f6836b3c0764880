//! `aws init` pipeline
//!
//! version check -> list APIs -> resolve name -> export -> convert -> write
//! project. Runs strictly in sequence; the temporary workspace lives for the
//! whole run and is released on every exit path.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::info;

use crate::aws::{AwsCli, ExportType};
use crate::config::DefaultTemplates;
use crate::error::{FilesystemError, Result};
use crate::openapi::SecuritySchemeSet;
use crate::process::CommandRunner;
use crate::project::{convert, scaffold};
use crate::workspace::TemporaryWorkspace;

/// Inputs of one `aws init` run
#[derive(Debug, Clone)]
pub struct InitRequest {
    /// API name in API Gateway, also the project directory name
    pub api_name: String,
    /// Stage to export
    pub stage: String,
    /// Reuse an existing project directory
    pub force: bool,
    /// Directory the project (and the workspace) is created in
    pub base_dir: PathBuf,
    /// AWS CLI program
    pub aws_cli: String,
    pub export_type: ExportType,
    /// Pass `--debug` to the AWS CLI and echo its stderr
    pub verbose: bool,
}

impl InitRequest {
    pub fn project_dir(&self) -> PathBuf {
        self.base_dir.join(&self.api_name)
    }

    fn export_file_name(&self) -> String {
        format!("{}.json", self.api_name)
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct InitOutcome {
    pub project_dir: PathBuf,
    pub api_id: String,
    pub security: SecuritySchemeSet,
}

/// Check the project directory can be created.
///
/// Returns `true` when an existing directory will be overwritten (`force`).
pub fn preflight(request: &InitRequest) -> Result<bool> {
    validate_name(&request.api_name)?;

    let dir = request.project_dir();
    match fs::metadata(&dir) {
        Ok(meta) if !meta.is_dir() => Err(FilesystemError::NotADirectory(dir).into()),
        Ok(_) if !request.force => Err(FilesystemError::AlreadyExists(dir).into()),
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Run the whole pipeline.
pub fn run<R: CommandRunner>(
    request: &InitRequest,
    runner: &R,
    templates: DefaultTemplates,
) -> Result<InitOutcome> {
    preflight(request)?;

    let aws = AwsCli::new(runner, request.aws_cli.as_str(), request.verbose);
    aws.check_version()?;

    let workspace = TemporaryWorkspace::create_in(&request.base_dir)?;

    let listing = aws.list_rest_apis()?;
    info!("Searching for API ID...");
    let api = listing.find(&request.api_name)?;
    info!("API ID found : {}", api.id);

    let spec_path = workspace.path().join(request.export_file_name());
    aws.export(&api.id, &request.stage, request.export_type, &spec_path)?;

    let conversion = convert::convert(&spec_path, templates.api)?;

    let project_dir = request.project_dir();
    scaffold::write_project(&project_dir, &conversion, &templates.document)?;

    Ok(InitOutcome {
        project_dir,
        api_id: api.id.clone(),
        security: conversion.security,
    })
}

fn validate_name(name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\']);
    if invalid {
        return Err(FilesystemError::InvalidName(name.to_string()).into());
    }
    Ok(())
}
