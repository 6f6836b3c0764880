//! Configuration management for apictl
//!
//! Everything lives in the user config directory (`~/.apictl` by default):
//! an optional `config.yaml`, and optional overrides of the bundled
//! `default_api.yaml` and `document.yaml` project templates.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::aws::ExportType;
use crate::error::{ConfigError, Result};
use crate::project::{ApiProjectFile, DocumentFile};
use crate::templates;

pub const CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_API_FILE: &str = "default_api.yaml";
pub const DOCUMENT_FILE: &str = "document.yaml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// AWS CLI settings
    #[serde(default)]
    pub aws: AwsSettings,
}

/// AWS CLI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwsSettings {
    /// Program used for every AWS CLI invocation
    #[serde(default = "default_cli")]
    pub cli: String,

    /// Format requested from `get-export`
    #[serde(default)]
    pub export_type: ExportType,
}

fn default_cli() -> String {
    "aws".to_string()
}

impl Default for AwsSettings {
    fn default() -> Self {
        Self {
            cli: default_cli(),
            export_type: ExportType::default(),
        }
    }
}

impl Config {
    /// Get the default config directory
    pub fn default_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".apictl"))
    }

    /// Resolve the config directory, preferring an explicit override
    pub fn resolve_dir(config_dir: Option<&str>) -> Result<PathBuf> {
        match config_dir {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => Self::default_dir(),
        }
    }

    /// Load `config.yaml` from a config directory, defaulting when absent
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Replace the AWS CLI program, e.g. from `APICTL_AWS_CLI`
    pub fn with_cli_override(mut self, cli: Option<String>) -> Self {
        if let Some(cli) = cli.filter(|c| !c.trim().is_empty()) {
            self.aws.cli = cli;
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if self.aws.cli.trim().is_empty() {
            return Err(ConfigError::Invalid("aws.cli must not be empty".to_string()).into());
        }
        Ok(())
    }
}

/// Project templates, from the config directory or bundled
#[derive(Debug, Clone)]
pub struct DefaultTemplates {
    /// `api.yaml` starting point
    pub api: ApiProjectFile,
    /// `document.yaml` starting point
    pub document: DocumentFile,
}

impl DefaultTemplates {
    pub fn load(config_dir: &Path) -> Result<Self> {
        Ok(Self {
            api: load_template(config_dir, DEFAULT_API_FILE, templates::DEFAULT_API)?,
            document: load_template(config_dir, DOCUMENT_FILE, templates::DOCUMENT)?,
        })
    }
}

fn load_template<T: DeserializeOwned>(dir: &Path, file: &str, bundled: &str) -> Result<T> {
    let path = dir.join(file);
    if path.is_file() {
        log::info!("Using template {}", path.display());
        let bytes = std::fs::read(&path)?;
        parse_template(&bytes, &path.display().to_string())
    } else {
        parse_template(templates::get(bundled)?, file)
    }
}

fn parse_template<T: DeserializeOwned>(bytes: &[u8], name: &str) -> Result<T> {
    serde_yaml::from_slice(bytes)
        .map_err(|e| ConfigError::ParseError(format!("{name}: {e}")).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.aws.cli, "aws");
        assert_eq!(config.aws.export_type, ExportType::Oas30);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = tempdir().unwrap();
        let config = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_file() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "aws:\n  cli: /opt/aws/bin/aws\n  export_type: swagger\n",
        )
        .unwrap();

        let config = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(config.aws.cli, "/opt/aws/bin/aws");
        assert_eq!(config.aws.export_type, ExportType::Swagger);
    }

    #[test]
    fn test_partial_config_file() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "aws:\n  export_type: swagger\n").unwrap();

        let config = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(config.aws.cli, "aws");
    }

    #[test]
    fn test_malformed_config_file() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "aws: [cli").unwrap();

        let err = Config::load_from_dir(temp.path()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_empty_cli_is_invalid() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "aws:\n  cli: \"\"\n").unwrap();

        let err = Config::load_from_dir(temp.path()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_cli_override() {
        let config = Config::default().with_cli_override(Some("/tmp/fake-aws".to_string()));
        assert_eq!(config.aws.cli, "/tmp/fake-aws");

        let config = Config::default().with_cli_override(Some("  ".to_string()));
        assert_eq!(config.aws.cli, "aws");
    }

    #[test]
    fn test_resolve_dir_override() {
        let dir = Config::resolve_dir(Some("/custom/dir")).unwrap();
        assert_eq!(dir, PathBuf::from("/custom/dir"));
    }

    #[test]
    fn test_templates_fall_back_to_bundled() {
        let temp = tempdir().unwrap();
        let loaded = DefaultTemplates::load(temp.path()).unwrap();
        let bundled: ApiProjectFile =
            parse_template(templates::get(templates::DEFAULT_API).unwrap(), DEFAULT_API_FILE)
                .unwrap();
        assert_eq!(loaded.api, bundled);
        assert_eq!(loaded.document.data.doc_type, "HOWTO");
    }

    #[test]
    fn test_user_template_overrides_bundled() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join(DEFAULT_API_FILE),
            "type: api\nversion: v4.0.0\ndata:\n  provider: ops\n  policies: [Gold]\n",
        )
        .unwrap();

        let loaded = DefaultTemplates::load(temp.path()).unwrap();
        assert_eq!(loaded.api.data.provider, "ops");
        assert_eq!(loaded.api.data.policies, vec!["Gold"]);
    }

    #[test]
    fn test_malformed_user_template() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(DOCUMENT_FILE), "type: [document").unwrap();

        let err = DefaultTemplates::load(temp.path()).unwrap_err();
        assert!(err.to_string().contains(DOCUMENT_FILE));
    }
}
