//! Error types for the apictl CLI

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for apictl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The external tool is missing or unhealthy
#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("AWS CLI `{0}` was not found. Make sure aws cli is installed and configured.")]
    CliMissing(String),

    #[error("Error getting AWS CLI version: {0}. Make sure aws cli is installed and configured.")]
    VersionCheck(String),
}

/// A named remote resource could not be resolved
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Unable to find an API with the name {0}")]
    NotFound(String),
}

/// An external invocation failed or produced nothing
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Could not start `{command}`: {reason}")]
    Spawn { command: String, reason: String },

    #[error("`{command}` exited with status {code}")]
    CommandFailed { command: String, code: i32 },

    #[error("`{command}` was terminated by a signal")]
    Terminated { command: String },

    #[error("Export did not produce a specification at {0}")]
    MissingExport(PathBuf),
}

/// Malformed or unsupported documents
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Could not decode the API listing: {0}")]
    Listing(String),

    #[error("Malformed specification: {0}")]
    MalformedSpec(String),

    #[error("Unsupported specification: {0}")]
    UnsupportedSpec(String),

    #[error("Could not serialize {what}: {reason}")]
    Serialize { what: String, reason: String },
}

/// Problems with the project directory or its files
#[derive(Debug, Error)]
pub enum FilesystemError {
    #[error(
        "{0} already exists. Run with -f or --force to overwrite directory and create project"
    )]
    AlreadyExists(PathBuf),

    #[error("{0} already exists and is not a directory")]
    NotADirectory(PathBuf),

    #[error("`{0}` cannot be used as a project directory name")]
    InvalidName(String),

    #[error("Failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("Failed to create directory {path}: {reason}")]
    CreateDir { path: PathBuf, reason: String },

    #[error("Bundled template not found: {0}")]
    MissingTemplate(String),

    #[error("Error creating temporary directory to store OAS: {0}")]
    Workspace(String),
}

impl FilesystemError {
    pub fn write(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        FilesystemError::Write {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    pub fn create_dir(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        FilesystemError::CreateDir {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_missing_message() {
        let err = EnvironmentError::CliMissing("aws".to_string());
        assert!(err.to_string().contains("installed and configured"));
    }

    #[test]
    fn test_lookup_not_found_names_api() {
        let err = LookupError::NotFound("PetStore".to_string());
        assert_eq!(err.to_string(), "Unable to find an API with the name PetStore");
    }

    #[test]
    fn test_already_exists_mentions_force() {
        let err = FilesystemError::AlreadyExists(PathBuf::from("PetStore"));
        let msg = err.to_string();
        assert!(msg.contains("PetStore already exists"));
        assert!(msg.contains("--force"));
    }

    #[test]
    fn test_command_failed_message() {
        let err = TransportError::CommandFailed {
            command: "aws apigateway get-export".to_string(),
            code: 254,
        };
        assert!(err.to_string().contains("254"));
    }

    #[test]
    fn test_missing_export_message() {
        let err = TransportError::MissingExport(PathBuf::from("/tmp/OAS1/PetStore.json"));
        assert!(err.to_string().contains("PetStore.json"));
    }

    #[test]
    fn test_error_is_single_line() {
        let errors: Vec<Error> = vec![
            LookupError::NotFound("X".to_string()).into(),
            FormatError::MalformedSpec("expected value".to_string()).into(),
            FilesystemError::AlreadyExists(PathBuf::from("X")).into(),
            EnvironmentError::VersionCheck("exit 1".to_string()).into(),
        ];
        for err in errors {
            assert!(!err.to_string().contains('\n'), "{err}");
        }
    }

    #[test]
    fn test_error_from_lookup_error() {
        let err: Error = LookupError::NotFound("X".to_string()).into();

        match err {
            Error::Lookup(LookupError::NotFound(name)) => assert_eq!(name, "X"),
            _ => panic!("Expected Error::Lookup(LookupError::NotFound)"),
        }
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
