//! Scoped temporary workspace
//!
//! Holds downloaded artifacts until the project is written. The directory is
//! removed when the workspace is dropped, whichever way the pipeline exits.

use std::path::Path;

use log::{info, warn};
use tempfile::TempDir;

use crate::error::{FilesystemError, Result};

const PREFIX: &str = "OAS";

#[derive(Debug)]
pub struct TemporaryWorkspace {
    dir: Option<TempDir>,
}

impl TemporaryWorkspace {
    /// Create a fresh `OAS*` directory inside `parent`.
    pub fn create_in(parent: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(PREFIX)
            .tempdir_in(parent)
            .map_err(|e| FilesystemError::Workspace(e.to_string()))?;
        info!("Temporary directory created: {}", dir.path().display());
        Ok(Self { dir: Some(dir) })
    }

    pub fn path(&self) -> &Path {
        match &self.dir {
            Some(dir) => dir.path(),
            None => Path::new(""),
        }
    }
}

impl Drop for TemporaryWorkspace {
    fn drop(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };
        let path = dir.path().to_path_buf();
        match dir.close() {
            Ok(()) => info!("Temporary directory deleted"),
            Err(e) => warn!("Failed to delete temporary directory {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_workspace_removed_on_drop() {
        let parent = tempdir().unwrap();
        let workspace = TemporaryWorkspace::create_in(parent.path()).unwrap();
        let path = workspace.path().to_path_buf();

        assert!(path.is_dir());
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("OAS"));
        fs::write(path.join("PetStore.json"), "{}").unwrap();

        drop(workspace);
        assert!(!path.exists());
    }

    #[test]
    fn test_workspace_removed_on_early_return() {
        fn failing_stage(parent: &Path) -> Result<std::path::PathBuf> {
            let workspace = TemporaryWorkspace::create_in(parent)?;
            let _path = workspace.path().to_path_buf();
            Err(crate::error::LookupError::NotFound("PetStore".to_string()).into())
        }

        let parent = tempdir().unwrap();
        assert!(failing_stage(parent.path()).is_err());
        assert_eq!(fs::read_dir(parent.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_parent() {
        let parent = tempdir().unwrap();
        let err = TemporaryWorkspace::create_in(&parent.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("temporary directory"));
    }
}
