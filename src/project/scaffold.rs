//! Project directory writer
//!
//! Writes a converted API as a project directory. Writes stop at the first
//! failure; files already written are left in place.

use std::fs;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::error::{FilesystemError, FormatError, Result};
use crate::openapi::SecurityScheme;
use crate::project::convert::Conversion;
use crate::project::{ApiMetaData, DocumentFile};
use crate::templates;

/// Sub-directories every project starts with
pub const PROJECT_DIRS: &[&str] = &[
    "Definitions",
    "Docs",
    "Image",
    "Sequences",
    "Client-certificates",
    "Endpoint-certificates",
    "Interceptors",
    "libs",
];

pub const DEFINITIONS_FILE: &str = "Definitions/swagger.yaml";
pub const API_FILE: &str = "api.yaml";
pub const META_FILE: &str = "api_meta.yaml";
pub const README_FILE: &str = "README.md";
pub const DOCUMENT_FILE: &str = "document.yaml";

/// Write the whole project under `project_dir`.
pub fn write_project(
    project_dir: &Path,
    conversion: &Conversion,
    document_template: &DocumentFile,
) -> Result<()> {
    create_directories(project_dir)?;

    write_file(
        &project_dir.join(DEFINITIONS_FILE),
        conversion.definitions.as_bytes(),
    )?;
    write_yaml(&project_dir.join(API_FILE), &conversion.project, "api.yaml")?;
    write_file(
        &project_dir.join(README_FILE),
        templates::get(templates::README)?,
    )?;

    let meta = ApiMetaData::from(&conversion.project.data);
    write_yaml(&project_dir.join(META_FILE), &meta, "api_meta.yaml")?;

    for scheme in conversion.security.iter() {
        write_security_doc(project_dir, scheme, document_template)?;
    }

    Ok(())
}

/// Create the project directory and its standard sub-directories.
pub fn create_directories(project_dir: &Path) -> Result<()> {
    for dir in PROJECT_DIRS {
        let path = project_dir.join(dir);
        fs::create_dir_all(&path).map_err(|e| FilesystemError::create_dir(&path, e))?;
    }
    Ok(())
}

/// Write `Docs/<Kind>/<Kind>` and its `document.yaml` descriptor.
fn write_security_doc(
    project_dir: &Path,
    scheme: SecurityScheme,
    document_template: &DocumentFile,
) -> Result<()> {
    let name = scheme.doc_name();
    let doc_dir = project_dir.join("Docs").join(name);
    info!("Creating directory {}", doc_dir.display());
    fs::create_dir_all(&doc_dir).map_err(|e| FilesystemError::create_dir(&doc_dir, e))?;

    write_file(&doc_dir.join(name), templates::get(scheme.template())?)?;

    let mut document = document_template.clone();
    document.data.name = name.to_string();
    document.data.summary = scheme.summary().to_string();
    document.data.file_name = Some(name.to_string());
    write_yaml(&doc_dir.join(DOCUMENT_FILE), &document, "document.yaml")
}

fn write_yaml<T: Serialize>(path: &Path, value: &T, what: &str) -> Result<()> {
    let contents = serde_yaml::to_string(value).map_err(|e| FormatError::Serialize {
        what: what.to_string(),
        reason: e.to_string(),
    })?;
    write_file(path, contents.as_bytes())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    info!("Writing {}", path.display());
    fs::write(path, contents).map_err(|e| FilesystemError::write(path, e).into())
}
