//! Exported OpenAPI document -> API project conversion

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::info;

use crate::error::{Result, TransportError};
use crate::openapi::{OpenApiDocument, SecuritySchemeSet, endpoint};
use crate::project::{ApiDefinition, ApiProjectFile, EndpointConfig, Operation};

/// Tag added to every API imported from AWS
pub const AWS_TAG: &str = "aws";

const DEFAULT_AUTH_TYPE: &str = "Application & Application User";
const DEFAULT_THROTTLING_POLICY: &str = "Unlimited";
const BASE_PATH_EXTENSION: &str = "x-wso2-basePath";

/// Everything the scaffolder needs to write a project
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Populated `api.yaml`
    pub project: ApiProjectFile,
    /// The exported document, as YAML
    pub definitions: String,
    /// AWS security mechanisms that need documentation
    pub security: SecuritySchemeSet,
}

/// Load an exported document and build the project from `template`.
pub fn convert(spec_path: &Path, template: ApiProjectFile) -> Result<Conversion> {
    let bytes = match fs::read(spec_path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(TransportError::MissingExport(spec_path.to_path_buf()).into());
        }
        Err(e) => return Err(e.into()),
    };
    let document = OpenApiDocument::from_slice(&bytes)?;

    let mut project = template;
    let def = &mut project.data;
    def.is_aws_api = true;
    populate(def, &document);

    if let Some(url) = endpoint::production_url(&document) {
        info!("Endpoint URL: {}", url);
        def.endpoint_config = Some(EndpointConfig::http(&url));
    }
    add_aws_tag(def);

    let security = SecuritySchemeSet::detect(document.raw())?;
    let definitions = document.to_yaml()?;

    Ok(Conversion {
        project,
        definitions,
        security,
    })
}

/// Copy name, version, context, tags and operations from the document.
pub fn populate(def: &mut ApiDefinition, doc: &OpenApiDocument) {
    def.name = doc.title().to_string();
    def.version = doc.version().to_string();
    def.description = doc.description().map(str::to_string);
    def.context = match doc.extension_str(BASE_PATH_EXTENSION) {
        Some(base_path) => base_path.to_string(),
        None => default_context(doc.title(), doc.version()),
    };

    for tag in doc.tag_names() {
        if !def.tags.contains(&tag) {
            def.tags.push(tag);
        }
    }

    def.operations = doc
        .operations()
        .into_iter()
        .map(|op| Operation {
            target: op.path,
            verb: op.method.to_uppercase(),
            auth_type: DEFAULT_AUTH_TYPE.to_string(),
            throttling_policy: DEFAULT_THROTTLING_POLICY.to_string(),
        })
        .collect();
}

/// Append the `aws` tag unless it is already present.
pub fn add_aws_tag(def: &mut ApiDefinition) {
    if !def.tags.iter().any(|tag| tag == AWS_TAG) {
        def.tags.push(AWS_TAG.to_string());
    }
}

fn default_context(title: &str, version: &str) -> String {
    let name: String = title.split_whitespace().collect();
    format!("/{name}/{version}")
}
