//! API project model
//!
//! Serializable shapes of the files in a project directory: the `api.yaml`
//! manifest, `api_meta.yaml`, and the per-document `document.yaml` descriptors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod convert;
pub mod scaffold;

/// `api.yaml` file: a typed envelope around the API definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiProjectFile {
    /// Always `api`
    #[serde(rename = "type")]
    pub kind: String,

    /// Project format version
    pub version: String,

    /// The API definition
    pub data: ApiDefinition,
}

/// API definition stored in `api.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDefinition {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub context: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub provider: String,

    #[serde(default, rename = "lifeCycleStatus")]
    pub lifecycle_status: String,

    #[serde(default)]
    pub is_default_version: bool,

    #[serde(default, rename = "type")]
    pub api_type: String,

    #[serde(default)]
    pub transport: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub policies: Vec<String>,

    #[serde(default)]
    pub authorization_header: String,

    #[serde(default)]
    pub security_scheme: Vec<String>,

    #[serde(default)]
    pub visibility: String,

    /// Backend endpoints, unset when the source document names no server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_config: Option<EndpointConfig>,

    #[serde(default)]
    pub endpoint_implementation_type: String,

    /// Whether the API was imported from AWS API Gateway
    #[serde(default, rename = "isAWSAPI")]
    pub is_aws_api: bool,

    #[serde(default)]
    pub operations: Vec<Operation>,

    /// Template fields not modelled above, written back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Production and sandbox endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub endpoint_type: String,
    pub production_endpoints: Endpoint,
    pub sandbox_endpoints: Endpoint,
}

impl EndpointConfig {
    /// HTTP endpoint config using the same URL for production and sandbox
    pub fn http(url: &str) -> Self {
        Self {
            endpoint_type: "http".to_string(),
            production_endpoints: Endpoint {
                url: url.to_string(),
            },
            sandbox_endpoints: Endpoint {
                url: url.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub url: String,
}

/// A single resource of the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// URL template, e.g. `/pets/{petId}`
    pub target: String,

    /// Upper-case HTTP verb
    pub verb: String,

    pub auth_type: String,

    pub throttling_policy: String,
}

/// `api_meta.yaml` contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMetaData {
    pub name: String,
    pub version: String,
}

impl From<&ApiDefinition> for ApiMetaData {
    fn from(def: &ApiDefinition) -> Self {
        Self {
            name: def.name.clone(),
            version: def.version.clone(),
        }
    }
}

/// `document.yaml` file describing one entry under `Docs/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFile {
    #[serde(rename = "type")]
    pub kind: String,

    pub version: String,

    pub data: DocumentData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentData {
    #[serde(default)]
    pub name: String,

    #[serde(default, rename = "type")]
    pub doc_type: String,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub source_type: String,

    #[serde(default)]
    pub visibility: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;

    fn bundled_api() -> ApiProjectFile {
        serde_yaml::from_slice(templates::get(templates::DEFAULT_API).unwrap()).unwrap()
    }

    #[test]
    fn test_bundled_api_template_parses() {
        let api = bundled_api();
        assert_eq!(api.kind, "api");
        assert_eq!(api.data.lifecycle_status, "CREATED");
        assert_eq!(api.data.policies, vec!["Unlimited"]);
        assert!(!api.data.is_aws_api);
        assert!(api.data.endpoint_config.is_none());
    }

    #[test]
    fn test_bundled_document_template_parses() {
        let doc: DocumentFile =
            serde_yaml::from_slice(templates::get(templates::DOCUMENT).unwrap()).unwrap();
        assert_eq!(doc.kind, "document");
        assert_eq!(doc.data.doc_type, "HOWTO");
        assert_eq!(doc.data.source_type, "FILE");
    }

    #[test]
    fn test_api_definition_field_names() {
        let mut api = bundled_api();
        api.data.is_aws_api = true;
        api.data.endpoint_config = Some(EndpointConfig::http("https://example.com/Demo"));

        let yaml = serde_yaml::to_string(&api).unwrap();
        assert!(yaml.contains("isAWSAPI: true"));
        assert!(yaml.contains("lifeCycleStatus: CREATED"));
        assert!(yaml.contains("endpoint_type: http"));
        assert!(yaml.contains("production_endpoints:"));
        assert!(!yaml.contains("description"));
    }

    #[test]
    fn test_unknown_template_fields_survive() {
        let template = r#"
type: api
version: v4.0.0
data:
  provider: ops
  corsConfiguration:
    corsConfigurationEnabled: true
  businessInformation:
    businessOwner: ops-team
"#;
        let api: ApiProjectFile = serde_yaml::from_str(template).unwrap();
        assert_eq!(api.data.provider, "ops");
        assert_eq!(api.data.extra.len(), 2);

        let yaml = serde_yaml::to_string(&api).unwrap();
        assert!(yaml.contains("corsConfigurationEnabled: true"));
        assert!(yaml.contains("businessOwner: ops-team"));

        let again: ApiProjectFile = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(again, api);
    }

    #[test]
    fn test_unknown_document_fields_survive() {
        let template = "type: document\nversion: v4.0.0\ndata:\n  type: HOWTO\n  otherTypeName: Guide\n";
        let doc: DocumentFile = serde_yaml::from_str(template).unwrap();
        let yaml = serde_yaml::to_string(&doc).unwrap();
        assert!(yaml.contains("otherTypeName: Guide"));
    }

    #[test]
    fn test_meta_data_from_definition() {
        let def = ApiDefinition {
            name: "PetStore".to_string(),
            version: "1.0.0".to_string(),
            ..Default::default()
        };
        let meta = ApiMetaData::from(&def);
        let yaml = serde_yaml::to_string(&meta).unwrap();
        assert!(yaml.starts_with("name: PetStore\n"));
        let parsed: ApiMetaData = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.version, "1.0.0");
    }
}
