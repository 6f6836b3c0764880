//! OpenAPI document loading
//!
//! Wraps an exported OpenAPI document (Swagger 2 or OpenAPI 3) as raw JSON
//! with typed accessors for the handful of fields the project converter reads.
//! Only fields that exist in both dialects are consumed, so one loader serves both.

use serde_json::Value;

use crate::error::{FormatError, Result};

pub mod endpoint;
pub mod security;

pub use security::{SecurityScheme, SecuritySchemeSet};

/// HTTP methods that map to API operations, in output order
const METHODS: &[&str] = &["get", "put", "post", "delete", "patch", "head", "options"];

/// Declared document version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Swagger2,
    OpenApi3,
}

/// A single `(path, method)` pair declared by the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiOperation {
    pub path: String,
    pub method: String,
}

/// A parsed OpenAPI document
#[derive(Debug, Clone)]
pub struct OpenApiDocument {
    raw: Value,
    dialect: Dialect,
}

impl OpenApiDocument {
    /// Parse a JSON document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: Value = serde_json::from_slice(bytes)
            .map_err(|e| FormatError::MalformedSpec(e.to_string()))?;
        Self::from_value(raw)
    }

    /// Validate the minimal shape of an already decoded document.
    pub fn from_value(raw: Value) -> Result<Self> {
        if !raw.is_object() {
            return Err(unsupported("document root is not an object"));
        }

        let dialect = if raw.get("swagger").and_then(Value::as_str).is_some() {
            Dialect::Swagger2
        } else if raw.get("openapi").and_then(Value::as_str).is_some() {
            Dialect::OpenApi3
        } else {
            return Err(unsupported("missing `openapi` or `swagger` version field"));
        };

        let info = raw
            .get("info")
            .and_then(Value::as_object)
            .ok_or_else(|| unsupported("missing `info` object"))?;
        for field in ["title", "version"] {
            if info.get(field).and_then(Value::as_str).is_none() {
                return Err(unsupported(&format!("missing `info.{field}`")));
            }
        }

        Ok(Self { raw, dialect })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn title(&self) -> &str {
        self.info_str("title").unwrap_or_default()
    }

    pub fn version(&self) -> &str {
        self.info_str("version").unwrap_or_default()
    }

    pub fn description(&self) -> Option<&str> {
        self.info_str("description")
    }

    /// Top-level string vendor extension, e.g. `x-wso2-basePath`
    pub fn extension_str(&self, name: &str) -> Option<&str> {
        self.raw.get(name).and_then(Value::as_str)
    }

    /// Names of the document-level tags, in declaration order
    pub fn tag_names(&self) -> Vec<String> {
        self.raw
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(|tag| tag.get("name").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All operations, ordered by path and then by method.
    pub fn operations(&self) -> Vec<ApiOperation> {
        let Some(paths) = self.raw.get("paths").and_then(Value::as_object) else {
            return Vec::new();
        };

        let mut ops = Vec::new();
        for (path, item) in paths {
            for method in METHODS {
                if item.get(*method).is_some_and(Value::is_object) {
                    ops.push(ApiOperation {
                        path: path.clone(),
                        method: method.to_string(),
                    });
                }
            }
        }
        ops
    }

    /// Serialize the document as YAML.
    ///
    /// Object keys come out sorted, so equal documents give identical bytes.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.raw).map_err(|e| {
            FormatError::Serialize {
                what: "API definition".to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn info_str(&self, field: &str) -> Option<&str> {
        self.raw
            .get("info")
            .and_then(|info| info.get(field))
            .and_then(Value::as_str)
    }
}

fn unsupported(reason: &str) -> crate::error::Error {
    FormatError::UnsupportedSpec(reason.to_string()).into()
}
