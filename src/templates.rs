//! Bundled project templates
//!
//! Templates are embedded at compile time and looked up by logical path,
//! e.g. `/init/README.md`.

use crate::error::{FilesystemError, Result};

pub const README: &str = "/init/README.md";
pub const DEFAULT_API: &str = "/init/default_api.yaml";
pub const DOCUMENT: &str = "/init/document.yaml";
pub const COGNITO_USERPOOL_DOC: &str = "/init/cognito_userpool_doc";
pub const AWS_APIKEY_DOC: &str = "/init/aws_apikey_doc";
pub const AWS_SIGV4_DOC: &str = "/init/aws_sigv4_doc";
pub const RESOURCE_POLICY_DOC: &str = "/init/resource_policy_doc";

const BUNDLED: &[(&str, &[u8])] = &[
    (README, include_bytes!("../resources/init/README.md")),
    (DEFAULT_API, include_bytes!("../resources/init/default_api.yaml")),
    (DOCUMENT, include_bytes!("../resources/init/document.yaml")),
    (
        COGNITO_USERPOOL_DOC,
        include_bytes!("../resources/init/cognito_userpool_doc"),
    ),
    (AWS_APIKEY_DOC, include_bytes!("../resources/init/aws_apikey_doc")),
    (AWS_SIGV4_DOC, include_bytes!("../resources/init/aws_sigv4_doc")),
    (
        RESOURCE_POLICY_DOC,
        include_bytes!("../resources/init/resource_policy_doc"),
    ),
];

/// Get the raw bytes of a bundled template.
pub fn get(path: &str) -> Result<&'static [u8]> {
    BUNDLED
        .iter()
        .find(|(name, _)| *name == path)
        .map(|(_, bytes)| *bytes)
        .ok_or_else(|| FilesystemError::MissingTemplate(path.to_string()).into())
}
