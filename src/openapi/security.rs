//! AWS security scheme detection
//!
//! Classifies the security declarations of an exported document into the
//! AWS mechanisms that need a migration document in the generated project.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{FormatError, Result};
use crate::templates;

/// An AWS specific security mechanism declared by an exported API.
///
/// Variant order is the order documents are generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SecurityScheme {
    /// `x-amazon-apigateway-policy` resource policy
    ResourcePolicy,
    /// Cognito user pool authorizer
    CognitoUserPool,
    /// `x-api-key` header
    ApiKey,
    /// IAM authorization with request signing
    SigV4,
}

impl SecurityScheme {
    /// Documentation folder and document name
    pub fn doc_name(self) -> &'static str {
        match self {
            SecurityScheme::ResourcePolicy => "Resource_Policy",
            SecurityScheme::CognitoUserPool => "Cognito_Userpool",
            SecurityScheme::ApiKey => "AWS_API_Keys",
            SecurityScheme::SigV4 => "AWS_Signature_Version4",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            SecurityScheme::ResourcePolicy => {
                "This document contains details related to AWS resource policies"
            }
            SecurityScheme::CognitoUserPool => {
                "This document contains details related to AWS cognito user pools"
            }
            SecurityScheme::ApiKey => "This document contains details related to AWS API keys",
            SecurityScheme::SigV4 => {
                "This document contains details related to AWS signature version 4"
            }
        }
    }

    /// Logical path of the bundled document template
    pub fn template(self) -> &'static str {
        match self {
            SecurityScheme::ResourcePolicy => templates::RESOURCE_POLICY_DOC,
            SecurityScheme::CognitoUserPool => templates::COGNITO_USERPOOL_DOC,
            SecurityScheme::ApiKey => templates::AWS_APIKEY_DOC,
            SecurityScheme::SigV4 => templates::AWS_SIGV4_DOC,
        }
    }
}

/// Detected security schemes, each kind at most once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecuritySchemeSet(BTreeSet<SecurityScheme>);

impl SecuritySchemeSet {
    /// Classify the security declarations of a raw document.
    ///
    /// Reads `components.securitySchemes` (OpenAPI 3), `securityDefinitions`
    /// (Swagger 2) and the top-level resource policy. Declarations that are not
    /// AWS specific are ignored.
    pub fn detect(raw: &Value) -> Result<Self> {
        let declarations = SecurityDeclarations::deserialize(raw)
            .map_err(|e| FormatError::MalformedSpec(format!("security declarations: {e}")))?;

        let mut set = BTreeSet::new();
        if declarations
            .resource_policy
            .as_ref()
            .and_then(|policy| policy.version.as_deref())
            .is_some_and(|version| !version.is_empty())
        {
            set.insert(SecurityScheme::ResourcePolicy);
        }

        let schemes = declarations
            .components
            .security_schemes
            .values()
            .chain(declarations.security_definitions.values());
        set.extend(schemes.filter_map(SchemeDeclaration::classify));

        Ok(Self(set))
    }

    pub fn iter(&self) -> impl Iterator<Item = SecurityScheme> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
struct SecurityDeclarations {
    #[serde(default)]
    components: Components,

    #[serde(default, rename = "securityDefinitions")]
    security_definitions: BTreeMap<String, SchemeDeclaration>,

    #[serde(default, rename = "x-amazon-apigateway-policy")]
    resource_policy: Option<ResourcePolicy>,
}

#[derive(Debug, Default, Deserialize)]
struct Components {
    #[serde(default, rename = "securitySchemes")]
    security_schemes: BTreeMap<String, SchemeDeclaration>,
}

#[derive(Debug, Deserialize)]
struct SchemeDeclaration {
    #[serde(default, rename = "type")]
    kind: Option<String>,

    #[serde(default, rename = "x-amazon-apigateway-authtype")]
    auth_type: Option<String>,
}

impl SchemeDeclaration {
    fn classify(&self) -> Option<SecurityScheme> {
        match (self.auth_type.as_deref(), self.kind.as_deref()) {
            (Some("cognito_user_pools"), _) => Some(SecurityScheme::CognitoUserPool),
            (Some("awsSigv4"), _) => Some(SecurityScheme::SigV4),
            // Lambda and other custom authorizers
            (Some(_), _) => None,
            (None, Some("apiKey")) => Some(SecurityScheme::ApiKey),
            (None, _) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResourcePolicy {
    #[serde(default, rename = "Version")]
    version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::fixtures::*;
    use serde_json::json;

    fn detect(raw: &str) -> SecuritySchemeSet {
        let value: Value = serde_json::from_str(raw).unwrap();
        SecuritySchemeSet::detect(&value).unwrap()
    }

    #[test]
    fn test_detects_api_key_and_cognito() {
        let set = detect(PETSTORE_OAS3);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![SecurityScheme::CognitoUserPool, SecurityScheme::ApiKey]
        );
    }

    #[test]
    fn test_detects_sigv4_and_resource_policy_in_swagger2() {
        let set = detect(SHOPPING_SWAGGER2);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![SecurityScheme::ResourcePolicy, SecurityScheme::SigV4]
        );
    }

    #[test]
    fn test_no_declarations() {
        let set = SecuritySchemeSet::detect(&json!({"openapi": "3.0.1"})).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_custom_authorizer_is_ignored() {
        let raw = json!({
            "components": {
                "securitySchemes": {
                    "lambda": {
                        "type": "apiKey",
                        "name": "Authorization",
                        "in": "header",
                        "x-amazon-apigateway-authtype": "custom"
                    },
                    "oauth": { "type": "oauth2" }
                }
            }
        });
        assert!(SecuritySchemeSet::detect(&raw).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_kinds_collapse() {
        let raw = json!({
            "components": {
                "securitySchemes": {
                    "key_a": { "type": "apiKey" },
                    "key_b": { "type": "apiKey" }
                }
            }
        });
        let set = SecuritySchemeSet::detect(&raw).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![SecurityScheme::ApiKey]);
    }

    #[test]
    fn test_policy_without_version_is_ignored() {
        let raw = json!({ "x-amazon-apigateway-policy": { "Statement": [] } });
        assert!(SecuritySchemeSet::detect(&raw).unwrap().is_empty());
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let raw = json!({ "components": { "securitySchemes": ["api_key"] } });
        assert!(SecuritySchemeSet::detect(&raw).is_err());
    }

    #[test]
    fn test_doc_names() {
        assert_eq!(SecurityScheme::CognitoUserPool.doc_name(), "Cognito_Userpool");
        assert_eq!(SecurityScheme::ApiKey.doc_name(), "AWS_API_Keys");
        assert_eq!(SecurityScheme::SigV4.doc_name(), "AWS_Signature_Version4");
        assert_eq!(SecurityScheme::ResourcePolicy.doc_name(), "Resource_Policy");
    }
}
