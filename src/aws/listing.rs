//! `get-rest-apis` listing

use serde::Deserialize;

use crate::error::{FormatError, LookupError, Result};

/// A REST API known to API Gateway
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RestApi {
    pub id: String,
    pub name: String,
}

/// Output of `aws apigateway get-rest-apis --output json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RestApiListing {
    #[serde(default)]
    pub items: Vec<RestApi>,
}

impl RestApiListing {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| FormatError::Listing(e.to_string()).into())
    }

    /// First API whose name matches exactly.
    pub fn find(&self, name: &str) -> Result<&RestApi> {
        self.items
            .iter()
            .find(|api| api.name == name)
            .ok_or_else(|| LookupError::NotFound(name.to_string()).into())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
