//! Where the collection API lives.

use serde::Deserialize;

use crate::error::ApiError;

/// Client configuration.
///
/// An empty `base_url` yields same-origin relative URLs (`/api/todos`),
/// which is what a page served by the API itself wants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_prefix: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_prefix: "/api".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Parse a TOML document with optional `base_url` / `api_prefix` keys.
    pub fn from_toml_str(raw: &str) -> Result<Self, ApiError> {
        let config: Self = toml::from_str(raw).map_err(|e| ApiError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if !self.api_prefix.starts_with('/') {
            return Err(ApiError::Config(format!(
                "api_prefix must start with '/': {:?}",
                self.api_prefix
            )));
        }
        if self.base_url.contains(['?', '#']) {
            return Err(ApiError::Config(format!(
                "base_url must not carry a query or fragment: {:?}",
                self.base_url
            )));
        }
        Ok(())
    }
}
