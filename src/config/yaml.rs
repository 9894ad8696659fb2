use serde::Deserialize;
use std::path::Path;

use super::{ConfigError, ServiceOptionsBuilder};

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values given here
/// override the same settings taken from environment variables.
///
/// # Example YAML structure
/// ```yaml
/// watson:
///   username: "your-username"
///   password: "your-password"
///   # api_key: "your-api-key"
///   version: "v1"
///   url: "https://stream.watsonplatform.net/speech-to-text/api"
///   unauthenticated: false
///   use_vcap_services: false
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub watson: Option<WatsonYaml>,
}

/// Watson service settings from YAML
#[derive(Clone, Deserialize, Default)]
#[serde(default)]
pub struct WatsonYaml {
    pub username: Option<String>,
    pub password: Option<String>,
    pub api_key: Option<String>,
    pub version: Option<String>,
    pub url: Option<String>,
    pub unauthenticated: Option<bool>,
    pub use_vcap_services: Option<bool>,
}

impl std::fmt::Debug for WatsonYaml {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatsonYaml")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("version", &self.version)
            .field("url", &self.url)
            .field("unauthenticated", &self.unauthenticated)
            .field("use_vcap_services", &self.use_vcap_services)
            .finish()
    }
}

impl YamlConfig {
    /// Load YAML configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml_str(&contents)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty mapping
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }
}

impl WatsonYaml {
    /// Overlay the values present in this section onto `builder`.
    pub(super) fn apply(self, mut builder: ServiceOptionsBuilder) -> ServiceOptionsBuilder {
        if let Some(username) = self.username {
            builder = builder.username(username);
        }
        if let Some(password) = self.password {
            builder = builder.password(password);
        }
        if let Some(api_key) = self.api_key {
            builder = builder.api_key(api_key);
        }
        if let Some(version) = self.version {
            builder = builder.version(version);
        }
        if let Some(url) = self.url {
            builder = builder.url(url);
        }
        if let Some(unauthenticated) = self.unauthenticated {
            builder = builder.unauthenticated(unauthenticated);
        }
        builder
    }
}
