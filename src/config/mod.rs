//! Service configuration for the Watson Speech-to-Text client
//!
//! `ServiceOptions` carries the credentials, API version and endpoint URL used
//! for every request. It is built once through [`ServiceOptionsBuilder`], which
//! fills in all defaults, and is read-only afterwards. One value can be shared
//! across concurrent requests without synchronization.
//!
//! Sources: explicit builder calls, environment variables, the Cloud Foundry
//! `VCAP_SERVICES` document, and YAML files. Priority: YAML > ENV vars > .env
//! values > VCAP_SERVICES > defaults.
//!
//! # Modules
//! - `env`: Environment variable loading
//! - `vcap`: `VCAP_SERVICES` credential lookup
//! - `yaml`: YAML configuration file loading
//! - `utils`: Utility functions for configuration parsing
//!
//! # Example
//! ```rust
//! use watson_stt::config::{AuthMode, ServiceOptions};
//!
//! let options = ServiceOptions::builder()
//!     .username("user")
//!     .password("secret")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.version(), "v1");
//! assert!(matches!(options.auth(), AuthMode::Basic { .. }));
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;
use zeroize::Zeroize;

use crate::utils::url_validation::{UrlValidationError, validate_endpoint_url};

mod env;
mod utils;
mod vcap;
mod yaml;

pub use utils::parse_bool;

// =============================================================================
// Constants
// =============================================================================

/// Watson Speech-To-Text default endpoint URL.
pub const SPEECH_TO_TEXT_API: &str = "https://stream.watsonplatform.net/speech-to-text/api";

/// API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Basic-auth username sent alongside an API key.
pub const API_KEY_USERNAME: &str = "apikey";

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while building or loading `ServiceOptions`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] UrlValidationError),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Invalid VCAP_SERVICES: {0}")]
    Vcap(String),

    #[error("Failed to read config file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config: {0}")]
    ParseYaml(#[from] serde_yaml::Error),
}

// =============================================================================
// Authentication Mode
// =============================================================================

/// How outgoing requests are authenticated.
///
/// Exactly one mode is active per `ServiceOptions`. Secrets are zeroized when
/// the value is dropped and never appear in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// No credential header is attached; session-scoped paths are disabled.
    Unauthenticated,
    /// HTTP Basic authentication with a username/password pair.
    Basic { username: String, password: String },
    /// An API key sent as the Basic password for [`API_KEY_USERNAME`].
    ApiKey { api_key: String },
}

impl AuthMode {
    /// Work out the active mode from the populated credential fields.
    ///
    /// The unauthenticated flag wins, then a non-empty API key, then any
    /// username or password. With no credentials at all the mode is
    /// `Unauthenticated`.
    pub fn infer(
        unauthenticated: bool,
        username: Option<&str>,
        password: Option<&str>,
        api_key: Option<&str>,
    ) -> Self {
        fn present(value: Option<&str>) -> Option<&str> {
            value.filter(|v| !v.is_empty())
        }

        if unauthenticated {
            return Self::Unauthenticated;
        }
        if let Some(api_key) = present(api_key) {
            return Self::ApiKey {
                api_key: api_key.to_string(),
            };
        }
        if present(username).is_some() || present(password).is_some() {
            return Self::Basic {
                username: username.unwrap_or_default().to_string(),
                password: password.unwrap_or_default().to_string(),
            };
        }
        Self::Unauthenticated
    }

    /// Whether requests carry credentials.
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Unauthenticated)
    }

    /// Short scheme name for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Basic { .. } => "basic",
            Self::ApiKey { .. } => "api-key",
        }
    }
}

impl fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => f.write_str("Unauthenticated"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::ApiKey { .. } => f
                .debug_struct("ApiKey")
                .field("api_key", &"<redacted>")
                .finish(),
        }
    }
}

impl Drop for AuthMode {
    fn drop(&mut self) {
        match self {
            Self::Unauthenticated => {}
            Self::Basic { username, password } => {
                username.zeroize();
                password.zeroize();
            }
            Self::ApiKey { api_key } => api_key.zeroize(),
        }
    }
}

// =============================================================================
// Service Options
// =============================================================================

/// Immutable service configuration shared by every recognition call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOptions {
    auth: AuthMode,
    version: String,
    url: Url,
}

impl ServiceOptions {
    /// Start building options. Nothing is defaulted until [`ServiceOptionsBuilder::build`].
    pub fn builder() -> ServiceOptionsBuilder {
        ServiceOptionsBuilder::default()
    }

    /// Load configuration from environment variables
    ///
    /// Reads `WATSON_USERNAME`, `WATSON_PASSWORD`, `WATSON_API_KEY`,
    /// `WATSON_VERSION`, `WATSON_STT_URL` and `WATSON_UNAUTHENTICATED`. When
    /// `WATSON_USE_VCAP_SERVICES` is true, the bound `speech_to_text` service
    /// in `VCAP_SERVICES` supplies any value not set explicitly.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A boolean variable is malformed
    /// - `VCAP_SERVICES` is requested but missing or malformed
    /// - The endpoint URL is invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        env::load_builder(None)?.build()
    }

    /// Load configuration from a YAML file with environment variables as the base
    ///
    /// Values present in the file's `watson:` section override values from
    /// the environment.
    ///
    /// # Example
    /// ```rust,no_run
    /// use watson_stt::config::ServiceOptions;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let options = ServiceOptions::from_file("watson.yaml")?;
    /// println!("Using endpoint {}", options.url());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml_config = yaml::YamlConfig::from_file(path.as_ref())?;
        let watson = yaml_config.watson.unwrap_or_default();

        let builder = env::load_builder(watson.use_vcap_services)?;
        watson.apply(builder).build()
    }

    /// The active authentication mode.
    pub fn auth(&self) -> &AuthMode {
        &self.auth
    }

    /// Whether requests are authenticated (drives session-scoped paths).
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// API version path segment, e.g. `v1`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Validated base endpoint URL, without a trailing `/`.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Builder for [`ServiceOptions`].
///
/// Every setter is optional. `build` applies the defaults once: an empty
/// version becomes [`DEFAULT_API_VERSION`] and an empty URL becomes
/// [`SPEECH_TO_TEXT_API`].
#[derive(Clone, Default)]
pub struct ServiceOptionsBuilder {
    unauthenticated: bool,
    username: Option<String>,
    password: Option<String>,
    api_key: Option<String>,
    version: Option<String>,
    url: Option<String>,
}

impl ServiceOptionsBuilder {
    pub fn unauthenticated(mut self, unauthenticated: bool) -> Self {
        self.unauthenticated = unauthenticated;
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Fill defaults, validate the URL and fix the authentication mode.
    pub fn build(mut self) -> Result<ServiceOptions, ConfigError> {
        let version = self
            .version
            .take()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        let url = self
            .url
            .take()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| SPEECH_TO_TEXT_API.to_string());
        let url = validate_endpoint_url(&url)?;

        let auth = AuthMode::infer(
            self.unauthenticated,
            self.username.as_deref(),
            self.password.as_deref(),
            self.api_key.as_deref(),
        );

        Ok(ServiceOptions { auth, version, url })
    }
}

impl fmt::Debug for ServiceOptionsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceOptionsBuilder")
            .field("unauthenticated", &self.unauthenticated)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("version", &self.version)
            .field("url", &self.url)
            .finish()
    }
}

impl Drop for ServiceOptionsBuilder {
    fn drop(&mut self) {
        if let Some(ref mut username) = self.username {
            username.zeroize();
        }
        if let Some(ref mut password) = self.password {
            password.zeroize();
        }
        if let Some(ref mut api_key) = self.api_key {
            api_key.zeroize();
        }
    }
}
