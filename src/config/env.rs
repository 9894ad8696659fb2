use std::env;

use super::utils::parse_bool;
use super::{ConfigError, ServiceOptionsBuilder, vcap};

pub const ENV_USERNAME: &str = "WATSON_USERNAME";
pub const ENV_PASSWORD: &str = "WATSON_PASSWORD";
pub const ENV_API_KEY: &str = "WATSON_API_KEY";
pub const ENV_VERSION: &str = "WATSON_VERSION";
pub const ENV_URL: &str = "WATSON_STT_URL";
pub const ENV_UNAUTHENTICATED: &str = "WATSON_UNAUTHENTICATED";
pub const ENV_USE_VCAP_SERVICES: &str = "WATSON_USE_VCAP_SERVICES";
pub const ENV_VCAP_SERVICES: &str = "VCAP_SERVICES";

/// Read a variable, treating empty values as unset.
fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn bool_var(name: &'static str) -> Result<Option<bool>, ConfigError> {
    match var(name) {
        None => Ok(None),
        Some(value) => parse_bool(&value)
            .map(Some)
            .ok_or(ConfigError::InvalidValue { name, value }),
    }
}

/// Collect builder inputs from the environment.
///
/// `use_vcap_override` replaces `WATSON_USE_VCAP_SERVICES` when the caller
/// already knows whether VCAP lookup is wanted (e.g. from a YAML file).
pub(super) fn load_builder(
    use_vcap_override: Option<bool>,
) -> Result<ServiceOptionsBuilder, ConfigError> {
    let mut builder = ServiceOptionsBuilder::default();

    let use_vcap = match use_vcap_override {
        Some(flag) => flag,
        None => bool_var(ENV_USE_VCAP_SERVICES)?.unwrap_or(false),
    };

    if use_vcap {
        let raw = var(ENV_VCAP_SERVICES)
            .ok_or_else(|| ConfigError::Vcap(format!("{ENV_VCAP_SERVICES} is not set")))?;
        let mut creds = vcap::parse(&raw)?;

        if let Some(url) = creds.url.take() {
            builder = builder.url(url);
        }
        if let Some(username) = creds.username.take() {
            builder = builder.username(username);
        }
        if let Some(password) = creds.password.take() {
            builder = builder.password(password);
        }
        if let Some(api_key) = creds.apikey.take() {
            builder = builder.api_key(api_key);
        }
    }

    if let Some(username) = var(ENV_USERNAME) {
        builder = builder.username(username);
    }
    if let Some(password) = var(ENV_PASSWORD) {
        builder = builder.password(password);
    }
    if let Some(api_key) = var(ENV_API_KEY) {
        builder = builder.api_key(api_key);
    }
    if let Some(version) = var(ENV_VERSION) {
        builder = builder.version(version);
    }
    if let Some(url) = var(ENV_URL) {
        builder = builder.url(url);
    }
    if let Some(unauthenticated) = bool_var(ENV_UNAUTHENTICATED)? {
        builder = builder.unauthenticated(unauthenticated);
    }

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthMode, ServiceOptions};
    use serial_test::serial;

    // Helper to clean up environment variables
    fn cleanup_env_vars() {
        unsafe {
            env::remove_var(ENV_USERNAME);
            env::remove_var(ENV_PASSWORD);
            env::remove_var(ENV_API_KEY);
            env::remove_var(ENV_VERSION);
            env::remove_var(ENV_URL);
            env::remove_var(ENV_UNAUTHENTICATED);
            env::remove_var(ENV_USE_VCAP_SERVICES);
            env::remove_var(ENV_VCAP_SERVICES);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        cleanup_env_vars();

        let options = ServiceOptions::from_env().unwrap();
        assert_eq!(options.version(), "v1");
        assert_eq!(options.auth(), &AuthMode::Unauthenticated);

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_basic_credentials() {
        cleanup_env_vars();
        unsafe {
            env::set_var(ENV_USERNAME, "u");
            env::set_var(ENV_PASSWORD, "p");
            env::set_var(ENV_VERSION, "v2");
            env::set_var(ENV_URL, "http://localhost:9000/stt");
        }

        let options = ServiceOptions::from_env().unwrap();
        assert_eq!(
            options.auth(),
            &AuthMode::Basic {
                username: "u".to_string(),
                password: "p".to_string()
            }
        );
        assert_eq!(options.version(), "v2");
        assert_eq!(options.url().as_str(), "http://localhost:9000/stt");

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_unauthenticated_flag() {
        cleanup_env_vars();
        unsafe {
            env::set_var(ENV_USERNAME, "u");
            env::set_var(ENV_UNAUTHENTICATED, "yes");
        }

        let options = ServiceOptions::from_env().unwrap();
        assert!(!options.is_authenticated());

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_bool() {
        cleanup_env_vars();
        unsafe {
            env::set_var(ENV_UNAUTHENTICATED, "maybe");
        }

        let result = ServiceOptions::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name, .. }) if name == ENV_UNAUTHENTICATED
        ));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_vcap_services() {
        cleanup_env_vars();
        unsafe {
            env::set_var(ENV_USE_VCAP_SERVICES, "true");
            env::set_var(
                ENV_VCAP_SERVICES,
                r#"{"speech_to_text":[{"credentials":{"url":"https://vcap.example.com/api","username":"vu","password":"vp"}}]}"#,
            );
            // Explicit variables win over VCAP values
            env::set_var(ENV_PASSWORD, "override");
        }

        let options = ServiceOptions::from_env().unwrap();
        assert_eq!(options.url().as_str(), "https://vcap.example.com/api");
        assert_eq!(
            options.auth(),
            &AuthMode::Basic {
                username: "vu".to_string(),
                password: "override".to_string()
            }
        );

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_vcap_requested_but_missing() {
        cleanup_env_vars();
        unsafe {
            env::set_var(ENV_USE_VCAP_SERVICES, "1");
        }

        let result = ServiceOptions::from_env();
        assert!(matches!(result, Err(ConfigError::Vcap(_))));

        cleanup_env_vars();
    }
}
