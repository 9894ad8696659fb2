//! URL validation for service endpoints
//!
//! The base endpoint URL is checked once, when `ServiceOptions` is built.
//! A valid endpoint URL:
//! - Uses the HTTP or HTTPS protocol
//! - Has a host
//! - Carries no query string or fragment (the recognize query is appended later)

use thiserror::Error;
use tracing::warn;
use url::Url;

/// Errors that can occur during URL validation
#[derive(Debug, Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),

    #[error("URL scheme must be http or https, got: {0}")]
    UnsupportedScheme(String),

    #[error("URL must have a host")]
    MissingHost,

    #[error("URL cannot be used as a base for endpoint paths")]
    CannotBeABase,

    #[error("Endpoint URL must not contain a query string or fragment")]
    QueryNotAllowed,
}

/// Checks whether the URL points at the local machine.
///
/// Note: `host_str()` returns bracketed IPv6, so the typed host is matched instead.
pub fn is_loopback_host(url: &Url) -> bool {
    match url.host() {
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

/// Validates and normalizes a service endpoint URL
///
/// This function performs the following checks:
/// 1. URL must be valid and parseable
/// 2. URL scheme must be `http` or `https`
/// 3. URL must have a hostname
/// 4. URL must not carry a query string or fragment
///
/// A trailing `/` on the path is removed so that path segments can be
/// appended without producing `//`.
///
/// Plain `http` to a non-loopback host is accepted but logged, since Basic
/// credentials would travel unencrypted.
///
/// # Example
/// ```rust
/// use watson_stt::utils::url_validation::validate_endpoint_url;
///
/// let url = validate_endpoint_url("https://stream.watsonplatform.net/speech-to-text/api/").unwrap();
/// assert_eq!(url.as_str(), "https://stream.watsonplatform.net/speech-to-text/api");
///
/// assert!(validate_endpoint_url("ftp://example.com").is_err());
/// ```
pub fn validate_endpoint_url(url: &str) -> Result<Url, UrlValidationError> {
    let mut parsed = Url::parse(url.trim())?;

    let scheme = parsed.scheme();
    if scheme != "https" && scheme != "http" {
        return Err(UrlValidationError::UnsupportedScheme(scheme.to_string()));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    if parsed.cannot_be_a_base() {
        return Err(UrlValidationError::CannotBeABase);
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(UrlValidationError::QueryNotAllowed);
    }

    if parsed.path().len() > 1 && parsed.path().ends_with('/') {
        let trimmed = parsed.path().trim_end_matches('/').to_string();
        parsed.set_path(&trimmed);
    }

    if parsed.scheme() == "http" && !is_loopback_host(&parsed) {
        warn!(
            host = parsed.host_str().unwrap_or_default(),
            "Endpoint URL uses plain http; credentials will not be encrypted in transit"
        );
    }

    Ok(parsed)
}
