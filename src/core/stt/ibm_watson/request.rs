//! Recognize request construction.

use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method};
use tracing::debug;

use super::config::RecognitionConfig;
use super::endpoint::recognize_url;
use super::params::{append_query, encode_query};
use crate::config::ServiceOptions;
use crate::core::stt::audio::AudioStream;
use crate::core::stt::base::{OutgoingRequest, RecognizeError, RequestSigner};

/// Build a signed recognize request using the credentials in `options`.
pub fn build_recognize_request(
    options: &ServiceOptions,
    config: RecognitionConfig,
) -> Result<OutgoingRequest, RecognizeError> {
    build_recognize_request_with(options, options.auth(), config)
}

/// Build a recognize request and sign it with `signer`.
///
/// The endpoint shape still follows the credentials in `options`; `signer` only
/// decides the `Authorization` header.
pub fn build_recognize_request_with(
    options: &ServiceOptions,
    signer: &dyn RequestSigner,
    config: RecognitionConfig,
) -> Result<OutgoingRequest, RecognizeError> {
    if config.is_empty() {
        return Err(RecognizeError::EmptyConfig);
    }

    let mut url = recognize_url(options, &config.session_id);
    append_query(&mut url, &encode_query(&config));
    debug!(path = url.path(), "Resolved recognize endpoint");

    let content_type = HeaderValue::from_str(&config.content_type).map_err(|source| {
        RecognizeError::InvalidHeaderValue {
            name: "content-type",
            source,
        }
    })?;

    let body = config.audio.unwrap_or_else(AudioStream::empty);
    let mut request = OutgoingRequest::new(Method::POST, url, body);
    request.headers_mut().insert(CONTENT_TYPE, content_type);

    signer.sign(&mut request);
    Ok(request)
}
