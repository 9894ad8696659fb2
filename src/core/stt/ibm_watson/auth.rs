//! Credential signing for Watson requests.
//!
//! Both credential modes use HTTP Basic authentication. An API key is sent as
//! the password of the fixed [`API_KEY_USERNAME`] user.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use http::HeaderValue;
use http::header::AUTHORIZATION;
use tracing::debug;
use zeroize::Zeroize;

use crate::config::{API_KEY_USERNAME, AuthMode};
use crate::core::stt::base::{OutgoingRequest, RequestSigner};

/// Build a sensitive `Authorization: Basic ...` header value.
pub fn basic_auth_value(username: &str, password: &str) -> HeaderValue {
    let mut credentials = format!("{username}:{password}");
    let mut header = format!("Basic {}", BASE64.encode(credentials.as_bytes()));
    credentials.zeroize();

    let mut value = HeaderValue::from_str(&header)
        .expect("base64 output is always a valid header value");
    header.zeroize();

    value.set_sensitive(true);
    value
}

impl RequestSigner for AuthMode {
    fn sign<'r>(&self, request: &'r mut OutgoingRequest) -> &'r mut OutgoingRequest {
        match self {
            Self::Unauthenticated => {
                request.headers_mut().remove(AUTHORIZATION);
            }
            Self::Basic { username, password } => {
                request
                    .headers_mut()
                    .insert(AUTHORIZATION, basic_auth_value(username, password));
            }
            Self::ApiKey { api_key } => {
                request
                    .headers_mut()
                    .insert(AUTHORIZATION, basic_auth_value(API_KEY_USERNAME, api_key));
            }
        }

        debug!(scheme = self.as_str(), "Signed recognize request");
        request
    }
}
