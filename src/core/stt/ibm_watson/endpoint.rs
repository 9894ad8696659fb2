//! Endpoint path resolution.
//!
//! ```text
//! authenticated && session  ->  {base}/{version}/sessions/{session}/{action}
//! otherwise                 ->  {base}/{version}/{action}
//! ```

use url::Url;

use crate::config::ServiceOptions;

/// Action segment for speech recognition.
pub const RECOGNIZE_ACTION: &str = "recognize";

/// Path segment preceding a session identifier.
pub const SESSIONS_SEGMENT: &str = "sessions";

/// Shape of an endpoint path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointShape {
    /// `{base}/{version}/{action}`
    Flat,
    /// `{base}/{version}/sessions/{session}/{action}`
    Session,
}

impl EndpointShape {
    /// Sessions are only addressed when the client is authenticated.
    pub fn resolve(authenticated: bool, session_present: bool) -> Self {
        if authenticated && session_present {
            Self::Session
        } else {
            Self::Flat
        }
    }
}

/// Build the URL for `action`, optionally scoped to `session_id`.
///
/// Segments are percent-encoded, so a session id can never add path segments
/// of its own.
pub fn endpoint_url(options: &ServiceOptions, action: &str, session_id: &str) -> Url {
    let shape = EndpointShape::resolve(options.is_authenticated(), !session_id.is_empty());
    let mut url = options.url().clone();

    // Only fails for cannot-be-a-base URLs, which ServiceOptions rejects
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(options.version());
        if shape == EndpointShape::Session {
            segments.push(SESSIONS_SEGMENT).push(session_id);
        }
        segments.push(action);
    }

    url
}

/// URL of the recognize action.
pub fn recognize_url(options: &ServiceOptions, session_id: &str) -> Url {
    endpoint_url(options, RECOGNIZE_ACTION, session_id)
}
