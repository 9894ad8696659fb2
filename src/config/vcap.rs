//! Credential lookup in the Cloud Foundry `VCAP_SERVICES` document.
//!
//! Bound services are grouped by label. The first `speech_to_text` entry is
//! used:
//!
//! ```json
//! {
//!   "speech_to_text": [{
//!     "name": "my-stt",
//!     "credentials": {
//!       "url": "https://stream.watsonplatform.net/speech-to-text/api",
//!       "username": "user",
//!       "password": "secret"
//!     }
//!   }]
//! }
//! ```

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::ConfigError;

/// Service label the Speech-to-Text service is bound under.
pub const SERVICE_LABEL: &str = "speech_to_text";

#[derive(Deserialize)]
struct VcapService {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    credentials: VcapCredentials,
}

/// Credentials of a bound service instance. Zeroized on drop.
///
/// Missing keys deserialize to `None`. A container-level `serde(default)`
/// would move fields out of a `Drop` type.
#[derive(Default, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct VcapCredentials {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub apikey: Option<String>,
}

/// Extract the Speech-to-Text credentials from a raw `VCAP_SERVICES` value.
pub fn parse(raw: &str) -> Result<VcapCredentials, ConfigError> {
    let mut services: HashMap<String, Vec<VcapService>> =
        serde_json::from_str(raw).map_err(|e| ConfigError::Vcap(e.to_string()))?;

    let mut bound = services
        .remove(SERVICE_LABEL)
        .filter(|entries| !entries.is_empty())
        .ok_or_else(|| ConfigError::Vcap(format!("no {SERVICE_LABEL} service is bound")))?;

    let service = bound.swap_remove(0);
    debug!(
        service = service.name.as_deref().unwrap_or("<unnamed>"),
        "Using Speech-to-Text credentials from VCAP_SERVICES"
    );

    Ok(service.credentials)
}
