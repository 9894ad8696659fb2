//! IBM Watson Speech-to-Text recognize client.

use std::sync::Arc;

use tracing::{info, warn};

use super::config::RecognitionConfig;
use super::request::build_recognize_request;
use crate::config::ServiceOptions;
use crate::core::stt::base::{HttpTransport, OutgoingRequest, RecognizeError, ReqwestTransport};

// =============================================================================
// SpeechToText Client
// =============================================================================

/// Client for the Watson recognize endpoint.
///
/// Each call builds one POST request, signs it and hands it to the transport.
/// The response is returned undecoded and non-2xx statuses are not errors.
///
/// # Example
///
/// ```rust,no_run
/// use watson_stt::config::ServiceOptions;
/// use watson_stt::core::stt::AudioStream;
/// use watson_stt::core::stt::ibm_watson::{RecognitionConfig, SpeechToText};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let options = ServiceOptions::builder()
///         .username("your-username")
///         .password("your-password")
///         .build()?;
///     let client = SpeechToText::new(options)?;
///
///     let response = client
///         .recognize(RecognitionConfig {
///             audio: Some(AudioStream::open("speech.flac").await?),
///             content_type: "audio/flac".to_string(),
///             ..Default::default()
///         })
///         .await?;
///
///     println!("{}", response.text().await?);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct SpeechToText {
    options: Arc<ServiceOptions>,
    transport: Arc<dyn HttpTransport>,
}

impl SpeechToText {
    /// Create a client using the default `reqwest` transport.
    pub fn new(options: impl Into<Arc<ServiceOptions>>) -> Result<Self, RecognizeError> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(options, Arc::new(transport)))
    }

    /// Create a client that dispatches through `transport`.
    pub fn with_transport(
        options: impl Into<Arc<ServiceOptions>>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            options: options.into(),
            transport,
        }
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    /// Build the signed request without sending it.
    pub fn build_request(
        &self,
        config: RecognitionConfig,
    ) -> Result<OutgoingRequest, RecognizeError> {
        build_recognize_request(&self.options, config)
    }

    /// Send audio for recognition.
    ///
    /// Fails with [`RecognizeError::EmptyConfig`] before any network activity
    /// when `config` is entirely default.
    pub async fn recognize(
        &self,
        config: RecognitionConfig,
    ) -> Result<reqwest::Response, RecognizeError> {
        let request = self.build_request(config)?;

        info!(
            auth = self.options.auth().as_str(),
            url = %request.url(),
            "Sending recognize request"
        );

        let response = self.transport.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Recognize request returned non-success status");
        }

        Ok(response)
    }
}

impl std::fmt::Debug for SpeechToText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechToText")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
