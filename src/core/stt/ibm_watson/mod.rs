//! IBM Watson Speech-to-Text provider implementation.
//!
//! This module builds requests for the Watson `recognize` HTTP endpoint and
//! dispatches them through a pluggable transport.
//!
//! # Features
//!
//! - HTTP Basic authentication with username/password or an API key
//! - Unauthenticated mode for gateways that inject credentials themselves
//! - Session-scoped endpoints (`/sessions/{id}/recognize`) for authenticated clients
//! - Streamed audio bodies of any length
//! - Keyword spotting, alternatives and word confidence query parameters
//!
//! # Endpoint
//!
//! ```text
//! POST {url}/{version}/recognize?keywords=...&keywords_threshold=...&max_alternatives=...&model=...&word_confidence=...
//! POST {url}/{version}/sessions/{session_id}/recognize?...
//! ```
//!
//! The session form is only used when credentials are configured and a session
//! id is given.
//!
//! # Configuration
//!
//! ## Environment Variables
//!
//! ```bash
//! export WATSON_USERNAME="your-username"
//! export WATSON_PASSWORD="your-password"
//! # or
//! export WATSON_API_KEY="your-api-key"
//! export WATSON_STT_URL="https://stream.watsonplatform.net/speech-to-text/api"  # Optional
//! export WATSON_VERSION="v1"  # Optional
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use watson_stt::config::ServiceOptions;
//! use watson_stt::core::stt::AudioStream;
//! use watson_stt::core::stt::ibm_watson::{
//!     AudioContentType, RecognitionConfig, SpeechModel, SpeechToText,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SpeechToText::new(ServiceOptions::from_env()?)?;
//!
//!     let config = RecognitionConfig {
//!         audio: Some(AudioStream::open("meeting.wav").await?),
//!         content_type: AudioContentType::Wav.into(),
//!         model: SpeechModel::EnUsNarrowband.into(),
//!         keywords: vec!["budget".to_string(), "deadline".to_string()],
//!         keywords_threshold: 0.5,
//!         ..Default::default()
//!     };
//!
//!     let response = client.recognize(config).await?;
//!     println!("{}: {}", response.status(), response.text().await?);
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
pub mod config;
pub mod endpoint;
pub mod params;
pub mod request;

#[cfg(test)]
mod tests;

pub use auth::basic_auth_value;
pub use client::SpeechToText;
pub use config::{
    AudioContentType, DEFAULT_INACTIVITY_TIMEOUT, DEFAULT_MODEL, INFINITE_INACTIVITY_TIMEOUT,
    RecognitionConfig, SpeechModel,
};
pub use endpoint::{EndpointShape, recognize_url};
pub use params::{ENCODED_PARAMS, NOT_ENCODED_PARAMS, encode_query};
pub use request::{build_recognize_request, build_recognize_request_with};
