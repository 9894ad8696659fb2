//! IBM Watson STT client tests.
//!
//! These drive [`SpeechToText`] through a recording transport so the full
//! request path can be checked without a network.

use super::*;
use crate::config::ServiceOptions;
use crate::core::stt::audio::AudioStream;
use crate::core::stt::base::{HttpTransport, OutgoingRequest, RecognizeError};
use async_trait::async_trait;
use base64::Engine;
use futures::StreamExt;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, Method, StatusCode};
use std::sync::Arc;
use tokio::sync::Mutex;
use url::Url;

// =============================================================================
// Recording Transport
// =============================================================================

#[derive(Debug)]
struct Recorded {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Vec<u8>,
}

struct RecordingTransport {
    status: StatusCode,
    calls: Mutex<Vec<Recorded>>,
}

impl RecordingTransport {
    fn new(status: StatusCode) -> Arc<Self> {
        Arc::new(Self {
            status,
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn execute(&self, request: OutgoingRequest) -> Result<reqwest::Response, reqwest::Error> {
        let (method, url, headers, body) = request.into_parts();

        let mut bytes = Vec::new();
        let mut body = body;
        while let Some(chunk) = body.next().await {
            bytes.extend_from_slice(&chunk.expect("audio chunk"));
        }

        self.calls.lock().await.push(Recorded {
            method,
            url,
            headers,
            body: bytes,
        });

        let response = http::Response::builder()
            .status(self.status)
            .body(r#"{"results":[]}"#)
            .expect("mock response");
        Ok(reqwest::Response::from(response))
    }
}

fn basic_options() -> ServiceOptions {
    ServiceOptions::builder()
        .username("user")
        .password("pass")
        .build()
        .unwrap()
}

fn client_with(options: ServiceOptions, transport: &Arc<RecordingTransport>) -> SpeechToText {
    SpeechToText::with_transport(options, transport.clone())
}

// =============================================================================
// Recognize Tests
// =============================================================================

#[tokio::test]
async fn test_empty_config_makes_no_transport_call() {
    let transport = RecordingTransport::new(StatusCode::OK);
    let client = client_with(basic_options(), &transport);

    let result = client.recognize(RecognitionConfig::default()).await;

    assert!(matches!(result, Err(RecognizeError::EmptyConfig)));
    assert!(transport.calls.lock().await.is_empty());
}

#[tokio::test]
async fn test_recognize_sends_audio_and_content_type() {
    let transport = RecordingTransport::new(StatusCode::OK);
    let client = client_with(basic_options(), &transport);

    let response = client
        .recognize(RecognitionConfig {
            audio: Some(AudioStream::from_bytes(vec![1u8, 2, 3, 4])),
            content_type: "audio/flac".to_string(),
            model: DEFAULT_MODEL.to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), r#"{"results":[]}"#);

    let calls = transport.calls.lock().await;
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.method, Method::POST);
    assert_eq!(call.headers[CONTENT_TYPE], "audio/flac");
    assert_eq!(call.body, vec![1, 2, 3, 4]);
    assert_eq!(
        call.url.path(),
        "/speech-to-text/api/v1/recognize"
    );
}

#[tokio::test]
async fn test_basic_credentials_reach_transport() {
    let transport = RecordingTransport::new(StatusCode::OK);
    let client = client_with(basic_options(), &transport);

    client
        .recognize(RecognitionConfig {
            content_type: "audio/wav".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let calls = transport.calls.lock().await;
    let header = calls[0].headers[AUTHORIZATION].to_str().unwrap();
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(header.strip_prefix("Basic ").unwrap())
        .unwrap();
    assert_eq!(decoded, b"user:pass");
}

#[tokio::test]
async fn test_session_path_requires_authentication() {
    let cases = [
        (basic_options(), "sess-1", true),
        (basic_options(), "", false),
        (
            ServiceOptions::builder()
                .unauthenticated(true)
                .build()
                .unwrap(),
            "sess-1",
            false,
        ),
        // No credentials at all is unauthenticated, so the session is dropped
        // even though the unauthenticated flag was never set
        (ServiceOptions::builder().build().unwrap(), "sess-1", false),
    ];

    for (options, session_id, expect_session) in cases {
        let transport = RecordingTransport::new(StatusCode::OK);
        let client = client_with(options, &transport);
        client
            .recognize(RecognitionConfig {
                session_id: session_id.to_string(),
                content_type: "audio/flac".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let calls = transport.calls.lock().await;
        let path = calls[0].url.path();
        assert_eq!(
            path.contains("/sessions/sess-1/recognize"),
            expect_session,
            "unexpected path {path}"
        );
        assert!(path.ends_with("/recognize"));
    }
}

#[tokio::test]
async fn test_query_encodes_allow_listed_keys_only() {
    let transport = RecordingTransport::new(StatusCode::OK);
    let client = client_with(basic_options(), &transport);

    client
        .recognize(RecognitionConfig {
            content_type: "audio/flac".to_string(),
            model: SpeechModel::EnUkNarrowband.into(),
            keywords: vec!["colorado".to_string(), "tornado".to_string()],
            keywords_threshold: 0.5,
            max_alternatives: 2,
            word_confidence: true,
            continuous: true,
            inactivity_timeout: INFINITE_INACTIVITY_TIMEOUT,
            word_alternatives_threshold: 0.9,
            timestamps: true,
            ..Default::default()
        })
        .await
        .unwrap();

    let calls = transport.calls.lock().await;
    let pairs: Vec<(String, String)> = calls[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    assert_eq!(
        pairs,
        vec![
            ("keywords".to_string(), "\"colorado,tornado\"".to_string()),
            ("keywords_threshold".to_string(), "0.5".to_string()),
            ("max_alternatives".to_string(), "2".to_string()),
            ("model".to_string(), "en-UK_NarrowbandModel".to_string()),
            ("word_confidence".to_string(), "true".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_invalid_content_type_makes_no_transport_call() {
    let transport = RecordingTransport::new(StatusCode::OK);
    let client = client_with(basic_options(), &transport);

    let result = client
        .recognize(RecognitionConfig {
            content_type: "audio/flac\r\n".to_string(),
            ..Default::default()
        })
        .await;

    assert!(matches!(
        result,
        Err(RecognizeError::InvalidHeaderValue { .. })
    ));
    assert!(transport.calls.lock().await.is_empty());
}

#[tokio::test]
async fn test_error_status_is_returned_as_response() {
    let transport = RecordingTransport::new(StatusCode::UNAUTHORIZED);
    let client = client_with(basic_options(), &transport);

    let response = client
        .recognize(RecognitionConfig {
            content_type: "audio/flac".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_build_request_without_sending() {
    let transport = RecordingTransport::new(StatusCode::OK);
    let client = client_with(basic_options(), &transport);

    let request = client
        .build_request(RecognitionConfig {
            model: "m".to_string(),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(request.method(), Method::POST);
    assert!(client.options().is_authenticated());
}

#[test]
fn test_debug_does_not_leak_credentials() {
    let transport = RecordingTransport::new(StatusCode::OK);
    let client = client_with(
        ServiceOptions::builder().api_key("top-secret").build().unwrap(),
        &transport,
    );
    assert!(!format!("{client:?}").contains("top-secret"));
}
