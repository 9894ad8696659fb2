//! Request, signing and transport abstractions shared by the recognize client.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use http::header::InvalidHeaderValue;
use http::{HeaderMap, Method};
use thiserror::Error;
use url::Url;

use super::audio::AudioStream;

// =============================================================================
// Errors
// =============================================================================

/// Errors produced while building or dispatching a recognize request.
#[derive(Debug, Error)]
pub enum RecognizeError {
    /// Every field of the recognition configuration was left at its default.
    #[error("Given parameter object was empty")]
    EmptyConfig,

    /// A header value contained bytes that HTTP cannot carry (e.g. CR/LF).
    #[error("Invalid value for header {name}: {source}")]
    InvalidHeaderValue {
        name: &'static str,
        #[source]
        source: InvalidHeaderValue,
    },

    /// Failure reported by the HTTP transport, passed through unchanged.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

// =============================================================================
// Outgoing Request
// =============================================================================

/// A fully formed HTTP request ready for a transport.
///
/// The body is owned by the request and moves with it; the request cannot be
/// cloned or replayed.
pub struct OutgoingRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: AudioStream,
}

impl OutgoingRequest {
    pub fn new(method: Method, url: Url, body: AudioStream) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Target URL including the encoded query string.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Give up the request, keeping only the body.
    pub fn into_body(self) -> AudioStream {
        self.body
    }

    pub fn into_parts(self) -> (Method, Url, HeaderMap, AudioStream) {
        (self.method, self.url, self.headers, self.body)
    }

    /// Turn the request into a `reqwest` builder on `client`.
    pub fn into_reqwest(self, client: &reqwest::Client) -> reqwest::RequestBuilder {
        client
            .request(self.method, self.url)
            .headers(self.headers)
            .body(self.body.into_body())
    }
}

impl fmt::Debug for OutgoingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // HeaderMap's Debug hides values marked sensitive (Authorization)
        f.debug_struct("OutgoingRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Signing
// =============================================================================

/// Marks a request as authenticated.
///
/// Signing only touches headers. It never fails: a signer without credentials
/// leaves the request unauthenticated.
pub trait RequestSigner: Send + Sync {
    fn sign<'r>(&self, request: &'r mut OutgoingRequest) -> &'r mut OutgoingRequest;
}

// =============================================================================
// Transport
// =============================================================================

/// Executes requests over the network.
///
/// Timeouts, cancellation and retries are the transport's concern; errors are
/// surfaced unmodified.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: OutgoingRequest) -> Result<reqwest::Response, reqwest::Error>;
}

/// Connect timeout for the default transport.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default transport backed by a pooled `reqwest::Client`.
///
/// Only a connect timeout is set: recognize uploads stream audio of unknown
/// length, so a total request timeout is left to callers who supply their own
/// client via [`ReqwestTransport::from_client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: OutgoingRequest) -> Result<reqwest::Response, reqwest::Error> {
        request.into_reqwest(&self.client).send().await
    }
}
