//! Single-pass audio body stream.
//!
//! An [`AudioStream`] is handed to a request by value and from there to the
//! transport. It is read exactly once, is never cloned or rewound, and its
//! length is never computed up front, so the audio can be streamed straight
//! from a file or a live source.

use std::fmt;
use std::io;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::stream::{self, Stream};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

type BoxedChunkStream = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send + Sync>>;

/// Non-restartable stream of audio bytes used as a request body.
pub struct AudioStream {
    inner: BoxedChunkStream,
}

impl AudioStream {
    /// Wrap an existing chunk stream.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = io::Result<Bytes>> + Send + Sync + 'static,
    {
        Self {
            inner: Box::pin(stream),
        }
    }

    /// A body made of one in-memory chunk.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self::from_stream(stream::once(futures::future::ready(Ok(bytes))))
    }

    /// Stream the contents of an async reader without buffering it whole.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + Sync + 'static,
    {
        Self::from_stream(ReaderStream::new(reader))
    }

    /// Open a file and stream it.
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = tokio::fs::File::open(path).await?;
        Ok(Self::from_reader(file))
    }

    /// A body with no bytes.
    pub fn empty() -> Self {
        Self::from_stream(stream::empty())
    }

    /// Convert into a streaming `reqwest` body. No length is set, so the
    /// request goes out with chunked transfer encoding.
    pub fn into_body(self) -> reqwest::Body {
        reqwest::Body::wrap_stream(self.inner)
    }
}

impl Stream for AudioStream {
    type Item = io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl fmt::Debug for AudioStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioStream").finish_non_exhaustive()
    }
}

impl From<Bytes> for AudioStream {
    fn from(bytes: Bytes) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for AudioStream {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}
