pub mod stt;

// Re-export commonly used types for convenience
pub use stt::{
    AudioStream, HttpTransport, OutgoingRequest, RecognizeError, RequestSigner, ReqwestTransport,
};
