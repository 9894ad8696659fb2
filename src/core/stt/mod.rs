pub mod audio;
mod base;
pub mod ibm_watson;

pub use audio::AudioStream;
pub use base::{
    DEFAULT_CONNECT_TIMEOUT, HttpTransport, OutgoingRequest, RecognizeError, RequestSigner,
    ReqwestTransport,
};
pub use ibm_watson::{RecognitionConfig, SpeechToText};
