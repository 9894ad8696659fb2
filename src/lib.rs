pub mod config;
pub mod core;
pub mod utils;

// Re-export commonly used items for convenience
pub use config::{AuthMode, ConfigError, ServiceOptions, ServiceOptionsBuilder};
pub use core::*;
pub use core::stt::ibm_watson::{RecognitionConfig, SpeechToText};
