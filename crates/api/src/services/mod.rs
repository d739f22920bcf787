//! External service integrations and startup tasks.

pub mod gemini;
pub mod template_seed;
pub mod transcription;

#[allow(unused_imports)] // Used in app setup
pub use gemini::GeminiFormGenerator;
#[allow(unused_imports)] // Used in routes
pub use transcription::{TranscriptionClient, TranscriptionError};
