//! Audio transcription client.
//!
//! Sends recorded audio to the Gemini `generateContent` endpoint as inline
//! data and returns the transcribed text. Used by the voice-prompt flow to
//! turn a spoken description into text before form generation.

use std::time::{Duration, Instant};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::TranscriptionConfig;

/// Errors from the transcription service.
#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("Transcription service not configured")]
    NotConfigured,

    #[error("Transcription request timeout after {0}ms")]
    Timeout(u64),

    #[error("Transcription transport error: {0}")]
    Transport(String),

    #[error("Invalid transcription response: {0}")]
    InvalidResponse(String),

    #[error("Transcription service error: {0}")]
    Service(String),
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct TranscribeRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

/// A request part is either inline audio data or a text instruction.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: Option<String>,
}

impl TranscribeResponse {
    fn first_text(&self) -> Option<String> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|p| p.text.as_ref().filter(|t| !t.trim().is_empty()).cloned())
    }
}

// ============================================================================
// Transcription Client
// ============================================================================

const TRANSCRIBE_PROMPT: &str =
    "Transcribe this audio recording. Return only the transcribed text, with no commentary.";

/// Client for transcribing audio via the Gemini API.
pub struct TranscriptionClient {
    /// HTTP client.
    client: Client,
    /// Configuration.
    config: TranscriptionConfig,
}

impl TranscriptionClient {
    /// Create a new transcription client.
    pub fn new(config: TranscriptionConfig) -> Result<Self, TranscriptionError> {
        let timeout = Duration::from_millis(config.timeout_ms);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranscriptionError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Check if transcription is enabled and configured.
    pub fn is_available(&self) -> bool {
        self.config.enabled && !self.config.api_key.is_empty()
    }

    /// Transcribe an audio recording to text.
    pub async fn transcribe(
        &self,
        audio: &[u8],
        mime_type: &str,
    ) -> Result<String, TranscriptionError> {
        // Check if enabled
        if !self.config.enabled {
            return Err(TranscriptionError::NotConfigured);
        }

        // Check if configured
        if self.config.api_key.is_empty() {
            return Err(TranscriptionError::NotConfigured);
        }

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        let body = TranscribeRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: BASE64.encode(audio),
                        },
                    },
                    Part::Text {
                        text: TRANSCRIBE_PROMPT.to_string(),
                    },
                ],
            }],
        };

        debug!(
            url = %url,
            model = %self.config.model,
            audio_bytes = audio.len(),
            mime_type = %mime_type,
            "Calling Gemini transcription"
        );

        let start = Instant::now();

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranscriptionError::Timeout(self.config.timeout_ms)
                } else {
                    TranscriptionError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "Transcription request failed");
            return Err(TranscriptionError::Service(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let reply: TranscribeResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;

        let text = reply
            .first_text()
            .ok_or_else(|| TranscriptionError::InvalidResponse("No text in model reply".into()))?;

        let duration_ms = start.elapsed().as_millis() as u64;
        debug!(
            duration_ms = duration_ms,
            chars = text.len(),
            "Transcription successful"
        );

        Ok(text.trim().to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
