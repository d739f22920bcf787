//! Audio transcription endpoint handlers.

use axum::{extract::State, Json};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::transcription::TranscriptionError;

/// Request payload for audio transcription.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeRequest {
    /// Base64-encoded audio clip.
    pub audio: Option<String>,
    /// MIME type of the clip. Browser recordings default to audio/webm.
    pub mime_type: Option<String>,
}

/// Response payload for audio transcription.
#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub text: String,
}

/// Transcribe an audio clip to text.
///
/// POST /api/transcribe
///
/// Public helper for voice input. The transcript is returned to the client,
/// which feeds it into the generation prompt.
pub async fn transcribe_audio(
    State(state): State<AppState>,
    Json(request): Json<TranscribeRequest>,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let audio_b64 = request
        .audio
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("No audio provided".to_string()))?;

    let transcriber = state.transcriber.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable("Transcription is not configured".to_string())
    })?;

    let audio = BASE64
        .decode(audio_b64.as_bytes())
        .map_err(|_| ApiError::Validation("Invalid audio encoding".to_string()))?;

    let mime_type = request.mime_type.as_deref().unwrap_or("audio/webm");

    match transcriber.transcribe(&audio, mime_type).await {
        Ok(text) => {
            info!(chars = text.len(), "Audio transcribed");
            Ok(Json(TranscribeResponse { text }))
        }
        Err(TranscriptionError::NotConfigured) => Err(ApiError::ServiceUnavailable(
            "Transcription is not configured".to_string(),
        )),
        Err(e) => {
            error!(error = %e, "Transcription failed");
            Err(ApiError::BadGateway("Transcription failed".to_string()))
        }
    }
}
