//! Gemini form generation adapter.
//!
//! Implements the `FormGenerator` port against the Gemini `generateContent`
//! REST API. Model output is requested as JSON and normalized before it is
//! returned, so callers always receive a well-formed definition.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use domain::services::generation::{
    normalize, FormGenerator, GenerateFormRequest, GeneratedForm, GenerationError,
    RawGeneratedForm,
};

use crate::config::AiConfig;

// ============================================================================
// Wire Types
// ============================================================================

/// Gemini generateContent request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

/// Gemini generateContent response structure.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
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

impl GenerateContentResponse {
    /// Returns the first non-empty text part of the first candidate.
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
// Prompt Construction
// ============================================================================

/// Instructions sent with every generation request. The response format is
/// pinned down so the reply parses directly into `RawGeneratedForm`.
const SYSTEM_PROMPT: &str = "You are an expert form designer. Produce a multi-step form JSON that is production-ready. \
Rules: \
1) Return ONLY valid JSON. \
2) Always include non-empty strings for title, description, step titles, field labels. \
3) Always include placeholder as a string (empty string allowed). \
4) For select/radio fields, include options array with at least 2 items. \
5) For other field types, options must be an empty array. \
6) Field types must be one of: text, number, select, checkbox, radio, textarea, date. \
Response format: {\"title\":\"Form Title\",\"description\":\"Form Description\",\"steps\":[{\"title\":\"Step Title\",\"description\":\"Step Description\",\"fields\":[{\"type\":\"text\",\"label\":\"Field Label\",\"placeholder\":\"Placeholder\",\"required\":true,\"options\":[{\"label\":\"Option 1\",\"value\":\"opt1\"}]}]}]}";

/// Combines the user prompt with complexity and tone guidance.
fn build_user_prompt(request: &GenerateFormRequest) -> String {
    let complexity = request.complexity.unwrap_or_default();
    let tone = request.tone.unwrap_or_default();

    format!(
        "{}\n\nAdditional guidance: {} {}",
        request.prompt,
        complexity.hint(),
        tone.hint()
    )
}

// ============================================================================
// Gemini Client
// ============================================================================

/// Form generator backed by the Gemini API.
pub struct GeminiFormGenerator {
    /// HTTP client.
    client: Client,
    /// Configuration.
    config: AiConfig,
}

impl GeminiFormGenerator {
    /// Create a new Gemini form generator.
    pub fn new(config: AiConfig) -> Result<Self, GenerationError> {
        let timeout = Duration::from_millis(config.timeout_ms);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Check if generation is enabled and configured.
    pub fn is_available(&self) -> bool {
        self.config.enabled && !self.config.api_key.is_empty()
    }

    /// Resolve the model for a request: per-request override, else configured default.
    fn model_for(&self, request: &GenerateFormRequest) -> String {
        request
            .model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(&self.config.model)
            .to_string()
    }

    /// Call the generateContent endpoint and parse the reply as a raw form.
    async fn call_generate(
        &self,
        model: &str,
        user_prompt: &str,
    ) -> Result<RawGeneratedForm, GenerationError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        );

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: user_prompt.to_string(),
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_PROMPT.to_string(),
                }],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        debug!(url = %url, model = %model, "Calling Gemini generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout(self.config.timeout_ms)
                } else {
                    GenerationError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Service(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let reply: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        let text = reply
            .first_text()
            .ok_or_else(|| GenerationError::InvalidResponse("No text in model reply".into()))?;

        serde_json::from_str(&text).map_err(|e| {
            GenerationError::InvalidResponse(format!("Model did not return form JSON: {}", e))
        })
    }
}

#[async_trait]
impl FormGenerator for GeminiFormGenerator {
    async fn generate(
        &self,
        request: &GenerateFormRequest,
    ) -> Result<GeneratedForm, GenerationError> {
        // Check if enabled
        if !self.config.enabled {
            return Err(GenerationError::NotConfigured);
        }

        // Check if configured
        if self.config.api_key.is_empty() {
            return Err(GenerationError::NotConfigured);
        }

        let model = self.model_for(request);
        let user_prompt = build_user_prompt(request);

        let start = Instant::now();
        let result = self.call_generate(&model, &user_prompt).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(raw) => {
                let form = normalize(raw);
                debug!(
                    model = %model,
                    complexity = request.complexity.unwrap_or_default().as_str(),
                    tone = request.tone.unwrap_or_default().as_str(),
                    steps = form.steps.len(),
                    duration_ms = duration_ms,
                    "Form generation successful"
                );
                Ok(form)
            }
            Err(e) => {
                error!(
                    error = %e,
                    model = %model,
                    duration_ms = duration_ms,
                    "Form generation failed"
                );
                Err(e)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
