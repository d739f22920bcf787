//! AI form generation service.
//!
//! Defines the port for turning a free-text prompt into a structured form
//! definition, plus the normalization that makes any model output safe to
//! hand to form creation. The production adapter lives in the API crate;
//! this module only knows the contract.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::models::field::{FieldOption, FieldType};

/// How elaborate the generated form should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Compact,
    #[default]
    Balanced,
    Detailed,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Compact => "compact",
            Complexity::Balanced => "balanced",
            Complexity::Detailed => "detailed",
        }
    }

    /// Sizing hint appended to the model prompt.
    pub fn hint(&self) -> &'static str {
        match self {
            Complexity::Compact => "Prefer 1-2 steps with 2-3 fields each.",
            Complexity::Balanced => "Prefer 2-3 steps with 3-5 fields each.",
            Complexity::Detailed => "Prefer 3-4 steps with 4-6 fields each.",
        }
    }
}

/// Voice used for generated titles and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Formal,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Formal => "formal",
        }
    }

    /// Voice hint appended to the model prompt.
    pub fn hint(&self) -> &'static str {
        match self {
            Tone::Professional => "Use a professional, neutral voice for titles and labels.",
            Tone::Friendly => "Use a friendly, conversational voice for titles and labels.",
            Tone::Formal => "Use a formal, precise voice for titles and labels.",
        }
    }
}

/// Request payload for AI form generation.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFormRequest {
    #[validate(
        length(min = 1, max = 4000, message = "Prompt must be 1-4000 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub prompt: String,

    #[validate(length(max = 100, message = "Model name must be at most 100 characters"))]
    pub model: Option<String>,

    pub complexity: Option<Complexity>,

    pub tone: Option<Tone>,
}

/// A fully normalized generated form definition.
///
/// Serializes to exactly the shape the create-complete operation accepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedForm {
    pub title: String,
    pub description: String,
    pub steps: Vec<GeneratedStep>,
}

/// One step of a generated form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedStep {
    pub title: String,
    pub description: String,
    pub fields: Vec<GeneratedField>,
}

/// One field of a generated step, constrained to the known type vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedField {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub placeholder: String,
    pub required: bool,
    pub options: Vec<FieldOption>,
}

/// Raw model output before normalization. Every property is optional so a
/// partially specified response still parses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGeneratedForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Option<Vec<RawGeneratedStep>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGeneratedStep {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<RawGeneratedField>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGeneratedField {
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub options: Option<Vec<RawGeneratedOption>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGeneratedOption {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// Error type for form generation.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Form generation is not configured")]
    NotConfigured,

    #[error("Generation request timed out after {0}ms")]
    Timeout(u64),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    #[error("Generation service error: {0}")]
    Service(String),
}

/// Port for external generative models.
#[async_trait::async_trait]
pub trait FormGenerator: Send + Sync {
    /// Generate a normalized form definition from a free-text prompt.
    async fn generate(&self, request: &GenerateFormRequest)
        -> Result<GeneratedForm, GenerationError>;
}

fn non_blank_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback.to_string(),
    }
}

/// Normalizes raw model output into a valid form definition.
///
/// Defaults applied: blank form title becomes "Generated Form", blank step
/// titles become "Untitled Step", blank labels become "Field", unknown
/// field types coerce to `text`, missing collections become empty, and
/// select/radio fields without options receive two placeholder options.
pub fn normalize(raw: RawGeneratedForm) -> GeneratedForm {
    let steps = raw
        .steps
        .unwrap_or_default()
        .into_iter()
        .map(normalize_step)
        .collect();

    GeneratedForm {
        title: non_blank_or(raw.title, "Generated Form"),
        description: raw.description.unwrap_or_default(),
        steps,
    }
}

fn normalize_step(raw: RawGeneratedStep) -> GeneratedStep {
    let fields = raw
        .fields
        .unwrap_or_default()
        .into_iter()
        .map(normalize_field)
        .collect();

    GeneratedStep {
        title: non_blank_or(raw.title, "Untitled Step"),
        description: raw.description.unwrap_or_default(),
        fields,
    }
}

fn normalize_field(raw: RawGeneratedField) -> GeneratedField {
    let field_type = raw
        .field_type
        .as_deref()
        .map(str::to_lowercase)
        .and_then(|s| FieldType::from_str(&s))
        .unwrap_or(FieldType::Text);

    let mut options: Vec<FieldOption> = raw
        .options
        .unwrap_or_default()
        .into_iter()
        .map(|o| FieldOption {
            label: o.label.unwrap_or_default(),
            value: o.value.unwrap_or_default(),
        })
        .collect();

    if field_type.uses_options() {
        if options.is_empty() {
            options = vec![
                FieldOption {
                    label: "Option 1".to_string(),
                    value: "option_1".to_string(),
                },
                FieldOption {
                    label: "Option 2".to_string(),
                    value: "option_2".to_string(),
                },
            ];
        }
    } else {
        options.clear();
    }

    GeneratedField {
        field_type,
        label: non_blank_or(raw.label, "Field"),
        placeholder: raw.placeholder.unwrap_or_default(),
        required: raw.required.unwrap_or(false),
        options,
    }
}

/// Mock form generator for development and testing.
///
/// Returns a deterministic definition derived from the prompt without
/// calling any external model.
#[derive(Debug, Clone, Default)]
pub struct MockFormGenerator {
    /// Whether to simulate failures for testing.
    pub simulate_failure: bool,
}

impl MockFormGenerator {
    /// Create a new mock generator.
    pub fn new() -> Self {
        Self {
            simulate_failure: false,
        }
    }

    /// Create a mock generator that simulates failures.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
        }
    }
}

#[async_trait::async_trait]
impl FormGenerator for MockFormGenerator {
    async fn generate(
        &self,
        request: &GenerateFormRequest,
    ) -> Result<GeneratedForm, GenerationError> {
        if self.simulate_failure {
            tracing::warn!(
                prompt_len = request.prompt.len(),
                "Mock form generator simulating failure"
            );
            return Err(GenerationError::Service("Simulated failure".to_string()));
        }

        tracing::info!(
            prompt_len = request.prompt.len(),
            "Mock: Would call the generation model"
        );

        let title = if request.prompt.chars().count() > 60 {
            request.prompt.chars().take(60).collect()
        } else {
            request.prompt.clone()
        };

        Ok(normalize(RawGeneratedForm {
            title: Some(title),
            description: Some(format!("Generated from prompt: {}", request.prompt)),
            steps: Some(vec![RawGeneratedStep {
                title: Some("Step 1".to_string()),
                description: Some("Auto-generated from your prompt.".to_string()),
                fields: Some(vec![RawGeneratedField {
                    field_type: Some("text".to_string()),
                    label: Some("Sample Question".to_string()),
                    placeholder: Some("Type your answer".to_string()),
                    required: Some(true),
                    options: None,
                }]),
            }]),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::CreateCompleteFormRequest;

    fn request(prompt: &str) -> GenerateFormRequest {
        GenerateFormRequest {
            prompt: prompt.to_string(),
            model: None,
            complexity: None,
            tone: None,
        }
    }

    #[test]
    fn test_complexity_serialization() {
        assert_eq!(
            serde_json::to_string(&Complexity::Compact).unwrap(),
            "\"compact\""
        );
        assert_eq!(
            serde_json::to_string(&Complexity::Balanced).unwrap(),
            "\"balanced\""
        );
        assert_eq!(
            serde_json::to_string(&Complexity::Detailed).unwrap(),
            "\"detailed\""
        );
    }

    #[test]
    fn test_tone_as_str() {
        assert_eq!(Tone::Professional.as_str(), "professional");
        assert_eq!(Tone::Friendly.as_str(), "friendly");
        assert_eq!(Tone::Formal.as_str(), "formal");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Complexity::default(), Complexity::Balanced);
        assert_eq!(Tone::default(), Tone::Professional);
    }

    #[test]
    fn test_hints_are_distinct() {
        assert_ne!(Complexity::Compact.hint(), Complexity::Detailed.hint());
        assert_ne!(Tone::Friendly.hint(), Tone::Formal.hint());
    }

    #[test]
    fn test_generate_form_request_deserialization() {
        let json = r#"{"prompt": "Job application form", "complexity": "detailed", "tone": "formal"}"#;

        let request: GenerateFormRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.prompt, "Job application form");
        assert_eq!(request.complexity, Some(Complexity::Detailed));
        assert_eq!(request.tone, Some(Tone::Formal));
        assert!(request.model.is_none());
    }

    #[test]
    fn test_generate_form_request_rejects_unknown_complexity() {
        let json = r#"{"prompt": "Survey", "complexity": "enormous"}"#;
        let result: Result<GenerateFormRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_form_request_blank_prompt_fails_validation() {
        let request = request("   ");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_normalize_empty_input() {
        let form = normalize(RawGeneratedForm::default());

        assert_eq!(form.title, "Generated Form");
        assert_eq!(form.description, "");
        assert!(form.steps.is_empty());
    }

    #[test]
    fn test_normalize_step_missing_fields_becomes_empty() {
        let raw = RawGeneratedForm {
            title: Some("Survey".to_string()),
            description: None,
            steps: Some(vec![RawGeneratedStep {
                title: Some("About".to_string()),
                description: None,
                fields: None,
            }]),
        };

        let form = normalize(raw);
        assert_eq!(form.steps.len(), 1);
        assert!(form.steps[0].fields.is_empty());
        assert_eq!(form.steps[0].description, "");
    }

    #[test]
    fn test_normalize_blank_titles_defaulted() {
        let raw = RawGeneratedForm {
            title: Some("   ".to_string()),
            description: None,
            steps: Some(vec![RawGeneratedStep {
                title: None,
                description: None,
                fields: Some(vec![RawGeneratedField {
                    field_type: None,
                    label: Some("".to_string()),
                    placeholder: None,
                    required: None,
                    options: None,
                }]),
            }]),
        };

        let form = normalize(raw);
        assert_eq!(form.title, "Generated Form");
        assert_eq!(form.steps[0].title, "Untitled Step");
        assert_eq!(form.steps[0].fields[0].label, "Field");
        assert!(!form.steps[0].fields[0].required);
        assert_eq!(form.steps[0].fields[0].placeholder, "");
    }

    #[test]
    fn test_normalize_unknown_type_coerces_to_text() {
        let raw_field = |ty: Option<&str>| RawGeneratedField {
            field_type: ty.map(String::from),
            label: Some("Q".to_string()),
            placeholder: None,
            required: None,
            options: None,
        };

        let raw = RawGeneratedForm {
            title: Some("T".to_string()),
            description: None,
            steps: Some(vec![RawGeneratedStep {
                title: Some("S".to_string()),
                description: None,
                fields: Some(vec![
                    raw_field(Some("email")),
                    raw_field(Some("TEXTAREA")),
                    raw_field(None),
                ]),
            }]),
        };

        let fields = &normalize(raw).steps[0].fields;
        assert_eq!(fields[0].field_type, FieldType::Text);
        // Model output is lowercased before the vocabulary check
        assert_eq!(fields[1].field_type, FieldType::Textarea);
        assert_eq!(fields[2].field_type, FieldType::Text);
    }

    #[test]
    fn test_normalize_select_without_options_gets_placeholders() {
        let raw = RawGeneratedForm {
            title: Some("T".to_string()),
            description: None,
            steps: Some(vec![RawGeneratedStep {
                title: Some("S".to_string()),
                description: None,
                fields: Some(vec![RawGeneratedField {
                    field_type: Some("select".to_string()),
                    label: Some("Choice".to_string()),
                    placeholder: None,
                    required: None,
                    options: None,
                }]),
            }]),
        };

        let field = &normalize(raw).steps[0].fields[0];
        assert_eq!(field.options.len(), 2);
        assert_eq!(field.options[0].label, "Option 1");
        assert_eq!(field.options[0].value, "option_1");
        assert_eq!(field.options[1].value, "option_2");
    }

    #[test]
    fn test_normalize_non_select_options_cleared() {
        let raw = RawGeneratedForm {
            title: Some("T".to_string()),
            description: None,
            steps: Some(vec![RawGeneratedStep {
                title: Some("S".to_string()),
                description: None,
                fields: Some(vec![RawGeneratedField {
                    field_type: Some("text".to_string()),
                    label: Some("Name".to_string()),
                    placeholder: None,
                    required: None,
                    options: Some(vec![RawGeneratedOption {
                        label: Some("Stray".to_string()),
                        value: Some("stray".to_string()),
                    }]),
                }]),
            }]),
        };

        let field = &normalize(raw).steps[0].fields[0];
        assert!(field.options.is_empty());
    }

    #[test]
    fn test_normalize_keeps_provided_radio_options() {
        let raw = RawGeneratedForm {
            title: Some("T".to_string()),
            description: None,
            steps: Some(vec![RawGeneratedStep {
                title: Some("S".to_string()),
                description: None,
                fields: Some(vec![RawGeneratedField {
                    field_type: Some("radio".to_string()),
                    label: Some("Size".to_string()),
                    placeholder: None,
                    required: Some(true),
                    options: Some(vec![
                        RawGeneratedOption {
                            label: Some("Small".to_string()),
                            value: Some("s".to_string()),
                        },
                        RawGeneratedOption {
                            label: Some("Large".to_string()),
                            value: Some("l".to_string()),
                        },
                    ]),
                }]),
            }]),
        };

        let field = &normalize(raw).steps[0].fields[0];
        assert_eq!(field.options.len(), 2);
        assert_eq!(field.options[0].label, "Small");
        assert!(field.required);
    }

    #[test]
    fn test_raw_parse_of_typical_model_reply() {
        let reply = r#"{
            "title": "Customer Feedback",
            "description": "Tell us how we did.",
            "steps": [
                {
                    "title": "Rating",
                    "fields": [
                        {"type": "radio", "label": "How satisfied are you?", "required": true,
                         "options": [{"label": "Happy", "value": "happy"}, {"label": "Unhappy", "value": "unhappy"}]},
                        {"type": "textarea", "label": "Anything else?"}
                    ]
                }
            ]
        }"#;

        let raw: RawGeneratedForm = serde_json::from_str(reply).unwrap();
        let form = normalize(raw);

        assert_eq!(form.title, "Customer Feedback");
        assert_eq!(form.steps[0].fields.len(), 2);
        assert_eq!(form.steps[0].fields[0].field_type, FieldType::Radio);
        assert_eq!(form.steps[0].fields[1].field_type, FieldType::Textarea);
        assert!(form.steps[0].fields[1].options.is_empty());
    }

    #[test]
    fn test_generated_form_consumable_by_create_complete() {
        let form = GeneratedForm {
            title: "Generated Form".to_string(),
            description: "From a prompt".to_string(),
            steps: vec![GeneratedStep {
                title: "Untitled Step".to_string(),
                description: String::new(),
                fields: vec![GeneratedField {
                    field_type: FieldType::Select,
                    label: "Choice".to_string(),
                    placeholder: String::new(),
                    required: false,
                    options: vec![FieldOption {
                        label: "Option 1".to_string(),
                        value: "option_1".to_string(),
                    }],
                }],
            }],
        };

        let json = serde_json::to_string(&form).unwrap();
        let request: CreateCompleteFormRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(request.title, "Generated Form");
        assert_eq!(request.steps.len(), 1);
        assert_eq!(request.steps[0].fields[0].field_type.as_deref(), Some("select"));
    }

    #[tokio::test]
    async fn test_mock_generator_returns_normalized_form() {
        let generator = MockFormGenerator::new();

        let form = generator.generate(&request("Contact form")).await.unwrap();
        assert_eq!(form.title, "Contact form");
        assert_eq!(form.steps.len(), 1);
        assert_eq!(form.steps[0].fields[0].field_type, FieldType::Text);
    }

    #[tokio::test]
    async fn test_mock_generator_truncates_long_title() {
        let generator = MockFormGenerator::new();
        let long_prompt = "x".repeat(200);

        let form = generator.generate(&request(&long_prompt)).await.unwrap();
        assert_eq!(form.title.chars().count(), 60);
    }

    #[tokio::test]
    async fn test_mock_generator_failure() {
        let generator = MockFormGenerator::failing();

        let result = generator.generate(&request("Contact form")).await;
        assert!(matches!(result, Err(GenerationError::Service(_))));
    }

    #[test]
    fn test_generation_error_display() {
        assert!(format!("{}", GenerationError::NotConfigured).contains("not configured"));
        assert!(format!("{}", GenerationError::Timeout(5000)).contains("5000ms"));
        assert!(
            format!("{}", GenerationError::InvalidResponse("bad json".to_string()))
                .contains("bad json")
        );
    }
}
