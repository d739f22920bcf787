//! Form submission domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One respondent's answers to a form.
///
/// The `data` payload is stored opaquely; keys correspond to field
/// identifiers at submission time and are never validated against the
/// form's current field set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub submission_id: Uuid,
    pub form_id: Uuid,
    pub data: serde_json::Value,
    pub submitted_at: DateTime<Utc>,
}

/// Request payload for submitting a form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionRequest {
    pub data: serde_json::Value,
}

/// Response payload for submission operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: Uuid,
    pub form_id: Uuid,
    pub data: serde_json::Value,
    pub submitted_at: DateTime<Utc>,
}

impl From<Submission> for SubmissionResponse {
    fn from(s: Submission) -> Self {
        Self {
            id: s.submission_id,
            form_id: s.form_id,
            data: s.data,
            submitted_at: s.submitted_at,
        }
    }
}
