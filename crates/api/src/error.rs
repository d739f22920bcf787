//! API error type and its HTTP mapping.
//!
//! Handlers return `Result<_, ApiError>`. The [`IntoResponse`] impl is the
//! single place where errors become wire responses, so every route shares
//! one JSON body shape: `{"error": <code>, "message": <text>}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Upstream failure: {0}")]
    BadGateway(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ApiError {
    /// Machine-readable code carried in the response body. Stable for
    /// clients; the human message may change.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::Validation(_) => "validation_error",
            ApiError::RateLimited => "rate_limited",
            ApiError::Internal(_) => "internal_error",
            ApiError::BadGateway(_) => "upstream_error",
            ApiError::ServiceUnavailable(_) => "service_unavailable",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Message sent to the client. Internal details never leave the server.
    fn client_message(&self) -> String {
        match self {
            ApiError::Internal(_) => "An internal error occurred".to_string(),
            ApiError::RateLimited => "Too many requests. Please try again later.".to_string(),
            ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Validation(msg)
            | ApiError::BadGateway(msg)
            | ApiError::ServiceUnavailable(msg) => msg.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(detail = %detail, "Internal error");
        }

        let body = ErrorBody {
            error: self.code(),
            message: self.client_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => {
                return ApiError::NotFound("Resource not found".to_string())
            }
            sqlx::Error::Database(db) => match db.code().as_deref() {
                // unique_violation
                Some("23505") => {
                    return ApiError::Conflict("Resource already exists".to_string())
                }
                // foreign_key_violation
                Some("23503") => {
                    return ApiError::NotFound("Referenced resource not found".to_string())
                }
                _ => {}
            },
            _ => {}
        }
        ApiError::Internal(format!("Database error: {}", err))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut parts: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: invalid value", field),
                })
            })
            .collect();
        // field_errors is a map, sort for a stable message
        parts.sort();

        ApiError::Validation(parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_code_for_every_variant() {
        let cases = [
            (
                ApiError::Unauthorized("x".into()),
                StatusCode::UNAUTHORIZED,
                "unauthorized",
            ),
            (
                ApiError::Forbidden("x".into()),
                StatusCode::FORBIDDEN,
                "forbidden",
            ),
            (
                ApiError::NotFound("x".into()),
                StatusCode::NOT_FOUND,
                "not_found",
            ),
            (
                ApiError::Conflict("x".into()),
                StatusCode::CONFLICT,
                "conflict",
            ),
            (
                ApiError::Validation("x".into()),
                StatusCode::BAD_REQUEST,
                "validation_error",
            ),
            (
                ApiError::RateLimited,
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
            ),
            (
                ApiError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
            ),
            (
                ApiError::BadGateway("x".into()),
                StatusCode::BAD_GATEWAY,
                "upstream_error",
            ),
            (
                ApiError::ServiceUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
            ),
        ];

        for (error, status, code) in cases {
            assert_eq!(error.status(), status, "{}", code);
            assert_eq!(error.code(), code);
            let response = error.into_response();
            assert_eq!(response.status(), status);
        }
    }

    #[test]
    fn test_internal_detail_is_not_sent_to_client() {
        let error = ApiError::Internal("connection refused on 10.0.3.7".to_string());
        assert_eq!(error.client_message(), "An internal error occurred");
    }

    #[test]
    fn test_rate_limited_has_fixed_message() {
        assert_eq!(
            ApiError::RateLimited.client_message(),
            "Too many requests. Please try again later."
        );
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        match error {
            ApiError::NotFound(msg) => assert_eq!(msg, "Resource not found"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_from_validation_errors_names_the_field() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 1, message = "Title is required"))]
            title: String,
        }

        let error: ApiError = Probe {
            title: String::new(),
        }
        .validate()
        .unwrap_err()
        .into();

        match error {
            ApiError::Validation(msg) => assert_eq!(msg, "title: Title is required"),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_from_validation_errors_joins_multiple_fields() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 1, message = "Title is required"))]
            title: String,
            #[validate(length(min = 1, message = "Label is required"))]
            label: String,
        }

        let error: ApiError = Probe {
            title: String::new(),
            label: String::new(),
        }
        .validate()
        .unwrap_err()
        .into();

        match error {
            ApiError::Validation(msg) => {
                assert_eq!(msg, "label: Label is required; title: Title is required")
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_display_includes_detail() {
        assert_eq!(
            ApiError::NotFound("Form not found".to_string()).to_string(),
            "Not found: Form not found"
        );
        assert_eq!(ApiError::RateLimited.to_string(), "Rate limited");
    }
}
