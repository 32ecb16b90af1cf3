use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::interview::controller::InterviewError;
use crate::interview::validation::ProfileField;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing required profile fields")]
    MissingFields(Vec<ProfileField>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<InterviewError> for AppError {
    fn from(err: InterviewError) -> Self {
        match err {
            InterviewError::Validation { missing } => AppError::MissingFields(missing),
            InterviewError::EmptyAnswer => AppError::Validation(err.to_string()),
            InterviewError::InvalidTransition { .. } | InterviewError::NoPendingQuestion => {
                AppError::Conflict(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
            ),
            AppError::MissingFields(missing) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!(
                    "Please fill out all required fields: {}",
                    missing
                        .iter()
                        .map(ProfileField::label)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
                Some(missing.clone()),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone(), None),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(fields) = fields {
            error["fields"] = json!(fields);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interview::Phase;

    #[test]
    fn test_validation_maps_to_missing_fields() {
        let err: AppError = InterviewError::Validation {
            missing: vec![ProfileField::Email],
        }
        .into();
        assert!(matches!(err, AppError::MissingFields(ref f) if f == &vec![ProfileField::Email]));
    }

    #[test]
    fn test_wrong_phase_maps_to_conflict() {
        let err: AppError = InterviewError::InvalidTransition {
            from: Phase::Complete,
            action: "begin",
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_empty_answer_is_bad_request() {
        let err: AppError = InterviewError::EmptyAnswer.into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
