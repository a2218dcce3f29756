use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::PlanError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Please enter your details first")]
    MissingProfile,
    #[error("Plan generation is only available in AI mode")]
    WrongMode,
    #[error("No active plan matches the selected mode")]
    ExportUnavailable,
    #[error("The AI service is temporarily unavailable: {0}")]
    Generation(#[source] anyhow::Error),
    #[error("Invalid request body: {0}")]
    JsonRejection(#[from] JsonRejection),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<PlanError> for ApiError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::WrongMode => ApiError::WrongMode,
            PlanError::ExportUnavailable => ApiError::ExportUnavailable,
            PlanError::Generation(source) => ApiError::Generation(source),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "Validation failed"),
            ApiError::MissingProfile => (StatusCode::PRECONDITION_FAILED, "Profile required"),
            ApiError::WrongMode => (StatusCode::CONFLICT, "Wrong generation mode"),
            ApiError::ExportUnavailable => (StatusCode::CONFLICT, "Export unavailable"),
            ApiError::Generation(_) => (StatusCode::BAD_GATEWAY, "Text generation failed"),
            ApiError::JsonRejection(_) => (StatusCode::BAD_REQUEST, "Invalid request body"),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
