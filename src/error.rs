//! Common error types for the image studio

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::generation::GenerationError;

/// Message shown when generate is requested before every step is filled in
pub const INCOMPLETE_FORM_MESSAGE: &str = "Please complete all steps before generating images.";

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("{}", .0.user_message())]
    Generation(#[from] GenerationError),

    #[error("{}", INCOMPLETE_FORM_MESSAGE)]
    IncompleteForm,

    #[error("Images are already being generated")]
    GenerationInProgress,

    #[error("Generation was discarded because the form was reset")]
    GenerationDiscarded,

    #[error("The form was reset before the submission was applied")]
    FormReset,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response format
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub r#type: String,
    pub code: Option<String>,
}

impl AppError {
    fn classify(&self) -> (StatusCode, &'static str, Option<&'static str>) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "server_error", None),
            AppError::HttpClient(_) => (StatusCode::INTERNAL_SERVER_ERROR, "server_error", None),
            AppError::Generation(e) => (StatusCode::BAD_GATEWAY, "generation_error", Some(e.code())),
            AppError::IncompleteForm => (
                StatusCode::BAD_REQUEST,
                "invalid_request_error",
                Some("incomplete_form"),
            ),
            AppError::GenerationInProgress => (
                StatusCode::CONFLICT,
                "conflict_error",
                Some("generation_in_progress"),
            ),
            AppError::GenerationDiscarded => (
                StatusCode::CONFLICT,
                "conflict_error",
                Some("generation_discarded"),
            ),
            AppError::FormReset => (StatusCode::CONFLICT, "conflict_error", Some("form_reset")),
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request_error", None),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found_error", None),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "server_error", None),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, code) = self.classify();

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                message: self.to_string(),
                r#type: error_type.to_string(),
                code: code.map(|c| c.to_string()),
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
