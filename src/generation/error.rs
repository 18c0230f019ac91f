//! Failures raised while producing a batch of images

use serde::Deserialize;
use thiserror::Error;

/// Why a generate action produced no images
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Invalid base64 image format. Please upload a valid image.")]
    MalformedImage,

    /// The editing model answered in prose, usually a refusal
    #[error("API returned text instead of an image: \"{0}\"")]
    TextInsteadOfImage(String),

    #[error("API did not return an image from the editing model.")]
    NoImageReturned,

    #[error("The API did not return any images despite successful requests.")]
    EmptyResult,

    /// Non-success HTTP status; `body` is the raw response text
    #[error("{}", api_failure_text(.status, .body))]
    Api { status: u16, body: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("The generation was interrupted before it finished.")]
    Interrupted,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

fn api_failure_text(status: &u16, body: &str) -> String {
    if body.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        body.to_string()
    }
}

/// Pull `error.message` out of a JSON error payload, if the text is one
pub fn extract_api_message(text: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorEnvelope>(text)
        .ok()?
        .error?
        .message
        .filter(|m| !m.is_empty())
}

impl GenerationError {
    /// Message shown to the user for this failure
    pub fn user_message(&self) -> String {
        let text = self.to_string();
        match extract_api_message(&text) {
            Some(message) => format!("API Error: {}", message),
            None => format!("Failed to generate images: {}", text),
        }
    }

    /// Stable machine-readable code for JSON error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedImage => "malformed_image",
            Self::TextInsteadOfImage(_) | Self::NoImageReturned => "capability_refusal",
            Self::EmptyResult => "empty_result",
            Self::Api { .. } => "api_error",
            Self::Transport(_) => "transport_error",
            Self::Interrupted => "interrupted",
        }
    }
}
