//! Data URI encoding and decoding for image payloads

use base64::{engine::general_purpose::STANDARD, Engine};

use super::error::GenerationError;

/// Image bytes as they travel to the API: MIME type plus base64 text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

impl ImagePayload {
    /// Parse a `data:image/<subtype>;base64,<payload>` URI
    pub fn from_data_uri(data_uri: &str) -> Result<Self, GenerationError> {
        let rest = data_uri
            .strip_prefix("data:")
            .ok_or(GenerationError::MalformedImage)?;
        let (mime_type, data) = rest
            .split_once(";base64,")
            .ok_or(GenerationError::MalformedImage)?;

        if !mime_type.starts_with("image/") || data.contains(['\n', '\r']) {
            return Err(GenerationError::MalformedImage);
        }

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }
}

/// Encode binary data to base64 string
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode base64 string to binary data
pub fn decode(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(encoded.trim())
}

/// Create a data URI from binary data, falling back to a generic MIME type
pub fn create_data_uri(data: &[u8], mime_type: &str) -> String {
    let mime_type = if mime_type.is_empty() {
        "application/octet-stream"
    } else {
        mime_type
    };
    format!("data:{};base64,{}", mime_type, encode(data))
}
