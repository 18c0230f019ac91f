//! Reference image intake

use crate::error::{AppError, Result};
use crate::generation::payload;

/// A file as received from the browser
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// An uploaded file together with its data URI.
///
/// Only produced by [`ReferenceImage::encode`], so the encoded form always
/// exists alongside the raw file.
#[derive(Debug, Clone)]
pub struct ReferenceImage {
    upload: ImageUpload,
    data_uri: String,
}

impl ReferenceImage {
    /// Encode an upload into a data URI on the blocking pool
    pub async fn encode(upload: ImageUpload) -> Result<Self> {
        tokio::task::spawn_blocking(move || {
            let data_uri = payload::create_data_uri(&upload.bytes, &upload.content_type);
            Self { upload, data_uri }
        })
        .await
        .map_err(|e| AppError::Internal(format!("Failed to encode image: {}", e)))
    }

    pub fn file_name(&self) -> Option<&str> {
        self.upload.file_name.as_deref()
    }

    pub fn content_type(&self) -> &str {
        &self.upload.content_type
    }

    pub fn size(&self) -> usize {
        self.upload.bytes.len()
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }
}
