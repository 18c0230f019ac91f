//! Request and result types shared by the orchestrator and the API client

use async_trait::async_trait;
use serde::Serialize;

use super::error::GenerationError;
use super::payload::{self, ImagePayload};

/// Everything needed for one generate action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Reference image; its presence selects the image-conditioned mode
    pub image: Option<ImagePayload>,
}

impl GenerationRequest {
    /// Build a request, parsing the reference image's data URI if there is one
    pub fn new(prompt: String, image_data_uri: Option<&str>) -> Result<Self, GenerationError> {
        let image = image_data_uri.map(ImagePayload::from_data_uri).transpose()?;
        Ok(Self { prompt, image })
    }
}

/// One generated image, kept in its base64 form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: String,
}

impl GeneratedImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Raw image bytes
    pub fn bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        payload::decode(&self.data)
    }
}

/// A piece of a multimodal response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    InlineImage(GeneratedImage),
}

/// Options for a text-only generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextToImageOptions {
    pub number_of_images: u32,
    pub aspect_ratio: &'static str,
    pub output_mime_type: &'static str,
}

/// The remote image generation service
#[async_trait]
pub trait ImageCapability: Send + Sync {
    /// Image-plus-text call; yields the content parts of the first candidate
    async fn generate_content(
        &self,
        prompt: &str,
        image: &ImagePayload,
    ) -> Result<Vec<ContentPart>, GenerationError>;

    /// Text-only call returning up to `options.number_of_images` images
    async fn generate_images(
        &self,
        prompt: &str,
        options: &TextToImageOptions,
    ) -> Result<Vec<GeneratedImage>, GenerationError>;
}
