//! Fan-out/fan-in over the image capability

use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::error::GenerationError;
use super::payload::ImagePayload;
use super::types::{
    ContentPart, GeneratedImage, GenerationRequest, ImageCapability, TextToImageOptions,
};

/// Images produced by one generate action
pub const IMAGES_PER_BATCH: usize = 6;

/// Upper bound the text-only model accepts per call
pub const MAX_IMAGES_PER_CALL: u32 = 4;

pub const ASPECT_RATIO: &str = "9:16";

pub const OUTPUT_MIME_TYPE: &str = "image/jpeg";

/// Produces a batch of images for a generation request
pub struct ImageGenerator {
    capability: Arc<dyn ImageCapability>,
}

impl ImageGenerator {
    pub fn new(capability: Arc<dyn ImageCapability>) -> Self {
        Self { capability }
    }

    /// Generate a full batch, or fail as a whole
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedImage>, GenerationError> {
        let result = match &request.image {
            Some(image) => self.generate_with_reference(&request.prompt, image).await,
            None => self.generate_from_text(&request.prompt).await,
        };

        match &result {
            Ok(images) => info!(count = images.len(), "Image generation finished"),
            Err(e) => warn!(error = %e, "Image generation failed"),
        }
        result
    }

    /// One call per image, all carrying the same reference image
    async fn generate_with_reference(
        &self,
        prompt: &str,
        image: &ImagePayload,
    ) -> Result<Vec<GeneratedImage>, GenerationError> {
        debug!(calls = IMAGES_PER_BATCH, "Generating from reference image");

        let calls = (0..IMAGES_PER_BATCH).map(|_| self.single_reference_image(prompt, image));
        try_join_all(calls).await
    }

    async fn single_reference_image(
        &self,
        prompt: &str,
        image: &ImagePayload,
    ) -> Result<GeneratedImage, GenerationError> {
        let parts = self.capability.generate_content(prompt, image).await?;
        first_image(parts)
    }

    /// Split the batch into calls of at most `MAX_IMAGES_PER_CALL`
    async fn generate_from_text(&self, prompt: &str) -> Result<Vec<GeneratedImage>, GenerationError> {
        let counts = call_sizes(IMAGES_PER_BATCH as u32, MAX_IMAGES_PER_CALL);
        debug!(calls = counts.len(), "Generating from text");

        let calls = counts.into_iter().map(|number_of_images| {
            let options = TextToImageOptions {
                number_of_images,
                aspect_ratio: ASPECT_RATIO,
                output_mime_type: OUTPUT_MIME_TYPE,
            };
            async move { self.capability.generate_images(prompt, &options).await }
        });

        let images: Vec<GeneratedImage> = try_join_all(calls).await?.into_iter().flatten().collect();

        if images.is_empty() {
            return Err(GenerationError::EmptyResult);
        }
        Ok(images)
    }
}

/// Pick the first inline image; otherwise report any text the model sent instead
fn first_image(parts: Vec<ContentPart>) -> Result<GeneratedImage, GenerationError> {
    let mut text = String::new();
    for part in parts {
        match part {
            ContentPart::InlineImage(image) => return Ok(image),
            ContentPart::Text(t) => text.push_str(&t),
        }
    }

    let text = text.trim();
    if text.is_empty() {
        Err(GenerationError::NoImageReturned)
    } else {
        Err(GenerationError::TextInsteadOfImage(text.to_string()))
    }
}

fn call_sizes(total: u32, per_call: u32) -> Vec<u32> {
    let mut sizes = Vec::new();
    let mut remaining = total;
    while remaining > 0 {
        let size = remaining.min(per_call);
        sizes.push(size);
        remaining -= size;
    }
    sizes
}
