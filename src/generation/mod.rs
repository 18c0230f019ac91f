//! Image generation - request types, the Gemini client, and the batch orchestrator

pub mod error;
pub mod gemini;
pub mod orchestrator;
pub mod payload;
pub mod types;

pub use error::GenerationError;
pub use gemini::GeminiClient;
pub use orchestrator::{ImageGenerator, IMAGES_PER_BATCH};
pub use payload::ImagePayload;
pub use types::{
    ContentPart, GeneratedImage, GenerationRequest, ImageCapability, TextToImageOptions,
};
