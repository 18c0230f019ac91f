//! Form state and the generation gate

use serde::Serialize;
use tracing::{debug, info};

use super::upload::ReferenceImage;
use crate::catalog::CatalogOption;
use crate::error::{AppError, Result, INCOMPLETE_FORM_MESSAGE};
use crate::generation::{GeneratedImage, GenerationError, GenerationRequest};
use crate::prompt::build_prompt;

/// Descriptions must be longer than this once trimmed
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// What the user has entered so far
#[derive(Debug, Default, Clone)]
pub struct FormSelection {
    pub image: Option<ReferenceImage>,
    pub description: String,
    pub model: Option<&'static CatalogOption>,
    pub vibe: Option<&'static CatalogOption>,
}

impl FormSelection {
    pub fn is_complete(&self) -> bool {
        self.description.trim().chars().count() > MIN_DESCRIPTION_CHARS
            && self.model.is_some()
            && self.vibe.is_some()
    }
}

/// A generate action that has passed the gate
#[derive(Debug)]
pub struct PendingGeneration {
    /// Reset counter at the time the action started
    pub epoch: u64,
    pub request: GenerationRequest,
}

/// Selections, results, and status flags for the one workflow the service hosts
#[derive(Debug, Default)]
pub struct FormController {
    selection: FormSelection,
    images: Vec<GeneratedImage>,
    loading: bool,
    error: Option<String>,
    epoch: u64,
}

/// Serializable view of the controller
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub description: String,
    pub model: Option<&'static CatalogOption>,
    pub vibe: Option<&'static CatalogOption>,
    pub image: Option<ImageView>,
    pub complete: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ImageView {
    pub file_name: Option<String>,
    pub content_type: String,
    pub size: usize,
    pub preview: String,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &FormSelection {
        &self.selection
    }

    pub fn images(&self) -> &[GeneratedImage] {
        &self.images
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Reset counter, bumped by every `reset`
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Store an encoded reference image, or clear it with `None`
    pub fn set_image(&mut self, image: Option<ReferenceImage>) {
        self.selection.image = image;
    }

    /// Store an image encoded while the lock was released. Refused if the
    /// form was reset since `epoch` was read.
    pub fn store_image(&mut self, epoch: u64, image: Option<ReferenceImage>) -> Result<()> {
        if epoch != self.epoch {
            debug!(epoch, current = self.epoch, "Dropping image encoded before reset");
            return Err(AppError::FormReset);
        }
        self.selection.image = image;
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.selection.description = description.into();
    }

    pub fn set_model(&mut self, model: Option<&'static CatalogOption>) {
        self.selection.model = model;
    }

    pub fn set_vibe(&mut self, vibe: Option<&'static CatalogOption>) {
        self.selection.vibe = vibe;
    }

    pub fn is_complete(&self) -> bool {
        self.selection.is_complete()
    }

    /// Back to the initial empty state. A generation still in flight will be
    /// discarded when it finishes.
    pub fn reset(&mut self) {
        let epoch = self.epoch + 1;
        *self = Self {
            epoch,
            ..Self::default()
        };
        debug!(epoch, "Form reset");
    }

    /// Check the gate and start a generate action
    pub fn begin_generation(&mut self) -> Result<PendingGeneration> {
        if self.loading {
            return Err(AppError::GenerationInProgress);
        }

        let (model, vibe) = match (self.is_complete(), self.selection.model, self.selection.vibe) {
            (true, Some(model), Some(vibe)) => (model, vibe),
            _ => {
                self.error = Some(INCOMPLETE_FORM_MESSAGE.to_string());
                return Err(AppError::IncompleteForm);
            }
        };

        self.loading = true;
        self.error = None;
        self.images.clear();

        let has_image = self.selection.image.is_some();
        let prompt = build_prompt(&self.selection.description, model.prompt, vibe.prompt, has_image);
        let image_uri = self.selection.image.as_ref().map(|image| image.data_uri());

        match GenerationRequest::new(prompt, image_uri) {
            Ok(request) => {
                info!(
                    model = model.id,
                    vibe = vibe.id,
                    reference_image = has_image,
                    "Starting image generation"
                );
                Ok(PendingGeneration {
                    epoch: self.epoch,
                    request,
                })
            }
            Err(e) => {
                self.loading = false;
                self.error = Some(e.user_message());
                Err(e.into())
            }
        }
    }

    /// Record the outcome of a generate action started at `epoch`
    pub fn finish_generation(
        &mut self,
        epoch: u64,
        outcome: std::result::Result<Vec<GeneratedImage>, GenerationError>,
    ) -> Result<Vec<GeneratedImage>> {
        if epoch != self.epoch {
            debug!(epoch, current = self.epoch, "Discarding generation outcome after reset");
            return Err(AppError::GenerationDiscarded);
        }

        self.loading = false;
        match outcome {
            Ok(images) => {
                self.images = images.clone();
                Ok(images)
            }
            Err(e) => {
                self.error = Some(e.user_message());
                Err(e.into())
            }
        }
    }

    /// Clear the loading flag of a generate action that ended without an
    /// outcome
    pub fn abandon_generation(&mut self, epoch: u64) {
        if epoch == self.epoch && self.loading {
            self.loading = false;
            self.error = Some(GenerationError::Interrupted.user_message());
        }
    }

    pub fn snapshot(&self) -> SessionView {
        SessionView {
            description: self.selection.description.clone(),
            model: self.selection.model,
            vibe: self.selection.vibe,
            image: self.selection.image.as_ref().map(|image| ImageView {
                file_name: image.file_name().map(str::to_string),
                content_type: image.content_type().to_string(),
                size: image.size(),
                preview: image.data_uri().to_string(),
            }),
            complete: self.is_complete(),
            loading: self.loading,
            error: self.error.clone(),
            images: self.images.iter().map(GeneratedImage::data_uri).collect(),
        }
    }
}
