//! Affiliate Image Studio
//!
//! A small web service that turns a product description, an optional
//! reference photo, a model persona, and a visual vibe into six marketing
//! images generated through the Gemini image APIs.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod form;
pub mod generation;
pub mod presentation;
pub mod prompt;

pub use error::{AppError, Result};

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::error;

use form::{FormController, PendingGeneration};
use generation::{GeneratedImage, ImageCapability, ImageGenerator};

/// Application state shared across all handlers
pub struct AppState {
    pub settings: Arc<config::Settings>,
    /// Never held across an `.await`
    pub form: Mutex<FormController>,
    pub generator: ImageGenerator,
}

impl AppState {
    pub fn new(settings: config::Settings, capability: Arc<dyn ImageCapability>) -> Self {
        Self {
            settings: Arc::new(settings),
            form: Mutex::new(FormController::new()),
            generator: ImageGenerator::new(capability),
        }
    }

    /// Run one generate action against the current form.
    ///
    /// The API calls run on their own task, so the outcome is recorded and
    /// the loading flag cleared even when the caller is dropped mid-flight.
    pub async fn generate(self: &Arc<Self>) -> Result<Vec<GeneratedImage>> {
        let PendingGeneration { epoch, request } = self.form.lock().begin_generation()?;

        let state = Arc::clone(self);
        let task = tokio::spawn(async move {
            let outcome = state.generator.generate(&request).await;
            state.form.lock().finish_generation(epoch, outcome)
        });

        match task.await {
            Ok(result) => result,
            Err(e) => {
                error!(epoch, error = %e, "Generation task did not complete");
                self.form.lock().abandon_generation(epoch);
                Err(AppError::Internal(format!("Generation task failed: {}", e)))
            }
        }
    }
}
