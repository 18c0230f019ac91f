//! Form state controller - selections, completeness, and the generate gate

pub mod controller;
pub mod upload;

pub use controller::{
    FormController, FormSelection, PendingGeneration, SessionView, MIN_DESCRIPTION_CHARS,
};
pub use upload::{ImageUpload, ReferenceImage};
