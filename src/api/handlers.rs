//! Request handlers

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::catalog::{self, CatalogOption, MODELS, VIBES};
use crate::error::{AppError, Result};
use crate::form::{ImageUpload, ReferenceImage, SessionView};
use crate::generation::GeneratedImage;
use crate::presentation::{download_filename, render_page};
use crate::AppState;

#[derive(Serialize)]
pub struct OptionsResponse {
    pub models: &'static [CatalogOption],
    pub vibes: &'static [CatalogOption],
}

#[derive(Serialize)]
pub struct GenerateResponse {
    /// Data URIs in result order
    pub images: Vec<String>,
}

#[derive(Deserialize)]
pub struct DescriptionBody {
    pub description: String,
}

/// `{ "id": "luxury" }` selects, `{ "id": null }` clears
#[derive(Deserialize)]
pub struct OptionChoice {
    #[serde(default)]
    pub id: Option<String>,
}

/// Fields of a multipart submission
#[derive(Default)]
struct Submission {
    upload: Option<ImageUpload>,
    fields: HashMap<String, String>,
}

fn bad_multipart(e: MultipartError) -> AppError {
    AppError::InvalidRequest(format!("Invalid form data: {}", e))
}

async fn read_multipart(mut multipart: Multipart) -> Result<Submission> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(bad_multipart)?;
            // Browsers send an empty part when no file was chosen.
            if !bytes.is_empty() {
                submission.upload = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
        } else {
            let value = field.text().await.map_err(bad_multipart)?;
            submission.fields.insert(name, value);
        }
    }

    Ok(submission)
}

fn lookup_model(id: &str) -> Result<&'static CatalogOption> {
    catalog::find_model(id).ok_or_else(|| AppError::InvalidRequest(format!("Unknown model '{}'", id)))
}

fn lookup_vibe(id: &str) -> Result<&'static CatalogOption> {
    catalog::find_vibe(id).ok_or_else(|| AppError::InvalidRequest(format!("Unknown vibe '{}'", id)))
}

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let form = state.form.lock();
    Html(render_page(&form))
}

/// Apply a page submission and optionally run the generation
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Redirect> {
    let epoch = state.form.lock().epoch();
    let mut submission = read_multipart(multipart).await?;

    let model = submission
        .fields
        .get("model")
        .filter(|id| !id.is_empty())
        .map(|id| lookup_model(id))
        .transpose()?;
    let vibe = submission
        .fields
        .get("vibe")
        .filter(|id| !id.is_empty())
        .map(|id| lookup_vibe(id))
        .transpose()?;
    let image = match submission.upload.take() {
        Some(upload) => Some(ReferenceImage::encode(upload).await?),
        None => None,
    };

    {
        let mut form = state.form.lock();
        if image.is_some() {
            if let Err(e) = form.store_image(epoch, image) {
                debug!(error = %e, "Dropping page submission");
                return Ok(Redirect::to("/"));
            }
        } else if submission.fields.contains_key("remove_image") {
            form.set_image(None);
        }
        if let Some(description) = submission.fields.get("description") {
            form.set_description(description.as_str());
        }
        if model.is_some() {
            form.set_model(model);
        }
        if vibe.is_some() {
            form.set_vibe(vibe);
        }
    }

    if submission.fields.get("action").map(String::as_str) == Some("generate") {
        // Failures are recorded on the form and shown by the page.
        if let Err(e) = state.generate().await {
            debug!(error = %e, "Generation from page did not produce images");
        }
    }

    Ok(Redirect::to("/"))
}

pub async fn reset_page(State(state): State<Arc<AppState>>) -> Redirect {
    state.form.lock().reset();
    Redirect::to("/")
}

pub async fn download_image(
    State(state): State<Arc<AppState>>,
    Path(ordinal): Path<usize>,
) -> Result<impl IntoResponse> {
    let image = {
        let form = state.form.lock();
        let image = ordinal
            .checked_sub(1)
            .and_then(|index| form.images().get(index).cloned());
        image
    }
    .ok_or_else(|| AppError::NotFound(format!("No generated image at position {}", ordinal)))?;

    let bytes = image.bytes().map_err(|e| {
        warn!(ordinal, error = %e, "Stored image is not valid base64");
        AppError::Internal(format!("Stored image is not valid base64: {}", e))
    })?;
    let disposition = format!("attachment; filename=\"{}\"", download_filename(ordinal));

    Ok((
        [
            (header::CONTENT_TYPE, image.mime_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

pub async fn list_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        models: &MODELS,
        vibes: &VIBES,
    })
}

pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    Json(state.form.lock().snapshot())
}

pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<SessionView>> {
    let epoch = state.form.lock().epoch();
    let submission = read_multipart(multipart).await?;
    let upload = submission
        .upload
        .ok_or_else(|| AppError::InvalidRequest("Missing non-empty 'image' field".to_string()))?;

    let image = ReferenceImage::encode(upload).await?;
    let mut form = state.form.lock();
    form.store_image(epoch, Some(image))?;
    Ok(Json(form.snapshot()))
}

pub async fn clear_image(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    let mut form = state.form.lock();
    form.set_image(None);
    Json(form.snapshot())
}

pub async fn set_description(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DescriptionBody>,
) -> Json<SessionView> {
    let mut form = state.form.lock();
    form.set_description(body.description);
    Json(form.snapshot())
}

pub async fn set_model(
    State(state): State<Arc<AppState>>,
    Json(choice): Json<OptionChoice>,
) -> Result<Json<SessionView>> {
    let model = choice.id.as_deref().map(lookup_model).transpose()?;
    let mut form = state.form.lock();
    form.set_model(model);
    Ok(Json(form.snapshot()))
}

pub async fn set_vibe(
    State(state): State<Arc<AppState>>,
    Json(choice): Json<OptionChoice>,
) -> Result<Json<SessionView>> {
    let vibe = choice.id.as_deref().map(lookup_vibe).transpose()?;
    let mut form = state.form.lock();
    form.set_vibe(vibe);
    Ok(Json(form.snapshot()))
}

pub async fn generate(State(state): State<Arc<AppState>>) -> Result<Json<GenerateResponse>> {
    let images = state.generate().await?;
    Ok(Json(GenerateResponse {
        images: images.iter().map(GeneratedImage::data_uri).collect(),
    }))
}

pub async fn reset(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    let mut form = state.form.lock();
    form.reset();
    Json(form.snapshot())
}
