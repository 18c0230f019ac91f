//! Gemini / Imagen HTTP client

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::error::GenerationError;
use super::payload::ImagePayload;
use super::types::{ContentPart, GeneratedImage, ImageCapability, TextToImageOptions};
use crate::config::GeminiConfig;
use crate::error::Result;

/// Client for the Generative Language API, shared by every call
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    edit_model: String,
    imagen_model: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum RequestPart<'a> {
    InlineData(InlineData<'a>),
    Text(&'a str),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default, alias = "inline_data")]
    inline_data: Option<ResponseInlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseInlineData {
    #[serde(alias = "mime_type")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    instances: Vec<PredictInstance<'a>>,
    parameters: PredictParameters<'a>,
}

#[derive(Debug, Serialize)]
struct PredictInstance<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters<'a> {
    sample_count: u32,
    aspect_ratio: &'a str,
    output_options: OutputOptions<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputOptions<'a> {
    mime_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    #[serde(default)]
    bytes_base64_encoded: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
}

impl GeminiClient {
    /// Create a new client from configuration
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            edit_model: config.edit_model.clone(),
            imagen_model: config.imagen_model.clone(),
        })
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    async fn post_json<B, R>(&self, url: &str, body: &B) -> std::result::Result<R, GenerationError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Request to Gemini API failed");
                GenerationError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url = %url, status = %status, "Gemini API returned an error");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<R>().await?)
    }
}

#[async_trait]
impl ImageCapability for GeminiClient {
    async fn generate_content(
        &self,
        prompt: &str,
        image: &ImagePayload,
    ) -> std::result::Result<Vec<ContentPart>, GenerationError> {
        let url = self.model_url(&self.edit_model, "generateContent");
        debug!(model = %self.edit_model, mime_type = %image.mime_type, "Sending generateContent request");

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::InlineData(InlineData {
                        mime_type: &image.mime_type,
                        data: &image.data,
                    }),
                    RequestPart::Text(prompt),
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE", "TEXT"],
            },
        };

        let response: GenerateContentResponse = self.post_json(&url, &request).await?;

        let parts = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default();

        Ok(parts
            .into_iter()
            .filter_map(|part| match (part.inline_data, part.text) {
                (Some(inline), _) => Some(ContentPart::InlineImage(GeneratedImage::new(
                    inline.mime_type,
                    inline.data,
                ))),
                (None, Some(text)) => Some(ContentPart::Text(text)),
                (None, None) => None,
            })
            .collect())
    }

    async fn generate_images(
        &self,
        prompt: &str,
        options: &TextToImageOptions,
    ) -> std::result::Result<Vec<GeneratedImage>, GenerationError> {
        let url = self.model_url(&self.imagen_model, "predict");
        debug!(
            model = %self.imagen_model,
            count = options.number_of_images,
            "Sending predict request"
        );

        let request = PredictRequest {
            instances: vec![PredictInstance { prompt }],
            parameters: PredictParameters {
                sample_count: options.number_of_images,
                aspect_ratio: options.aspect_ratio,
                output_options: OutputOptions {
                    mime_type: options.output_mime_type,
                },
            },
        };

        let response: PredictResponse = self.post_json(&url, &request).await?;

        // Predictions filtered by the safety system carry no bytes.
        Ok(response
            .predictions
            .into_iter()
            .filter_map(|p| {
                let data = p.bytes_base64_encoded?;
                let mime_type = p
                    .mime_type
                    .unwrap_or_else(|| options.output_mime_type.to_string());
                Some(GeneratedImage::new(mime_type, data))
            })
            .collect())
    }
}
