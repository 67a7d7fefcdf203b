//! Hugging Face inference API client.
//!
//! Text requests walk an ordered list of hosted models until one returns a
//! usable response; vision requests use BLIP image captioning and map the
//! caption to known landmarks by keyword.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{
    extract, prompts, AiProvider, AiSource, ChatPayload, PlanPayload, PlanRequest, ProviderError,
    VisionPayload,
};

const INFERENCE_API: &str = "https://api-inference.huggingface.co/models";

/// Hosted text models tried in order for plan and chat requests.
const TEXT_MODELS: &[&str] = &[
    "microsoft/DialoGPT-medium",
    "facebook/blenderbot-400M-distill",
    "google/flan-t5-base",
];

const CAPTION_MODEL: &str = "Salesforce/blip-image-captioning-base";

pub struct HuggingFaceClient {
    client: Client,
    api_key: String,
}

impl HuggingFaceClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key,
        }
    }

    /// Run a prompt through the model list, returning the first generated
    /// text that the given parser accepts.
    async fn generate<T>(
        &self,
        prompt: &str,
        max_new_tokens: u32,
        parse: impl Fn(&str) -> Result<T, ProviderError>,
    ) -> Result<T, ProviderError> {
        let payload = serde_json::json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": max_new_tokens,
                "temperature": 0.7,
                "return_full_text": false,
            }
        });

        let mut last_error =
            ProviderError::Unavailable("no Hugging Face text model available".to_string());

        for model in TEXT_MODELS {
            let result = self
                .client
                .post(format!("{INFERENCE_API}/{model}"))
                .bearer_auth(&self.api_key)
                .json(&payload)
                .send()
                .await;

            let response = match result {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!("HF model {} transport failure: {}", model, e);
                    last_error = ProviderError::from_transport(e);
                    continue;
                }
            };

            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if !status.is_success() {
                tracing::warn!("HF model {} returned {}", model, status);
                last_error = ProviderError::from_status(status, &body);
                continue;
            }

            let generated: Vec<GeneratedText> = match serde_json::from_str(&body) {
                Ok(g) => g,
                Err(e) => {
                    last_error = ProviderError::Malformed(format!("model {model}: {e}"));
                    continue;
                }
            };

            let Some(text) = generated.into_iter().next().map(|g| g.generated_text) else {
                last_error = ProviderError::Malformed(format!("model {model}: empty result"));
                continue;
            };

            match parse(&text) {
                Ok(parsed) => return Ok(parsed),
                Err(e) => {
                    tracing::warn!("HF model {} output rejected: {}", model, e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}

#[async_trait]
impl AiProvider for HuggingFaceClient {
    fn source(&self) -> AiSource {
        AiSource::Huggingface
    }

    async fn travel_plan(&self, request: &PlanRequest) -> Result<PlanPayload, ProviderError> {
        let prompt = prompts::travel_plan(request);
        self.generate(&prompt, 1000, extract::plan_from_text).await
    }

    async fn identify_landmarks(&self, image_b64: &str) -> Result<VisionPayload, ProviderError> {
        let image_bytes = BASE64
            .decode(image_b64)
            .map_err(|e| ProviderError::Malformed(format!("invalid base64 image: {e}")))?;

        let response = self
            .client
            .post(format!("{INFERENCE_API}/{CAPTION_MODEL}"))
            .bearer_auth(&self.api_key)
            .body(image_bytes)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ProviderError::from_status(status, &body));
        }

        let captions: Vec<GeneratedText> = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Malformed(format!("caption response: {e}")))?;

        let caption = captions
            .into_iter()
            .next()
            .map(|c| c.generated_text)
            .ok_or_else(|| ProviderError::Malformed("no caption returned".to_string()))?;

        extract::vision_from_description(&caption)
    }

    async fn chat(&self, message: &str) -> Result<ChatPayload, ProviderError> {
        let prompt = prompts::chat(message);
        self.generate(&prompt, 500, extract::chat_from_text).await
    }
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    #[serde(default)]
    generated_text: String,
}
