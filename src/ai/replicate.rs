//! Replicate predictions API client.
//!
//! Predictions are asynchronous: creation returns 201 with a polling URL,
//! and the result is only usable once `status` reaches `succeeded`. The
//! tier is opt-in via configuration and sits last in every chain.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{
    extract, prompts, AiProvider, AiSource, ChatPayload, PlanPayload, PlanRequest, ProviderError,
    VisionPayload,
};

const PREDICTIONS_URL: &str = "https://api.replicate.com/v1/predictions";

/// How long to wait before polling a freshly created prediction.
const POLL_DELAY: Duration = Duration::from_secs(2);

pub struct ReplicateClient {
    client: Client,
    api_token: String,
}

impl ReplicateClient {
    pub fn new(api_token: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_token,
        }
    }

    /// Create a prediction and poll once for its output text.
    async fn predict(&self, input: serde_json::Value) -> Result<String, ProviderError> {
        let payload = serde_json::json!({
            "version": "latest",
            "input": input,
        });

        let response = self
            .client
            .post(PREDICTIONS_URL)
            .header("Authorization", format!("Token {}", self.api_token))
            .json(&payload)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status != reqwest::StatusCode::CREATED {
            return Err(ProviderError::from_status(status, &body));
        }

        let prediction: Prediction = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Malformed(format!("prediction response: {e}")))?;

        tokio::time::sleep(POLL_DELAY).await;

        let response = self
            .client
            .get(&prediction.urls.get)
            .header("Authorization", format!("Token {}", self.api_token))
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ProviderError::from_status(status, &body));
        }

        let result: PredictionStatus = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Malformed(format!("prediction poll: {e}")))?;

        if result.status != "succeeded" {
            return Err(ProviderError::Unavailable(format!(
                "prediction not ready: status={}",
                result.status
            )));
        }

        // Output may be a string or an array of string chunks.
        let output = match result.output {
            Some(serde_json::Value::String(s)) => s,
            Some(serde_json::Value::Array(parts)) => parts
                .iter()
                .filter_map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(""),
            _ => {
                return Err(ProviderError::Malformed(
                    "prediction output missing or not text".to_string(),
                ))
            }
        };

        Ok(output)
    }
}

#[async_trait]
impl AiProvider for ReplicateClient {
    fn source(&self) -> AiSource {
        AiSource::Replicate
    }

    async fn travel_plan(&self, request: &PlanRequest) -> Result<PlanPayload, ProviderError> {
        let prompt = prompts::travel_plan(request);
        let output = self
            .predict(serde_json::json!({
                "prompt": prompt,
                "max_tokens": 1000,
                "temperature": 0.7,
            }))
            .await?;
        extract::plan_from_text(&output)
    }

    async fn identify_landmarks(&self, image_b64: &str) -> Result<VisionPayload, ProviderError> {
        let output = self
            .predict(serde_json::json!({
                "image": format!("data:image/jpeg;base64,{image_b64}"),
                "prompt": "Describe this landmark or tourist attraction in Indonesia",
            }))
            .await?;
        extract::vision_from_description(&output)
    }

    async fn chat(&self, message: &str) -> Result<ChatPayload, ProviderError> {
        let prompt = prompts::chat(message);
        let output = self
            .predict(serde_json::json!({
                "prompt": prompt,
                "max_tokens": 500,
                "temperature": 0.7,
            }))
            .await?;
        extract::chat_from_text(&output)
    }
}

#[derive(Debug, Deserialize)]
struct Prediction {
    urls: PredictionUrls,
}

#[derive(Debug, Deserialize)]
struct PredictionUrls {
    get: String,
}

#[derive(Debug, Deserialize)]
struct PredictionStatus {
    status: String,
    #[serde(default)]
    output: Option<serde_json::Value>,
}
