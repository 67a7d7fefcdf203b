//! IBM watsonx text-generation client.
//!
//! watsonx has no dedicated vision API; landmark identification goes
//! through the same text-generation endpoint with a JSON-format prompt.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{
    extract, prompts, AiProvider, AiSource, ChatPayload, PlanPayload, PlanRequest, ProviderError,
    VisionPayload,
};

const GRANITE_MODEL: &str = "ibm-granite/granite-3.3-8b-instruct";

pub struct WatsonxClient {
    client: Client,
    api_key: String,
    project_id: String,
    endpoint: String,
}

impl WatsonxClient {
    pub fn new(api_key: String, project_id: String, endpoint: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key,
            project_id,
            endpoint,
        }
    }

    /// Issue a text-generation request and return the generated text.
    async fn generate(
        &self,
        input: &str,
        max_new_tokens: u32,
        temperature: f64,
    ) -> Result<String, ProviderError> {
        let payload = serde_json::json!({
            "model_id": GRANITE_MODEL,
            "input": input,
            "parameters": {
                "max_new_tokens": max_new_tokens,
                "temperature": temperature,
                "top_p": 0.9,
            },
            "project_id": self.project_id,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ProviderError::from_status(status, &body));
        }

        let parsed: GenerationResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Malformed(format!("generation response: {e}")))?;

        parsed
            .results
            .into_iter()
            .next()
            .map(|r| r.generated_text)
            .ok_or_else(|| ProviderError::Malformed("no results in response".to_string()))
    }
}

#[async_trait]
impl AiProvider for WatsonxClient {
    fn source(&self) -> AiSource {
        AiSource::Watsonx
    }

    async fn travel_plan(&self, request: &PlanRequest) -> Result<PlanPayload, ProviderError> {
        let prompt = prompts::travel_plan(request);
        let text = self.generate(&prompt, 1000, 0.7).await?;
        extract::plan_from_text(&text)
    }

    async fn identify_landmarks(&self, _image_b64: &str) -> Result<VisionPayload, ProviderError> {
        let text = self.generate(prompts::vision(), 500, 0.3).await?;
        extract::vision_from_text(&text)
    }

    async fn chat(&self, message: &str) -> Result<ChatPayload, ProviderError> {
        let prompt = prompts::chat(message);
        let text = self.generate(&prompt, 500, 0.7).await?;
        extract::chat_from_text(&text)
    }
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    results: Vec<GenerationResult>,
}

#[derive(Debug, Deserialize)]
struct GenerationResult {
    #[serde(default)]
    generated_text: String,
}
