//! AI provider module: request/payload types, the provider trait, and the
//! fallback resolver that tries providers in priority order.
//!
//! Three external providers are supported (IBM watsonx, Hugging Face,
//! Replicate), each behind the same [`AiProvider`] trait. When every
//! configured provider fails, [`baseline`] synthesizes a deterministic
//! response so callers always get a structured payload.

mod error;

pub mod baseline;
pub mod extract;
pub mod huggingface;
pub mod intent;
pub mod prompts;
pub mod replicate;
pub mod resolver;
pub mod watsonx;

pub use error::ProviderError;
pub use resolver::{FallbackResolver, Resolved};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Which tier produced a response.
///
/// Reported to callers as `ai_source` so the UI can display provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiSource {
    Watsonx,
    Huggingface,
    Replicate,
    Baseline,
    Demo,
}

impl AiSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiSource::Watsonx => "watsonx",
            AiSource::Huggingface => "huggingface",
            AiSource::Replicate => "replicate",
            AiSource::Baseline => "baseline",
            AiSource::Demo => "demo",
        }
    }
}

/// Budget tier for a travel plan, in Indonesian as the API exposes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetRange {
    Murah,
    #[default]
    Sedang,
    Mahal,
}

/// Incoming travel-plan request, immutable per call.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    pub destination: String,
    pub duration_days: u32,
    #[serde(default)]
    pub budget_range: BudgetRange,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub departure_city: Option<String>,
}

/// A single scheduled activity within a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub time: String,
    pub activity: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_cost: f64,
}

/// One day of an itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRoute {
    pub day: u32,
    pub date: String,
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub estimated_cost: f64,
}

/// Cost breakdown for a whole trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEstimate {
    #[serde(default)]
    pub accommodation: f64,
    #[serde(default)]
    pub food: f64,
    #[serde(default)]
    pub transport: f64,
    #[serde(default)]
    pub activities: f64,
    pub total: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "IDR".to_string()
}

/// Structured travel plan returned by a provider or the baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanPayload {
    pub title: String,
    pub destination: String,
    pub duration_days: u32,
    pub daily_routes: Vec<DailyRoute>,
    pub cost_estimate: CostEstimate,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_confidence() -> f64 {
    0.5
}

/// A landmark identified in an uploaded image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub confidence: f64,
}

/// Landmark identification result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionPayload {
    pub landmarks: Vec<Landmark>,
    pub summary: String,
    pub confidence: f64,
}

/// Chat reply with optional follow-up suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatPayload {
    pub answer: String,
    pub confidence: f64,
    pub suggestions: Vec<String>,
}

/// An external AI backend tried by the fallback resolver.
///
/// Implementations issue a single bounded HTTP call per method; retries and
/// health tracking are deliberately out of scope. Any failure is reported
/// through [`ProviderError`] and demotes to the next tier.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Source label attached to successful results from this provider.
    fn source(&self) -> AiSource;

    /// Generate a structured travel plan.
    async fn travel_plan(&self, request: &PlanRequest) -> Result<PlanPayload, ProviderError>;

    /// Identify landmarks in a base64-encoded image.
    async fn identify_landmarks(&self, image_b64: &str) -> Result<VisionPayload, ProviderError>;

    /// Answer a free-form travel question.
    async fn chat(&self, message: &str) -> Result<ChatPayload, ProviderError>;
}
