//! HTTP request and response bodies.
//!
//! Every AI-backed response carries an `ai_source` field naming the tier
//! that produced it (a provider, `baseline`, or `demo`), so clients can
//! show provenance.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ai::{
    AiSource, ChatPayload, CostEstimate, DailyRoute, Landmark, PlanPayload, Resolved,
    VisionPayload,
};

/// Full travel-plan response body.
#[derive(Debug, Clone, Serialize)]
pub struct TravelPlanResponse {
    pub id: String,
    pub title: String,
    pub destination: String,
    pub duration_days: u32,
    pub daily_routes: Vec<DailyRoute>,
    pub cost_estimate: CostEstimate,
    pub preferences: Vec<String>,
    pub ai_source: AiSource,
    pub confidence_score: f64,
    pub created_at: String,
}

impl TravelPlanResponse {
    pub fn new(source: AiSource, payload: PlanPayload, preferences: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: payload.title,
            destination: payload.destination,
            duration_days: payload.duration_days,
            daily_routes: payload.daily_routes,
            cost_estimate: payload.cost_estimate,
            preferences,
            ai_source: source,
            confidence_score: payload.confidence,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    pub fn from_resolved(resolved: Resolved<PlanPayload>, preferences: Vec<String>) -> Self {
        Self::new(resolved.source, resolved.payload, preferences)
    }
}

/// Landmark-identification response body.
#[derive(Debug, Clone, Serialize)]
pub struct VisionResponse {
    pub landmarks: Vec<Landmark>,
    pub summary: String,
    pub confidence: f64,
    pub ai_source: AiSource,
    pub analyzed_at: String,
}

impl VisionResponse {
    pub fn new(source: AiSource, payload: VisionPayload) -> Self {
        Self {
            landmarks: payload.landmarks,
            summary: payload.summary,
            confidence: payload.confidence,
            ai_source: source,
            analyzed_at: Utc::now().to_rfc3339(),
        }
    }

    pub fn from_resolved(resolved: Resolved<VisionPayload>) -> Self {
        Self::new(resolved.source, resolved.payload)
    }
}

/// Incoming chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Chat reply body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
    pub suggestions: Vec<String>,
    pub confidence: f64,
    pub ai_source: AiSource,
}

impl ChatResponse {
    pub fn new(source: AiSource, payload: ChatPayload, session_id: String) -> Self {
        Self {
            response: payload.answer,
            session_id,
            suggestions: payload.suggestions,
            confidence: payload.confidence,
            ai_source: source,
        }
    }
}

/// Free-form message to turn into a travel plan.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatPlanRequest {
    pub message: String,
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Active provider tiers in plan/chat priority order; empty means
    /// baseline-only operation.
    pub providers: Vec<&'static str>,
}

/// Credentials for `POST /api/auth/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

/// Issued bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Account info behind `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub email: String,
    pub full_name: String,
    pub is_demo: bool,
}
