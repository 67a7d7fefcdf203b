//! Travel-plan endpoints.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::routes::AppState;
use super::types::TravelPlanResponse;
use crate::ai::{intent, AiSource, PlanRequest};

/// Accepted trip length, inclusive.
const DURATION_RANGE: std::ops::RangeInclusive<u32> = 1..=14;

fn validate(request: &PlanRequest) -> Result<(), (StatusCode, String)> {
    if request.destination.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Destinasi wisata diperlukan".to_string(),
        ));
    }
    if !DURATION_RANGE.contains(&request.duration_days) {
        return Err((
            StatusCode::BAD_REQUEST,
            "Durasi perjalanan harus antara 1-14 hari".to_string(),
        ));
    }
    Ok(())
}

/// Generate a travel itinerary through the provider fallback chain.
pub async fn create_plan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<TravelPlanResponse>, (StatusCode, String)> {
    validate(&request)?;

    let preferences = request.preferences.clone();
    let resolved = state.resolver.resolve_plan(&request).await;

    Ok(Json(TravelPlanResponse::from_resolved(resolved, preferences)))
}

/// Generate a plan from a free-form Indonesian message.
pub async fn chat_plan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<super::types::ChatPlanRequest>,
) -> Result<Json<TravelPlanResponse>, (StatusCode, String)> {
    if request.message.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Pesan diperlukan".to_string()));
    }

    let plan_request = intent::parse(&request.message).into_plan_request();
    let preferences = plan_request.preferences.clone();
    let resolved = state.resolver.resolve_plan(&plan_request).await;

    Ok(Json(TravelPlanResponse::from_resolved(resolved, preferences)))
}

/// Fixed demo plan, bypassing the provider chain entirely.
pub async fn demo_plan() -> Json<TravelPlanResponse> {
    Json(TravelPlanResponse::new(
        AiSource::Demo,
        crate::ai::baseline::demo_plan(),
        vec![],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::BudgetRange;

    fn request(destination: &str, days: u32) -> PlanRequest {
        PlanRequest {
            destination: destination.to_string(),
            duration_days: days,
            budget_range: BudgetRange::Sedang,
            preferences: vec![],
            departure_city: None,
        }
    }

    #[test]
    fn test_validate_accepts_normal_request() {
        assert!(validate(&request("Bali", 3)).is_ok());
        assert!(validate(&request("Bali", 1)).is_ok());
        assert!(validate(&request("Bali", 14)).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_duration() {
        assert!(validate(&request("Bali", 0)).is_err());
        assert!(validate(&request("Bali", 15)).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_destination() {
        assert!(validate(&request("  ", 3)).is_err());
    }
}
