//! Landmark-identification endpoints.
//!
//! `POST /api/vision` accepts a multipart image upload, validates type and
//! size, and runs the base64-encoded bytes through the vision fallback
//! chain. Upload problems are the only way to get a non-200 here.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::sync::Arc;

use super::routes::AppState;
use super::types::VisionResponse;
use crate::ai::AiSource;

/// Reject uploads whose content type is not an accepted image format.
fn check_image_type(
    config: &crate::config::Config,
    content_type: &str,
) -> Result<(), (StatusCode, String)> {
    if config.image_type_allowed(content_type) {
        Ok(())
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            "File harus berupa gambar".to_string(),
        ))
    }
}

/// Analyze an uploaded landmark image.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<VisionResponse>, (StatusCode, String)> {
    let mut image_bytes = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Gagal membaca upload: {e}"),
        )
    })? {
        let Some(content_type) = field.content_type().map(|c| c.to_string()) else {
            // Plain form fields carry no content type; skip them.
            continue;
        };
        check_image_type(&state.config, &content_type)?;

        let bytes = field.bytes().await.map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                format!("Gagal membaca gambar: {e}"),
            )
        })?;

        if bytes.len() > state.config.max_image_size {
            return Err((
                StatusCode::BAD_REQUEST,
                "Ukuran file terlalu besar. Maksimal 5MB".to_string(),
            ));
        }

        image_bytes = Some(bytes);
        break;
    }

    let Some(bytes) = image_bytes else {
        return Err((
            StatusCode::BAD_REQUEST,
            "Gambar diperlukan (gunakan file upload)".to_string(),
        ));
    };

    let image_b64 = BASE64.encode(&bytes);
    let resolved = state.resolver.resolve_vision(&image_b64).await;

    Ok(Json(VisionResponse::from_resolved(resolved)))
}

/// Fixed demo analysis (Monas), bypassing the provider chain.
pub async fn demo() -> Json<VisionResponse> {
    Json(VisionResponse::new(
        AiSource::Demo,
        crate::ai::baseline::demo_vision(),
    ))
}

/// Reference list of popular Indonesian landmarks.
pub async fn popular_landmarks() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "landmarks": [
            {
                "name": "Monumen Nasional (Monas)",
                "location": "Jakarta",
                "category": "monument",
                "description": "Simbol kemerdekaan Indonesia"
            },
            {
                "name": "Candi Borobudur",
                "location": "Yogyakarta",
                "category": "temple",
                "description": "Candi Buddha terbesar di dunia"
            },
            {
                "name": "Candi Prambanan",
                "location": "Yogyakarta",
                "category": "temple",
                "description": "Kompleks candi Hindu terbesar di Indonesia"
            },
            {
                "name": "Pura Uluwatu",
                "location": "Bali",
                "category": "temple",
                "description": "Pura di tebing dengan pemandangan laut"
            },
            {
                "name": "Gunung Bromo",
                "location": "Jawa Timur",
                "category": "mountain",
                "description": "Gunung berapi aktif dengan pemandangan sunrise"
            },
            {
                "name": "Danau Toba",
                "location": "Sumatera Utara",
                "category": "lake",
                "description": "Danau vulkanik terbesar di Indonesia"
            },
            {
                "name": "Pulau Komodo",
                "location": "Nusa Tenggara Timur",
                "category": "island",
                "description": "Habitat asli komodo dragon"
            },
            {
                "name": "Raja Ampat",
                "location": "Papua Barat",
                "category": "marine",
                "description": "Surga diving dengan biodiversitas laut tertinggi"
            }
        ]
    }))
}

/// Supported upload formats and limits.
pub async fn supported_formats(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "supported_formats": state.config.allowed_image_types,
        "max_file_size": format!("{}MB", state.config.max_image_size / (1024 * 1024)),
        "recommended_quality": "High quality, well-lit images work best"
    }))
}
