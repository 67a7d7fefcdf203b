//! HTTP server setup and routing.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    response::Json,
    routing::{get, post},
    Router,
};
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth;
use super::chat;
use super::plan;
use super::types::HealthResponse;
use super::vision;
use crate::ai::FallbackResolver;
use crate::config::Config;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Provider fallback chain, built once from config at startup.
    pub resolver: FallbackResolver,
}

/// Build the full application router.
///
/// The route set is fixed regardless of which provider credentials are
/// present; missing credentials only shrink the resolver's chain.
pub fn app(state: Arc<AppState>) -> Router {
    // Leave headroom above the image limit for multipart framing.
    let upload_limit = state.config.max_image_size + 64 * 1024;

    let vision_routes = Router::new()
        .route("/api/vision", post(vision::analyze))
        .layer(DefaultBodyLimit::max(upload_limit));

    Router::new()
        .route("/health", get(health))
        // Travel planning
        .route("/api/plan", post(plan::create_plan))
        .route("/api/chat-plan", post(plan::chat_plan))
        .route("/api/demo-plan", post(plan::demo_plan))
        // Vision
        .merge(vision_routes)
        .route("/api/vision/demo", post(vision::demo))
        .route("/api/vision/supported-formats", get(vision::supported_formats))
        .route("/api/landmarks/popular", get(vision::popular_landmarks))
        // Chat
        .route("/api/chat", post(chat::chat))
        .route("/api/chat/demo", post(chat::demo))
        // Auth
        .route("/api/auth/demo-login", post(auth::demo_login))
        .route("/api/auth/token", post(auth::token))
        .route("/api/auth/me", get(auth::me))
        .layer(cors_layer(&state.config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS layer for the configured origins; a `*` entry allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let tiers = config.configured_tiers();
    if tiers.is_empty() {
        tracing::warn!("No provider credentials configured; serving baseline responses only");
    } else {
        tracing::info!("Active provider tiers: {}", tiers.join(" -> "));
    }

    let resolver = FallbackResolver::from_config(&config);
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState { config, resolver });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Liveness probe; reports the configured provider tiers.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        providers: state.config.configured_tiers(),
    })
}
