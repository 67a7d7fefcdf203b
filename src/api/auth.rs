//! Minimal JWT auth for the demo account.
//!
//! - `POST /api/auth/demo-login` issues a token for the built-in demo user
//! - `POST /api/auth/token` checks email + password against the demo
//!   credentials (constant-time compare)
//! - `GET /api/auth/me` decodes the bearer token
//!
//! Authentication is never required by the travel endpoints; this exists so
//! a frontend can show a logged-in state during demos.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;

use super::routes::AppState;
use super::types::{MeResponse, TokenRequest, TokenResponse};

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct Claims {
    /// Subject (the account email)
    sub: String,
    /// Issued-at unix seconds
    iat: i64,
    /// Expiration unix seconds
    exp: i64,
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();
    if a_bytes.len() != b_bytes.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for i in 0..a_bytes.len() {
        diff |= a_bytes[i] ^ b_bytes[i];
    }
    diff == 0
}

fn issue_jwt(secret: &str, ttl_minutes: i64, email: &str) -> anyhow::Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: email.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(ttl_minutes.max(1))).timestamp(),
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

fn verify_jwt(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Issue a token for the built-in demo account without credentials.
pub async fn demo_login(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TokenResponse>, (StatusCode, String)> {
    let token = issue_jwt(
        &state.config.jwt_secret,
        state.config.access_token_expire_minutes,
        &state.config.demo_email,
    )
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}

/// Exchange email + password for a token.
pub async fn token(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, (StatusCode, String)> {
    let email_ok = req.email.trim() == state.config.demo_email;
    let password_ok = constant_time_eq(req.password.trim(), &state.config.demo_password);

    // Single generic message for both cases to avoid account enumeration.
    if !email_ok || !password_ok {
        return Err((
            StatusCode::UNAUTHORIZED,
            "Email atau password salah".to_string(),
        ));
    }

    let token = issue_jwt(
        &state.config.jwt_secret,
        state.config.access_token_expire_minutes,
        &state.config.demo_email,
    )
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}

/// Decode the bearer token and return the account it belongs to.
pub async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, (StatusCode, String)> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    let token = auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
        .unwrap_or("");

    if token.is_empty() {
        return Err((
            StatusCode::UNAUTHORIZED,
            "Missing Authorization header".to_string(),
        ));
    }

    let claims = verify_jwt(token, &state.config.jwt_secret)
        .map_err(|_| (StatusCode::UNAUTHORIZED, "Invalid or expired token".to_string()))?;

    Ok(Json(MeResponse {
        email: claims.sub,
        full_name: "Demo User".to_string(),
        is_demo: true,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("secret", "secret"));
        assert!(!constant_time_eq("secret", "secreT"));
        assert!(!constant_time_eq("secret", "secret1"));
        assert!(!constant_time_eq("", "x"));
        assert!(constant_time_eq("", ""));
    }

    #[test]
    fn test_jwt_roundtrip() {
        let token = issue_jwt("test-secret", 30, "demo@travelguide.id").unwrap();
        let claims = verify_jwt(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, "demo@travelguide.id");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_jwt_wrong_secret_rejected() {
        let token = issue_jwt("secret-a", 30, "demo@travelguide.id").unwrap();
        assert!(verify_jwt(&token, "secret-b").is_err());
    }
}
