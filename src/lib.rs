//! # AI Travel Guide API
//!
//! A travel-planning HTTP service backed by a chain of external AI
//! providers with a deterministic baseline fallback.
//!
//! ## Request flow
//!
//! ```text
//!   request ──► FallbackResolver
//!                 │
//!                 ├─► watsonx ──► huggingface ──► replicate
//!                 │     (each failure demotes to the next tier)
//!                 ▼
//!              baseline (static rule table / canned structures)
//! ```
//!
//! Exhausting the chain synthesizes a baseline payload, so callers always
//! receive HTTP 200 with an `ai_source` field naming the tier that
//! answered.
//!
//! ## Modules
//! - `config`: environment-driven configuration; missing provider keys
//!   shrink the chain instead of failing startup
//! - `ai`: provider clients, the fallback resolver, and the baseline
//! - `api`: axum routes for plan / vision / chat plus demo and auth
//!   endpoints

pub mod ai;
pub mod api;
pub mod config;

pub use config::Config;
