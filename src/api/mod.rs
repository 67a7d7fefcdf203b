//! HTTP API surface.

pub mod auth;
pub mod chat;
pub mod plan;
pub mod routes;
pub mod types;
pub mod vision;
