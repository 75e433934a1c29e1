//! HTTP handlers: application state and health.

use axum::{http::StatusCode, Json};
use serde_json::json;

use crate::auth::TokenIssuer;
use crate::db::DbPool;

/// Shared application state. Read-only after startup apart from the pool.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub token_issuer: TokenIssuer,
}

impl AppState {
    pub fn new(db: DbPool, token_issuer: TokenIssuer) -> Self {
        Self { db, token_issuer }
    }
    pub fn db(&self) -> &DbPool {
        &self.db
    }
    pub fn token_issuer(&self) -> &TokenIssuer {
        &self.token_issuer
    }
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "trainecg-api" })),
    )
}
