//! Liveness endpoint.

use axum::Json;
use serde_json::{Value, json};

/// `GET /health` - always healthy while the process serves requests.
pub async fn health_check() -> Json<Value> {
    Json(json!({"status": "healthy"}))
}
