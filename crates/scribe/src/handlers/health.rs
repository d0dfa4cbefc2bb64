//! Liveness probe.

use axum::Json;
use serde_json::{json, Value};

/// GET /health - returns 200 as long as the server accepts connections.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
