//! Static endpoints: the greeting and schema introspection.

use axum::Json;
use campus_core::RecordKind;
use serde_json::{Value, json};

/// `GET /`
pub async fn root() -> Json<Value> {
  Json(json!({ "message": "Campus360 backend is running" }))
}

/// `GET /schema` — collection names of every record kind. Never touches the
/// database.
pub async fn schema() -> Json<Value> {
  Json(json!({ "models": RecordKind::ALL.map(RecordKind::collection) }))
}
