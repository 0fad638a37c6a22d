//! Handlers for `/api/activity` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/activity` | Body: activity JSON; returns 201 + `{"id", "ok": true}` |
//! | `GET`  | `/api/activity` | Optional `?limit` (default 20, at most 100) |

use axum::{
  Json,
  body::Bytes,
  extract::{Query, State, rejection::QueryRejection},
  http::StatusCode,
  response::IntoResponse,
};
use campus_core::{DocumentStore, Filter, RecordKind, validate::validate_json};
use serde::Deserialize;
use serde_json::json;

use crate::{
  AppState,
  error::ApiError,
  items::{Items, clamp_limit, query_error},
};

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /api/activity` — validates before touching the store.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore + 'static,
{
  let kind = RecordKind::Activity;
  let record = validate_json(kind, &body)?;
  let id = state.db.insert(kind.collection(), &record).await?;

  tracing::info!(id = %id, "recorded activity");
  Ok((StatusCode::CREATED, Json(json!({ "id": id, "ok": true }))))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub limit: Option<i64>,
}

/// `GET /api/activity[?limit=<n>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Items>, ApiError>
where
  S: DocumentStore + 'static,
{
  let Query(params) = params.map_err(query_error)?;
  let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);

  let documents = state
    .db
    .query(RecordKind::Activity.collection(), &Filter::new(), limit)
    .await?;
  Ok(Json(Items::from_documents(documents)))
}
