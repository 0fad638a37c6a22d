//! Handler for `GET /api/catalog`.

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use campus_core::{DocumentStore, Filter, RecordKind};
use serde::Deserialize;
use serde_json::Value;

use crate::{
  AppState,
  error::ApiError,
  items::{Items, clamp_limit, query_error},
};

pub const DEFAULT_LIMIT: i64 = 12;
pub const MAX_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Restrict to items of this service. Empty means no restriction.
  pub service: Option<String>,
  pub limit:   Option<i64>,
}

/// `GET /api/catalog[?service=<name>][&limit=<n>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Items>, ApiError>
where
  S: DocumentStore + 'static,
{
  let Query(params) = params.map_err(query_error)?;
  let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);

  let mut filter = Filter::new();
  if let Some(service) = params.service.filter(|s| !s.is_empty()) {
    filter.insert("service".to_owned(), Value::String(service));
  }

  let documents = state
    .db
    .query(RecordKind::CatalogItem.collection(), &filter, limit)
    .await?;
  Ok(Json(Items::from_documents(documents)))
}
