//! Handler for `GET /test` — a best-effort connectivity report.
//!
//! Always answers 200. Every failure along the way ends up as a string in the
//! report rather than an error status.

use axum::{Json, extract::State};
use campus_core::DocumentStore;
use serde::Serialize;

use crate::AppState;

/// Longest error excerpt embedded in a report, in characters.
pub const MAX_ERROR_CHARS: usize = 80;

pub const BACKEND_RUNNING: &str = "✅ Running";
pub const DB_NOT_AVAILABLE: &str = "❌ Not Available";
pub const DB_AVAILABLE: &str = "✅ Available";
pub const DB_WORKING: &str = "✅ Connected & Working";
pub const DB_NOT_INITIALIZED: &str = "⚠️ Available but not initialized";
pub const SET: &str = "✅ Set";
pub const NOT_SET: &str = "❌ Not Set";
pub const CONNECTED: &str = "Connected";
pub const NOT_CONNECTED: &str = "Not Connected";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
  pub backend:           String,
  pub database:          String,
  pub database_url:      String,
  pub database_name:     String,
  pub connection_status: String,
  pub collections:       Vec<String>,
}

impl Default for Diagnostics {
  /// The all-unavailable starting point.
  fn default() -> Self {
    Self {
      backend:           BACKEND_RUNNING.to_owned(),
      database:          DB_NOT_AVAILABLE.to_owned(),
      database_url:      NOT_SET.to_owned(),
      database_name:     NOT_SET.to_owned(),
      connection_status: NOT_CONNECTED.to_owned(),
      collections:       Vec::new(),
    }
  }
}

/// `GET /test`
pub async fn handler<S>(State(state): State<AppState<S>>) -> Json<Diagnostics>
where
  S: DocumentStore + 'static,
{
  Json(run(state).await)
}

/// Run the probe on its own task so that even a panic inside the store is
/// reported instead of tearing down the request.
pub async fn run<S>(state: AppState<S>) -> Diagnostics
where
  S: DocumentStore + 'static,
{
  match tokio::spawn(probe(state)).await {
    Ok(report) => report,
    Err(e) => {
      tracing::error!(error = %e, "diagnostics probe failed");
      Diagnostics {
        database: format!("❌ Error: {}", truncate(&e.to_string(), MAX_ERROR_CHARS)),
        ..Diagnostics::default()
      }
    }
  }
}

async fn probe<S>(state: AppState<S>) -> Diagnostics
where
  S: DocumentStore + 'static,
{
  let mut report = Diagnostics::default();
  if !state.db.is_initialized() {
    report.database = DB_NOT_INITIALIZED.to_owned();
    return report;
  }

  report.database = DB_AVAILABLE.to_owned();
  report.database_url = match state.settings.database_url() {
    Some(_) => SET,
    None => NOT_SET,
  }
  .to_owned();
  report.database_name = state.settings.database_name().unwrap_or(NOT_SET).to_owned();
  report.connection_status = CONNECTED.to_owned();

  match state.db.list_collection_names().await {
    Ok(names) => {
      report.collections = names;
      report.database = DB_WORKING.to_owned();
    }
    Err(e) => {
      tracing::warn!(error = %e, "listing collections failed");
      report.database = format!(
        "⚠️ Connected but error: {}",
        truncate(&e.to_string(), MAX_ERROR_CHARS)
      );
    }
  }
  report
}

/// At most `max` characters of `s`, never splitting a character.
pub fn truncate(s: &str, max: usize) -> &str {
  match s.char_indices().nth(max) {
    Some((end, _)) => &s[..end],
    None => s,
  }
}
