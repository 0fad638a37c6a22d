//! JSON HTTP API for the Campus360 backend.
//!
//! Exposes an axum [`Router`] backed by any [`DocumentStore`], wrapped in the
//! [`Database`] adapter built once at startup.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Greeting |
//! | `GET`  | `/test` | Connectivity report; always 200 |
//! | `GET`  | `/schema` | Record collection names |
//! | `POST` | `/api/activity` | See [`activity`] |
//! | `GET`  | `/api/activity` | See [`activity`] |
//! | `GET`  | `/api/catalog` | See [`catalog`] |

pub mod activity;
pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod items;
pub mod meta;

use std::sync::Arc;

use axum::{Router, routing::get};
use campus_core::{Database, DocumentStore};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::Settings;
pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub db:       Database<S>,
  pub settings: Arc<Settings>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      db:       self.db.clone(),
      settings: Arc::clone(&self.settings),
    }
  }
}

impl<S: DocumentStore> AppState<S> {
  pub fn new(db: Database<S>, settings: Settings) -> Self {
    Self {
      db,
      settings: Arc::new(settings),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router.
///
/// Cross-origin requests are allowed from any origin with any method and
/// header, credentials included. The wildcard cannot be combined with
/// credentials, so the request's origin, method and headers are mirrored back.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: DocumentStore + 'static,
{
  Router::new()
    .route("/", get(meta::root))
    .route("/test", get(diagnostics::handler::<S>))
    .route("/schema", get(meta::schema))
    .route("/api/activity", get(activity::list::<S>).post(activity::create::<S>))
    .route("/api/catalog", get(catalog::list::<S>))
    .layer(CorsLayer::very_permissive())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
