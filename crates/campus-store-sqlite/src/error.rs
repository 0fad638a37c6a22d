//! Error type for `campus-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// Filter keys are spliced into a JSON path and may not contain quotes.
  #[error("invalid filter field name: {0:?}")]
  InvalidFilterKey(String),

  #[error("stored document {0} is not a JSON object")]
  CorruptDocument(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
