//! Error types for `campus-core`.

use serde::Serialize;
use thiserror::Error;

// ─── Validation ──────────────────────────────────────────────────────────────

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorCode {
  MissingField,
  InvalidType,
  InvalidFormat,
  OutOfRange,
  InvalidJson,
}

/// One rejected field of an inbound payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field:   String,
  pub code:    FieldErrorCode,
  pub message: String,
}

impl FieldError {
  pub fn new(
    field: impl Into<String>,
    code: FieldErrorCode,
    message: impl Into<String>,
  ) -> Self {
    Self {
      field: field.into(),
      code,
      message: message.into(),
    }
  }
}

/// A payload failed structural validation. Lists every offending field, not
/// just the first one encountered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", field_names(.errors))]
pub struct ValidationError {
  pub errors: Vec<FieldError>,
}

impl ValidationError {
  pub fn single(error: FieldError) -> Self {
    Self {
      errors: vec![error],
    }
  }

  /// Whether `field` is among the rejected fields.
  pub fn has_field(&self, field: &str) -> bool {
    self.errors.iter().any(|e| e.field == field)
  }
}

fn field_names(errors: &[FieldError]) -> String {
  errors
    .iter()
    .map(|e| e.field.as_str())
    .collect::<Vec<_>>()
    .join(", ")
}

// ─── Storage ─────────────────────────────────────────────────────────────────

/// A failure talking to the document store.
#[derive(Debug, Error)]
pub enum StorageError {
  /// The adapter was never initialised; it stays this way until restart.
  #[error("database not initialized")]
  Unavailable,

  #[error("failed to encode document: {0}")]
  Encode(#[from] serde_json::Error),

  /// Raw error from the store backend. Displayed verbatim.
  #[error("{0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}
