//! Shared plumbing for list endpoints: limit clamping, query rejections, and
//! identifier normalisation.

use axum::extract::rejection::QueryRejection;
use campus_core::{Document, FieldError, FieldErrorCode, ID_FIELD, ValidationError};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Body of every list response.
#[derive(Debug, Serialize)]
pub struct Items {
  pub items: Vec<Document>,
}

impl Items {
  /// Normalise the identifier of each stored document.
  pub fn from_documents(documents: Vec<Document>) -> Self {
    Self {
      items: documents.into_iter().map(normalize_id).collect(),
    }
  }
}

/// Replace the store-native identifier field with a string `id`.
pub fn normalize_id(mut document: Document) -> Document {
  if let Some(raw) = document.remove(ID_FIELD) {
    let id = match raw {
      Value::String(s) => s,
      other => other.to_string(),
    };
    document.insert("id".to_owned(), Value::String(id));
  }
  document
}

/// `requested` (or `default`) bounded to `0..=max`.
pub fn clamp_limit(requested: Option<i64>, default: i64, max: i64) -> usize {
  let limit = requested.unwrap_or(default).clamp(0, max);
  usize::try_from(limit).unwrap_or(0)
}

/// A malformed query string (e.g. a non-integer `limit`) is a validation
/// failure like any other.
pub fn query_error(rejection: QueryRejection) -> ApiError {
  ApiError::Validation(ValidationError::single(FieldError::new(
    "query",
    FieldErrorCode::InvalidType,
    rejection.body_text(),
  )))
}
