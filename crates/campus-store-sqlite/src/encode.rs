//! Encoding and decoding helpers between documents and the SQLite rows and
//! SQL fragments that store and select them.
//!
//! Timestamps are stored as RFC 3339 strings; identifiers as 32-digit
//! lowercase hex (simple-form UUID v4).

use campus_core::store::{Document, Filter, ID_FIELD};
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Identifiers and timestamps ──────────────────────────────────────────────

pub fn new_doc_id() -> String { Uuid::new_v4().simple().to_string() }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

// ─── Filters ─────────────────────────────────────────────────────────────────

/// A filter rendered as a SQL fragment plus its bound arguments.
///
/// `clause` is either empty or starts with ` AND`; its placeholders are
/// numbered from `first_param` so the caller can bind its own arguments
/// before them.
#[derive(Debug, PartialEq, Eq)]
pub struct EncodedFilter {
  pub clause: String,
  pub args:   Vec<String>,
}

/// Render `filter` as exact-equality conditions on the `body` column.
///
/// A `null` filter value matches documents where the field is `null` or
/// missing. Everything else is compared with `json_extract`, so strings
/// match strings and numbers match numbers by value.
pub fn encode_filter(filter: &Filter, first_param: usize) -> Result<EncodedFilter> {
  let mut clause = String::new();
  let mut args = Vec::with_capacity(filter.len() * 2);
  let mut next = first_param;

  for (field, value) in filter {
    let path = json_path(field)?;
    if value.is_null() {
      clause.push_str(&format!(
        " AND (json_type(body, ?{next}) IS NULL OR json_type(body, ?{next}) = 'null')"
      ));
      args.push(path);
      next += 1;
    } else {
      clause.push_str(&format!(
        " AND json_extract(body, ?{next}) = json_extract(?{}, '$')",
        next + 1
      ));
      args.push(path);
      args.push(value.to_string());
      next += 2;
    }
  }

  Ok(EncodedFilter { clause, args })
}

fn json_path(field: &str) -> Result<String> {
  if field.is_empty() || field.contains('"') || field.contains('\\') {
    return Err(Error::InvalidFilterKey(field.to_owned()));
  }
  Ok(format!("$.\"{field}\""))
}

// ─── Documents ───────────────────────────────────────────────────────────────

/// Parse a stored body and attach its identifier under [`ID_FIELD`].
pub fn decode_document(doc_id: String, body: &str) -> Result<Document> {
  match serde_json::from_str::<Value>(body)? {
    Value::Object(mut document) => {
      document.insert(ID_FIELD.to_owned(), Value::String(doc_id));
      Ok(document)
    }
    _ => Err(Error::CorruptDocument(doc_id)),
  }
}
