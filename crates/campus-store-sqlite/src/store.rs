//! [`SqliteStore`] — the SQLite implementation of [`DocumentStore`].

use std::path::PathBuf;

use campus_core::store::{Document, DocumentStore, Filter, ID_FIELD};
use chrono::Utc;
use serde_json::Value;

use crate::{
  Result,
  encode::{decode_document, encode_dt, encode_filter, new_doc_id},
  schema::SCHEMA,
};

// ─── Location ────────────────────────────────────────────────────────────────

/// Where the SQLite database lives, parsed from a connection URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
  Memory,
  File(PathBuf),
}

impl Location {
  /// Accepts `:memory:`, a bare path, or a path prefixed with `sqlite://` or
  /// `sqlite:`.
  pub fn parse(url: &str) -> Self {
    let rest = url
      .strip_prefix("sqlite://")
      .or_else(|| url.strip_prefix("sqlite:"))
      .unwrap_or(url);
    if rest == ":memory:" {
      Self::Memory
    } else {
      Self::File(PathBuf::from(rest))
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A document store backed by a single SQLite file, scoped to one logical
/// database name.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn:     tokio_rusqlite::Connection,
  database: String,
}

impl SqliteStore {
  /// Open (or create) the store at `url` and run schema initialisation.
  pub async fn connect(url: &str, database: impl Into<String>) -> Result<Self> {
    let conn = match Location::parse(url) {
      Location::Memory => tokio_rusqlite::Connection::open_in_memory().await?,
      Location::File(path) => tokio_rusqlite::Connection::open(path).await?,
    };
    let store = Self {
      conn,
      database: database.into(),
    };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory(database: impl Into<String>) -> Result<Self> {
    Self::connect(":memory:", database).await
  }

  /// The same connection, scoped to another logical database.
  pub fn with_database(&self, database: impl Into<String>) -> Self {
    Self {
      conn:     self.conn.clone(),
      database: database.into(),
    }
  }

  pub fn database(&self) -> &str { &self.database }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for SqliteStore {
  type Error = crate::Error;

  async fn insert(&self, collection: &str, mut document: Document) -> Result<String> {
    let doc_id = new_doc_id();
    let now = Value::String(encode_dt(Utc::now()));

    document.remove(ID_FIELD);
    document.insert("created_at".to_owned(), now.clone());
    document.insert("updated_at".to_owned(), now);
    let body = serde_json::to_string(&document)?;

    let id_str = doc_id.clone();
    let db_name = self.database.clone();
    let collection_str = collection.to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (doc_id, db_name, collection, body)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, db_name, collection_str, body],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(collection, doc_id = %doc_id, "inserted document");
    Ok(doc_id)
  }

  async fn query(
    &self,
    collection: &str,
    filter: &Filter,
    limit: usize,
  ) -> Result<Vec<Document>> {
    let encoded = encode_filter(filter, 3)?;
    let sql = format!(
      "SELECT doc_id, body FROM documents
       WHERE db_name = ?1 AND collection = ?2{} LIMIT {limit}",
      encoded.clause
    );

    let mut args = Vec::with_capacity(encoded.args.len() + 2);
    args.push(self.database.clone());
    args.push(collection.to_owned());
    args.extend(encoded.args);

    tracing::debug!(collection, filters = filter.len(), limit, "querying documents");

    let rows: Vec<(String, String)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(args.iter()), |r| {
            Ok((r.get(0)?, r.get(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(doc_id, body)| decode_document(doc_id, &body))
      .collect()
  }

  async fn list_collection_names(&self) -> Result<Vec<String>> {
    let db_name = self.database.clone();
    let names = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT DISTINCT collection FROM documents
           WHERE db_name = ?1 ORDER BY collection",
        )?;
        let names = stmt
          .query_map(rusqlite::params![db_name], |r| r.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
      })
      .await?;
    Ok(names)
  }
}
