//! The `DocumentStore` trait and the document types it moves around.
//!
//! The trait is implemented by storage backends (e.g. `campus-store-sqlite`).
//! Nothing above [`crate::database::Database`] talks to a backend directly.

use std::future::Future;

use serde_json::{Map, Value};

/// A stored document: a JSON object. Documents read back from a store carry
/// the store-assigned identifier under [`ID_FIELD`].
pub type Document = Map<String, Value>;

/// Exact-equality filter: field name to required value. Empty matches all.
pub type Filter = Map<String, Value>;

/// Name of the store-native identifier field on documents returned by
/// [`DocumentStore::query`]. Never exposed over HTTP.
pub const ID_FIELD: &str = "_id";

/// Abstraction over a document database grouping JSON documents into named
/// collections.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert `document` into `collection` and return the identifier the store
  /// assigned to it.
  fn insert<'a>(
    &'a self,
    collection: &'a str,
    document: Document,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;

  /// Return up to `limit` documents of `collection` matching `filter`, each
  /// with its identifier under [`ID_FIELD`]. Order is whatever the store
  /// yields.
  fn query<'a>(
    &'a self,
    collection: &'a str,
    filter: &'a Filter,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send + 'a;

  /// Names of collections currently holding documents.
  fn list_collection_names(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}
