//! [`Database`] — the persistence adapter every handler goes through.
//!
//! Wraps the one store handle opened at startup. If that failed there is no
//! handle, and every call fails with [`StorageError::Unavailable`] until the
//! process restarts.

use std::sync::Arc;

use crate::{
  error::StorageError,
  record::Record,
  store::{Document, DocumentStore, Filter, ID_FIELD},
};

/// Upper bound on names returned by [`Database::list_collection_names`].
pub const MAX_COLLECTION_NAMES: usize = 10;

/// Shared handle to the document store.
///
/// Cloning is cheap — the inner store is reference-counted.
pub struct Database<S> {
  store: Option<Arc<S>>,
}

impl<S> Clone for Database<S> {
  fn clone(&self) -> Self {
    Self {
      store: self.store.clone(),
    }
  }
}

impl<S: DocumentStore> Database<S> {
  pub fn new(store: S) -> Self {
    Self {
      store: Some(Arc::new(store)),
    }
  }

  /// An adapter whose initialisation failed. All operations error.
  pub fn unavailable() -> Self {
    Self { store: None }
  }

  /// Whether a store handle exists.
  pub fn is_initialized(&self) -> bool { self.store.is_some() }

  fn handle(&self) -> Result<&S, StorageError> {
    self.store.as_deref().ok_or(StorageError::Unavailable)
  }

  /// Serialise `record` and insert it into `collection`. Any identifier the
  /// record's fields might carry is dropped; the store assigns a fresh one.
  pub async fn insert(
    &self,
    collection: &str,
    record: &Record,
  ) -> Result<String, StorageError> {
    let store = self.handle()?;
    let mut document = record.to_document()?;
    document.remove(ID_FIELD);
    document.remove("id");
    store
      .insert(collection, document)
      .await
      .map_err(StorageError::store)
  }

  /// Up to `limit` documents of `collection` matching `filter`. `limit` is
  /// taken as given; callers clamp it.
  pub async fn query(
    &self,
    collection: &str,
    filter: &Filter,
    limit: usize,
  ) -> Result<Vec<Document>, StorageError> {
    let store = self.handle()?;
    store
      .query(collection, filter, limit)
      .await
      .map_err(StorageError::store)
  }

  /// Diagnostic only: up to [`MAX_COLLECTION_NAMES`] collection names.
  pub async fn list_collection_names(&self) -> Result<Vec<String>, StorageError> {
    let store = self.handle()?;
    let mut names = store
      .list_collection_names()
      .await
      .map_err(StorageError::store)?;
    names.truncate(MAX_COLLECTION_NAMES);
    Ok(names)
  }
}
