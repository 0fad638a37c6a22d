//! Core types and trait definitions for the Campus360 backend.
//!
//! Record shapes, their validation, and the document-store abstraction live
//! here. This crate is free of HTTP and SQL dependencies; the store backend
//! and the API layer both depend on it.

pub mod database;
pub mod error;
pub mod record;
pub mod store;
pub mod validate;

pub use database::Database;
pub use error::{FieldError, FieldErrorCode, StorageError, ValidationError};
pub use record::{Activity, Address, CatalogItem, Record, RecordKind, User};
pub use store::{Document, DocumentStore, Filter, ID_FIELD};
