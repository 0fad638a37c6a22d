//! SQLite backend for the Campus360 document store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Documents are stored as JSON text and
//! filtered with SQLite's JSON functions.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{Location, SqliteStore};

#[cfg(test)]
mod tests;
