//! Runtime settings and startup wiring of the persistence adapter.

use campus_core::Database;
use campus_store_sqlite::SqliteStore;
use serde::Deserialize;

/// Runtime configuration, deserialised from an optional TOML file overlaid
/// with environment variables (`DATABASE_URL`, `DATABASE_NAME`, `HOST`,
/// `PORT`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  #[serde(default = "default_host")]
  pub host:          String,
  #[serde(default = "default_port")]
  pub port:          u16,
  pub database_url:  Option<String>,
  pub database_name: Option<String>,
}

fn default_host() -> String { "0.0.0.0".to_owned() }

fn default_port() -> u16 { 8000 }

impl Default for Settings {
  fn default() -> Self {
    Self {
      host:          default_host(),
      port:          default_port(),
      database_url:  None,
      database_name: None,
    }
  }
}

impl Settings {
  pub fn database_url(&self) -> Option<&str> {
    self.database_url.as_deref().filter(|s| !s.is_empty())
  }

  pub fn database_name(&self) -> Option<&str> {
    self.database_name.as_deref().filter(|s| !s.is_empty())
  }
}

/// Open the document store named by `settings`. Runs once at startup.
///
/// A missing setting or a failed connection yields an adapter that stays
/// unavailable for the life of the process.
pub async fn open_database(settings: &Settings) -> Database<SqliteStore> {
  let (Some(url), Some(name)) = (settings.database_url(), settings.database_name())
  else {
    tracing::warn!("DATABASE_URL or DATABASE_NAME not set; running without a database");
    return Database::unavailable();
  };

  match SqliteStore::connect(url, name).await {
    Ok(store) => {
      tracing::info!(database = name, "connected to document store");
      Database::new(store)
    }
    Err(e) => {
      tracing::warn!(error = %e, "failed to open document store; running without a database");
      Database::unavailable()
    }
  }
}
