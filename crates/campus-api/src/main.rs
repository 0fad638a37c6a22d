//! campus-api server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) overlaid with the
//! `DATABASE_URL`, `DATABASE_NAME`, `HOST` and `PORT` environment variables,
//! opens the document store once, and serves the JSON API over HTTP.

use std::path::PathBuf;

use anyhow::Context as _;
use campus_api::{AppState, Settings, config::open_database};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Campus360 backend server")]
struct Cli {
  /// Path to the optional TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings: Settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::default().try_parsing(true))
    .build()
    .context("failed to read configuration")?
    .try_deserialize()
    .context("failed to deserialise Settings")?;

  // The adapter is built exactly once; a failure here is not retried.
  let db = open_database(&settings).await;
  let address = format!("{}:{}", settings.host, settings.port);
  let app = campus_api::router(AppState::new(db, settings));

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
