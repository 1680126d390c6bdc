//! incidents-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite record store, configures the business partner destination and
//! serves the JSON API over HTTP.
//!
//! Every setting can be overridden from the environment with the
//! `INCIDENTS_` prefix, using `__` for nesting, e.g.
//! `INCIDENTS_DESTINATION__BASE_URL=http://localhost:4005`.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use incidents_bupa::{DestinationConfig, HttpPartnerGateway};
use incidents_processor::ProcessorService;
use incidents_store_sqlite::SqliteStore;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Incident processor server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
struct ServerConfig {
  host:        String,
  port:        u16,
  store_path:  PathBuf,
  destination: DestinationConfig,
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

  let server_cfg = load_config(config::File::from(cli.config).required(false))?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let gateway = HttpPartnerGateway::new(server_cfg.destination.clone())
    .context("failed to configure business partner destination")?;

  let service = Arc::new(ProcessorService::standard(
    Arc::new(store),
    Arc::new(gateway),
  ));

  let app = axum::Router::new()
    .nest("/api", incidents_api::api_router(service))
    .layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Layer defaults, `source` and the environment into a [`ServerConfig`].
fn load_config<T>(source: T) -> anyhow::Result<ServerConfig>
where
  T: config::Source + Send + Sync + 'static,
{
  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 4004)?
    .add_source(source)
    .add_source(
      config::Environment::with_prefix("INCIDENTS")
        .prefix_separator("_")
        .separator("__"),
    )
    .build()
    .context("failed to read config file")?;

  settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
