//! snippetbox server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ recover ─▶ log_request ─▶ secure_headers ─▶ router
//!                                                                  │
//!                         ┌────────────┬──────────────┬───────────┤
//!                         ▼            ▼              ▼           ▼
//!                       home      show_snippet  create_snippet  /static/
//!                         │            │              │           │
//!                         └──── SnippetStore ─────────┘     NeuteredFileSystem
//!                                                                 │
//!                                                              ServeDir
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use snippetbox::config::{load_config, validate_config, AppConfig, ConfigError};
use snippetbox::lifecycle::{signals, Shutdown};
use snippetbox::observability::logging;
use snippetbox::store::{MemoryStore, SnippetStore};
use snippetbox::HttpServer;

#[derive(Parser)]
#[command(name = "snippetbox")]
#[command(about = "Serve and share text snippets", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overriding the config file.
    #[arg(short, long)]
    addr: Option<String>,

    /// Static asset directory, overriding the config file.
    #[arg(short, long)]
    static_dir: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<AppConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => AppConfig::default(),
        };
        if let Some(addr) = self.addr {
            config.server.bind_address = addr;
        }
        if let Some(dir) = self.static_dir {
            config.server.static_dir = dir;
        }
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init(&config.observability.log_level);
    logging::install_panic_hook();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "snippetbox starting");

    tracing::info!(
        bind_address = %config.server.bind_address,
        static_dir = %config.server.static_dir,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let store: Arc<dyn SnippetStore> = Arc::new(MemoryStore::new());
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
