//! HTTP server setup and the composition root.
//!
//! # Responsibilities
//! - Build the route table for the application
//! - Wrap it in the standard middleware chain
//! - Bind the result to a listener and serve until shutdown
//!
//! # Design Decisions
//! - The static root comes from configuration passed in here; nothing reads
//!   global state at request time
//! - One task per connection (axum::serve); requests share only the
//!   immutable route table, the store and the log subscriber

use axum::body::Body;
use axum::http::Request;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::http::handlers::{self, SNIPPET_PREFIX};
use crate::http::middleware;
use crate::routing::{handler_fn, Route, Router};
use crate::static_files::StaticFiles;
use crate::store::SnippetStore;

/// URL prefix static assets are mounted under.
pub const STATIC_PREFIX: &str = "/static";

/// The application's route table.
pub fn app_router(static_dir: &Path, store: Arc<dyn SnippetStore>) -> Router {
    let static_files = StaticFiles::new(STATIC_PREFIX, static_dir);

    let home = {
        let store = store.clone();
        handler_fn(move |req| handlers::home(store.clone(), req))
    };
    let show = {
        let store = store.clone();
        handler_fn(move |req| handlers::show_snippet(store.clone(), req))
    };
    let create = handler_fn(move |req| handlers::create_snippet(store.clone(), req));
    let assets = handler_fn(move |req: Request<Body>| {
        let static_files = static_files.clone();
        async move { static_files.serve(req).await }
    });

    Router::from_routes(vec![
        Route::exact("/", home),
        Route::exact("/ping", handler_fn(handlers::ping)),
        Route::prefix(SNIPPET_PREFIX, show),
        Route::exact(format!("{SNIPPET_PREFIX}/create"), create),
        Route::prefix(format!("{STATIC_PREFIX}/"), assets),
    ])
}

/// Wrap a route table in the standard middleware chain.
pub fn build_app(router: Router) -> axum::Router {
    middleware::standard(axum::Router::new().fallback_service(router))
}

/// Composition root: route table plus middleware, ready to serve.
pub fn routes(config: &AppConfig, store: Arc<dyn SnippetStore>) -> axum::Router {
    build_app(app_router(Path::new(&config.server.static_dir), store))
}

/// HTTP server for the application.
pub struct HttpServer {
    app: axum::Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig, store: Arc<dyn SnippetStore>) -> Self {
        let app = routes(&config, store);
        Self { app, config }
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            static_dir = %self.config.server.static_dir,
            "HTTP server starting"
        );

        let app = self.app.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
