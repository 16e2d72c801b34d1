//! Standard middleware chain.
//!
//! # Data Flow
//! ```text
//! request
//!     → recover.rs (catch panics, 500 + Connection: close)
//!     → log_request.rs (one access log event)
//!     → secure_headers.rs (CSP, nosniff, XSS, frame options)
//!     → router
//! ```
//!
//! # Design Decisions
//! - Composed once at startup, same chain for every route
//! - Each step calls the next exactly once; only recovery ends a request early

pub mod log_request;
pub mod recover;
pub mod secure_headers;

use axum::middleware::from_fn;
use tower::ServiceBuilder;

/// Wrap `app` in the standard chain. Layers are listed outermost first.
pub fn standard(app: axum::Router) -> axum::Router {
    app.layer(
        ServiceBuilder::new()
            .layer(recover::layer())
            .layer(from_fn(log_request::log_request))
            .layer(from_fn(secure_headers::secure_headers)),
    )
}
