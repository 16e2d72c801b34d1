//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum::serve, connect info)
//!     → middleware/ (recover → log → security headers)
//!     → routing::Router (exact / prefix dispatch)
//!     → handlers.rs or static_files
//!     → errors.rs (AppError → status code)
//! ```

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use errors::AppError;
pub use server::{build_app, routes, HttpServer};
