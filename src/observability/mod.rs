//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!
//! Consumers:
//!     → logging.rs subscriber (stdout)
//! ```
//!
//! # Design Decisions
//! - Structured fields (remote_addr, method, uri, error) over formatted strings
//! - The access log is the middleware chain's own step, not a trace layer

pub mod logging;
