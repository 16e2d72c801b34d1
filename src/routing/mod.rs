//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (route lookup, longest pattern wins)
//!     → matcher.rs (exact / prefix rules)
//!     → handler, or 404 on no match
//!
//! Inside the show-snippet handler:
//!     path_id.rs (trailing segment → SnippetId)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No pattern engine: a handful of exact and prefix routes
//! - Deterministic: same input always matches same route

pub mod matcher;
pub mod path_id;
pub mod router;

pub use matcher::MatchRule;
pub use path_id::{id_from_path, parse_id, InvalidId, SnippetId};
pub use router::{handler_fn, Handler, Route, Router};
