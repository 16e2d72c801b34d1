//! Snippet storage.
//!
//! # Responsibilities
//! - Define the `SnippetStore` seam the handlers depend on
//! - Provide an in-memory implementation for development and tests
//!
//! # Design Decisions
//! - Expired snippets behave exactly like missing ones
//! - Store failures are opaque to clients (handlers turn them into 500)

pub mod memory;

use std::time::{Duration, SystemTime};

use crate::routing::SnippetId;

pub use memory::MemoryStore;

/// A stored snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub id: SnippetId,
    pub title: String,
    pub content: String,
    pub created: SystemTime,
    pub expires: SystemTime,
}

impl Snippet {
    pub fn is_expired(&self, now: SystemTime) -> bool {
        self.expires <= now
    }
}

/// Input for a new snippet.
#[derive(Debug, Clone)]
pub struct NewSnippet {
    pub title: String,
    pub content: String,
    /// Lifetime counted from insertion.
    pub ttl: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("snippet store unavailable: {0}")]
    Unavailable(String),
    #[error("snippet identifiers exhausted")]
    IdsExhausted,
}

/// Backing store for snippets.
pub trait SnippetStore: Send + Sync {
    /// Look up a live snippet. Missing and expired snippets are `None`.
    fn get(&self, id: SnippetId) -> Result<Option<Snippet>, StoreError>;

    /// Store a snippet and return its identifier.
    fn insert(&self, snippet: NewSnippet) -> Result<SnippetId, StoreError>;

    /// The newest live snippets, newest first.
    fn latest(&self, limit: usize) -> Result<Vec<Snippet>, StoreError>;
}
