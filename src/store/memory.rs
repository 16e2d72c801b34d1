//! In-memory snippet store.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::time::SystemTime;

use crate::routing::SnippetId;
use crate::store::{NewSnippet, Snippet, SnippetStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    snippets: BTreeMap<SnippetId, Snippet>,
    last_id: u64,
}

/// A `SnippetStore` kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed snippet, keeping its identifier.
    pub fn put(&self, snippet: Snippet) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.last_id = inner.last_id.max(snippet.id.get());
        inner.snippets.insert(snippet.id, snippet);
        Ok(())
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

impl SnippetStore for MemoryStore {
    fn get(&self, id: SnippetId) -> Result<Option<Snippet>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        let now = SystemTime::now();
        Ok(inner
            .snippets
            .get(&id)
            .filter(|s| !s.is_expired(now))
            .cloned())
    }

    fn insert(&self, snippet: NewSnippet) -> Result<SnippetId, StoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let id = inner
            .last_id
            .checked_add(1)
            .and_then(SnippetId::new)
            .ok_or(StoreError::IdsExhausted)?;

        let created = SystemTime::now();
        inner.last_id = id.get();
        inner.snippets.insert(
            id,
            Snippet {
                id,
                title: snippet.title,
                content: snippet.content,
                created,
                expires: created + snippet.ttl,
            },
        );
        Ok(id)
    }

    fn latest(&self, limit: usize) -> Result<Vec<Snippet>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        let now = SystemTime::now();
        Ok(inner
            .snippets
            .values()
            .rev()
            .filter(|s| !s.is_expired(now))
            .take(limit)
            .cloned()
            .collect())
    }
}
