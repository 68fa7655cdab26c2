//! In-memory event store

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::event::{Event, EventId, EventStore};
use crate::domain::DomainError;

/// Thread-safe in-memory event store
#[derive(Debug)]
pub struct InMemoryEventStore {
    events: RwLock<HashMap<u64, Event>>,
    next_id: AtomicU64,
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn find_by_id(&self, id: EventId) -> Result<Event, DomainError> {
        let events = self
            .events
            .read()
            .map_err(|e| DomainError::storage(format!("failed to acquire read lock: {e}")))?;

        events
            .get(&id.value())
            .cloned()
            .ok_or_else(|| DomainError::not_found("event"))
    }

    async fn insert(&self, mut event: Event) -> Result<Event, DomainError> {
        let mut events = self
            .events
            .write()
            .map_err(|e| DomainError::storage(format!("failed to acquire write lock: {e}")))?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        event.set_id(EventId::new(id));
        events.insert(id, event.clone());
        Ok(event)
    }

    async fn save(&self, event: Event) -> Result<Event, DomainError> {
        let mut events = self
            .events
            .write()
            .map_err(|e| DomainError::storage(format!("failed to acquire write lock: {e}")))?;

        if !events.contains_key(&event.id().value()) {
            return Err(DomainError::not_found("event"));
        }

        events.insert(event.id().value(), event.clone());
        Ok(event)
    }
}
