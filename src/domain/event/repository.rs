//! Event store trait

use async_trait::async_trait;

use super::entity::{Event, EventId};
use crate::domain::DomainError;

/// Persistence collaborator for events
#[async_trait]
pub trait EventStore: Send + Sync + std::fmt::Debug {
    /// Find an event by id
    ///
    /// Fails with `NotFound("event")` if absent.
    async fn find_by_id(&self, id: EventId) -> Result<Event, DomainError>;

    /// Insert a new event, allocating its id
    async fn insert(&self, event: Event) -> Result<Event, DomainError>;

    /// Persist an updated event snapshot
    async fn save(&self, event: Event) -> Result<Event, DomainError>;
}
