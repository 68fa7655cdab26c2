//! Team store trait

use async_trait::async_trait;

use super::entity::{Team, TeamId};
use crate::domain::DomainError;

/// Persistence collaborator for team aggregates
///
/// The store persists aggregate snapshots returned by team operations;
/// it performs no business logic of its own.
#[async_trait]
pub trait TeamStore: Send + Sync + std::fmt::Debug {
    /// Find a team by id
    ///
    /// Fails with `NotFound("team")` if absent.
    async fn find_by_id(&self, id: TeamId) -> Result<Team, DomainError>;

    /// Insert a new team, allocating its id
    async fn insert(&self, team: Team) -> Result<Team, DomainError>;

    /// Persist an updated aggregate snapshot
    async fn save(&self, team: Team) -> Result<Team, DomainError>;

    /// Delete a team; returns whether one was removed
    async fn delete(&self, id: TeamId) -> Result<bool, DomainError>;
}
