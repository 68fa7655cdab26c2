//! In-memory team store

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::team::{Team, TeamId, TeamStore};
use crate::domain::DomainError;

/// Thread-safe in-memory team store
#[derive(Debug)]
pub struct InMemoryTeamStore {
    teams: RwLock<HashMap<u64, Team>>,
    next_id: AtomicU64,
}

impl Default for InMemoryTeamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTeamStore {
    pub fn new() -> Self {
        Self {
            teams: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl TeamStore for InMemoryTeamStore {
    async fn find_by_id(&self, id: TeamId) -> Result<Team, DomainError> {
        let teams = self
            .teams
            .read()
            .map_err(|e| DomainError::storage(format!("failed to acquire read lock: {e}")))?;

        teams
            .get(&id.value())
            .cloned()
            .ok_or_else(|| DomainError::not_found("team"))
    }

    async fn insert(&self, mut team: Team) -> Result<Team, DomainError> {
        let mut teams = self
            .teams
            .write()
            .map_err(|e| DomainError::storage(format!("failed to acquire write lock: {e}")))?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        team.set_id(TeamId::new(id));
        teams.insert(id, team.clone());
        Ok(team)
    }

    async fn save(&self, team: Team) -> Result<Team, DomainError> {
        let mut teams = self
            .teams
            .write()
            .map_err(|e| DomainError::storage(format!("failed to acquire write lock: {e}")))?;

        if !teams.contains_key(&team.id().value()) {
            return Err(DomainError::not_found("team"));
        }

        teams.insert(team.id().value(), team.clone());
        Ok(team)
    }

    async fn delete(&self, id: TeamId) -> Result<bool, DomainError> {
        let mut teams = self
            .teams
            .write()
            .map_err(|e| DomainError::storage(format!("failed to acquire write lock: {e}")))?;

        Ok(teams.remove(&id.value()).is_some())
    }
}
