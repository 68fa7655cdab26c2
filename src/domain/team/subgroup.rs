//! Subgroup: a named set of members inside one team

use serde::{Deserialize, Serialize};

use super::entity::TeamId;
use crate::domain::user::{Recipient, RecipientId};
use crate::domain::DomainError;

/// A named set of members inside one team
///
/// Pure in-memory structure; mutation is caller-synchronized. Name
/// uniqueness within a team is the owning [`Team`](super::Team)'s
/// responsibility, membership uniqueness is enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subgroup {
    /// Name, unique within the owning team (case-sensitive)
    name: String,
    /// Owning team, kept for display and consistency only
    team_id: TeamId,
    /// Ordered members; each recipient appears at most once
    members: Vec<Recipient>,
}

impl Subgroup {
    pub fn new(name: impl Into<String>, team_id: TeamId) -> Self {
        Self {
            name: name.into(),
            team_id,
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Read-only view of the member list
    pub fn members(&self) -> &[Recipient] {
        &self.members
    }

    /// Check if a recipient is a member
    pub fn contains(&self, id: RecipientId) -> bool {
        self.members.iter().any(|m| m.id() == id)
    }

    /// Append a member
    ///
    /// Fails with `AlreadyExists("user")` if the recipient is already
    /// present.
    pub fn add_member(&mut self, recipient: Recipient) -> Result<(), DomainError> {
        if self.contains(recipient.id()) {
            return Err(DomainError::already_exists("user"));
        }

        self.members.push(recipient);
        Ok(())
    }

    /// Remove a member
    ///
    /// Fails with `NotFound("member")` if the recipient is absent - never
    /// a silent no-op.
    pub fn remove_member(&mut self, id: RecipientId) -> Result<(), DomainError> {
        let position = self
            .members
            .iter()
            .position(|m| m.id() == id)
            .ok_or_else(|| DomainError::not_found("member"))?;

        self.members.remove(position);
        Ok(())
    }

    pub(super) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(super) fn set_team_id(&mut self, team_id: TeamId) {
        self.team_id = team_id;
    }
}
