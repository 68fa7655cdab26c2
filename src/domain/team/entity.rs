//! Team aggregate: subgroups, membership and ownership rules

use serde::{Deserialize, Serialize};

use super::subgroup::Subgroup;
use super::validation::{
    validate_sport, validate_subgroup_name, validate_team_name, TeamValidationError,
};
use crate::domain::user::{Recipient, RecipientId, RegisteredUser};
use crate::domain::DomainError;

/// Team identifier, allocated by the team store
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct TeamId(u64);

impl TeamId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Team aggregate
///
/// Exclusively owns its subgroups and their membership lists; every
/// membership rule is enforced through the operations below. The
/// aggregate is synchronous and caller-serialized: one team is one unit
/// of mutual exclusion, and concurrent mutation must go through a
/// single writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: String,
    sport: String,
    /// Current owner; always a member of "All Users" and "Coaches"
    owner: RegisteredUser,
    /// Ordered subgroups, names unique within the team
    subgroups: Vec<Subgroup>,
}

impl Team {
    /// Every team member appears in this subgroup
    pub const ALL_USERS: &'static str = "All Users";

    /// Members with elevated authority over the team
    pub const COACHES: &'static str = "Coaches";

    /// Create a new team
    ///
    /// Seeds the two reserved subgroups with the owner as their sole
    /// member, so the owner-membership rule holds from the start.
    pub fn new(
        id: TeamId,
        name: impl Into<String>,
        sport: impl Into<String>,
        owner: RegisteredUser,
    ) -> Result<Self, TeamValidationError> {
        let name = name.into();
        let sport = sport.into();
        validate_team_name(&name)?;
        validate_sport(&sport)?;

        let mut all_users = Subgroup::new(Self::ALL_USERS, id);
        let mut coaches = Subgroup::new(Self::COACHES, id);
        // Fresh subgroups cannot already contain the owner.
        let _ = all_users.add_member(Recipient::from(owner.clone()));
        let _ = coaches.add_member(Recipient::from(owner.clone()));

        Ok(Self {
            id,
            name,
            sport,
            owner,
            subgroups: vec![all_users, coaches],
        })
    }

    /// Check whether a name refers to a reserved subgroup
    pub fn is_reserved_subgroup(name: &str) -> bool {
        name == Self::ALL_USERS || name == Self::COACHES
    }

    // Getters

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sport(&self) -> &str {
        &self.sport
    }

    pub fn owner(&self) -> &RegisteredUser {
        &self.owner
    }

    /// Read-only view of the subgroups
    pub fn subgroups(&self) -> &[Subgroup] {
        &self.subgroups
    }

    /// Look up a subgroup by name (exact, case-sensitive)
    pub fn subgroup(&self, name: &str) -> Result<&Subgroup, DomainError> {
        self.subgroups
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| DomainError::not_found("subgroup"))
    }

    pub fn has_subgroup(&self, name: &str) -> bool {
        self.subgroups.iter().any(|s| s.name() == name)
    }

    /// Check team membership ("All Users")
    pub fn is_member(&self, id: RecipientId) -> bool {
        self.subgroup(Self::ALL_USERS)
            .map(|s| s.contains(id))
            .unwrap_or(false)
    }

    // Subgroup management

    /// Create a new empty subgroup
    ///
    /// Fails with `AlreadyExists("subgroup")` on a name collision.
    pub fn create_subgroup(&mut self, name: impl Into<String>) -> Result<&Subgroup, DomainError> {
        let name = name.into();
        validate_subgroup_name(&name).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.has_subgroup(&name) {
            return Err(DomainError::already_exists("subgroup"));
        }

        self.subgroups.push(Subgroup::new(name, self.id));
        let index = self.subgroups.len() - 1;
        Ok(&self.subgroups[index])
    }

    /// Rename a subgroup
    ///
    /// Fails with `NotFound("subgroup")` if `old_name` is absent, and
    /// with `AlreadyExists("subgroup")` if `new_name` is already used by
    /// a different subgroup. Renaming a subgroup to its own name is a
    /// no-op.
    pub fn rename_subgroup(
        &mut self,
        old_name: &str,
        new_name: impl Into<String>,
    ) -> Result<&Subgroup, DomainError> {
        let new_name = new_name.into();
        validate_subgroup_name(&new_name).map_err(|e| DomainError::validation(e.to_string()))?;

        let position = self
            .subgroups
            .iter()
            .position(|s| s.name() == old_name)
            .ok_or_else(|| DomainError::not_found("subgroup"))?;

        if new_name != old_name && self.has_subgroup(&new_name) {
            return Err(DomainError::already_exists("subgroup"));
        }

        self.subgroups[position].set_name(new_name);
        Ok(&self.subgroups[position])
    }

    /// Delete a subgroup
    ///
    /// The reserved subgroups cannot be deleted - removing "All Users"
    /// or "Coaches" would retroactively break the owner-membership rule.
    pub fn delete_subgroup(&mut self, name: &str) -> Result<(), DomainError> {
        if Self::is_reserved_subgroup(name) {
            return Err(DomainError::validation(format!(
                "subgroup '{name}' is reserved and cannot be deleted"
            )));
        }

        let position = self
            .subgroups
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| DomainError::not_found("subgroup"))?;

        self.subgroups.remove(position);
        Ok(())
    }

    // Team membership

    /// Add a recipient to the team ("All Users" only)
    ///
    /// Fails with `AlreadyExists("user")` if already a team member.
    /// Membership of other subgroups is managed independently.
    pub fn add_member(&mut self, recipient: Recipient) -> Result<(), DomainError> {
        self.subgroup_mut(Self::ALL_USERS)?.add_member(recipient)
    }

    /// Remove a recipient from the team
    ///
    /// Fails with `NotFound("user")` if the recipient is not a team
    /// member; on success the recipient is removed from every subgroup
    /// of the team, not just "All Users".
    pub fn remove_member(&mut self, id: RecipientId) -> Result<(), DomainError> {
        if !self.is_member(id) {
            return Err(DomainError::not_found("user"));
        }

        for subgroup in &mut self.subgroups {
            if subgroup.contains(id) {
                subgroup.remove_member(id)?;
            }
        }
        Ok(())
    }

    /// Add a recipient to a named subgroup
    pub fn add_member_to_subgroup(
        &mut self,
        name: &str,
        recipient: Recipient,
    ) -> Result<(), DomainError> {
        self.subgroup_mut(name)?.add_member(recipient)
    }

    /// Remove a recipient from a named subgroup
    ///
    /// Fails with `NotFound("subgroup")` if the subgroup is absent and
    /// `NotFound("user")` if the recipient is not in it.
    pub fn remove_member_from_subgroup(
        &mut self,
        name: &str,
        id: RecipientId,
    ) -> Result<(), DomainError> {
        let subgroup = self.subgroup_mut(name)?;

        if !subgroup.contains(id) {
            return Err(DomainError::not_found("user"));
        }

        subgroup.remove_member(id)
    }

    // Ownership

    /// Transfer ownership
    ///
    /// The new owner must already be a team member ("All Users");
    /// otherwise the transfer is rejected. A new owner missing from
    /// "Coaches" is promoted there silently.
    pub fn change_owner(&mut self, new_owner: RegisteredUser) -> Result<(), DomainError> {
        let id = RecipientId::User(new_owner.id());

        if !self.is_member(id) {
            return Err(DomainError::validation("owner must be a team member"));
        }

        let coaches = self.subgroup_mut(Self::COACHES)?;
        if !coaches.contains(id) {
            coaches.add_member(Recipient::from(new_owner.clone()))?;
        }

        self.owner = new_owner;
        Ok(())
    }

    // Field mutation

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn change_sport(&mut self, sport: impl Into<String>) -> Result<(), TeamValidationError> {
        let sport = sport.into();
        validate_sport(&sport)?;
        self.sport = sport;
        Ok(())
    }

    pub(crate) fn set_id(&mut self, id: TeamId) {
        self.id = id;
        for subgroup in &mut self.subgroups {
            subgroup.set_team_id(id);
        }
    }

    fn subgroup_mut(&mut self, name: &str) -> Result<&mut Subgroup, DomainError> {
        self.subgroups
            .iter_mut()
            .find(|s| s.name() == name)
            .ok_or_else(|| DomainError::not_found("subgroup"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Role, UserId};

    fn user(id: u64, name: &str, email: &str) -> RegisteredUser {
        RegisteredUser::new(UserId::new(id), name, "Stastny", email, Role::User, "h").unwrap()
    }

    fn team() -> (Team, RegisteredUser) {
        let owner = user(1, "Ivan", "is@gmail.com");
        let team = Team::new(TeamId::new(1), "B team", "sipky", owner.clone()).unwrap();
        (team, owner)
    }

    #[test]
    fn test_new_team_seeds_reserved_subgroups() {
        let (team, owner) = team();

        assert_eq!(team.subgroups().len(), 2);
        assert!(team.has_subgroup(Team::ALL_USERS));
        assert!(team.has_subgroup(Team::COACHES));
        assert!(team.is_member(RecipientId::User(owner.id())));
        assert!(team
            .subgroup(Team::COACHES)
            .unwrap()
            .contains(RecipientId::User(owner.id())));
    }

    #[test]
    fn test_create_subgroup() {
        let (mut team, _) = team();

        let subgroup = team.create_subgroup("Players").unwrap();
        assert_eq!(subgroup.name(), "Players");
        assert_eq!(team.subgroups().len(), 3);
    }

    #[test]
    fn test_create_duplicate_subgroup() {
        let (mut team, _) = team();

        team.create_subgroup("Players").unwrap();
        let result = team.create_subgroup("Players");

        assert_eq!(result.unwrap_err(), DomainError::already_exists("subgroup"));
    }

    #[test]
    fn test_subgroup_names_case_sensitive() {
        let (mut team, _) = team();

        team.create_subgroup("Players").unwrap();
        // A different casing is a different subgroup.
        assert!(team.create_subgroup("players").is_ok());
    }

    #[test]
    fn test_rename_subgroup() {
        let (mut team, _) = team();
        team.create_subgroup("Players").unwrap();

        let renamed = team.rename_subgroup("Players", "Beginners").unwrap();
        assert_eq!(renamed.name(), "Beginners");
        assert!(!team.has_subgroup("Players"));
    }

    #[test]
    fn test_rename_missing_subgroup() {
        let (mut team, _) = team();
        let result = team.rename_subgroup("Nic", "Beginners");
        assert_eq!(result.unwrap_err(), DomainError::not_found("subgroup"));
    }

    #[test]
    fn test_rename_to_taken_name() {
        let (mut team, _) = team();
        team.create_subgroup("Players").unwrap();
        team.create_subgroup("Beginners").unwrap();

        let result = team.rename_subgroup("Players", "Beginners");
        assert_eq!(
            result.unwrap_err(),
            DomainError::already_exists("subgroup")
        );
    }

    #[test]
    fn test_rename_to_own_name() {
        let (mut team, _) = team();
        team.create_subgroup("Players").unwrap();

        assert!(team.rename_subgroup("Players", "Players").is_ok());
    }

    #[test]
    fn test_delete_subgroup() {
        let (mut team, _) = team();
        team.create_subgroup("Players").unwrap();

        team.delete_subgroup("Players").unwrap();
        assert!(!team.has_subgroup("Players"));
    }

    #[test]
    fn test_delete_missing_subgroup() {
        let (mut team, _) = team();
        assert_eq!(
            team.delete_subgroup("Nic").unwrap_err(),
            DomainError::not_found("subgroup")
        );
    }

    #[test]
    fn test_reserved_subgroups_cannot_be_deleted() {
        let (mut team, _) = team();

        assert!(matches!(
            team.delete_subgroup(Team::ALL_USERS),
            Err(DomainError::Validation { .. })
        ));
        assert!(matches!(
            team.delete_subgroup(Team::COACHES),
            Err(DomainError::Validation { .. })
        ));
        assert!(team.has_subgroup(Team::ALL_USERS));
        assert!(team.has_subgroup(Team::COACHES));
    }

    #[test]
    fn test_add_member() {
        let (mut team, _) = team();
        let u2 = user(2, "Tomas", "ts@gmail.com");

        team.add_member(Recipient::from(u2.clone())).unwrap();

        assert!(team.is_member(RecipientId::User(u2.id())));
        // Joining the team does not touch other subgroups.
        assert!(!team
            .subgroup(Team::COACHES)
            .unwrap()
            .contains(RecipientId::User(u2.id())));
    }

    #[test]
    fn test_add_member_twice() {
        let (mut team, _) = team();
        let u2 = user(2, "Tomas", "ts@gmail.com");

        team.add_member(Recipient::from(u2.clone())).unwrap();
        let result = team.add_member(Recipient::from(u2));

        assert_eq!(result.unwrap_err(), DomainError::already_exists("user"));
    }

    #[test]
    fn test_remove_member_cascades_through_subgroups() {
        let (mut team, _) = team();
        let u2 = user(2, "Tomas", "ts@gmail.com");
        let id = RecipientId::User(u2.id());

        team.add_member(Recipient::from(u2.clone())).unwrap();
        team.create_subgroup("Players").unwrap();
        team.add_member_to_subgroup("Players", Recipient::from(u2.clone()))
            .unwrap();
        team.add_member_to_subgroup(Team::COACHES, Recipient::from(u2))
            .unwrap();

        team.remove_member(id).unwrap();

        for subgroup in team.subgroups() {
            assert!(!subgroup.contains(id), "still in {}", subgroup.name());
        }
    }

    #[test]
    fn test_remove_nonmember() {
        let (mut team, _) = team();
        let result = team.remove_member(RecipientId::User(UserId::new(99)));
        assert_eq!(result.unwrap_err(), DomainError::not_found("user"));
    }

    #[test]
    fn test_subgroup_membership_ops() {
        let (mut team, _) = team();
        let u2 = user(2, "Tomas", "ts@gmail.com");
        let id = RecipientId::User(u2.id());
        team.create_subgroup("Players").unwrap();

        team.add_member_to_subgroup("Players", Recipient::from(u2.clone()))
            .unwrap();
        assert!(team.subgroup("Players").unwrap().contains(id));

        let dup = team.add_member_to_subgroup("Players", Recipient::from(u2));
        assert_eq!(dup.unwrap_err(), DomainError::already_exists("user"));

        team.remove_member_from_subgroup("Players", id).unwrap();
        assert!(!team.subgroup("Players").unwrap().contains(id));

        let absent = team.remove_member_from_subgroup("Players", id);
        assert_eq!(absent.unwrap_err(), DomainError::not_found("user"));

        let missing = team.add_member_to_subgroup("Nic", Recipient::from(user(3, "J", "j@a.cz")));
        assert_eq!(missing.unwrap_err(), DomainError::not_found("subgroup"));
    }

    #[test]
    fn test_change_owner_requires_membership() {
        let (mut team, owner) = team();
        let outsider = user(5, "Adam", "email@gmail.com");

        let result = team.change_owner(outsider);
        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert_eq!(team.owner(), &owner);
    }

    #[test]
    fn test_change_owner_promotes_into_coaches() {
        // Scenario: team "B team"/"sipky", owner U1, "All Users"={U1,U2},
        // "Coaches"={U1}. Changing the owner to U2 must succeed and add
        // U2 to "Coaches".
        let (mut team, u1) = team();
        let u2 = user(2, "Pavel", "is@seznam.cz");
        let u2_id = RecipientId::User(u2.id());
        team.create_subgroup("Empty").unwrap();
        team.add_member(Recipient::from(u2.clone())).unwrap();

        team.change_owner(u2.clone()).unwrap();

        assert_eq!(team.owner(), &u2);
        let coaches = team.subgroup(Team::COACHES).unwrap();
        assert!(coaches.contains(RecipientId::User(u1.id())));
        assert!(coaches.contains(u2_id));
        assert_eq!(coaches.members().len(), 2);
    }

    #[test]
    fn test_change_owner_already_coach() {
        let (mut team, _) = team();
        let u2 = user(2, "Pavel", "is@seznam.cz");
        team.add_member(Recipient::from(u2.clone())).unwrap();
        team.add_member_to_subgroup(Team::COACHES, Recipient::from(u2.clone()))
            .unwrap();

        team.change_owner(u2.clone()).unwrap();

        assert_eq!(team.owner(), &u2);
        assert_eq!(team.subgroup(Team::COACHES).unwrap().members().len(), 2);
    }

    #[test]
    fn test_rename_and_change_sport() {
        let (mut team, _) = team();

        team.rename("A team").unwrap();
        team.change_sport("Vodní lyžování").unwrap();

        assert_eq!(team.name(), "A team");
        assert_eq!(team.sport(), "Vodní lyžování");

        assert!(team.rename("").is_err());
        assert!(team.change_sport("").is_err());
    }
}
