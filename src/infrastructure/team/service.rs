//! Team service: load-mutate-save orchestration for team aggregates

use std::sync::Arc;

use tracing::info;

use crate::domain::team::{Team, TeamId, TeamStore};
use crate::domain::user::{Recipient, RecipientId, UserDirectory};
use crate::domain::DomainError;

/// Request for creating a new team
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    pub name: String,
    pub sport: String,
    pub owner_email: String,
}

/// Team service
///
/// Resolves users through the directory, applies the aggregate
/// operation, persists the snapshot and returns the updated team.
/// Callers must serialize concurrent mutation of one team.
#[derive(Debug)]
pub struct TeamService<T: TeamStore, D: UserDirectory> {
    teams: Arc<T>,
    users: Arc<D>,
}

impl<T: TeamStore, D: UserDirectory> TeamService<T, D> {
    pub fn new(teams: Arc<T>, users: Arc<D>) -> Self {
        Self { teams, users }
    }

    /// Create a new team owned by the user behind `owner_email`
    pub async fn create_team(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        info!(name = %request.name, sport = %request.sport, "Creating team");

        let owner = self.users.find_by_email(&request.owner_email).await?;
        let team = Team::new(TeamId::default(), &request.name, &request.sport, owner)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        self.teams.insert(team).await
    }

    /// Get a team by id
    pub async fn get_team(&self, id: TeamId) -> Result<Team, DomainError> {
        self.teams.find_by_id(id).await
    }

    /// Delete a whole team
    pub async fn delete_team(&self, id: TeamId) -> Result<bool, DomainError> {
        info!(team = %id, "Deleting team");
        self.teams.delete(id).await
    }

    /// Add a new empty subgroup
    pub async fn add_subgroup(&self, id: TeamId, name: &str) -> Result<Team, DomainError> {
        let mut team = self.teams.find_by_id(id).await?;
        team.create_subgroup(name)?;
        self.teams.save(team).await
    }

    /// Rename a subgroup
    pub async fn rename_subgroup(
        &self,
        id: TeamId,
        old_name: &str,
        new_name: &str,
    ) -> Result<Team, DomainError> {
        let mut team = self.teams.find_by_id(id).await?;
        team.rename_subgroup(old_name, new_name)?;
        self.teams.save(team).await
    }

    /// Delete a subgroup
    pub async fn delete_subgroup(&self, id: TeamId, name: &str) -> Result<Team, DomainError> {
        let mut team = self.teams.find_by_id(id).await?;
        team.delete_subgroup(name)?;
        self.teams.save(team).await
    }

    /// Add the user behind `email` to the team
    pub async fn add_user_to_team(&self, id: TeamId, email: &str) -> Result<Team, DomainError> {
        let user = self.users.find_by_email(email).await?;
        let mut team = self.teams.find_by_id(id).await?;

        team.add_member(Recipient::from(user))?;
        self.teams.save(team).await
    }

    /// Remove the user behind `email` from the team and all subgroups
    pub async fn remove_user_from_team(
        &self,
        id: TeamId,
        email: &str,
    ) -> Result<Team, DomainError> {
        let user = self.users.find_by_email(email).await?;
        let mut team = self.teams.find_by_id(id).await?;

        team.remove_member(RecipientId::User(user.id()))?;
        self.teams.save(team).await
    }

    /// Add the user behind `email` to a subgroup
    pub async fn add_user_to_subgroup(
        &self,
        id: TeamId,
        subgroup: &str,
        email: &str,
    ) -> Result<Team, DomainError> {
        let user = self.users.find_by_email(email).await?;
        let mut team = self.teams.find_by_id(id).await?;

        team.add_member_to_subgroup(subgroup, Recipient::from(user))?;
        self.teams.save(team).await
    }

    /// Remove the user behind `email` from a subgroup
    pub async fn remove_user_from_subgroup(
        &self,
        id: TeamId,
        subgroup: &str,
        email: &str,
    ) -> Result<Team, DomainError> {
        let user = self.users.find_by_email(email).await?;
        let mut team = self.teams.find_by_id(id).await?;

        team.remove_member_from_subgroup(subgroup, RecipientId::User(user.id()))?;
        self.teams.save(team).await
    }

    /// Transfer team ownership to the user behind `email`
    pub async fn change_owner(&self, id: TeamId, email: &str) -> Result<Team, DomainError> {
        info!(team = %id, new_owner = %email, "Changing team owner");

        let user = self.users.find_by_email(email).await?;
        let mut team = self.teams.find_by_id(id).await?;

        team.change_owner(user)?;
        self.teams.save(team).await
    }

    /// Rename the team
    pub async fn rename_team(&self, id: TeamId, new_name: &str) -> Result<Team, DomainError> {
        let mut team = self.teams.find_by_id(id).await?;
        team.rename(new_name)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        self.teams.save(team).await
    }

    /// Change the team sport
    pub async fn change_sport(&self, id: TeamId, new_sport: &str) -> Result<Team, DomainError> {
        let mut team = self.teams.find_by_id(id).await?;
        team.change_sport(new_sport)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        self.teams.save(team).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::team::repository::InMemoryTeamStore;
    use crate::infrastructure::user::{InMemoryUserDirectory, RegisterUserRequest, UserService};
    use crate::infrastructure::user::Argon2Hasher;

    struct Fixture {
        service: TeamService<InMemoryTeamStore, InMemoryUserDirectory>,
        users: UserService<InMemoryUserDirectory, Argon2Hasher>,
    }

    async fn fixture() -> Fixture {
        let directory = Arc::new(InMemoryUserDirectory::new());
        let service = TeamService::new(Arc::new(InMemoryTeamStore::new()), directory.clone());
        let users = UserService::new(directory, Arc::new(Argon2Hasher::new()));

        for email in ["is@gmail.com", "ts@gmail.com", "is@seznam.cz"] {
            users
                .register(RegisterUserRequest {
                    name: "Ivan".to_string(),
                    surname: "Stastny".to_string(),
                    email: email.to_string(),
                    password: "correct horse battery".to_string(),
                })
                .await
                .unwrap();
        }

        Fixture { service, users }
    }

    async fn create_team(fixture: &Fixture) -> Team {
        fixture
            .service
            .create_team(CreateTeamRequest {
                name: "B team".to_string(),
                sport: "sipky".to_string(),
                owner_email: "is@gmail.com".to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_team_seeds_reserved_subgroups() {
        let fixture = fixture().await;
        let team = create_team(&fixture).await;

        assert_eq!(team.owner().email(), "is@gmail.com");
        assert!(team.has_subgroup(Team::ALL_USERS));
        assert!(team.has_subgroup(Team::COACHES));
    }

    #[tokio::test]
    async fn test_create_team_unknown_owner() {
        let fixture = fixture().await;

        let result = fixture
            .service
            .create_team(CreateTeamRequest {
                name: "B team".to_string(),
                sport: "sipky".to_string(),
                owner_email: "nobody@gmail.com".to_string(),
            })
            .await;

        assert_eq!(result.unwrap_err(), DomainError::not_found("user"));
    }

    #[tokio::test]
    async fn test_subgroup_lifecycle() {
        let fixture = fixture().await;
        let team = create_team(&fixture).await;
        let id = team.id();

        let team = fixture.service.add_subgroup(id, "Players").await.unwrap();
        assert!(team.has_subgroup("Players"));

        let duplicate = fixture.service.add_subgroup(id, "Players").await;
        assert_eq!(
            duplicate.unwrap_err(),
            DomainError::already_exists("subgroup")
        );

        let team = fixture
            .service
            .rename_subgroup(id, "Players", "Beginners")
            .await
            .unwrap();
        assert!(team.has_subgroup("Beginners"));

        let team = fixture.service.delete_subgroup(id, "Beginners").await.unwrap();
        assert!(!team.has_subgroup("Beginners"));
    }

    #[tokio::test]
    async fn test_membership_flow() {
        let fixture = fixture().await;
        let team = create_team(&fixture).await;
        let id = team.id();

        let team = fixture
            .service
            .add_user_to_team(id, "ts@gmail.com")
            .await
            .unwrap();
        let member = fixture.users.find_by_email("ts@gmail.com").await.unwrap();
        assert!(team.is_member(RecipientId::User(member.id())));

        let again = fixture.service.add_user_to_team(id, "ts@gmail.com").await;
        assert_eq!(again.unwrap_err(), DomainError::already_exists("user"));

        fixture.service.add_subgroup(id, "Players").await.unwrap();
        fixture
            .service
            .add_user_to_subgroup(id, "Players", "ts@gmail.com")
            .await
            .unwrap();

        // Team removal cascades through subgroups.
        let team = fixture
            .service
            .remove_user_from_team(id, "ts@gmail.com")
            .await
            .unwrap();
        for subgroup in team.subgroups() {
            assert!(!subgroup.contains(RecipientId::User(member.id())));
        }
    }

    #[tokio::test]
    async fn test_membership_unknown_user_resolved_first() {
        let fixture = fixture().await;
        let team = create_team(&fixture).await;

        let result = fixture
            .service
            .add_user_to_team(team.id(), "nobody@gmail.com")
            .await;
        assert_eq!(result.unwrap_err(), DomainError::not_found("user"));
    }

    #[tokio::test]
    async fn test_change_owner_flow() {
        let fixture = fixture().await;
        let team = create_team(&fixture).await;
        let id = team.id();

        // Not a member yet: rejected.
        let rejected = fixture.service.change_owner(id, "is@seznam.cz").await;
        assert!(matches!(rejected, Err(DomainError::Validation { .. })));

        fixture
            .service
            .add_user_to_team(id, "is@seznam.cz")
            .await
            .unwrap();
        let team = fixture.service.change_owner(id, "is@seznam.cz").await.unwrap();

        assert_eq!(team.owner().email(), "is@seznam.cz");
        let new_owner = fixture.users.find_by_email("is@seznam.cz").await.unwrap();
        assert!(team
            .subgroup(Team::COACHES)
            .unwrap()
            .contains(RecipientId::User(new_owner.id())));
    }

    #[tokio::test]
    async fn test_rename_and_sport() {
        let fixture = fixture().await;
        let team = create_team(&fixture).await;
        let id = team.id();

        let team = fixture.service.rename_team(id, "A team").await.unwrap();
        assert_eq!(team.name(), "A team");

        let team = fixture
            .service
            .change_sport(id, "Vodní lyžování")
            .await
            .unwrap();
        assert_eq!(team.sport(), "Vodní lyžování");

        assert!(matches!(
            fixture.service.rename_team(id, "").await,
            Err(DomainError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_team() {
        let fixture = fixture().await;
        let team = create_team(&fixture).await;

        assert!(fixture.service.delete_team(team.id()).await.unwrap());
        assert_eq!(
            fixture.service.get_team(team.id()).await.unwrap_err(),
            DomainError::not_found("team")
        );
    }
}
