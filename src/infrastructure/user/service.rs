//! User service for registration and account management

use std::sync::Arc;

use tracing::info;

use crate::domain::user::{
    validate_password, RegisteredUser, Role, UserDirectory, UserId,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
}

/// User service for registration and account management
#[derive(Debug)]
pub struct UserService<D: UserDirectory, H: PasswordHasher> {
    directory: Arc<D>,
    hasher: Arc<H>,
}

impl<D: UserDirectory, H: PasswordHasher> UserService<D, H> {
    pub fn new(directory: Arc<D>, hasher: Arc<H>) -> Self {
        Self { directory, hasher }
    }

    /// Register a new user
    ///
    /// Fails with `AlreadyExists("user")` when the e-mail address is
    /// already taken.
    pub async fn register(&self, request: RegisterUserRequest) -> Result<RegisteredUser, DomainError> {
        info!(email = %request.email, "Registering user");

        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.directory.email_exists(&request.email).await? {
            return Err(DomainError::already_exists("user"));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let user = RegisteredUser::new(
            UserId::default(),
            &request.name,
            &request.surname,
            &request.email,
            Role::User,
            password_hash,
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        self.directory.insert(user).await
    }

    /// Verify a user's credentials
    ///
    /// Returns `None` on unknown e-mail or wrong password - the caller
    /// cannot tell which.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<RegisteredUser>, DomainError> {
        let user = match self.directory.find_by_email(email).await {
            Ok(user) => user,
            Err(DomainError::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        if !self.hasher.verify(password, user.password_hash()) {
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Find a user by e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<RegisteredUser, DomainError> {
        self.directory.find_by_email(email).await
    }

    /// Change a user's first name
    pub async fn change_name(
        &self,
        email: &str,
        new_name: &str,
    ) -> Result<RegisteredUser, DomainError> {
        let mut user = self.directory.find_by_email(email).await?;
        user.set_name(new_name)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        self.directory.save(user).await
    }

    /// Change a user's surname
    pub async fn change_surname(
        &self,
        email: &str,
        new_surname: &str,
    ) -> Result<RegisteredUser, DomainError> {
        let mut user = self.directory.find_by_email(email).await?;
        user.set_surname(new_surname)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        self.directory.save(user).await
    }

    /// Change a user's e-mail address
    ///
    /// The new address must not be taken.
    pub async fn change_email(
        &self,
        email: &str,
        new_email: &str,
    ) -> Result<RegisteredUser, DomainError> {
        let mut user = self.directory.find_by_email(email).await?;

        if new_email != email && self.directory.email_exists(new_email).await? {
            return Err(DomainError::already_exists("user"));
        }

        user.set_email(new_email)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        self.directory.save(user).await
    }

    /// Change a user's application role
    pub async fn change_role(&self, email: &str, role: Role) -> Result<RegisteredUser, DomainError> {
        info!(email = %email, role = %role, "Changing user role");

        let mut user = self.directory.find_by_email(email).await?;
        user.set_role(role);
        self.directory.save(user).await
    }
}
