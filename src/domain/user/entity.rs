//! Registered user entity and related types

use serde::{Deserialize, Serialize};

use super::validation::{validate_email, validate_person_name, UserValidationError};

/// Registered user identifier, allocated by the user directory
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct UserId(u64);

impl UserId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Application-level role of a registered user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Check if this role carries administrative privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Registered user entity
///
/// Equality and hashing are computed over the identity fields (id, name,
/// surname, email, role) only. The password hash is a credential, not
/// identity, and is excluded from comparison and serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredUser {
    /// Unique identifier, allocated by the user directory
    id: UserId,
    /// First name
    name: String,
    /// Surname
    surname: String,
    /// E-mail address - unique, compared case-sensitively as stored
    email: String,
    /// Application role
    role: Role,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing, default)]
    password_hash: String,
}

impl RegisteredUser {
    /// Create a new registered user
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        password_hash: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let name = name.into();
        let surname = surname.into();
        let email = email.into();
        validate_person_name(&name)?;
        validate_person_name(&surname)?;
        validate_email(&email)?;

        Ok(Self {
            id,
            name,
            surname,
            email,
            role,
            password_hash: password_hash.into(),
        })
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Full display name ("name surname")
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    // Mutators

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), UserValidationError> {
        let name = name.into();
        validate_person_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_surname(&mut self, surname: impl Into<String>) -> Result<(), UserValidationError> {
        let surname = surname.into();
        validate_person_name(&surname)?;
        self.surname = surname;
        Ok(())
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), UserValidationError> {
        let email = email.into();
        validate_email(&email)?;
        self.email = email;
        Ok(())
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
    }

    pub(crate) fn set_id(&mut self, id: UserId) {
        self.id = id;
    }
}

impl PartialEq for RegisteredUser {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.surname == other.surname
            && self.email == other.email
            && self.role == other.role
    }
}

impl Eq for RegisteredUser {}

impl std::hash::Hash for RegisteredUser {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.name.hash(state);
        self.surname.hash(state);
        self.email.hash(state);
        self.role.hash(state);
    }
}
