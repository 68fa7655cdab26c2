//! User directory trait

use async_trait::async_trait;

use super::entity::{RegisteredUser, UserId};
use super::recipient::{Guest, GuestId};
use crate::domain::DomainError;

/// Directory of registered users and guests
///
/// The core consults the directory for lookups before mutating an
/// aggregate; the directory is also the authority for id allocation and
/// e-mail uniqueness (the second line of defense under concurrent
/// writers).
#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug {
    /// Find a registered user by e-mail (exact, case-sensitive match)
    ///
    /// Fails with `NotFound("user")` if no account carries the address.
    async fn find_by_email(&self, email: &str) -> Result<RegisteredUser, DomainError>;

    /// Find a registered user by id
    async fn find_by_id(&self, id: UserId) -> Result<RegisteredUser, DomainError>;

    /// Check whether an e-mail address is already taken
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError>;

    /// Insert a new user, allocating its id
    ///
    /// Fails with `AlreadyExists("user")` if the e-mail is taken.
    async fn insert(&self, user: RegisteredUser) -> Result<RegisteredUser, DomainError>;

    /// Persist changes to an existing user
    async fn save(&self, user: RegisteredUser) -> Result<RegisteredUser, DomainError>;

    /// Insert a new guest, allocating its id
    async fn insert_guest(&self, guest: Guest) -> Result<Guest, DomainError>;

    /// Find a guest by id
    ///
    /// Fails with `NotFound("guest")` if absent.
    async fn find_guest_by_id(&self, id: GuestId) -> Result<Guest, DomainError>;

    /// Persist changes to an existing guest
    async fn save_guest(&self, guest: Guest) -> Result<Guest, DomainError>;
}
