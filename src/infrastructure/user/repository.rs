//! In-memory user directory

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::user::{Guest, GuestId, RegisteredUser, UserDirectory, UserId};
use crate::domain::DomainError;

/// Thread-safe in-memory user directory
///
/// Holds registered users and guests; allocates their ids. Data is lost
/// when the process terminates.
#[derive(Debug)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<u64, RegisteredUser>>,
    guests: RwLock<HashMap<u64, Guest>>,
    next_user_id: AtomicU64,
    next_guest_id: AtomicU64,
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            guests: RwLock::new(HashMap::new()),
            next_user_id: AtomicU64::new(1),
            next_guest_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<RegisteredUser, DomainError> {
        let users = self
            .users
            .read()
            .map_err(|e| DomainError::storage(format!("failed to acquire read lock: {e}")))?;

        users
            .values()
            .find(|u| u.email() == email)
            .cloned()
            .ok_or_else(|| DomainError::not_found("user"))
    }

    async fn find_by_id(&self, id: UserId) -> Result<RegisteredUser, DomainError> {
        let users = self
            .users
            .read()
            .map_err(|e| DomainError::storage(format!("failed to acquire read lock: {e}")))?;

        users
            .get(&id.value())
            .cloned()
            .ok_or_else(|| DomainError::not_found("user"))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        let users = self
            .users
            .read()
            .map_err(|e| DomainError::storage(format!("failed to acquire read lock: {e}")))?;

        Ok(users.values().any(|u| u.email() == email))
    }

    async fn insert(&self, mut user: RegisteredUser) -> Result<RegisteredUser, DomainError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| DomainError::storage(format!("failed to acquire write lock: {e}")))?;

        // Write-time uniqueness check, the second line of defense under
        // concurrent writers.
        if users.values().any(|u| u.email() == user.email()) {
            return Err(DomainError::already_exists("user"));
        }

        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        user.set_id(UserId::new(id));
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn save(&self, user: RegisteredUser) -> Result<RegisteredUser, DomainError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| DomainError::storage(format!("failed to acquire write lock: {e}")))?;

        if !users.contains_key(&user.id().value()) {
            return Err(DomainError::not_found("user"));
        }

        users.insert(user.id().value(), user.clone());
        Ok(user)
    }

    async fn insert_guest(&self, mut guest: Guest) -> Result<Guest, DomainError> {
        let mut guests = self
            .guests
            .write()
            .map_err(|e| DomainError::storage(format!("failed to acquire write lock: {e}")))?;

        let id = self.next_guest_id.fetch_add(1, Ordering::SeqCst);
        guest.set_id(GuestId::new(id));
        guests.insert(id, guest.clone());
        Ok(guest)
    }

    async fn find_guest_by_id(&self, id: GuestId) -> Result<Guest, DomainError> {
        let guests = self
            .guests
            .read()
            .map_err(|e| DomainError::storage(format!("failed to acquire read lock: {e}")))?;

        guests
            .get(&id.value())
            .cloned()
            .ok_or_else(|| DomainError::not_found("guest"))
    }

    async fn save_guest(&self, guest: Guest) -> Result<Guest, DomainError> {
        let mut guests = self
            .guests
            .write()
            .map_err(|e| DomainError::storage(format!("failed to acquire write lock: {e}")))?;

        if !guests.contains_key(&guest.id().value()) {
            return Err(DomainError::not_found("guest"));
        }

        guests.insert(guest.id().value(), guest.clone());
        Ok(guest)
    }
}
