//! Guests and the recipient capability shared with registered users

use serde::{Deserialize, Serialize};

use super::entity::{RegisteredUser, UserId};

/// Guest identifier, allocated by the user directory
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct GuestId(u64);

impl GuestId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for GuestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anonymous guest, reachable only through its encrypted link token
///
/// A distinct identity variant - never confused with a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guest {
    id: GuestId,
    /// Display name shown on invitations
    name: String,
    /// Opaque guest-link token, the guest's sole credential
    link_token: String,
}

impl Guest {
    pub fn new(id: GuestId, name: impl Into<String>, link_token: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            link_token: link_token.into(),
        }
    }

    pub fn id(&self) -> GuestId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn link_token(&self) -> &str {
        &self.link_token
    }

    pub fn set_link_token(&mut self, token: impl Into<String>) {
        self.link_token = token.into();
    }

    pub(crate) fn set_id(&mut self, id: GuestId) {
        self.id = id;
    }
}

/// Identity of an invitation target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientId {
    User(UserId),
    Guest(GuestId),
}

impl std::fmt::Display for RecipientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User(id) => write!(f, "user:{}", id),
            Self::Guest(id) => write!(f, "guest:{}", id),
        }
    }
}

/// An invitation target: a registered user or an anonymous guest
///
/// Both variants carry an identity and a display name, which is all an
/// invitation needs from its recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipient {
    Registered(RegisteredUser),
    Guest(Guest),
}

impl Recipient {
    pub fn id(&self) -> RecipientId {
        match self {
            Self::Registered(user) => RecipientId::User(user.id()),
            Self::Guest(guest) => RecipientId::Guest(guest.id()),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Self::Registered(user) => user.display_name(),
            Self::Guest(guest) => guest.name().to_string(),
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest(_))
    }
}

impl From<RegisteredUser> for Recipient {
    fn from(user: RegisteredUser) -> Self {
        Self::Registered(user)
    }
}

impl From<Guest> for Recipient {
    fn from(guest: Guest) -> Self {
        Self::Guest(guest)
    }
}
