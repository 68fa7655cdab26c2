//! Domain layer - core business logic and entities

pub mod error;
pub mod event;
pub mod invitation;
pub mod team;
pub mod user;

pub use error::DomainError;
pub use event::{Event, EventId, EventStore, Message, Place};
pub use invitation::{filter_and_sort_by_status, Invitation, InvitationStatus};
pub use team::{Subgroup, Team, TeamId, TeamStore};
pub use user::{
    Guest, GuestId, Recipient, RecipientId, RegisteredUser, Role, UserDirectory, UserId,
};
