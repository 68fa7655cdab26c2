//! Event entity, messages and the per-event invitation list

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::invitation::Invitation;
use crate::domain::user::{RecipientId, RegisteredUser};

/// Event identifier, allocated by the event store
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct EventId(u64);

impl EventId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an event takes place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub address: String,
}

impl Place {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// Message posted to an event's board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    sender: RegisteredUser,
    text: String,
    sent_at: DateTime<Utc>,
    event_id: EventId,
}

impl Message {
    pub fn new(sender: RegisteredUser, text: impl Into<String>, event_id: EventId) -> Self {
        Self {
            sender,
            text: text.into(),
            sent_at: Utc::now(),
            event_id,
        }
    }

    pub fn sender(&self) -> &RegisteredUser {
        &self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }
}

/// Event entity
///
/// The event collaborator owns everything here except the invitation
/// list, which is mutated exclusively through the invitation ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    date: DateTime<Utc>,
    capacity: u32,
    canceled: bool,
    place: Place,
    creator: RegisteredUser,
    messages: Vec<Message>,
    invitations: Vec<Invitation>,
}

impl Event {
    pub fn new(
        id: EventId,
        date: DateTime<Utc>,
        capacity: u32,
        place: Place,
        creator: RegisteredUser,
    ) -> Self {
        Self {
            id,
            date,
            capacity,
            canceled: false,
            place,
            creator,
            messages: Vec::new(),
            invitations: Vec::new(),
        }
    }

    // Getters

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled
    }

    pub fn place(&self) -> &Place {
        &self.place
    }

    pub fn creator(&self) -> &RegisteredUser {
        &self.creator
    }

    /// Read-only view of the message board
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Read-only view of the invitation list
    pub fn invitations(&self) -> &[Invitation] {
        &self.invitations
    }

    // Mutators

    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.date = date;
    }

    pub fn set_capacity(&mut self, capacity: u32) {
        self.capacity = capacity;
    }

    pub fn set_place(&mut self, place: Place) {
        self.place = place;
    }

    /// Flip the cancellation flag
    pub fn toggle_canceled(&mut self) {
        self.canceled = !self.canceled;
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    // Invitation list - mutated only by the invitation ledger

    pub fn has_invitation_for(&self, id: RecipientId) -> bool {
        self.invitations.iter().any(|i| i.recipient_id() == id)
    }

    pub fn find_invitation(&self, id: RecipientId) -> Option<&Invitation> {
        self.invitations.iter().find(|i| i.recipient_id() == id)
    }

    pub(crate) fn find_invitation_mut(&mut self, id: RecipientId) -> Option<&mut Invitation> {
        self.invitations.iter_mut().find(|i| i.recipient_id() == id)
    }

    pub(crate) fn push_invitation(&mut self, invitation: Invitation) {
        self.invitations.push(invitation);
    }

    /// Remove the invitation for a recipient; returns whether one was
    /// found and removed
    pub(crate) fn remove_invitation(&mut self, id: RecipientId) -> bool {
        let before = self.invitations.len();
        self.invitations.retain(|i| i.recipient_id() != id);
        self.invitations.len() < before
    }

    pub(crate) fn set_id(&mut self, id: EventId) {
        self.id = id;
    }
}
