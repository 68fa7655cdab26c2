//! Invitation entity and status machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::event::EventId;
use crate::domain::user::{Recipient, RecipientId};

/// Status of an invitation
///
/// The set is open by design - new statuses (e.g. a tentative "maybe")
/// may be added without breaking matching, so downstream matches should
/// carry a fallback arm.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
}

impl std::fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Declined => write!(f, "declined"),
        }
    }
}

/// Invitation of one recipient to one event
///
/// Created PENDING; every explicit status change refreshes the `changed`
/// timestamp. No transition is forbidden - an accepted invitation may be
/// reset to pending - the engine only records when the move happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    created: DateTime<Utc>,
    changed: DateTime<Utc>,
    status: InvitationStatus,
    recipient: Recipient,
    event_id: EventId,
}

impl Invitation {
    /// Create a pending invitation; `created == changed` at birth
    pub fn new(recipient: Recipient, event_id: EventId) -> Self {
        let now = Utc::now();

        Self {
            created: now,
            changed: now,
            status: InvitationStatus::Pending,
            recipient,
            event_id,
        }
    }

    // Getters

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn changed(&self) -> DateTime<Utc> {
        self.changed
    }

    pub fn status(&self) -> InvitationStatus {
        self.status
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    pub fn recipient_id(&self) -> RecipientId {
        self.recipient.id()
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    // Mutators

    /// Set the status and refresh the `changed` timestamp
    pub fn set_status(&mut self, status: InvitationStatus) {
        self.status = status;
        self.changed = Utc::now();
    }
}

/// Filter invitations by status and order them by `changed`, oldest
/// first. The sort is stable: entries with equal timestamps keep their
/// original list order.
pub fn filter_and_sort_by_status(
    invitations: &[Invitation],
    status: InvitationStatus,
) -> Vec<Invitation> {
    let mut result: Vec<Invitation> = invitations
        .iter()
        .filter(|i| i.status() == status)
        .cloned()
        .collect();
    result.sort_by_key(|i| i.changed());
    result
}
