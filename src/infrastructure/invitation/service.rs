//! Invitation ledger: per-event invitation lifecycle and guest access

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::event::{EventId, EventStore};
use crate::domain::invitation::{filter_and_sort_by_status, Invitation, InvitationStatus};
use crate::domain::user::{Guest, GuestId, Recipient, RecipientId, UserDirectory};
use crate::domain::DomainError;
use crate::infrastructure::guest_link::GuestLinkCodec;

/// Invitation service
///
/// Owns the per-event invitation collection: every mutation of an
/// event's invitation list goes through here. One event's ledger is a
/// unit of mutual exclusion; callers must serialize concurrent writes
/// for the same event to uphold the duplicate-recipient rule (the store
/// is the second line of defense).
#[derive(Debug)]
pub struct InvitationService<E: EventStore, D: UserDirectory, C: GuestLinkCodec> {
    events: Arc<E>,
    users: Arc<D>,
    codec: Arc<C>,
}

impl<E: EventStore, D: UserDirectory, C: GuestLinkCodec> InvitationService<E, D, C> {
    pub fn new(events: Arc<E>, users: Arc<D>, codec: Arc<C>) -> Self {
        Self {
            events,
            users,
            codec,
        }
    }

    /// Invite the registered user behind `email` to an event
    ///
    /// Fails with `DuplicateRecipient` if the user already holds an
    /// invitation for the event; deleting the old invitation is the only
    /// way to re-invite.
    pub async fn create_invitation(
        &self,
        email: &str,
        event_id: EventId,
    ) -> Result<Invitation, DomainError> {
        info!(email = %email, event = %event_id, "Creating invitation");

        let user = self.users.find_by_email(email).await?;
        let mut event = self.events.find_by_id(event_id).await?;

        if event.has_invitation_for(RecipientId::User(user.id())) {
            return Err(DomainError::DuplicateRecipient);
        }

        let invitation = Invitation::new(Recipient::from(user), event_id);
        event.push_invitation(invitation.clone());
        self.events.save(event).await?;

        Ok(invitation)
    }

    /// Invite a list of registered users to an event, all or nothing
    ///
    /// Every address is resolved and checked against existing
    /// invitations - and against the rest of the batch - before the
    /// first invitation is written, so a failing batch leaves the event
    /// untouched.
    pub async fn create_invitations_from_list(
        &self,
        emails: &[String],
        event_id: EventId,
    ) -> Result<Vec<Invitation>, DomainError> {
        info!(count = emails.len(), event = %event_id, "Creating invitations from list");

        let mut event = self.events.find_by_id(event_id).await?;

        let mut batch = Vec::with_capacity(emails.len());
        let mut seen: HashSet<RecipientId> = HashSet::new();

        for email in emails {
            let user = self.users.find_by_email(email).await?;
            let id = RecipientId::User(user.id());

            if event.has_invitation_for(id) || !seen.insert(id) {
                return Err(DomainError::DuplicateRecipient);
            }

            batch.push(Invitation::new(Recipient::from(user), event_id));
        }

        for invitation in &batch {
            event.push_invitation(invitation.clone());
        }
        self.events.save(event).await?;

        Ok(batch)
    }

    /// Set the status of a recipient's invitation
    ///
    /// No transition is forbidden; the move is timestamped.
    pub async fn change_invitation_status(
        &self,
        event_id: EventId,
        recipient_id: RecipientId,
        status: InvitationStatus,
    ) -> Result<Invitation, DomainError> {
        info!(event = %event_id, recipient = %recipient_id, status = %status, "Changing invitation status");

        let mut event = self.events.find_by_id(event_id).await?;

        let invitation = event
            .find_invitation_mut(recipient_id)
            .ok_or_else(|| DomainError::not_found("invitation"))?;
        invitation.set_status(status);
        let updated = invitation.clone();

        self.events.save(event).await?;
        Ok(updated)
    }

    /// Find a recipient's invitation for an event
    pub async fn find_invitation(
        &self,
        event_id: EventId,
        recipient_id: RecipientId,
    ) -> Result<Invitation, DomainError> {
        let event = self.events.find_by_id(event_id).await?;

        event
            .find_invitation(recipient_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("invitation"))
    }

    /// Find the invitation of the registered user behind `email`
    pub async fn find_invitation_by_email(
        &self,
        event_id: EventId,
        email: &str,
    ) -> Result<Invitation, DomainError> {
        let user = self.users.find_by_email(email).await?;
        self.find_invitation(event_id, RecipientId::User(user.id()))
            .await
    }

    /// Remove a recipient's invitation; returns whether one was removed
    ///
    /// Absence is not an error - deletion is idempotent, unlike status
    /// changes.
    pub async fn delete_invitation(
        &self,
        recipient_id: RecipientId,
        event_id: EventId,
    ) -> Result<bool, DomainError> {
        let mut event = self.events.find_by_id(event_id).await?;

        let removed = event.remove_invitation(recipient_id);
        if removed {
            self.events.save(event).await?;
        }

        Ok(removed)
    }

    /// Invite an anonymous guest to an event
    ///
    /// Allocates the guest identity, seals its link token to
    /// (guest, event) and appends a pending invitation.
    pub async fn create_guest_invitation(
        &self,
        event_id: EventId,
        display_name: &str,
    ) -> Result<Invitation, DomainError> {
        info!(event = %event_id, name = %display_name, "Creating guest invitation");

        let mut event = self.events.find_by_id(event_id).await?;

        let mut guest = self
            .users
            .insert_guest(Guest::new(GuestId::default(), display_name, ""))
            .await?;

        let token = self.codec.encode(guest.id(), event_id)?;
        guest.set_link_token(token);
        let guest = self.users.save_guest(guest).await?;

        let invitation = Invitation::new(Recipient::from(guest), event_id);
        event.push_invitation(invitation.clone());
        self.events.save(event).await?;

        Ok(invitation)
    }

    /// Resolve a guest-link token to its invitation
    ///
    /// Internal entry point with the precise failure taxonomy; the
    /// guest-facing path is [`resolve_guest_link`](Self::resolve_guest_link).
    pub async fn resolve_guest_invitation(&self, token: &str) -> Result<Invitation, DomainError> {
        let (guest_id, event_id) = self.codec.decode(token)?;

        let event = self.events.find_by_id(event_id).await?;
        let guest = self.users.find_guest_by_id(guest_id).await?;

        event
            .find_invitation(RecipientId::Guest(guest.id()))
            .cloned()
            .ok_or_else(|| DomainError::not_found("invitation"))
    }

    /// Resolve a guest link for an anonymous caller
    ///
    /// Collapses every failure into `InvalidToken` so the caller cannot
    /// probe which event or guest exists.
    pub async fn resolve_guest_link(&self, token: &str) -> Result<Invitation, DomainError> {
        self.resolve_guest_invitation(token).await.map_err(|e| {
            debug!(error = %e, "Guest link resolution failed");
            DomainError::InvalidToken
        })
    }

    /// Set the status of the invitation behind a guest link
    pub async fn change_guest_invitation(
        &self,
        token: &str,
        status: InvitationStatus,
    ) -> Result<Invitation, DomainError> {
        let invitation = self.resolve_guest_invitation(token).await?;
        self.change_invitation_status(invitation.event_id(), invitation.recipient_id(), status)
            .await
    }

    /// An event's invitations with the given status, ordered by their
    /// last change, oldest first
    pub async fn invitations_by_status(
        &self,
        event_id: EventId,
        status: InvitationStatus,
    ) -> Result<Vec<Invitation>, DomainError> {
        let event = self.events.find_by_id(event_id).await?;
        Ok(filter_and_sort_by_status(event.invitations(), status))
    }
}
