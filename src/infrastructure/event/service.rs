//! Event service: events and their message boards

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::event::{Event, EventId, EventStore, Message, Place};
use crate::domain::invitation::Invitation;
use crate::domain::user::UserDirectory;
use crate::domain::DomainError;

/// Request for creating a new event
#[derive(Debug, Clone)]
pub struct CreateEventRequest {
    pub date: DateTime<Utc>,
    pub capacity: u32,
    pub place_name: String,
    pub place_address: String,
    pub creator_email: String,
}

/// Request for updating an event; unset fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateEventRequest {
    pub date: Option<DateTime<Utc>>,
    pub capacity: Option<u32>,
    pub place: Option<Place>,
}

/// Event service
#[derive(Debug)]
pub struct EventService<E: EventStore, D: UserDirectory> {
    events: Arc<E>,
    users: Arc<D>,
}

impl<E: EventStore, D: UserDirectory> EventService<E, D> {
    pub fn new(events: Arc<E>, users: Arc<D>) -> Self {
        Self { events, users }
    }

    /// Create a new event
    pub async fn create_event(&self, request: CreateEventRequest) -> Result<Event, DomainError> {
        info!(place = %request.place_name, capacity = request.capacity, "Creating event");

        let creator = self.users.find_by_email(&request.creator_email).await?;
        let event = Event::new(
            EventId::default(),
            request.date,
            request.capacity,
            Place::new(&request.place_name, &request.place_address),
            creator,
        );

        self.events.insert(event).await
    }

    /// Find an event by id
    pub async fn find_event(&self, id: EventId) -> Result<Event, DomainError> {
        self.events.find_by_id(id).await
    }

    /// Update event fields
    pub async fn update_event(
        &self,
        id: EventId,
        request: UpdateEventRequest,
    ) -> Result<Event, DomainError> {
        let mut event = self.events.find_by_id(id).await?;

        if let Some(date) = request.date {
            event.set_date(date);
        }
        if let Some(capacity) = request.capacity {
            event.set_capacity(capacity);
        }
        if let Some(place) = request.place {
            event.set_place(place);
        }

        self.events.save(event).await
    }

    /// Flip the cancellation flag
    pub async fn toggle_cancellation(&self, id: EventId) -> Result<Event, DomainError> {
        info!(event = %id, "Toggling event cancellation");

        let mut event = self.events.find_by_id(id).await?;
        event.toggle_canceled();
        self.events.save(event).await
    }

    /// Post a message to the event board
    pub async fn post_message(
        &self,
        email: &str,
        text: &str,
        id: EventId,
    ) -> Result<Message, DomainError> {
        let sender = self.users.find_by_email(email).await?;
        let mut event = self.events.find_by_id(id).await?;

        let message = Message::new(sender, text, id);
        event.add_message(message.clone());
        self.events.save(event).await?;

        Ok(message)
    }

    /// All messages posted to an event
    pub async fn messages(&self, id: EventId) -> Result<Vec<Message>, DomainError> {
        Ok(self.events.find_by_id(id).await?.messages().to_vec())
    }

    /// All invitations attached to an event
    pub async fn invitations(&self, id: EventId) -> Result<Vec<Invitation>, DomainError> {
        Ok(self.events.find_by_id(id).await?.invitations().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::event::repository::InMemoryEventStore;
    use crate::infrastructure::user::{
        Argon2Hasher, InMemoryUserDirectory, RegisterUserRequest, UserService,
    };

    async fn service() -> EventService<InMemoryEventStore, InMemoryUserDirectory> {
        let directory = Arc::new(InMemoryUserDirectory::new());
        let users = UserService::new(directory.clone(), Arc::new(Argon2Hasher::new()));
        users
            .register(RegisterUserRequest {
                name: "Ivan".to_string(),
                surname: "Stastny".to_string(),
                email: "is@gmail.com".to_string(),
                password: "correct horse battery".to_string(),
            })
            .await
            .unwrap();

        EventService::new(Arc::new(InMemoryEventStore::new()), directory)
    }

    fn request() -> CreateEventRequest {
        CreateEventRequest {
            date: Utc::now(),
            capacity: 6,
            place_name: "Profinit".to_string(),
            place_address: "Tychonova 2".to_string(),
            creator_email: "is@gmail.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_event() {
        let service = service().await;

        let event = service.create_event(request()).await.unwrap();

        assert_eq!(event.capacity(), 6);
        assert_eq!(event.creator().email(), "is@gmail.com");
        assert!(!event.is_canceled());
    }

    #[tokio::test]
    async fn test_create_event_unknown_creator() {
        let service = service().await;
        let mut bad = request();
        bad.creator_email = "nobody@gmail.com".to_string();

        assert_eq!(
            service.create_event(bad).await.unwrap_err(),
            DomainError::not_found("user")
        );
    }

    #[tokio::test]
    async fn test_update_event() {
        let service = service().await;
        let event = service.create_event(request()).await.unwrap();

        let updated = service
            .update_event(
                event.id(),
                UpdateEventRequest {
                    capacity: Some(12),
                    place: Some(Place::new("Sportoviste", "Nova 1")),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.capacity(), 12);
        assert_eq!(updated.place().name, "Sportoviste");
        assert_eq!(updated.date(), event.date());
    }

    #[tokio::test]
    async fn test_toggle_cancellation() {
        let service = service().await;
        let event = service.create_event(request()).await.unwrap();

        let canceled = service.toggle_cancellation(event.id()).await.unwrap();
        assert!(canceled.is_canceled());

        let restored = service.toggle_cancellation(event.id()).await.unwrap();
        assert!(!restored.is_canceled());
    }

    #[tokio::test]
    async fn test_post_and_list_messages() {
        let service = service().await;
        let event = service.create_event(request()).await.unwrap();

        let message = service
            .post_message("is@gmail.com", "Testuji", event.id())
            .await
            .unwrap();
        assert_eq!(message.text(), "Testuji");

        let messages = service.messages(event.id()).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender().email(), "is@gmail.com");
    }

    #[tokio::test]
    async fn test_messages_for_missing_event() {
        let service = service().await;
        assert_eq!(
            service.messages(EventId::new(42)).await.unwrap_err(),
            DomainError::not_found("event")
        );
    }
}
