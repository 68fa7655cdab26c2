//! Event infrastructure: store and service

mod repository;
mod service;

pub use repository::InMemoryEventStore;
pub use service::{CreateEventRequest, EventService, UpdateEventRequest};
