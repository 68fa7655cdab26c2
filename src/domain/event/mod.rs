//! Event entity and store contract

mod entity;
mod repository;

pub use entity::{Event, EventId, Message, Place};
pub use repository::EventStore;
