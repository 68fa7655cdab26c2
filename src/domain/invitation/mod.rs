//! Invitation entity and per-event invitation ordering

mod entity;

pub use entity::{filter_and_sort_by_status, Invitation, InvitationStatus};
