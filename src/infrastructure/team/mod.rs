//! Team infrastructure: store and service

mod repository;
mod service;

pub use repository::InMemoryTeamStore;
pub use service::{CreateTeamRequest, TeamService};
