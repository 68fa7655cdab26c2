//! Sport Team Manager
//!
//! Core engine for managing sports teams and event invitations:
//! - Team membership consistency: teams, subgroups, the reserved
//!   "All Users" / "Coaches" subgroups and ownership rules
//! - Invitation lifecycle: per-event invitation ledger with anonymous
//!   guest access through encrypted, unguessable links
//!
//! HTTP routing, database persistence and UI rendering are external
//! collaborators; the crate exposes services over abstract stores
//! (`UserDirectory`, `EventStore`, `TeamStore`) with in-memory
//! implementations included.

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;

use infrastructure::event::{EventService, InMemoryEventStore};
use infrastructure::guest_link::{AeadGuestLinkCodec, GuestLinkConfig};
use infrastructure::invitation::InvitationService;
use infrastructure::team::{InMemoryTeamStore, TeamService};
use infrastructure::user::{Argon2Hasher, InMemoryUserDirectory, UserService};

/// Application services wired over the in-memory stores
#[derive(Debug)]
pub struct App {
    pub users: UserService<InMemoryUserDirectory, Argon2Hasher>,
    pub teams: TeamService<InMemoryTeamStore, InMemoryUserDirectory>,
    pub events: EventService<InMemoryEventStore, InMemoryUserDirectory>,
    pub invitations:
        InvitationService<InMemoryEventStore, InMemoryUserDirectory, AeadGuestLinkCodec>,
}

/// Wire all services over shared in-memory stores
pub fn build_app(config: &AppConfig) -> App {
    let directory = Arc::new(InMemoryUserDirectory::new());
    let teams = Arc::new(InMemoryTeamStore::new());
    let events = Arc::new(InMemoryEventStore::new());
    let hasher = Arc::new(Argon2Hasher::new());
    let codec = Arc::new(AeadGuestLinkCodec::new(GuestLinkConfig::new(
        config.guest_link.secret.as_str(),
    )));

    App {
        users: UserService::new(directory.clone(), hasher),
        teams: TeamService::new(teams, directory.clone()),
        events: EventService::new(events.clone(), directory.clone()),
        invitations: InvitationService::new(events, directory, codec),
    }
}

/// Load configuration from the environment and wire the application
///
/// Reads `.env`, the layered config files and `APP__`-prefixed
/// environment variables, then initializes logging.
pub fn bootstrap() -> anyhow::Result<App> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    infrastructure::logging::init_logging(&config.logging);

    Ok(build_app(&config))
}
