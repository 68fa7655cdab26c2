//! Invitation infrastructure: the per-event ledger service

mod service;

pub use service::InvitationService;
