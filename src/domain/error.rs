use thiserror::Error;

/// Core domain errors
///
/// Presentation collaborators map these to user-visible statuses by
/// variant and `kind`, never by message text. All variants are
/// recoverable by the caller; the core never panics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{kind} not found")]
    NotFound { kind: String },

    #[error("{kind} already exists")]
    AlreadyExists { kind: String },

    #[error("Validation error: {reason}")]
    Validation { reason: String },

    #[error("Guest link is invalid or expired")]
    InvalidToken,

    #[error("Recipient already has an invitation for this event")]
    DuplicateRecipient,

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(kind: impl Into<String>) -> Self {
        Self::NotFound { kind: kind.into() }
    }

    pub fn already_exists(kind: impl Into<String>) -> Self {
        Self::AlreadyExists { kind: kind.into() }
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// The entity kind a not-found / already-exists error refers to
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::NotFound { kind } | Self::AlreadyExists { kind } => Some(kind),
            _ => None,
        }
    }
}
