//! Identity value types: registered users, guests, recipients

mod entity;
mod recipient;
mod repository;
mod validation;

pub use entity::{RegisteredUser, Role, UserId};
pub use recipient::{Guest, GuestId, Recipient, RecipientId};
pub use repository::UserDirectory;
pub use validation::{
    validate_email, validate_password, validate_person_name, UserValidationError,
};
