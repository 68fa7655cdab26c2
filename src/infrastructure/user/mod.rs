//! User infrastructure: directory, password hashing, account service

mod password;
mod repository;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::InMemoryUserDirectory;
pub use service::{RegisterUserRequest, UserService};
