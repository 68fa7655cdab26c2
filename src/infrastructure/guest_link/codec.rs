//! Guest-link token sealing and opening
//!
//! A guest link is the sole credential of an anonymous guest, so the
//! token must be opaque and unforgeable: XChaCha20-Poly1305 over the
//! canonical `"{guest_id}-{event_id}"` plaintext, random 24-byte nonce,
//! URL-safe base64. The Poly1305 tag makes a flipped bit an
//! `InvalidToken`, never a different valid pair.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chacha20poly1305::aead::Aead;
use chacha20poly1305::{Key, KeyInit, XChaCha20Poly1305, XNonce};
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::fmt::Debug;

use crate::domain::user::GuestId;
use crate::domain::{DomainError, EventId};

const NONCE_LEN: usize = 24;
const TAG_LEN: usize = 16;

/// Configuration for the guest-link codec
#[derive(Debug, Clone)]
pub struct GuestLinkConfig {
    /// Shared secret the sealing key is derived from
    pub secret: String,
}

impl GuestLinkConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl Default for GuestLinkConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
        }
    }
}

/// Trait for guest-link token operations
pub trait GuestLinkCodec: Send + Sync + Debug {
    /// Seal (guest, event) into an opaque URL-safe token
    fn encode(&self, guest_id: GuestId, event_id: EventId) -> Result<String, DomainError>;

    /// Open a token back into its (guest, event) pair
    ///
    /// Any failure - malformed base64, tampered ciphertext, garbled
    /// plaintext - is `InvalidToken`; the reason is not distinguished.
    fn decode(&self, token: &str) -> Result<(GuestId, EventId), DomainError>;
}

/// AEAD-backed guest-link codec
#[derive(Clone)]
pub struct AeadGuestLinkCodec {
    key: Key,
}

impl Debug for AeadGuestLinkCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AeadGuestLinkCodec")
            .field("key", &"[hidden]")
            .finish()
    }
}

impl AeadGuestLinkCodec {
    /// Create a codec, deriving the sealing key from the configured
    /// secret
    pub fn new(config: GuestLinkConfig) -> Self {
        let digest = Sha256::digest(config.secret.as_bytes());
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);

        Self {
            key: Key::from(key),
        }
    }

    pub fn with_default_config() -> Self {
        Self::new(GuestLinkConfig::default())
    }
}

impl GuestLinkCodec for AeadGuestLinkCodec {
    fn encode(&self, guest_id: GuestId, event_id: EventId) -> Result<String, DomainError> {
        let cipher = XChaCha20Poly1305::new(&self.key);

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = XNonce::from(nonce_bytes);

        let plaintext = format!("{}-{}", guest_id.value(), event_id.value());
        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| DomainError::storage("guest link encryption failed"))?;

        let mut raw = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        raw.extend_from_slice(&nonce_bytes);
        raw.extend_from_slice(&ciphertext);

        Ok(URL_SAFE_NO_PAD.encode(raw))
    }

    fn decode(&self, token: &str) -> Result<(GuestId, EventId), DomainError> {
        let raw = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| DomainError::InvalidToken)?;

        if raw.len() < NONCE_LEN + TAG_LEN {
            return Err(DomainError::InvalidToken);
        }

        let (nonce_bytes, ciphertext) = raw.split_at(NONCE_LEN);
        let nonce = XNonce::from_slice(nonce_bytes);

        let cipher = XChaCha20Poly1305::new(&self.key);
        let plaintext = cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| DomainError::InvalidToken)?;

        let text = String::from_utf8(plaintext).map_err(|_| DomainError::InvalidToken)?;
        let (guest, event) = text.split_once('-').ok_or(DomainError::InvalidToken)?;

        let guest_id = guest.parse::<u64>().map_err(|_| DomainError::InvalidToken)?;
        let event_id = event.parse::<u64>().map_err(|_| DomainError::InvalidToken)?;

        Ok((GuestId::new(guest_id), EventId::new(event_id)))
    }
}
