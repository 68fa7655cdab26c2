//! Guest-link codec: the encrypted credential for anonymous guests

mod codec;

pub use codec::{AeadGuestLinkCodec, GuestLinkCodec, GuestLinkConfig};
