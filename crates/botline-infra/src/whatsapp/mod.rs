//! WhatsApp Cloud API channel: outbound client, inbound payload parser and
//! webhook signature verification.

pub mod client;
pub mod inbound;
pub mod signature;

pub use client::WhatsAppCloudClient;
pub use inbound::{KnownContacts, parse_webhook};
pub use signature::{SIGNATURE_HEADER, SignatureError, verify_signature};
