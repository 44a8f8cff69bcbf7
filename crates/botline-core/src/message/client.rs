//! Messaging client trait for outbound replies.
//!
//! Channels (WhatsApp Cloud API, the console) implement `MessagingClient`.
//! Inbound events reach the conversation handler as `InboundMessage`s with
//! contact metadata already resolved by the channel.

use botline_types::error::MessagingError;
use botline_types::message::OutboundReply;

/// Trait for sending replies back to a sender.
pub trait MessagingClient: Send + Sync {
    /// Channel name used in logs (e.g., "whatsapp", "console").
    fn channel(&self) -> &str;

    /// Send a single text or document reply to `recipient`.
    fn send(
        &self,
        recipient: &str,
        reply: &OutboundReply,
    ) -> impl std::future::Future<Output = Result<(), MessagingError>> + Send;
}
