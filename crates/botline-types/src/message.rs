//! Inbound and outbound chat message types.
//!
//! `InboundMessage` is what a messaging channel hands to the conversation
//! handler; `OutboundReply` is what the handler asks the channel to send.

use serde::{Deserialize, Serialize};

/// Sender id suffixes that denote group chats or broadcast channels.
const GROUP_SUFFIX: &str = "@g.us";
const BROADCAST_SUFFIX: &str = "@broadcast";
const NEWSLETTER_SUFFIX: &str = "@newsletter";

/// Contact metadata the messaging channel knows about a sender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Profile or address-book name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Whether the sender is a saved contact of the account owner.
    #[serde(default)]
    pub is_saved: bool,
}

/// A single text message received from a sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Channel-specific sender id (phone number or JID).
    pub sender: String,
    /// Free-text body.
    pub body: String,
    #[serde(default)]
    pub contact: ContactInfo,
}

impl InboundMessage {
    /// Build a message from an unsaved contact with no profile name.
    pub fn new(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
            contact: ContactInfo::default(),
        }
    }

    /// Attach contact metadata.
    pub fn with_contact(mut self, contact: ContactInfo) -> Self {
        self.contact = contact;
        self
    }

    /// Sender id belongs to a group chat.
    pub fn is_group(&self) -> bool {
        self.sender.ends_with(GROUP_SUFFIX)
    }

    /// Sender id belongs to a broadcast list, status feed or newsletter channel.
    pub fn is_broadcast(&self) -> bool {
        self.sender.ends_with(BROADCAST_SUFFIX) || self.sender.ends_with(NEWSLETTER_SUFFIX)
    }
}

/// A file-backed document ready to be sent.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Guess a MIME type from the file extension.
    pub fn mime_for(file_name: &str) -> &'static str {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => "application/pdf",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "txt" => "text/plain",
            "doc" => "application/msword",
            "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            _ => "application/octet-stream",
        }
    }
}

// Bytes are omitted so logs stay readable.
impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A reply to send back through the messaging channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundReply {
    Text(String),
    Document(Attachment),
}

impl OutboundReply {
    pub fn text(body: impl Into<String>) -> Self {
        OutboundReply::Text(body.into())
    }
}
