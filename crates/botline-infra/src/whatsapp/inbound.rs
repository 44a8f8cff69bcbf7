//! Cloud API webhook payload parsing.
//!
//! A delivery looks like `{"entry":[{"changes":[{"value":{"contacts":[..],
//! "messages":[..]}}]}]}`. Text, quick-reply button and interactive
//! (button/list) replies become [`InboundMessage`]s; every other message
//! type, and status-only updates, are skipped.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use tracing::debug;

use botline_types::message::{ContactInfo, InboundMessage};

#[derive(Debug, Deserialize)]
struct CloudWebhook {
    #[serde(default)]
    entry: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    changes: Vec<Change>,
}

#[derive(Debug, Deserialize)]
struct Change {
    #[serde(default)]
    value: ChangeValue,
}

#[derive(Debug, Default, Deserialize)]
struct ChangeValue {
    #[serde(default)]
    contacts: Vec<CloudContact>,
    #[serde(default)]
    messages: Vec<CloudMessage>,
}

#[derive(Debug, Deserialize)]
struct CloudContact {
    wa_id: String,
    #[serde(default)]
    profile: Option<Profile>,
}

#[derive(Debug, Deserialize)]
struct Profile {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CloudMessage {
    from: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<TextBody>,
    #[serde(default)]
    button: Option<ButtonBody>,
    #[serde(default)]
    interactive: Option<Interactive>,
}

#[derive(Debug, Deserialize)]
struct TextBody {
    body: String,
}

#[derive(Debug, Deserialize)]
struct ButtonBody {
    text: String,
}

#[derive(Debug, Deserialize)]
struct Interactive {
    #[serde(default)]
    button_reply: Option<ReplyTitle>,
    #[serde(default)]
    list_reply: Option<ReplyTitle>,
}

#[derive(Debug, Deserialize)]
struct ReplyTitle {
    title: String,
}

impl CloudMessage {
    fn text(&self) -> Option<&str> {
        let text = match self.kind.as_str() {
            "text" => self.text.as_ref().map(|t| t.body.as_str()),
            "button" => self.button.as_ref().map(|b| b.text.as_str()),
            "interactive" => self.interactive.as_ref().and_then(|i| {
                i.button_reply
                    .as_ref()
                    .or(i.list_reply.as_ref())
                    .map(|r| r.title.as_str())
            }),
            _ => None,
        }?;
        let text = text.trim();
        (!text.is_empty()).then_some(text)
    }
}

/// Keep only the digits of a phone number or WhatsApp id.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Phone numbers treated as saved contacts, compared digits-only.
#[derive(Debug, Clone, Default)]
pub struct KnownContacts {
    numbers: HashSet<String>,
}

impl KnownContacts {
    pub fn new<I, S>(numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            numbers: numbers
                .into_iter()
                .map(|n| normalize_phone(n.as_ref()))
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, phone: &str) -> bool {
        self.numbers.contains(&normalize_phone(phone))
    }
}

/// Parse a raw webhook body into inbound messages, in delivery order.
pub fn parse_webhook(
    body: &[u8],
    known: &KnownContacts,
) -> Result<Vec<InboundMessage>, serde_json::Error> {
    let webhook: CloudWebhook = serde_json::from_slice(body)?;
    let mut out = Vec::new();

    for change in webhook.entry.iter().flat_map(|e| e.changes.iter()) {
        let names: HashMap<String, String> = change
            .value
            .contacts
            .iter()
            .filter_map(|c| {
                let name = c.profile.as_ref()?.name.as_deref()?.trim();
                (!name.is_empty()).then(|| (normalize_phone(&c.wa_id), name.to_string()))
            })
            .collect();

        for message in &change.value.messages {
            let Some(text) = message.text() else {
                debug!(kind = %message.kind, "skipping unsupported message type");
                continue;
            };
            let sender = normalize_phone(&message.from);
            let contact = ContactInfo {
                display_name: names.get(&sender).cloned(),
                is_saved: known.contains(&sender),
            };
            out.push(InboundMessage::new(sender, text).with_contact(contact));
        }
    }

    Ok(out)
}
