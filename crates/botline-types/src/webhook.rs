//! Wire shapes for the inbound chat webhook.
//!
//! Request: `{ "payload": { "payload": { "text": .. }, "sender": { "phone": .. } } }`
//! Response: `{ "output": [{ "type": "text", "value": .. }] }`

use serde::{Deserialize, Serialize};

/// Top-level webhook body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEnvelope {
    pub payload: WebhookEvent,
}

/// The message event inside the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub payload: WebhookText,
    pub sender: WebhookSender,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookText {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookSender {
    pub phone: String,
}

/// One item in the webhook response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

/// Body returned for every webhook call, success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub output: Vec<OutputItem>,
}

impl WebhookResponse {
    /// A response carrying a single text item.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            output: vec![OutputItem {
                kind: "text".to_string(),
                value: value.into(),
            }],
        }
    }
}
