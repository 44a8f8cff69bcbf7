use thiserror::Error;

use crate::llm::LlmError;

/// Errors from sending replies through a messaging channel.
#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("channel rejected message (status {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid recipient: '{0}'")]
    InvalidRecipient(String),

    #[error("attachment error: {0}")]
    Attachment(String),
}

/// Errors from the chat webhook path. Never surfaced to the caller.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("completion failed: {0}")]
    Completion(#[from] LlmError),
}

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(String),

    #[error("failed to parse config file: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors resolving secrets such as API keys.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("secret '{0}' is not set")]
    NotFound(String),

    #[error("secret '{0}' is empty")]
    Empty(String),
}
