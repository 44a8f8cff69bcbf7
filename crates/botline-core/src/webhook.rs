//! Chat-platform webhook responder.
//!
//! Forwards the text of an inbound webhook event to the completion service
//! and wraps the answer in the platform's `output` reply shape. Every failure
//! is logged and answered with a fixed apology; nothing propagates.

use std::sync::Arc;

use tracing::{error, info};

use botline_types::error::WebhookError;
use botline_types::llm::CompletionRequest;
use botline_types::webhook::{WebhookEnvelope, WebhookResponse};

use crate::llm::{LlmProvider, complete_text};
use crate::rules::replies::WEBHOOK_APOLOGY;

/// Stateless webhook handler over a completion provider.
pub struct WebhookResponder<P: LlmProvider> {
    provider: Arc<P>,
    model: String,
    max_tokens: u32,
}

impl<P: LlmProvider> WebhookResponder<P> {
    pub fn new(provider: Arc<P>, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens,
        }
    }

    /// Answer one webhook call. Always yields a response.
    pub async fn respond(&self, body: &serde_json::Value) -> WebhookResponse {
        match self.try_respond(body).await {
            Ok(text) => WebhookResponse::text(text),
            Err(e) => {
                error!(error = %e, "webhook reply failed");
                WebhookResponse::text(WEBHOOK_APOLOGY)
            }
        }
    }

    async fn try_respond(&self, body: &serde_json::Value) -> Result<String, WebhookError> {
        let envelope: WebhookEnvelope = serde_json::from_value(body.clone())
            .map_err(|e| WebhookError::MalformedPayload(e.to_string()))?;
        let event = envelope.payload;
        info!(sender = %event.sender.phone, "webhook message received");

        let request =
            CompletionRequest::single_user(&self.model, event.payload.text, self.max_tokens);
        Ok(complete_text(self.provider.as_ref(), &request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockProvider;
    use botline_types::llm::MessageRole;
    use serde_json::json;

    fn payload(text: &str) -> serde_json::Value {
        json!({
            "payload": {
                "payload": { "text": text },
                "sender": { "phone": "919800000000" }
            }
        })
    }

    #[tokio::test]
    async fn test_forwards_text_as_single_user_message() {
        let provider = Arc::new(MockProvider::replying("Hello! How can I help?"));
        let responder = WebhookResponder::new(Arc::clone(&provider), "gpt-3.5-turbo", 256);

        let response = responder.respond(&payload("hi bot")).await;
        assert_eq!(response, WebhookResponse::text("Hello! How can I help?"));

        let request = provider.last_request().unwrap();
        assert_eq!(request.model, "gpt-3.5-turbo");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert_eq!(request.messages[0].content, "hi bot");
        assert!(request.system.is_none());
    }

    #[tokio::test]
    async fn test_malformed_payload_gets_apology_without_calling_provider() {
        let provider = Arc::new(MockProvider::replying("unused"));
        let responder = WebhookResponder::new(Arc::clone(&provider), "gpt-3.5-turbo", 256);

        let response = responder.respond(&json!({ "payload": { "sender": {} } })).await;
        assert_eq!(response, WebhookResponse::text(WEBHOOK_APOLOGY));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_gets_apology() {
        let provider = Arc::new(MockProvider::failing("connection reset"));
        let responder = WebhookResponder::new(provider, "gpt-3.5-turbo", 256);

        let response = responder.respond(&payload("hi bot")).await;
        assert_eq!(response.output.len(), 1);
        assert_eq!(response.output[0].kind, "text");
        assert_eq!(response.output[0].value, WEBHOOK_APOLOGY);
    }

    #[tokio::test]
    async fn test_empty_completion_gets_apology() {
        let provider = Arc::new(MockProvider::replying(""));
        let responder = WebhookResponder::new(provider, "gpt-3.5-turbo", 256);

        let response = responder.respond(&payload("hi bot")).await;
        assert_eq!(response, WebhookResponse::text(WEBHOOK_APOLOGY));
    }
}
