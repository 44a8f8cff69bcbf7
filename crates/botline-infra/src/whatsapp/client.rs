//! Outbound WhatsApp Cloud API client.
//!
//! Text replies go to `POST {api_base}/{phone_number_id}/messages`.
//! Documents are uploaded to `{api_base}/{phone_number_id}/media` first and
//! then sent as a `document` message referencing the returned media id.

use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use botline_core::message::MessagingClient;
use botline_types::config::WhatsAppConfig;
use botline_types::error::MessagingError;
use botline_types::message::{Attachment, OutboundReply};

use super::inbound::normalize_phone;

#[derive(Debug, Deserialize)]
struct MediaUpload {
    id: String,
}

/// Cloud API messaging client.
///
/// Does NOT derive Debug: it holds the access token.
pub struct WhatsAppCloudClient {
    http: reqwest::Client,
    api_base: String,
    phone_number_id: String,
    access_token: SecretString,
}

impl WhatsAppCloudClient {
    pub fn new(
        api_base: impl Into<String>,
        phone_number_id: impl Into<String>,
        access_token: SecretString,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            phone_number_id: phone_number_id.into(),
            access_token,
        }
    }

    pub fn from_config(config: &WhatsAppConfig, access_token: SecretString) -> Self {
        Self::new(&config.api_base, &config.phone_number_id, access_token)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{path}", self.api_base, self.phone_number_id)
    }

    async fn post_message(&self, payload: &Value) -> Result<(), MessagingError> {
        let response = self
            .http
            .post(self.endpoint("messages"))
            .bearer_auth(self.access_token.expose_secret())
            .json(payload)
            .send()
            .await
            .map_err(|e| MessagingError::Transport(e.to_string()))?;
        check_status(response).await?;
        Ok(())
    }

    async fn upload_media(&self, attachment: &Attachment) -> Result<String, MessagingError> {
        let part = Part::bytes(attachment.bytes.clone())
            .file_name(attachment.file_name.clone())
            .mime_str(&attachment.mime_type)
            .map_err(|e| MessagingError::Attachment(e.to_string()))?;
        let form = Form::new()
            .text("messaging_product", "whatsapp")
            .text("type", attachment.mime_type.clone())
            .part("file", part);

        let response = self
            .http
            .post(self.endpoint("media"))
            .bearer_auth(self.access_token.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| MessagingError::Transport(e.to_string()))?;
        let body = check_status(response).await?;

        let upload: MediaUpload = serde_json::from_str(&body)
            .map_err(|e| MessagingError::Attachment(format!("unexpected media response: {e}")))?;
        debug!(media_id = %upload.id, file = %attachment.file_name, "media uploaded");
        Ok(upload.id)
    }
}

/// Return the body of a 2xx response, or `Rejected` with status and body.
async fn check_status(response: reqwest::Response) -> Result<String, MessagingError> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if status.is_success() {
        Ok(body)
    } else {
        Err(MessagingError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

fn text_payload(to: &str, body: &str) -> Value {
    json!({
        "messaging_product": "whatsapp",
        "recipient_type": "individual",
        "to": to,
        "type": "text",
        "text": { "preview_url": false, "body": body },
    })
}

fn document_payload(to: &str, media_id: &str, file_name: &str) -> Value {
    json!({
        "messaging_product": "whatsapp",
        "recipient_type": "individual",
        "to": to,
        "type": "document",
        "document": { "id": media_id, "filename": file_name },
    })
}

impl MessagingClient for WhatsAppCloudClient {
    fn channel(&self) -> &str {
        "whatsapp"
    }

    async fn send(&self, recipient: &str, reply: &OutboundReply) -> Result<(), MessagingError> {
        let to = normalize_phone(recipient);
        if to.is_empty() {
            return Err(MessagingError::InvalidRecipient(recipient.to_string()));
        }

        match reply {
            OutboundReply::Text(body) => self.post_message(&text_payload(&to, body)).await,
            OutboundReply::Document(attachment) => {
                let media_id = self.upload_media(attachment).await?;
                self.post_message(&document_payload(&to, &media_id, &attachment.file_name))
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(base: &str) -> WhatsAppCloudClient {
        WhatsAppCloudClient::new(base, "1234567890", SecretString::from("token-abc".to_string()))
    }

    #[test]
    fn test_text_payload_shape() {
        let payload = text_payload("919800000000", "hello");
        assert_eq!(payload["messaging_product"], "whatsapp");
        assert_eq!(payload["type"], "text");
        assert_eq!(payload["to"], "919800000000");
        assert_eq!(payload["text"]["body"], "hello");
    }

    #[test]
    fn test_document_payload_shape() {
        let payload = document_payload("919800000000", "media-9", "letter.pdf");
        assert_eq!(payload["type"], "document");
        assert_eq!(payload["document"]["id"], "media-9");
        assert_eq!(payload["document"]["filename"], "letter.pdf");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let c = client("https://graph.facebook.com/v21.0/");
        assert_eq!(
            c.endpoint("messages"),
            "https://graph.facebook.com/v21.0/1234567890/messages"
        );
    }

    #[tokio::test]
    async fn test_invalid_recipient() {
        let err = client("http://127.0.0.1:9")
            .send("not-a-number", &OutboundReply::text("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, MessagingError::InvalidRecipient(_)));
    }

    #[tokio::test]
    async fn test_send_text_posts_message() {
        let server = MockServer::start_async().await;
        let messages = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/1234567890/messages")
                    .header("authorization", "Bearer token-abc")
                    .body_includes(r#""to":"919800000000""#)
                    .body_includes(r#""type":"text""#)
                    .body_includes("hello there");
                then.status(200)
                    .json_body(json!({"messages": [{"id": "wamid.1"}]}));
            })
            .await;

        client(&server.base_url())
            .send("+91 98000 00000", &OutboundReply::text("hello there"))
            .await
            .unwrap();

        messages.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_status_is_reported() {
        let server = MockServer::start_async().await;
        let messages = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/1234567890/messages")
                    .header("authorization", "Bearer token-abc");
                then.status(400)
                    .json_body(json!({"error": {"message": "bad"}}));
            })
            .await;

        let err = client(&server.base_url())
            .send("919800000000", &OutboundReply::text("hello"))
            .await
            .unwrap_err();

        messages.assert_async().await;
        match err {
            MessagingError::Rejected { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("bad"));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_document_uploads_then_posts() {
        let server = MockServer::start_async().await;
        let upload = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/1234567890/media")
                    .header("authorization", "Bearer token-abc")
                    .body_includes(r#"name="messaging_product""#)
                    .body_includes(r#"filename="hardship_letter.pdf""#)
                    .body_includes("%PDF-1.4");
                then.status(200).json_body(json!({"id": "media-42"}));
            })
            .await;
        let message = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/1234567890/messages")
                    .header("authorization", "Bearer token-abc")
                    .body_includes(r#""type":"document""#)
                    .body_includes(r#""id":"media-42""#)
                    .body_includes(r#""filename":"hardship_letter.pdf""#);
                then.status(200)
                    .json_body(json!({"messages": [{"id": "wamid.2"}]}));
            })
            .await;

        let attachment = Attachment {
            file_name: "hardship_letter.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            bytes: b"%PDF-1.4".to_vec(),
        };
        client(&server.base_url())
            .send("919800000000", &OutboundReply::Document(attachment))
            .await
            .unwrap();

        upload.assert_async().await;
        message.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_upload_sends_no_message() {
        let server = MockServer::start_async().await;
        let upload = server
            .mock_async(|when, then| {
                when.method(POST).path("/1234567890/media");
                then.status(500).body("upstream error");
            })
            .await;
        let message = server
            .mock_async(|when, then| {
                when.method(POST).path("/1234567890/messages");
                then.status(200).json_body(json!({"messages": []}));
            })
            .await;

        let attachment = Attachment {
            file_name: "hardship_letter.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            bytes: b"%PDF-1.4".to_vec(),
        };
        let err = client(&server.base_url())
            .send("919800000000", &OutboundReply::Document(attachment))
            .await
            .unwrap_err();

        assert!(matches!(err, MessagingError::Rejected { status: 500, .. }));
        upload.assert_async().await;
        assert_eq!(message.calls_async().await, 0);
    }
}
