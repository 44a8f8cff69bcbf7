//! GET/POST /whatsapp/webhook
//!
//! GET answers the subscription handshake. POST verifies the body signature,
//! parses the delivery and enqueues each message for the conversation
//! dispatcher. Replies go out asynchronously through the Cloud API, so the
//! POST answers 200 as soon as the messages are queued.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;

use botline_core::message::DispatchError;
use botline_infra::whatsapp::signature::constant_time_eq;
use botline_infra::whatsapp::{SIGNATURE_HEADER, parse_webhook, verify_signature};

use crate::http::error::AppError;
use crate::state::{AppState, WhatsAppWebhook};

#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

fn channel(state: &AppState) -> Result<&Arc<WhatsAppWebhook>, AppError> {
    state
        .whatsapp
        .as_ref()
        .ok_or_else(|| AppError::NotFound("WhatsApp channel is not configured".into()))
}

/// GET /whatsapp/webhook - echo `hub.challenge` when the token matches.
pub async fn verify(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Result<String, AppError> {
    let channel = channel(&state)?;

    if params.mode.as_deref() != Some("subscribe") {
        return Err(AppError::Forbidden("hub.mode must be subscribe".into()));
    }
    let token = params.verify_token.unwrap_or_default();
    if !constant_time_eq(token.as_bytes(), channel.verify_token.as_bytes()) {
        return Err(AppError::Forbidden("verify token mismatch".into()));
    }

    tracing::info!("WhatsApp webhook subscription verified");
    Ok(params.challenge.unwrap_or_default())
}

/// POST /whatsapp/webhook - queue inbound messages.
pub async fn receive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let channel = channel(&state)?;

    if let Some(secret) = &channel.app_secret {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok());
        verify_signature(secret.expose_secret().as_bytes(), &body, signature)?;
    }

    let messages = parse_webhook(&body, &channel.known_contacts)
        .map_err(|e| AppError::BadRequest(format!("invalid webhook payload: {e}")))?;

    let mut queued = 0usize;
    for message in messages {
        match channel.queue.enqueue(message) {
            Ok(()) => queued += 1,
            Err(DispatchError::QueueFull) => {}
            Err(DispatchError::Closed) => {
                return Err(AppError::Internal("conversation dispatcher stopped".into()));
            }
        }
    }

    tracing::debug!(queued, "WhatsApp delivery accepted");
    Ok(Json(json!({ "status": "ok", "queued": queued })))
}
