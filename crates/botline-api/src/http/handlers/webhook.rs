//! POST /gupshup-webhook

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;

use botline_types::webhook::WebhookResponse;

use crate::state::AppState;

/// Answer a chat-platform webhook call.
///
/// Takes the raw body so that an unparseable payload still gets the apology
/// reply with status 200 instead of an extractor rejection.
pub async fn gupshup_webhook(State(state): State<AppState>, body: Bytes) -> Json<WebhookResponse> {
    let payload = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    Json(state.responder.respond(&payload).await)
}
