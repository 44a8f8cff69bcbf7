//! HTTP layer for botline.
//!
//! Axum routes for the chat-platform webhook and the WhatsApp Cloud API
//! webhook, plus a health check.

pub mod error;
pub mod handlers;
pub mod router;
