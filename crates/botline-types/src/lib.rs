//! Shared domain types for botline.
//!
//! Sessions, chat messages, webhook wire shapes, completion requests,
//! configuration and their error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod llm;
pub mod message;
pub mod session;
pub mod webhook;
