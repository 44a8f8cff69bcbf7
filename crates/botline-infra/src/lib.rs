//! Infrastructure layer for botline.
//!
//! Contains implementations of the ports defined in `botline-core`: the
//! OpenAI-compatible completion provider, the WhatsApp Cloud API channel and
//! the local filesystem adapter. Also loads configuration and resolves
//! secrets from the environment.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod secret;
pub mod whatsapp;
