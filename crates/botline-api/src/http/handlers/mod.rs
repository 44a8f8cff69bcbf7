//! Route handlers.

pub mod webhook;
pub mod whatsapp;
