//! Business logic and port definitions for botline.
//!
//! This crate defines the traits (completion provider, messaging client,
//! filesystem) that the infrastructure layer implements, plus the rule
//! engine and both handlers. It depends only on `botline-types` -- never on
//! `botline-infra` or any network/IO crate.

pub mod chat;
pub mod llm;
pub mod message;
pub mod rules;
pub mod service;
pub mod webhook;

#[cfg(test)]
mod testing;
