//! Completion provider implementations.
//!
//! Contains the concrete [`LlmProvider`](botline_core::llm::LlmProvider)
//! used by both handlers: any endpoint speaking the OpenAI chat
//! completions protocol.

pub mod openai_compat;
