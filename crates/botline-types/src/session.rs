//! Per-sender conversation state.
//!
//! A `Session` is created the first time a sender gets past the ignore
//! filter and lives for the rest of the process. Nothing is persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a sender is in the bank-identification flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// No institution question has been asked yet.
    #[default]
    Start,
    /// The sender was asked which institution they represent.
    AskedBank,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Start => write!(f, "start"),
            Stage::AskedBank => write!(f, "asked_bank"),
        }
    }
}

/// Conversation flags tracked for a single sender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub stage: Stage,
    /// The sender named a recognised institution.
    pub bank_confirmed: bool,
    /// The sender was offered the supporting documents.
    pub asked_for_file: bool,
    /// Documents were delivered. Never reset once true.
    pub file_sent: bool,
    /// The signature line has already been sent once.
    pub greeted: bool,
}

impl Session {
    /// True when an affirmative reply should trigger document delivery.
    pub fn awaiting_document_confirmation(&self) -> bool {
        self.asked_for_file && !self.file_sent
    }
}
