//! In-memory session store and repetition counter.
//!
//! Both maps are keyed by sender id and live for the process lifetime.
//! Every read-modify-write runs under a single `DashMap` entry guard; the
//! guard is never held across an `.await`.

use dashmap::DashMap;

use botline_types::session::Session;

/// Per-sender sessions plus a (sender, exact text) repetition counter.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    /// (sender, exact message text) -> times seen.
    repeats: DashMap<(String, String), u32>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `text` from `sender` and return the new total.
    pub fn record_message(&self, sender: &str, text: &str) -> u32 {
        let mut entry = self
            .repeats
            .entry((sender.to_string(), text.to_string()))
            .or_insert(0);
        *entry += 1;
        *entry
    }

    /// How many times `sender` has sent exactly `text`.
    pub fn repeat_count(&self, sender: &str, text: &str) -> u32 {
        self.repeats
            .get(&(sender.to_string(), text.to_string()))
            .map(|c| *c)
            .unwrap_or(0)
    }

    /// Run `f` against the sender's session, creating a default one first
    /// if the sender has none.
    pub fn update<R>(&self, sender: &str, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut entry = self.sessions.entry(sender.to_string()).or_default();
        f(entry.value_mut())
    }

    /// Snapshot of the sender's session, if one exists.
    pub fn get(&self, sender: &str) -> Option<Session> {
        self.sessions.get(sender).map(|s| s.clone())
    }

    /// Record that documents were delivered to `sender`.
    pub fn mark_file_sent(&self, sender: &str) {
        self.update(sender, |session| session.file_sent = true);
    }

    /// Number of senders with a session.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.sessions.len())
            .field("tracked_messages", &self.repeats.len())
            .finish()
    }
}
