//! Conversation handling: per-sender session store and the handler that
//! turns rule decisions into replies.

pub mod handler;
pub mod store;

pub use handler::{ConversationHandler, HandlerSettings};
pub use store::SessionStore;
