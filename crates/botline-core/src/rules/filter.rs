//! Sender ignore policy.
//!
//! Decides which inbound messages the conversation handler stays silent for.
//! Ignored messages get no reply and do not touch any session state.

use botline_types::config::IgnoreConfig;
use botline_types::message::InboundMessage;

/// Predicate deciding whether a message is skipped entirely.
pub trait IgnorePolicy: Send + Sync {
    fn should_ignore(&self, message: &InboundMessage) -> bool;
}

/// Any `Fn(&InboundMessage) -> bool` closure is a policy.
impl<F> IgnorePolicy for F
where
    F: Fn(&InboundMessage) -> bool + Send + Sync,
{
    fn should_ignore(&self, message: &InboundMessage) -> bool {
        self(message)
    }
}

/// Policy driven by `[conversation.ignore]` config: groups, broadcast
/// channels and saved contacts are each switchable.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredIgnorePolicy {
    config: IgnoreConfig,
}

impl ConfiguredIgnorePolicy {
    pub fn new(config: IgnoreConfig) -> Self {
        Self { config }
    }
}

impl IgnorePolicy for ConfiguredIgnorePolicy {
    fn should_ignore(&self, message: &InboundMessage) -> bool {
        (self.config.groups && message.is_group())
            || (self.config.broadcasts && message.is_broadcast())
            || (self.config.saved_contacts && message.contact.is_saved)
    }
}
