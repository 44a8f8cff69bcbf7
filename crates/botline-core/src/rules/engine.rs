//! Conversation rule engine.
//!
//! Evaluates the ordered rule table against one inbound message and the
//! sender's session. The first rule whose guard matches fires; its
//! synchronous state changes are applied to the session before `evaluate`
//! returns. Side effects that need IO (sending, completion calls) are
//! described by the returned [`Action`] and carried out by the caller.

use std::fmt;

use botline_types::config::ConversationConfig;
use botline_types::message::InboundMessage;
use botline_types::session::{Session, Stage};

use crate::chat::store::SessionStore;

use super::filter::{ConfiguredIgnorePolicy, IgnorePolicy};
use super::{patterns, replies};

/// Default number of identical messages tolerated before the repetition notice.
pub const DEFAULT_REPEAT_LIMIT: u32 = 2;

/// The rules, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Ignore,
    RepetitionGuard,
    Greeting,
    ThreatDetection,
    BankCapture,
    DocumentDelivery,
    InitialBankQuery,
    Fallback,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::Ignore => "ignore",
            Rule::RepetitionGuard => "repetition_guard",
            Rule::Greeting => "greeting",
            Rule::ThreatDetection => "threat_detection",
            Rule::BankCapture => "bank_capture",
            Rule::DocumentDelivery => "document_delivery",
            Rule::InitialBankQuery => "initial_bank_query",
            Rule::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// Full priority order. `Ignore` is checked before a session is touched and
/// `Fallback` applies when no guarded rule in between matches.
pub const RULE_ORDER: [Rule; 8] = [
    Rule::Ignore,
    Rule::RepetitionGuard,
    Rule::Greeting,
    Rule::ThreatDetection,
    Rule::BankCapture,
    Rule::DocumentDelivery,
    Rule::InitialBankQuery,
    Rule::Fallback,
];

/// What the handler must do for the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Stay silent.
    None,
    /// Send a fixed text reply.
    Reply(String),
    /// Send the configured attachments followed by the explanation text.
    DeliverDocuments,
    /// Ask the completion service and reply with its answer.
    Complete { prompt: String },
}

/// The rule that fired and the action it requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub rule: Rule,
    pub action: Action,
}

impl Decision {
    fn new(rule: Rule, action: Action) -> Self {
        Self { rule, action }
    }
}

/// Inputs visible to a session-scoped rule.
struct RuleContext<'a> {
    text: &'a str,
    repeat_count: u32,
    session: &'a mut Session,
}

/// Ordered guard/action evaluator.
pub struct RuleEngine {
    policy: Box<dyn IgnorePolicy>,
    repeat_limit: u32,
}

impl RuleEngine {
    pub fn new(policy: impl IgnorePolicy + 'static, repeat_limit: u32) -> Self {
        Self {
            policy: Box::new(policy),
            repeat_limit,
        }
    }

    /// Engine using the configured ignore switches and repeat limit.
    pub fn from_config(config: &ConversationConfig) -> Self {
        Self::new(
            ConfiguredIgnorePolicy::new(config.ignore.clone()),
            config.repeat_limit,
        )
    }

    /// Decide what to do with `message`, updating the sender's state in `store`.
    pub fn evaluate(&self, store: &SessionStore, message: &InboundMessage) -> Decision {
        if self.policy.should_ignore(message) {
            return Decision::new(Rule::Ignore, Action::None);
        }

        let repeat_count = store.record_message(&message.sender, &message.body);

        store.update(&message.sender, |session| {
            let mut ctx = RuleContext {
                text: &message.body,
                repeat_count,
                session,
            };
            RULE_ORDER[1..RULE_ORDER.len() - 1]
                .iter()
                .find_map(|rule| self.fire(*rule, &mut ctx).map(|a| Decision::new(*rule, a)))
                .unwrap_or_else(|| {
                    Decision::new(
                        Rule::Fallback,
                        Action::Complete {
                            prompt: message.body.clone(),
                        },
                    )
                })
        })
    }

    /// Run one guarded rule: `None` if its guard does not match.
    fn fire(&self, rule: Rule, ctx: &mut RuleContext<'_>) -> Option<Action> {
        match rule {
            // handled by `evaluate` around the table walk
            Rule::Ignore | Rule::Fallback => None,

            Rule::RepetitionGuard => (ctx.repeat_count > self.repeat_limit)
                .then(|| Action::Reply(replies::REPETITION_NOTICE.to_string())),

            Rule::Greeting => {
                if !greets(ctx) {
                    return None;
                }
                let mut reply = replies::UNAVAILABLE.to_string();
                if !ctx.session.greeted {
                    reply.push_str(replies::SIGNATURE);
                }
                ctx.session.greeted = true;
                Some(Action::Reply(reply))
            }

            Rule::ThreatDetection => patterns::is_threat(ctx.text)
                .then(|| Action::Reply(replies::THREAT_NOTICE.to_string())),

            Rule::BankCapture => {
                if ctx.session.bank_confirmed || !patterns::mentions_bank(ctx.text) {
                    return None;
                }
                ctx.session.bank_confirmed = true;
                ctx.session.asked_for_file = true;
                Some(Action::Reply(replies::ASK_FOR_DOCUMENT.to_string()))
            }

            // file_sent is only set by the handler once delivery succeeds
            Rule::DocumentDelivery => (ctx.session.awaiting_document_confirmation()
                && patterns::is_affirmative(ctx.text))
            .then_some(Action::DeliverDocuments),

            Rule::InitialBankQuery => {
                if ctx.session.stage != Stage::Start {
                    return None;
                }
                ctx.session.stage = Stage::AskedBank;
                Some(Action::Reply(replies::ASK_BANK.to_string()))
            }
        }
    }
}

/// Greeting tokens always count as greetings. Other short messages do too,
/// unless they are exactly what a later rule is waiting for: an institution
/// name before one is confirmed, an affirmative while documents are on
/// offer, or a threat.
fn greets(ctx: &RuleContext<'_>) -> bool {
    if patterns::is_greeting_token(ctx.text) {
        return true;
    }
    if !patterns::is_short(ctx.text) {
        return false;
    }
    let awaited = (!ctx.session.bank_confirmed && patterns::mentions_bank(ctx.text))
        || (ctx.session.awaiting_document_confirmation() && patterns::is_affirmative(ctx.text))
        || patterns::is_threat(ctx.text);
    !awaited
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(ConfiguredIgnorePolicy::default(), DEFAULT_REPEAT_LIMIT)
    }
}

impl fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEngine")
            .field("repeat_limit", &self.repeat_limit)
            .finish_non_exhaustive()
    }
}
