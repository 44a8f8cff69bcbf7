//! Conversation rules: ignore policy, fixed patterns, reply texts and the
//! ordered evaluator.

pub mod engine;
pub mod filter;
pub mod patterns;
pub mod replies;

pub use engine::{Action, Decision, Rule, RuleEngine, RULE_ORDER};
pub use filter::{ConfiguredIgnorePolicy, IgnorePolicy};
