pub mod completion;
pub mod provider;

pub use completion::complete_text;
pub use provider::LlmProvider;
