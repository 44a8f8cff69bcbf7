//! LlmProvider trait definition.
//!
//! This is the completion-service port. Uses RPITIT for `complete`, so the
//! handlers stay generic over the concrete provider.

use botline_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for completion-service backends (OpenAI and compatible APIs).
///
/// Implementations live in botline-infra (e.g., `OpenAiCompatibleProvider`).
/// A failed call is returned as `LlmError`; callers decide the fallback reply.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
