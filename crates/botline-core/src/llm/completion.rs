//! Traced single-shot completion shared by both handlers.

use tracing::{Instrument, debug, info_span};

use botline_types::llm::{CompletionRequest, LlmError};

use super::provider::LlmProvider;

/// Run one completion inside a `gen_ai.complete` span and return the
/// trimmed text. A blank completion is reported as `EmptyCompletion`.
pub async fn complete_text<P: LlmProvider>(
    provider: &P,
    request: &CompletionRequest,
) -> Result<String, LlmError> {
    let span = info_span!(
        "gen_ai.complete",
        gen_ai.system = provider.name(),
        gen_ai.request.model = %request.model,
        gen_ai.request.max_tokens = request.max_tokens,
    );

    let response = provider.complete(request).instrument(span).await?;
    debug!(
        model = %response.model,
        input_tokens = response.usage.input_tokens,
        output_tokens = response.usage.output_tokens,
        "completion received"
    );

    let text = response.content.trim();
    if text.is_empty() {
        return Err(LlmError::EmptyCompletion);
    }
    Ok(text.to_string())
}
