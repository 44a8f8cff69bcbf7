//! Configuration for the OpenAI-compatible completion provider.

use secrecy::SecretString;

use botline_types::config::LlmConfig;

/// Configuration for an OpenAI-compatible provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Provider name used in logs and spans (e.g., "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Model used when a request leaves the model empty.
    pub model: String,
}

/// Configuration from the `[llm]` section. The provider name is "openai"
/// for the default endpoint and "openai_compatible" for any other base URL.
pub fn from_llm_config(config: &LlmConfig, api_key: SecretString) -> OpenAiCompatConfig {
    let base_url = config.base_url.trim_end_matches('/').to_string();
    let provider_name = if base_url == "https://api.openai.com/v1" {
        "openai"
    } else {
        "openai_compatible"
    };
    OpenAiCompatConfig {
        provider_name: provider_name.into(),
        base_url,
        api_key,
        model: config.conversation_model.clone(),
    }
}
