//! Configuration types for botline.
//!
//! `BotlineConfig` represents `botline.toml`. Every field has a default, so
//! an empty or missing file yields a runnable configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotlineConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub conversation: ConversationConfig,

    /// WhatsApp Cloud API channel. The `/whatsapp/webhook` routes are only
    /// mounted when this section is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<WhatsAppConfig>,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Completion service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Model used by the chat webhook.
    #[serde(default = "default_webhook_model")]
    pub webhook_model: String,
    /// Model used by the conversation fallback rule.
    #[serde(default = "default_conversation_model")]
    pub conversation_model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_webhook_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_conversation_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    512
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            webhook_model: default_webhook_model(),
            conversation_model: default_conversation_model(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Conversation rule engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Identical messages allowed before the repetition notice fires.
    #[serde(default = "default_repeat_limit")]
    pub repeat_limit: u32,
    /// Documents offered to senders. Only the first two are sent.
    #[serde(default = "default_attachments")]
    pub attachments: Vec<PathBuf>,
    /// Numbers quoted when the completion service is unavailable.
    #[serde(default = "default_contact_numbers")]
    pub contact_numbers: Vec<String>,
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

fn default_repeat_limit() -> u32 {
    2
}

fn default_attachments() -> Vec<PathBuf> {
    vec![
        PathBuf::from("documents/hardship_letter.pdf"),
        PathBuf::from("documents/income_statement.pdf"),
    ]
}

fn default_contact_numbers() -> Vec<String> {
    vec!["+91 00000 00000".to_string(), "+91 11111 11111".to_string()]
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            repeat_limit: default_repeat_limit(),
            attachments: default_attachments(),
            contact_numbers: default_contact_numbers(),
            ignore: IgnoreConfig::default(),
        }
    }
}

/// Which senders the conversation handler stays silent for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IgnoreConfig {
    #[serde(default = "default_true")]
    pub groups: bool,
    #[serde(default = "default_true")]
    pub broadcasts: bool,
    #[serde(default = "default_true")]
    pub saved_contacts: bool,
}

fn default_true() -> bool {
    true
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            groups: true,
            broadcasts: true,
            saved_contacts: true,
        }
    }
}

/// WhatsApp Cloud API channel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    pub phone_number_id: String,
    /// Token echoed back during webhook subscription.
    pub verify_token: String,
    #[serde(default = "default_access_token_env")]
    pub access_token_env: String,
    /// Environment variable holding the app secret for signature checks.
    /// Signatures are not verified when the variable is unset.
    #[serde(default = "default_app_secret_env")]
    pub app_secret_env: String,
    #[serde(default = "default_graph_api_base")]
    pub api_base: String,
    /// Phone numbers treated as saved contacts.
    #[serde(default)]
    pub known_contacts: Vec<String>,
}

fn default_access_token_env() -> String {
    "WHATSAPP_ACCESS_TOKEN".to_string()
}

fn default_app_secret_env() -> String {
    "WHATSAPP_APP_SECRET".to_string()
}

fn default_graph_api_base() -> String {
    "https://graph.facebook.com/v21.0".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = BotlineConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.llm.webhook_model, "gpt-3.5-turbo");
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.conversation.repeat_limit, 2);
        assert_eq!(config.conversation.attachments.len(), 2);
        assert!(config.conversation.ignore.saved_contacts);
        assert!(config.whatsapp.is_none());
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config: BotlineConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.llm.conversation_model, "gpt-4o-mini");
    }

    #[test]
    fn test_config_deserialize_with_values() {
        let toml_str = r#"
[server]
port = 8080

[llm]
webhook_model = "gpt-4o"

[conversation]
repeat_limit = 3
attachments = ["a.pdf"]

[conversation.ignore]
saved_contacts = false

[whatsapp]
phone_number_id = "1234"
verify_token = "tok"
known_contacts = ["919800000000"]
"#;
        let config: BotlineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.llm.webhook_model, "gpt-4o");
        assert_eq!(config.conversation.repeat_limit, 3);
        assert_eq!(config.conversation.attachments, vec![PathBuf::from("a.pdf")]);
        assert!(!config.conversation.ignore.saved_contacts);
        assert!(config.conversation.ignore.groups);

        let wa = config.whatsapp.unwrap();
        assert_eq!(wa.phone_number_id, "1234");
        assert_eq!(wa.access_token_env, "WHATSAPP_ACCESS_TOKEN");
        assert_eq!(wa.api_base, "https://graph.facebook.com/v21.0");
        assert_eq!(wa.known_contacts.len(), 1);
    }

    #[test]
    fn test_whatsapp_requires_phone_number_id() {
        let toml_str = r#"
[whatsapp]
verify_token = "tok"
"#;
        assert!(toml::from_str::<BotlineConfig>(toml_str).is_err());
    }
}
