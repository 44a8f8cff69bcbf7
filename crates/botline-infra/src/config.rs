//! Configuration loader for botline.
//!
//! Reads `botline.toml` and deserializes it into [`BotlineConfig`]. Falls
//! back to defaults when the file is missing or malformed.

use std::path::Path;

use botline_types::config::BotlineConfig;
use botline_types::error::ConfigError;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "botline.toml";

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`BotlineConfig::default()`].
/// - If the file exists but cannot be read or parsed, logs a warning and
///   returns the default.
pub async fn load_config(path: &Path) -> BotlineConfig {
    match try_load_config(path).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            BotlineConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err} ({}), using defaults", path.display());
            BotlineConfig::default()
        }
    }
}

/// Strict variant of [`load_config`]: `Ok(None)` when the file is missing,
/// an error when it cannot be read, parsed or validated.
pub async fn try_load_config(path: &Path) -> Result<Option<BotlineConfig>, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(ConfigError::Io(err.to_string())),
    };

    let config = toml::from_str::<BotlineConfig>(&content)
        .map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;
    Ok(Some(config))
}

/// Reject settings the handlers cannot work with.
pub fn validate(config: &BotlineConfig) -> Result<(), ConfigError> {
    if config.llm.webhook_model.trim().is_empty() || config.llm.conversation_model.trim().is_empty()
    {
        return Err(ConfigError::Invalid("llm model names must not be empty".into()));
    }
    if config.llm.max_tokens == 0 {
        return Err(ConfigError::Invalid("llm.max_tokens must be positive".into()));
    }
    if let Some(wa) = &config.whatsapp {
        if wa.phone_number_id.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "whatsapp.phone_number_id must not be empty".into(),
            ));
        }
        if wa.verify_token.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "whatsapp.verify_token must not be empty".into(),
            ));
        }
    }
    Ok(())
}

/// Render the effective configuration as TOML. The config holds only the
/// names of secret variables, never their values.
pub fn render(config: &BotlineConfig) -> Result<String, ConfigError> {
    toml::to_string_pretty(config).map_err(|e| ConfigError::Invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("botline.toml")).await;
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.llm.webhook_model, "gpt-3.5-turbo");
        assert!(config.whatsapp.is_none());
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("botline.toml");
        tokio::fs::write(
            &path,
            r#"
[server]
port = 8080

[conversation]
repeat_limit = 3
contact_numbers = ["+91 22222 22222"]

[conversation.ignore]
saved_contacts = false

[whatsapp]
phone_number_id = "1234567890"
verify_token = "verify-me"
known_contacts = ["919800000000"]
"#,
        )
        .await
        .unwrap();

        let config = load_config(&path).await;
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.conversation.repeat_limit, 3);
        assert_eq!(config.conversation.contact_numbers, vec!["+91 22222 22222"]);
        assert!(!config.conversation.ignore.saved_contacts);
        assert!(config.conversation.ignore.groups);
        assert_eq!(config.conversation.attachments.len(), 2);

        let wa = config.whatsapp.unwrap();
        assert_eq!(wa.phone_number_id, "1234567890");
        assert_eq!(wa.access_token_env, "WHATSAPP_ACCESS_TOKEN");
        assert_eq!(wa.api_base, "https://graph.facebook.com/v21.0");
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("botline.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(&path).await;
        assert_eq!(config.server.port, 3000);

        let err = try_load_config(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[tokio::test]
    async fn try_load_config_rejects_invalid_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("botline.toml");
        tokio::fs::write(&path, "[llm]\nmax_tokens = 0\n").await.unwrap();

        let err = try_load_config(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[tokio::test]
    async fn try_load_config_missing_is_none() {
        let tmp = TempDir::new().unwrap();
        let loaded = try_load_config(&tmp.path().join("absent.toml")).await.unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn render_round_trips() {
        let rendered = render(&BotlineConfig::default()).unwrap();
        assert!(rendered.contains("[server]"));
        assert!(rendered.contains("api_key_env = \"OPENAI_API_KEY\""));
        let parsed: BotlineConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.llm.conversation_model, "gpt-4o-mini");
    }
}
