//! Application state wiring the handlers to concrete adapters.
//!
//! The core handlers are generic over provider/messenger/filesystem traits;
//! the aliases below pin them to the infra implementations.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use secrecy::SecretString;
use tokio::sync::mpsc;

use botline_core::chat::{ConversationHandler, HandlerSettings};
use botline_core::message::InboundQueue;
use botline_core::message::dispatch::DEFAULT_QUEUE_CAPACITY;
use botline_core::rules::RuleEngine;
use botline_core::webhook::WebhookResponder;
use botline_infra::filesystem::LocalFileSystem;
use botline_infra::llm::openai_compat::OpenAiCompatibleProvider;
use botline_infra::llm::openai_compat::config::from_llm_config;
use botline_infra::secret::EnvSecrets;
use botline_infra::whatsapp::{KnownContacts, WhatsAppCloudClient};
use botline_types::config::{BotlineConfig, WhatsAppConfig};
use botline_types::message::InboundMessage;

pub type ConcreteResponder = WebhookResponder<OpenAiCompatibleProvider>;

pub type WhatsAppHandler =
    ConversationHandler<OpenAiCompatibleProvider, WhatsAppCloudClient, LocalFileSystem>;

/// Inbound side of the WhatsApp Cloud channel.
pub struct WhatsAppWebhook {
    pub verify_token: String,
    /// Signatures are only checked when this is set.
    pub app_secret: Option<SecretString>,
    pub known_contacts: KnownContacts,
    pub queue: InboundQueue,
}

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub responder: Arc<ConcreteResponder>,
    pub whatsapp: Option<Arc<WhatsAppWebhook>>,
}

/// The WhatsApp conversation handler and the queue it drains. Handed to the
/// dispatcher task by `serve`.
pub struct DispatcherParts {
    pub handler: Arc<WhatsAppHandler>,
    pub rx: mpsc::Receiver<InboundMessage>,
}

/// Build the completion provider from the `[llm]` section. Fails when the
/// API key variable is unset.
pub fn build_provider(
    config: &BotlineConfig,
    secrets: &EnvSecrets,
) -> anyhow::Result<Arc<OpenAiCompatibleProvider>> {
    let api_key = secrets
        .require(&config.llm.api_key_env)
        .context("completion API key is required")?;
    Ok(Arc::new(OpenAiCompatibleProvider::new(from_llm_config(
        &config.llm,
        api_key,
    ))))
}

impl AppState {
    /// Wire the webhook responder and, when `[whatsapp]` is configured, the
    /// Cloud API channel. `base_dir` anchors relative attachment paths.
    pub fn init(
        config: &BotlineConfig,
        secrets: &EnvSecrets,
        base_dir: &Path,
    ) -> anyhow::Result<(Self, Option<DispatcherParts>)> {
        let provider = build_provider(config, secrets)?;
        let responder = Arc::new(WebhookResponder::new(
            Arc::clone(&provider),
            &config.llm.webhook_model,
            config.llm.max_tokens,
        ));

        let Some(wa) = &config.whatsapp else {
            return Ok((
                Self {
                    responder,
                    whatsapp: None,
                },
                None,
            ));
        };

        let (webhook, parts) = whatsapp_channel(config, wa, secrets, provider, base_dir)?;
        Ok((
            Self {
                responder,
                whatsapp: Some(Arc::new(webhook)),
            },
            Some(parts),
        ))
    }
}

fn whatsapp_channel(
    config: &BotlineConfig,
    wa: &WhatsAppConfig,
    secrets: &EnvSecrets,
    provider: Arc<OpenAiCompatibleProvider>,
    base_dir: &Path,
) -> anyhow::Result<(WhatsAppWebhook, DispatcherParts)> {
    let access_token = secrets
        .require(&wa.access_token_env)
        .context("WhatsApp access token is required when [whatsapp] is configured")?;
    let app_secret = secrets.optional(&wa.app_secret_env);
    if app_secret.is_none() {
        tracing::warn!(
            var = %wa.app_secret_env,
            "app secret not set, webhook signatures will not be verified"
        );
    }

    let handler = Arc::new(ConversationHandler::new(
        RuleEngine::from_config(&config.conversation),
        provider,
        Arc::new(WhatsAppCloudClient::from_config(wa, access_token)),
        Arc::new(LocalFileSystem::with_root(base_dir)),
        HandlerSettings::from_config(&config.llm, &config.conversation),
    ));
    let (queue, rx) = InboundQueue::new(DEFAULT_QUEUE_CAPACITY);

    Ok((
        WhatsAppWebhook {
            verify_token: wa.verify_token.clone(),
            app_secret,
            known_contacts: KnownContacts::new(&wa.known_contacts),
            queue,
        },
        DispatcherParts { handler, rx },
    ))
}
