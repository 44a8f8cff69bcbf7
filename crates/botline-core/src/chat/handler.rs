//! Conversation handler: runs the rule engine for one inbound message and
//! carries out the resulting action through the messaging channel.
//!
//! Failures never escape `handle`: send errors are logged, attachment
//! failures become an apology, completion failures become the
//! unavailable-with-contacts reply.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use botline_types::config::{ConversationConfig, LlmConfig};
use botline_types::error::MessagingError;
use botline_types::llm::CompletionRequest;
use botline_types::message::{Attachment, InboundMessage, OutboundReply};

use crate::llm::{LlmProvider, complete_text};
use crate::message::MessagingClient;
use crate::rules::engine::{Action, Rule, RuleEngine};
use crate::rules::replies;
use crate::service::FileSystem;

use super::store::SessionStore;

/// At most this many configured attachments are sent per delivery.
pub const MAX_ATTACHMENTS: usize = 2;

/// Settings the handler needs beyond the rule engine.
#[derive(Debug, Clone)]
pub struct HandlerSettings {
    /// Model used for fallback completions.
    pub model: String,
    pub max_tokens: u32,
    pub attachments: Vec<PathBuf>,
    pub contact_numbers: Vec<String>,
}

impl HandlerSettings {
    pub fn from_config(llm: &LlmConfig, conversation: &ConversationConfig) -> Self {
        Self {
            model: llm.conversation_model.clone(),
            max_tokens: llm.max_tokens,
            attachments: conversation.attachments.clone(),
            contact_numbers: conversation.contact_numbers.clone(),
        }
    }
}

/// Per-process conversation handler. Owns the session store.
pub struct ConversationHandler<P, M, F> {
    engine: RuleEngine,
    store: SessionStore,
    provider: Arc<P>,
    messenger: Arc<M>,
    files: Arc<F>,
    settings: HandlerSettings,
}

impl<P, M, F> ConversationHandler<P, M, F>
where
    P: LlmProvider,
    M: MessagingClient,
    F: FileSystem,
{
    pub fn new(
        engine: RuleEngine,
        provider: Arc<P>,
        messenger: Arc<M>,
        files: Arc<F>,
        settings: HandlerSettings,
    ) -> Self {
        Self {
            engine,
            store: SessionStore::new(),
            provider,
            messenger,
            files,
            settings,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Process one inbound message and return the rule that fired.
    pub async fn handle(&self, message: &InboundMessage) -> Rule {
        let decision = self.engine.evaluate(&self.store, message);
        let sender = message.sender.as_str();

        match decision.action {
            Action::None => {
                debug!(sender, "message ignored");
            }
            Action::Reply(text) => self.send_text(sender, text).await,
            Action::DeliverDocuments => self.deliver_documents(sender).await,
            Action::Complete { prompt } => {
                let reply = self.complete(sender, prompt).await;
                self.send_text(sender, reply).await;
            }
        }

        info!(sender, rule = %decision.rule, channel = self.messenger.channel(), "message handled");
        decision.rule
    }

    async fn send_text(&self, sender: &str, text: String) {
        if let Err(e) = self.messenger.send(sender, &OutboundReply::Text(text)).await {
            warn!(sender, error = %e, "failed to send reply");
        }
    }

    async fn deliver_documents(&self, sender: &str) {
        match self.send_documents(sender).await {
            Ok(sent) => {
                self.store.mark_file_sent(sender);
                info!(sender, documents = sent, "documents delivered");
            }
            Err(e) => {
                warn!(sender, error = %e, "document delivery failed");
                self.send_text(sender, replies::DOCUMENTS_FAILED.to_string())
                    .await;
            }
        }
    }

    /// Send the present attachments then the explanation text. Returns the
    /// number of documents sent.
    async fn send_documents(&self, sender: &str) -> Result<usize, MessagingError> {
        let mut sent = 0;
        for path in self.settings.attachments.iter().take(MAX_ATTACHMENTS) {
            if !self.files.exists(path).await {
                debug!(path = %path.display(), "attachment missing, skipping");
                continue;
            }
            let bytes = self
                .files
                .read_bytes(path)
                .await
                .map_err(|e| MessagingError::Attachment(format!("{}: {e}", path.display())))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let attachment = Attachment {
                mime_type: Attachment::mime_for(&file_name).to_string(),
                file_name,
                bytes,
            };
            self.messenger
                .send(sender, &OutboundReply::Document(attachment))
                .await?;
            sent += 1;
        }

        self.messenger
            .send(sender, &OutboundReply::text(replies::DOCUMENTS_SENT))
            .await?;
        Ok(sent)
    }

    async fn complete(&self, sender: &str, prompt: String) -> String {
        let request =
            CompletionRequest::single_user(&self.settings.model, prompt, self.settings.max_tokens)
                .with_system(replies::PERSONA_PROMPT);

        match complete_text(self.provider.as_ref(), &request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(sender, error = %e, "fallback completion failed");
                replies::unavailable_with_contacts(&self.settings.contact_numbers)
            }
        }
    }
}
