//! `botline chat` - drive the conversation handler from the terminal.
//!
//! Each stdin line is handled as a message from one fixed sender; replies
//! are printed instead of sent to a messaging account.

use std::io::{Stdout, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use console::style;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use botline_core::chat::{ConversationHandler, HandlerSettings};
use botline_core::llm::LlmProvider;
use botline_core::message::MessagingClient;
use botline_core::rules::RuleEngine;
use botline_core::service::FileSystem;
use botline_infra::filesystem::LocalFileSystem;
use botline_infra::secret::EnvSecrets;
use botline_types::config::BotlineConfig;
use botline_types::error::MessagingError;
use botline_types::message::{InboundMessage, OutboundReply};

use crate::state::build_provider;

/// Messaging client that writes replies to a terminal (or any writer).
pub struct ConsoleMessenger<W: Write + Send = Stdout> {
    out: Mutex<W>,
}

impl ConsoleMessenger<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleMessenger<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

fn render_reply(reply: &OutboundReply) -> String {
    match reply {
        OutboundReply::Text(text) => format!("  {} {text}", style("bot>").green().bold()),
        OutboundReply::Document(attachment) => format!(
            "  {} {} ({}, {} bytes)",
            style("[document]").yellow(),
            attachment.file_name,
            attachment.mime_type,
            attachment.bytes.len()
        ),
    }
}

impl<W: Write + Send> MessagingClient for ConsoleMessenger<W> {
    fn channel(&self) -> &str {
        "console"
    }

    async fn send(&self, _recipient: &str, reply: &OutboundReply) -> Result<(), MessagingError> {
        let line = render_reply(reply);
        let mut out = self
            .out
            .lock()
            .map_err(|_| MessagingError::Transport("console writer poisoned".into()))?;
        writeln!(out, "{line}").map_err(|e| MessagingError::Transport(e.to_string()))?;
        out.flush()
            .map_err(|e| MessagingError::Transport(e.to_string()))
    }
}

/// Feed `input` line by line to `handler` until EOF or `/quit`. Blank lines
/// are skipped. Returns the number of messages handled.
pub async fn run_chat<P, M, F, R>(
    handler: &ConversationHandler<P, M, F>,
    sender: &str,
    input: R,
) -> Result<usize>
where
    P: LlmProvider,
    M: MessagingClient,
    F: FileSystem,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut handled = 0;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "/quit" | "/exit") {
            break;
        }
        let rule = handler.handle(&InboundMessage::new(sender, line)).await;
        tracing::debug!(%rule, "console message handled");
        handled += 1;
    }
    Ok(handled)
}

/// Entry point for `botline chat`.
pub async fn chat(config: &BotlineConfig, base_dir: &Path, sender: &str) -> Result<()> {
    let provider = build_provider(config, &EnvSecrets::new())?;
    let handler = ConversationHandler::new(
        RuleEngine::from_config(&config.conversation),
        provider,
        Arc::new(ConsoleMessenger::stdout()),
        Arc::new(LocalFileSystem::with_root(base_dir)),
        HandlerSettings::from_config(&config.llm, &config.conversation),
    );

    println!();
    println!(
        "  {} Chatting as {}",
        style("💬").bold(),
        style(sender).cyan()
    );
    println!("  {}", style("Type /quit or press Ctrl+D to leave").dim());
    println!();

    let handled = run_chat(&handler, sender, BufReader::new(tokio::io::stdin())).await?;

    println!();
    println!("  {} {handled} message(s) handled.", style("✓").green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use botline_core::rules::replies;
    use botline_infra::llm::openai_compat::OpenAiCompatibleProvider;
    use botline_infra::llm::openai_compat::config::OpenAiCompatConfig;
    use botline_types::config::{ConversationConfig, LlmConfig};
    use botline_types::message::Attachment;
    use secrecy::SecretString;
    use tempfile::TempDir;

    fn offline_provider() -> Arc<OpenAiCompatibleProvider> {
        Arc::new(OpenAiCompatibleProvider::new(OpenAiCompatConfig {
            provider_name: "openai_compatible".to_string(),
            base_url: "http://127.0.0.1:9/v1".to_string(),
            api_key: SecretString::from("sk-test".to_string()),
            model: "gpt-4o-mini".to_string(),
        }))
    }

    fn transcript(messenger: &ConsoleMessenger<Vec<u8>>) -> String {
        String::from_utf8(messenger.out.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn test_render_document() {
        let reply = OutboundReply::Document(Attachment {
            file_name: "letter.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            bytes: vec![0; 12],
        });
        let line = render_reply(&reply);
        assert!(line.contains("letter.pdf"));
        assert!(line.contains("12 bytes"));
    }

    #[tokio::test]
    async fn test_console_messenger_writes_lines() {
        let messenger = ConsoleMessenger::new(Vec::new());
        messenger
            .send("console-user", &OutboundReply::text("hello there"))
            .await
            .unwrap();
        assert_eq!(messenger.channel(), "console");
        assert!(transcript(&messenger).contains("hello there"));
    }

    #[tokio::test]
    async fn test_run_chat_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let docs = tmp.path().join("documents");
        std::fs::create_dir_all(&docs).unwrap();
        std::fs::write(docs.join("hardship_letter.pdf"), b"%PDF-1.4 letter").unwrap();

        let messenger = Arc::new(ConsoleMessenger::new(Vec::new()));
        let handler = ConversationHandler::new(
            RuleEngine::default(),
            offline_provider(),
            Arc::clone(&messenger),
            Arc::new(LocalFileSystem::with_root(tmp.path())),
            HandlerSettings::from_config(&LlmConfig::default(), &ConversationConfig::default()),
        );

        let input = b"Hello\n\nI am from HDFC bank\nyes please\n/quit\nnever read\n";
        let handled = run_chat(&handler, "console-user", &input[..]).await.unwrap();
        assert_eq!(handled, 3);

        let out = transcript(&messenger);
        assert!(out.contains(replies::UNAVAILABLE));
        assert!(out.contains(replies::ASK_FOR_DOCUMENT));
        assert!(out.contains("hardship_letter.pdf"));
        assert!(!out.contains("income_statement.pdf"));
        assert!(out.contains(replies::DOCUMENTS_SENT));

        let session = handler.store().get("console-user").unwrap();
        assert!(session.file_sent);
    }

    #[tokio::test]
    async fn test_run_chat_completion_failure_lists_contacts() {
        let messenger = Arc::new(ConsoleMessenger::new(Vec::new()));
        let handler = ConversationHandler::new(
            RuleEngine::default(),
            offline_provider(),
            Arc::clone(&messenger),
            Arc::new(LocalFileSystem::new()),
            HandlerSettings {
                model: "gpt-4o-mini".to_string(),
                max_tokens: 64,
                attachments: vec![],
                contact_numbers: vec!["+91 22222 22222".to_string()],
            },
        );
        let session_start = b"When can we expect the payment\nWhen can we expect the payment?\n";
        run_chat(&handler, "console-user", &session_start[..])
            .await
            .unwrap();

        let out = transcript(&messenger);
        assert!(out.contains(replies::ASK_BANK));
        assert!(out.contains("+91 22222 22222"));
    }
}
