//! Inbound message queue and its single dispatcher task.
//!
//! Channels push `InboundMessage`s into a bounded `mpsc` queue and return
//! immediately. One task drains the queue and runs the conversation handler
//! for each message in arrival order, so a sender's messages are never
//! processed concurrently.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use botline_types::message::InboundMessage;

use crate::chat::ConversationHandler;
use crate::llm::LlmProvider;
use crate::service::FileSystem;

use super::client::MessagingClient;

/// Default queue capacity.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("inbound queue is full")]
    QueueFull,

    #[error("dispatcher has stopped")]
    Closed,
}

/// Cloneable producer side of the inbound queue.
#[derive(Debug, Clone)]
pub struct InboundQueue {
    tx: mpsc::Sender<InboundMessage>,
}

impl InboundQueue {
    /// Create a queue and the receiver to hand to [`run_dispatcher`].
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<InboundMessage>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Enqueue without waiting. A full queue drops the message.
    pub fn enqueue(&self, message: InboundMessage) -> Result<(), DispatchError> {
        self.tx.try_send(message).map_err(|e| match e {
            mpsc::error::TrySendError::Full(m) => {
                warn!(sender = %m.sender, "inbound queue full, dropping message");
                DispatchError::QueueFull
            }
            mpsc::error::TrySendError::Closed(_) => DispatchError::Closed,
        })
    }
}

/// Drain `rx` until it closes or `cancel` fires. Returns the number of
/// messages handled.
pub async fn run_dispatcher<P, M, F>(
    handler: Arc<ConversationHandler<P, M, F>>,
    mut rx: mpsc::Receiver<InboundMessage>,
    cancel: CancellationToken,
) -> usize
where
    P: LlmProvider,
    M: MessagingClient,
    F: FileSystem,
{
    info!("conversation dispatcher started");
    let mut handled = 0;
    loop {
        let message = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("dispatcher cancelled");
                break;
            }
            message = rx.recv() => message,
        };
        let Some(message) = message else {
            break;
        };
        handler.handle(&message).await;
        handled += 1;
    }
    info!(handled, "conversation dispatcher stopped");
    handled
}
