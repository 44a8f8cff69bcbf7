//! Hand-written test doubles for the core ports.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use botline_types::error::MessagingError;
use botline_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};
use botline_types::message::OutboundReply;

use crate::llm::LlmProvider;
use crate::message::MessagingClient;
use crate::service::FileSystem;

#[derive(Clone)]
enum Scripted {
    Text(String),
    Fail(String),
}

/// Provider returning a fixed answer (or failure) and recording every request.
pub struct MockProvider {
    scripted: Scripted,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            scripted: Scripted::Text(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            scripted: Scripted::Fail(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
        self.requests.lock().unwrap().push(request.clone());
        let scripted = self.scripted.clone();
        let model = request.model.clone();
        async move {
            match scripted {
                Scripted::Text(content) => Ok(CompletionResponse {
                    id: "resp-mock".to_string(),
                    content,
                    model,
                    usage: Usage {
                        input_tokens: 10,
                        output_tokens: 20,
                    },
                }),
                Scripted::Fail(message) => Err(LlmError::Provider { message }),
            }
        }
    }
}

/// Messenger that records every send; can be told to reject documents.
#[derive(Default)]
pub struct RecordingMessenger {
    pub sent: Mutex<Vec<(String, OutboundReply)>>,
    reject_documents: bool,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_documents() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject_documents: true,
        }
    }

    pub fn replies(&self) -> Vec<OutboundReply> {
        self.sent.lock().unwrap().iter().map(|(_, r)| r.clone()).collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.replies()
            .into_iter()
            .filter_map(|r| match r {
                OutboundReply::Text(t) => Some(t),
                OutboundReply::Document(_) => None,
            })
            .collect()
    }

    pub fn document_names(&self) -> Vec<String> {
        self.replies()
            .into_iter()
            .filter_map(|r| match r {
                OutboundReply::Document(a) => Some(a.file_name),
                OutboundReply::Text(_) => None,
            })
            .collect()
    }
}

impl MessagingClient for RecordingMessenger {
    fn channel(&self) -> &str {
        "recording"
    }

    fn send(
        &self,
        recipient: &str,
        reply: &OutboundReply,
    ) -> impl Future<Output = Result<(), MessagingError>> + Send {
        let result = if self.reject_documents && matches!(reply, OutboundReply::Document(_)) {
            Err(MessagingError::Rejected {
                status: 400,
                body: "media upload failed".to_string(),
            })
        } else {
            self.sent
                .lock()
                .unwrap()
                .push((recipient.to_string(), reply.clone()));
            Ok(())
        };
        async move { result }
    }
}

/// In-memory filesystem. Paths in `unreadable` exist but fail to read.
#[derive(Default)]
pub struct MemoryFileSystem {
    files: HashMap<PathBuf, Vec<u8>>,
    unreadable: HashSet<PathBuf>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, bytes: &[u8]) -> Self {
        self.files.insert(PathBuf::from(path), bytes.to_vec());
        self
    }

    pub fn with_unreadable(mut self, path: &str) -> Self {
        self.unreadable.insert(PathBuf::from(path));
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> impl Future<Output = bool> + Send {
        let found = self.files.contains_key(path) || self.unreadable.contains(path);
        async move { found }
    }

    fn read_bytes(
        &self,
        path: &Path,
    ) -> impl Future<Output = Result<Vec<u8>, std::io::Error>> + Send {
        let result = if self.unreadable.contains(path) {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            ))
        } else {
            self.files.get(path).cloned().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file")
            })
        };
        async move { result }
    }
}
