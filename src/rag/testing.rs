//! Mock RAG service for tests

use super::{ChatReply, ChatRequest, RagError, RagService};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Returns queued results in order and records every request
pub struct MockRagService {
    responses: Mutex<VecDeque<Result<ChatReply, RagError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

#[allow(dead_code)]
impl MockRagService {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_reply(&self, reply: ChatReply) {
        self.responses.lock().unwrap().push_back(Ok(reply));
    }

    pub fn queue_error(&self, error: RagError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockRagService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RagService for MockRagService {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, RagError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RagError::network("No mock response queued")))
    }

    fn endpoint(&self) -> &str {
        "mock://rag-chat"
    }
}
