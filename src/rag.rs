//! RAG chat service client
//!
//! The backend is a black box reached through a single JSON endpoint.
//! `RagService` is the seam; `ChatTransport` layers the session-level
//! contract (platform injection, failures folded into the answer) on top.

mod client;
mod error;
#[cfg(test)]
pub mod testing;
mod transport;
mod types;

pub use client::HttpRagService;
pub use error::RagError;
pub use transport::ChatTransport;
pub use types::{ChatReply, ChatRequest};

use async_trait::async_trait;
use std::sync::Arc;

/// Anything that can answer a chat request
#[async_trait]
pub trait RagService: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, RagError>;

    /// Where requests go, for logs
    fn endpoint(&self) -> &str;
}

/// Logging wrapper for RAG services
pub struct LoggingService {
    inner: Arc<dyn RagService>,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn RagService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl RagService for LoggingService {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, RagError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    endpoint = %self.inner.endpoint(),
                    platform = %request.platform,
                    duration_ms = %duration.as_millis(),
                    history_len = request.history.len(),
                    fresh_state = request.state.is_empty(),
                    images = request.images_base64.as_ref().map_or(0, Vec::len),
                    show_ui_form = reply.state.show_ui_form(),
                    pipeline = reply.state.current_pipeline().unwrap_or(""),
                    "RAG request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.inner.endpoint(),
                    platform = %request.platform,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "RAG request failed"
                );
            }
        }

        result
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}
