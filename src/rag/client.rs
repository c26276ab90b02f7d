//! reqwest implementation of the chat endpoint

use super::{ChatReply, ChatRequest, RagError, RagService};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Longest slice of an error body quoted back to the user
const MAX_ERROR_BODY_CHARS: usize = 300;

pub struct HttpRagService {
    client: Client,
    endpoint: String,
}

impl HttpRagService {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, RagError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RagError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    fn classify_error(&self, status: reqwest::StatusCode, body: &str) -> RagError {
        let body: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
        if body.is_empty() {
            RagError::status(format!("{status} for url: {}", self.endpoint))
        } else {
            RagError::status(format!("{status} for url: {}: {body}", self.endpoint))
        }
    }
}

#[async_trait]
impl RagService for HttpRagService {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, RagError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RagError::timeout(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    RagError::network(format!("Connection failed: {e}"))
                } else {
                    RagError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RagError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(self.classify_error(status, &body));
        }

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| RagError::malformed(format!("Failed to parse response: {e}")))?;

        ChatReply::from_value(value)
            .ok_or_else(|| RagError::malformed("Response body is not a JSON object"))
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
