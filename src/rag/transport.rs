//! Session-facing chat transport
//!
//! The only I/O boundary the session sees. `send` never fails: transport
//! errors come back as an answer the user can read, with the state exactly
//! as it was sent.

use super::{ChatReply, ChatRequest, RagService};
use crate::session::{ConversationState, Message, Platform};
use std::sync::Arc;

#[derive(Clone)]
pub struct ChatTransport {
    service: Arc<dyn RagService>,
}

impl ChatTransport {
    pub fn new(service: Arc<dyn RagService>) -> Self {
        Self { service }
    }

    /// One blocking request/response round trip.
    ///
    /// The selected platform always overrides any `platform` already in `state`.
    pub async fn send(
        &self,
        platform: Platform,
        question: &str,
        history: &[Message],
        mut state: ConversationState,
        images_base64: Option<Vec<String>>,
    ) -> ChatReply {
        state.set_platform(platform);
        let request = ChatRequest {
            question: question.to_string(),
            history: history.to_vec(),
            platform,
            stream: false,
            state,
            images_base64,
        };

        match self.service.complete(&request).await {
            Ok(reply) => reply,
            Err(e) => ChatReply::failure(&e, request.state),
        }
    }
}
