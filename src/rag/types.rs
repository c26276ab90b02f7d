//! Wire types for the chat endpoint

use super::RagError;
use crate::session::{ConversationState, Message, Platform};
use serde::Serialize;
use serde_json::Value;

/// POST body sent to the backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub question: String,
    pub history: Vec<Message>,
    pub platform: Platform,
    pub stream: bool,
    pub state: ConversationState,
    /// `null` on the wire when there are no images
    pub images_base64: Option<Vec<String>>,
}

/// Backend answer, decoded permissively
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChatReply {
    pub answer: String,
    /// Returned by the backend but not displayed
    pub sources: Vec<Value>,
    pub state: ConversationState,
}

impl ChatReply {
    pub fn new(answer: impl Into<String>, state: ConversationState) -> Self {
        Self {
            answer: answer.into(),
            sources: Vec::new(),
            state,
        }
    }

    /// Decode a response body. Only a non-object body is rejected; missing
    /// or ill-typed keys fall back to empty values.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut body) = value else {
            return None;
        };

        let answer = match body.remove("answer") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
        };
        let sources = match body.remove("sources") {
            Some(Value::Array(sources)) => sources,
            _ => Vec::new(),
        };
        let state = body
            .remove("state")
            .map(ConversationState::from_value)
            .unwrap_or_default();

        Some(Self {
            answer,
            sources,
            state,
        })
    }

    /// Reply synthesized when the backend could not be reached. The state is
    /// the one that was sent, so no conversation progress is lost.
    pub fn failure(error: &RagError, state: ConversationState) -> Self {
        Self::new(format!("Erreur: {error}"), state)
    }
}
