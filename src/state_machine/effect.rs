//! Effects produced by state transitions

use crate::form::ValidationError;
use crate::session::{ConversationState, Message};

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Call the chat transport. Its reply comes back as `Event::ReplyReceived`.
    RequestChat {
        question: String,
        history: Vec<Message>,
        state: ConversationState,
        images_base64: Option<Vec<String>>,
    },

    /// Show the errors next to the form; nothing is sent
    ShowValidationErrors { errors: Vec<ValidationError> },

    /// Redraw the whole page from the store
    Rerender,
}

impl Effect {
    pub fn request_chat(
        question: impl Into<String>,
        history: Vec<Message>,
        state: ConversationState,
        images_base64: Option<Vec<String>>,
    ) -> Self {
        Effect::RequestChat {
            question: question.into(),
            history,
            state,
            images_base64,
        }
    }
}
