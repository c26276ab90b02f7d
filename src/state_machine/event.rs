//! Events that can occur in a session

use crate::form::UploadedImage;
use crate::rag::ChatReply;
use crate::session::Platform;
use std::collections::HashMap;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    UserMessage {
        text: String,
    },
    FormSubmitted {
        /// Raw values keyed by field id, as posted by the browser
        values: HashMap<String, String>,
        images: Vec<UploadedImage>,
    },
    PlatformSelected {
        platform: Platform,
    },

    // Backend events
    ReplyReceived {
        reply: ChatReply,
    },
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Event::UserMessage { .. } => "user_message",
            Event::FormSubmitted { .. } => "form_submitted",
            Event::PlatformSelected { .. } => "platform_selected",
            Event::ReplyReceived { .. } => "reply_received",
        }
    }
}
