//! Session State Store
//!
//! Single source of truth for one user's transcript and conversation state.

use super::{ConversationState, Message, Platform, Role};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("user messages cannot be empty")]
    EmptyUserMessage,
}

/// Interaction currently waiting on the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Chat,
    FormSubmission,
}

impl PendingAction {
    pub fn as_str(self) -> &'static str {
        match self {
            PendingAction::Chat => "chat",
            PendingAction::FormSubmission => "form_submission",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionStore {
    platform: Platform,
    messages: Vec<Message>,
    state: ConversationState,
    pending: Option<PendingAction>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::initialize()
    }
}

impl SessionStore {
    /// Fresh session: empty transcript, `{}` state, default platform
    pub fn initialize() -> Self {
        Self {
            platform: Platform::default(),
            messages: Vec::new(),
            state: ConversationState::new(),
            pending: None,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn pending(&self) -> Option<PendingAction> {
        self.pending
    }

    /// Switch platform. Returns false (and changes nothing) when it is
    /// already selected; otherwise clears the transcript and resets the
    /// state to `{platform: <new>}`.
    pub fn set_platform(&mut self, platform: Platform) -> bool {
        if self.platform == platform {
            return false;
        }
        self.platform = platform;
        self.messages.clear();
        self.state = ConversationState::for_platform(platform);
        true
    }

    pub fn append_message(
        &mut self,
        role: Role,
        content: impl Into<String>,
    ) -> Result<(), SessionError> {
        let content = content.into();
        if role == Role::User && content.is_empty() {
            return Err(SessionError::EmptyUserMessage);
        }
        self.messages.push(Message::new(role, content));
        Ok(())
    }

    /// Wholesale replacement, no shape validation
    pub fn replace_state(&mut self, state: ConversationState) {
        self.state = state;
    }

    pub(crate) fn set_pending(&mut self, pending: Option<PendingAction>) {
        self.pending = pending;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_initialize() {
        let store = SessionStore::initialize();
        assert!(store.messages().is_empty());
        assert!(store.state().is_empty());
        assert_eq!(store.platform(), Platform::ServicePublic);
        assert_eq!(store.pending(), None);
    }

    #[test]
    fn test_platform_switch_resets() {
        let mut store = SessionStore::initialize();
        store.append_message(Role::User, "Bonjour").unwrap();
        store.replace_state(ConversationState::from_value(json!({
            "show_ui_form": true,
            "form_data": { "telephone": "70123456" }
        })));

        assert!(store.set_platform(Platform::Voyage));
        assert!(store.messages().is_empty());
        assert_eq!(store.state(), &ConversationState::for_platform(Platform::Voyage));
    }

    #[test]
    fn test_same_platform_is_noop() {
        let mut store = SessionStore::initialize();
        store.append_message(Role::User, "Bonjour").unwrap();

        assert!(!store.set_platform(Platform::ServicePublic));
        assert_eq!(store.messages().len(), 1);
    }

    #[test]
    fn test_empty_user_message_rejected() {
        let mut store = SessionStore::initialize();
        assert_eq!(
            store.append_message(Role::User, ""),
            Err(SessionError::EmptyUserMessage)
        );
        assert!(store.append_message(Role::Assistant, "").is_ok());
        assert_eq!(store.messages(), &[Message::assistant("")]);
    }
}
