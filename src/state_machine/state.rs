//! Form phase
//!
//! Not stored anywhere: the phase is read off the conversation state the
//! backend last returned, so it can never drift from it.

use crate::session::ConversationState;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    /// Plain chat, no form on screen
    Idle,
    /// `show_ui_form` is set; the form is drawn under the transcript
    FormOpen,
}

impl FormPhase {
    pub fn of(state: &ConversationState) -> Self {
        if state.show_ui_form() {
            FormPhase::FormOpen
        } else {
            FormPhase::Idle
        }
    }
}
