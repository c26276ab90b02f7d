//! API request and response types

use super::markdown::render_markdown;
use crate::form::{render_form, FormView, ValidationError};
use crate::runtime::SessionSnapshot;
use crate::session::{Message, Platform, Role};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const INPUT_PLACEHOLDER: &str = "Votre message (ou 'annuler')...";

/// Request to switch the session's platform
#[derive(Debug, Deserialize)]
pub struct PlatformRequest {
    pub platform: String,
}

/// Request to send a free-text message
#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    pub text: String,
}

/// Available platforms, in selector order
#[derive(Debug, Serialize)]
pub struct PlatformsResponse {
    pub platforms: Vec<&'static str>,
    pub default: &'static str,
}

impl Default for PlatformsResponse {
    fn default() -> Self {
        Self {
            platforms: Platform::labels(),
            default: Platform::default().label(),
        }
    }
}

/// One transcript bubble
#[derive(Debug, Serialize)]
pub struct MessageView {
    pub role: Role,
    pub content: String,
    pub html: String,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
            html: render_markdown(&message.content),
        }
    }
}

/// Everything the page needs to draw a session
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: String,
    pub platform: &'static str,
    pub platforms: Vec<&'static str>,
    pub messages: Vec<MessageView>,
    pub form: Option<FormView>,
    pub input_placeholder: &'static str,
}

impl SessionView {
    pub fn new(snapshot: &SessionSnapshot, today: NaiveDate) -> Self {
        let store = &snapshot.store;
        Self {
            id: snapshot.id.clone(),
            platform: store.platform().label(),
            platforms: Platform::labels(),
            messages: store.messages().iter().map(MessageView::from).collect(),
            form: render_form(store.state(), today),
            input_placeholder: INPUT_PLACEHOLDER,
        }
    }
}

/// A rejected form field
#[derive(Debug, Serialize)]
pub struct FieldErrorView {
    pub field: String,
    pub message: String,
}

impl From<&ValidationError> for FieldErrorView {
    fn from(error: &ValidationError) -> Self {
        Self {
            field: error.field().to_string(),
            message: error.to_string(),
        }
    }
}

/// Form submission refused before reaching the backend
#[derive(Debug, Serialize)]
pub struct FormErrorsResponse {
    pub errors: Vec<FieldErrorView>,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub name: &'static str,
    pub version: &'static str,
}

impl Default for VersionResponse {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ConversationState, SessionStore};
    use serde_json::json;

    fn snapshot(store: SessionStore) -> SessionSnapshot {
        SessionSnapshot {
            id: "abc".to_string(),
            store,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_fresh_session_view() {
        let view = SessionView::new(&snapshot(SessionStore::initialize()), today());
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["id"], "abc");
        assert_eq!(value["platform"], "Service Public");
        assert_eq!(value["platforms"], json!(["Service Public", "Voyage"]));
        assert_eq!(value["messages"], json!([]));
        assert!(value["form"].is_null());
        assert_eq!(value["input_placeholder"], "Votre message (ou 'annuler')...");
    }

    #[test]
    fn test_view_includes_open_form() {
        let mut store = SessionStore::initialize();
        store
            .append_message(Role::User, "Je veux un visa")
            .unwrap();
        store
            .append_message(Role::Assistant, "Remplissez le **formulaire**")
            .unwrap();
        store.replace_state(ConversationState::from_value(json!({
            "show_ui_form": true,
            "form_schema": {
                "title": "Demande de visa",
                "fields": {"nom": {"label": "Nom"}},
                "required_fields": ["nom"]
            }
        })));

        let view = SessionView::new(&snapshot(store), today());

        assert_eq!(view.messages.len(), 2);
        assert!(view.messages[1].html.contains("<strong>formulaire</strong>"));
        let form = view.form.unwrap();
        assert_eq!(form.title, "Demande de visa");
        assert_eq!(form.fields.len(), 1);
    }

    #[test]
    fn test_field_error_view() {
        let error = ValidationError::MissingField {
            field: "nom".to_string(),
            label: "Nom".to_string(),
        };
        let view = FieldErrorView::from(&error);
        assert_eq!(view.field, "nom");
        assert_eq!(view.message, "Field 'Nom' is required");
    }
}
