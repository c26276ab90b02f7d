//! Server-supplied form schema
//!
//! There is no type tag on fields: a field is a date if its id contains
//! "date" (any case), otherwise it is free text.

use crate::session::ConversationState;
use serde::Serialize;
use serde_json::Value;

/// Required-field sentinel for the payment-proof upload. Never present in `fields`.
pub const PROOF_FIELD: &str = "captures_preuves";

const DEFAULT_TITLE: &str = "Formulaire";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Date,
}

impl FieldKind {
    pub fn of(field_id: &str) -> Self {
        if field_id.to_lowercase().contains("date") {
            FieldKind::Date
        } else {
            FieldKind::Text
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: String,
    pub label: String,
    pub hint: String,
}

impl FieldSpec {
    fn from_value(id: &str, value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            id: id.to_string(),
            label: text("label").unwrap_or_else(|| id.to_string()),
            hint: text("hint").unwrap_or_default(),
        }
    }

    pub fn kind(&self) -> FieldKind {
        FieldKind::of(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    pub title: String,
    /// In the order the backend sent them
    pub fields: Vec<FieldSpec>,
    pub required_fields: Vec<String>,
}

impl Default for FormSchema {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            fields: Vec::new(),
            required_fields: Vec::new(),
        }
    }
}

impl FormSchema {
    /// Parse whatever the backend sent. Unrecognised shapes degrade to
    /// defaults instead of failing.
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };

        let title = value
            .get("title")
            .and_then(Value::as_str)
            .map_or_else(|| DEFAULT_TITLE.to_string(), str::to_string);

        let fields = value
            .get("fields")
            .and_then(Value::as_object)
            .map(|fields| {
                fields
                    .iter()
                    .map(|(id, spec)| FieldSpec::from_value(id, spec))
                    .collect()
            })
            .unwrap_or_default();

        let required_fields = value
            .get("required_fields")
            .and_then(Value::as_array)
            .map(|ids| {
                ids.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            title,
            fields,
            required_fields,
        }
    }

    pub fn from_state(state: &ConversationState) -> Self {
        Self::from_value(state.form_schema())
    }

    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Fields that get an input control (everything but the proof sentinel)
    pub fn rendered_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.id != PROOF_FIELD)
    }

    pub fn requires_proof(&self) -> bool {
        self.required_fields.iter().any(|id| id == PROOF_FIELD)
    }

    /// Label for error messages; falls back to the id for unknown fields
    pub fn label_for<'a>(&'a self, id: &'a str) -> &'a str {
        self.field(id).map_or(id, |f| f.label.as_str())
    }
}
