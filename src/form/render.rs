//! Form rendering
//!
//! Pure function of the conversation state plus "today", producing a view
//! the UI can draw without knowing anything about the schema format.

use super::schema::{FieldKind, FieldSpec, FormSchema, PROOF_FIELD};
use super::upload::ACCEPTED_EXTENSIONS;
use crate::session::ConversationState;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

/// Wire format of date values in both directions
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const FORM_INTRO: &str =
    "Veuillez renseigner les champs ci-dessous pour finaliser votre demande.";
const SUBMIT_LABEL: &str = "VALIDER MA RÉCLAMATION";
const UPLOAD_LABEL: &str = "📸 Preuve(s) de paiement (Capture d'écran, SMS Mobile Money)";
const UPLOAD_HINT: &str = "Sélectionnez un ou plusieurs fichiers";

/// Rendered form, drawn inside an assistant bubble after the transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub title: String,
    pub heading: String,
    pub intro: &'static str,
    /// Backend workflow that produced the form, shown as-is
    pub pipeline: Option<String>,
    pub fields: Vec<FieldControl>,
    pub upload: Option<UploadControl>,
    pub submit_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldControl {
    Text {
        id: String,
        label: String,
        hint: String,
        value: String,
    },
    Date {
        id: String,
        label: String,
        hint: String,
        value: NaiveDate,
    },
}

/// Multi-file picker for payment proofs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadControl {
    pub name: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
    pub accept: &'static [&'static str],
    pub multiple: bool,
}

impl Default for UploadControl {
    fn default() -> Self {
        Self {
            name: PROOF_FIELD,
            label: UPLOAD_LABEL,
            hint: UPLOAD_HINT,
            accept: &ACCEPTED_EXTENSIONS,
            multiple: true,
        }
    }
}

/// Render the form if the state asks for one.
///
/// Returns `None` in the Idle phase.
pub fn render_form(state: &ConversationState, today: NaiveDate) -> Option<FormView> {
    if !state.show_ui_form() {
        return None;
    }

    let schema = FormSchema::from_state(state);
    let empty = Map::new();
    let prefill = state.form_data().unwrap_or(&empty);

    let fields = schema
        .rendered_fields()
        .map(|field| render_field(field, prefill.get(&field.id), today))
        .collect();

    Some(FormView {
        heading: format!("📝 {}", schema.title),
        title: schema.title.clone(),
        intro: FORM_INTRO,
        pipeline: state.current_pipeline().map(str::to_string),
        fields,
        upload: schema.requires_proof().then(UploadControl::default),
        submit_label: SUBMIT_LABEL,
    })
}

fn render_field(field: &FieldSpec, prefill: Option<&Value>, today: NaiveDate) -> FieldControl {
    let id = field.id.clone();
    let label = field.label.clone();
    let hint = field.hint.clone();
    match field.kind() {
        FieldKind::Date => FieldControl::Date {
            id,
            label,
            hint,
            value: date_prefill(prefill).unwrap_or(today),
        },
        FieldKind::Text => FieldControl::Text {
            id,
            label,
            hint,
            value: text_prefill(prefill),
        },
    }
}

fn date_prefill(value: Option<&Value>) -> Option<NaiveDate> {
    let raw = value?.as_str()?;
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

fn text_prefill(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
