//! Opaque conversation state
//!
//! The backend owns the shape of this blob. Only a handful of keys are read
//! locally and every accessor tolerates the key being absent or ill-typed.

use super::Platform;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const PLATFORM: &str = "platform";
const SHOW_UI_FORM: &str = "show_ui_form";
const FORM_SCHEMA: &str = "form_schema";
const FORM_DATA: &str = "form_data";
const CURRENT_PIPELINE: &str = "current_pipeline";

/// Backend-defined JSON object round-tripped on every turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationState(Map<String, Value>);

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State after a platform switch: `{platform: <label>}` and nothing else
    pub fn for_platform(platform: Platform) -> Self {
        let mut state = Self::new();
        state.set_platform(platform);
        state
    }

    /// Accept any JSON value; anything but an object becomes `{}`
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn set_platform(&mut self, platform: Platform) {
        self.insert(PLATFORM, Value::String(platform.label().to_string()));
    }

    pub fn platform(&self) -> Option<&str> {
        self.get(PLATFORM).and_then(Value::as_str)
    }

    pub fn show_ui_form(&self) -> bool {
        self.get(SHOW_UI_FORM)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn set_show_ui_form(&mut self, show: bool) {
        self.insert(SHOW_UI_FORM, Value::Bool(show));
    }

    pub fn form_schema(&self) -> Option<&Value> {
        self.get(FORM_SCHEMA)
    }

    /// Last-known field values keyed by field id
    pub fn form_data(&self) -> Option<&Map<String, Value>> {
        self.get(FORM_DATA).and_then(Value::as_object)
    }

    pub fn set_form_data(&mut self, data: Map<String, Value>) {
        self.insert(FORM_DATA, Value::Object(data));
    }

    /// Identifies the backend workflow behind the current form. Forwarded, never interpreted.
    pub fn current_pipeline(&self) -> Option<&str> {
        self.get(CURRENT_PIPELINE).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for ConversationState {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
