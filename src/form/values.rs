//! Submitted form values

use super::render::DATE_FORMAT;
use super::schema::{FieldKind, FormSchema};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Values collected from one submission, in schema order.
///
/// Becomes the `form_data` entry of the conversation state sent back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues(Map<String, Value>);

impl FormValues {
    /// Collect one value per rendered field. Anything the client sent for
    /// ids outside the schema is dropped.
    pub fn collect(schema: &FormSchema, submitted: &HashMap<String, String>) -> Self {
        let mut values = Self::default();
        for field in schema.rendered_fields() {
            let raw = submitted.get(&field.id).map_or("", String::as_str);
            let value = match field.kind() {
                FieldKind::Date => normalize_date(raw),
                FieldKind::Text => raw.to_string(),
            };
            values.insert(&field.id, value);
        }
        values
    }

    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(id.into(), Value::String(value.into()));
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).and_then(Value::as_str)
    }

    /// Collected and non-empty
    pub fn filled(&self, id: &str) -> Option<&str> {
        self.get(id).filter(|v| !v.is_empty())
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::default();
        for (id, value) in iter {
            values.insert(id, value);
        }
        values
    }
}

fn normalize_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_or_else(|_| raw.to_string(), |d| d.format(DATE_FORMAT).to_string())
}
