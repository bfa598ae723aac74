use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A value entered in the preview form.
///
/// Checkboxes produce `Flag`; every other widget produces `Text`.
/// Serialized untagged, so a snapshot reads `{"email": "a@b.c", "tos": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Empty text and an unchecked box count as "no value" for the required rule.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Flag(checked) => !checked,
            FieldValue::Text(text) => text.is_empty(),
        }
    }

    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Flag(true) => "true",
            FieldValue::Flag(false) => "",
            FieldValue::Text(text) => text.as_str(),
        }
    }

    pub fn is_checked(&self) -> bool {
        !self.is_blank()
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Values of the preview form keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, FieldValue>);

impl FormValues {
    pub fn set(&mut self, name: &str, value: FieldValue) {
        self.0.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.0.remove(name)
    }

    /// A missing entry is treated like an empty one.
    pub fn is_blank(&self, name: &str) -> bool {
        self.get(name).map_or(true, FieldValue::is_blank)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|name, _| keep(name));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, FieldValue)> for FormValues {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
