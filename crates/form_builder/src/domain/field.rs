//! Field definitions edited in the left panel.
//!
//! - `WidgetKind`: the five widget types the preview knows how to render
//! - `FieldType`: the `type` tag of a definition (unset, known, or an unknown
//!   tag that arrived through a loaded config)
//! - `FieldDefinition`: one entry of the field list
//! - `FieldAttribute`: which attribute an `update_field` call targets
//!
//! Usage:
//! ```ignore
//! let mut field = FieldDefinition::default();
//! field.apply(FieldAttribute::Type, "dropdown");
//! field.apply(FieldAttribute::Options, "red,green,red");
//! assert_eq!(field.options, vec!["red", "green"]);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Validation rule understood by the submission validator.
pub const REQUIRED_RULE: &str = "required";

/// Widget types with a registered renderer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WidgetKind {
    Text,
    Textarea,
    Dropdown,
    Checkbox,
    Radio,
}

impl WidgetKind {
    /// Human readable title used by the type selector.
    pub fn title(&self) -> &'static str {
        match self {
            WidgetKind::Text => "Text",
            WidgetKind::Textarea => "Textarea",
            WidgetKind::Dropdown => "Dropdown",
            WidgetKind::Checkbox => "Checkbox",
            WidgetKind::Radio => "Radio Button",
        }
    }

    /// Choice widgets take their values from the `options` list.
    pub fn has_options(&self) -> bool {
        matches!(self, WidgetKind::Dropdown | WidgetKind::Radio)
    }
}

/// The `type` tag of a field definition.
///
/// Serialized as a plain string: `""` for `Unset`, the lowercase kind name for
/// `Known`, and the verbatim tag for `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    Unset,
    Known(WidgetKind),
    Unknown(String),
}

impl FieldType {
    pub fn kind(&self) -> Option<WidgetKind> {
        match self {
            FieldType::Known(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, FieldType::Unset)
    }

    pub fn has_options(&self) -> bool {
        self.kind().is_some_and(|k| k.has_options())
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Unset => "",
            FieldType::Known(kind) => kind.as_ref(),
            FieldType::Unknown(tag) => tag.as_str(),
        }
    }

    /// Next entry of the type selector (`Unset` followed by every kind).
    /// Unknown tags restart the selector from `Unset`.
    pub fn cycle(&self, dir: i32) -> FieldType {
        let mut choices = vec![FieldType::Unset];
        choices.extend(WidgetKind::iter().map(FieldType::Known));
        let len = choices.len() as i32;
        let idx = match choices.iter().position(|c| c == self) {
            Some(idx) => idx as i32,
            None if dir < 0 => 1,
            None => 0,
        };
        choices[(idx + dir).rem_euclid(len) as usize].clone()
    }
}

impl From<&str> for FieldType {
    fn from(raw: &str) -> Self {
        if raw.is_empty() {
            return FieldType::Unset;
        }
        match raw.parse::<WidgetKind>() {
            Ok(kind) => FieldType::Known(kind),
            Err(_) => FieldType::Unknown(raw.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(raw: String) -> Self {
        FieldType::from(raw.as_str())
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Unset => write!(f, "Select Field Type"),
            FieldType::Known(kind) => write!(f, "{}", kind.title()),
            FieldType::Unknown(tag) => write!(f, "{tag} (unknown)"),
        }
    }
}

/// Editable attributes of a field definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FieldAttribute {
    Type,
    Label,
    Name,
    Options,
}

/// Declarative description of one form field.
///
/// Missing keys in a loaded config fall back to the empty defaults, which is
/// also what `add_field` creates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDefinition {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub name: String,
    pub options: Vec<String>,
    pub validation: BTreeMap<String, bool>,
}

impl FieldDefinition {
    /// Apply a raw attribute edit. `Options` is split on `,` and de-duplicated.
    pub fn apply(&mut self, attribute: FieldAttribute, raw: &str) {
        match attribute {
            FieldAttribute::Type => self.field_type = FieldType::from(raw),
            FieldAttribute::Label => self.label = raw.to_string(),
            FieldAttribute::Name => self.name = raw.to_string(),
            FieldAttribute::Options => self.options = parse_options(raw),
        }
    }

    /// Current raw text of an attribute, as shown in the editor.
    pub fn raw(&self, attribute: FieldAttribute) -> String {
        match attribute {
            FieldAttribute::Type => self.field_type.as_str().to_string(),
            FieldAttribute::Label => self.label.clone(),
            FieldAttribute::Name => self.name.clone(),
            FieldAttribute::Options => self.options.join(","),
        }
    }

    pub fn rule(&self, rule: &str) -> bool {
        self.validation.get(rule).copied().unwrap_or(false)
    }

    pub fn is_required(&self) -> bool {
        self.rule(REQUIRED_RULE)
    }

    /// A field needs a type, a label and a name before the form can be submitted.
    pub fn is_complete(&self) -> bool {
        !self.field_type.is_unset() && !self.label.is_empty() && !self.name.is_empty()
    }
}

/// Split raw option input on `,` and keep the first occurrence of every entry.
///
/// Tokens are not trimmed: `"a, b"` yields `["a", " b"]`, and an empty input
/// yields a single empty option.
pub fn parse_options(raw: &str) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for token in raw.split(',') {
        if !options.iter().any(|o| o == token) {
            options.push(token.to_string());
        }
    }
    options
}

/// Drop duplicate options in place, keeping first occurrences.
pub fn dedup_options(options: &mut Vec<String>) {
    let mut seen: Vec<String> = Vec::with_capacity(options.len());
    options.retain(|o| {
        if seen.contains(o) {
            false
        } else {
            seen.push(o.clone());
            true
        }
    });
}
