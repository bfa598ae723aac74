//! The form builder state: field list, preview values and config buffer.
//!
//! Every mutation of the editor goes through this type. The UI never holds a
//! second copy of the field list; panels read it on each frame.

use serde::Serialize;
use tracing::debug;

use super::errors::BuilderError;
use super::field::{FieldAttribute, FieldDefinition, dedup_options};
use super::values::{FieldValue, FormValues};

/// Successful submission: a snapshot of every preview value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Submission {
    pub values: FormValues,
}

impl Submission {
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.values)
    }

    /// Message shown to the user after a successful submit.
    pub fn message(&self) -> String {
        match self.to_pretty_json() {
            Ok(json) => format!("Form submitted\n{json}"),
            Err(_) => "Form submitted".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    fields: Vec<FieldDefinition>,
    values: FormValues,
    config_buffer: String,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(fields: Vec<FieldDefinition>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&FieldDefinition> {
        self.fields.get(index)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn config_buffer(&self) -> &str {
        &self.config_buffer
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn field_mut(&mut self, index: usize) -> Result<&mut FieldDefinition, BuilderError> {
        let len = self.fields.len();
        self.fields
            .get_mut(index)
            .ok_or(BuilderError::FieldIndexOutOfRange { index, len })
    }

    /// Append an empty field definition and return its index.
    pub fn add_field(&mut self) -> usize {
        self.fields.push(FieldDefinition::default());
        self.fields.len() - 1
    }

    /// Remove the field at `index`; later fields shift down by one.
    pub fn remove_field(&mut self, index: usize) -> Result<FieldDefinition, BuilderError> {
        if index >= self.fields.len() {
            return Err(BuilderError::FieldIndexOutOfRange {
                index,
                len: self.fields.len(),
            });
        }
        let removed = self.fields.remove(index);
        self.prune_value(&removed.name);
        Ok(removed)
    }

    pub fn update_field(
        &mut self,
        index: usize,
        attribute: FieldAttribute,
        raw: &str,
    ) -> Result<(), BuilderError> {
        let field = self.field_mut(index)?;
        let previous_name = field.name.clone();
        field.apply(attribute, raw);
        if attribute == FieldAttribute::Name && previous_name != raw {
            self.prune_value(&previous_name);
        }
        Ok(())
    }

    pub fn toggle_validation(
        &mut self,
        index: usize,
        rule: &str,
        value: bool,
    ) -> Result<(), BuilderError> {
        self.field_mut(index)?.validation.insert(rule.to_string(), value);
        Ok(())
    }

    /// Record a value entered in the preview form.
    pub fn set_value(&mut self, name: &str, value: FieldValue) {
        self.values.set(name, value);
    }

    /// Validate the preview against the field definitions.
    ///
    /// Fields are checked in order and the first failure aborts the submit.
    pub fn submit(&self) -> Result<Submission, BuilderError> {
        for (index, field) in self.fields.iter().enumerate() {
            if !field.is_complete() {
                return Err(BuilderError::IncompleteField { index });
            }
            if field.is_required() && self.values.is_blank(&field.name) {
                return Err(BuilderError::RequiredField {
                    index,
                    label: field.label.clone(),
                    name: field.name.clone(),
                });
            }
        }
        Ok(Submission {
            values: self.values.clone(),
        })
    }

    /// Canonical (compact) JSON form of the field list.
    pub fn serialize_fields(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.fields)
    }

    /// Serialize the field list into the config buffer.
    pub fn save_config(&mut self) -> serde_json::Result<()> {
        self.config_buffer = self.serialize_fields()?;
        debug!(fields = self.fields.len(), "config saved to buffer");
        Ok(())
    }

    pub fn set_config_buffer(&mut self, text: impl Into<String>) {
        self.config_buffer = text.into();
    }

    /// Replace the field list with the parsed config buffer.
    ///
    /// On failure the field list is left as it was.
    pub fn load_config(&mut self) -> Result<usize, BuilderError> {
        let fields = parse_fields(&self.config_buffer)?;
        self.fields = fields;
        let fields = &self.fields;
        self.values
            .retain(|name| fields.iter().any(|f| f.name == name));
        debug!(fields = self.fields.len(), "config loaded from buffer");
        Ok(self.fields.len())
    }

    /// Drop the value stored under `name` unless another field still uses it.
    fn prune_value(&mut self, name: &str) {
        if self.fields.iter().any(|f| f.name == name) {
            return;
        }
        if self.values.remove(name).is_some() {
            debug!(name, "pruned stale preview value");
        }
    }
}

/// Parse a config document into a field list.
///
/// Options are de-duplicated on the way in so a hand-edited document cannot
/// break the options invariant.
pub fn parse_fields(text: &str) -> Result<Vec<FieldDefinition>, BuilderError> {
    let mut fields: Vec<FieldDefinition> =
        serde_json::from_str(text).map_err(BuilderError::ConfigParse)?;
    for field in &mut fields {
        dedup_options(&mut field.options);
    }
    Ok(fields)
}
