//! Root state owned by the event loop and mutated only by the reducer.

use std::path::PathBuf;

use crate::domain::{FieldDefinition, FormBuilder};

/// File name used by config export/import inside the data directory.
pub const EXPORT_FILE_NAME: &str = "form-config.json";

#[derive(Debug, Clone)]
pub struct RootState {
    pub builder: FormBuilder,
    /// Target of `ExportConfig` / source of `ImportConfig`.
    pub export_path: PathBuf,
    pub quit_requested: bool,
}

impl RootState {
    pub fn new(export_path: PathBuf) -> Self {
        Self {
            builder: FormBuilder::new(),
            export_path,
            quit_requested: false,
        }
    }

    pub fn with_fields(mut self, fields: Vec<FieldDefinition>) -> Self {
        self.builder = FormBuilder::with_fields(fields);
        self
    }

    pub fn builder(&self) -> &FormBuilder {
        &self.builder
    }
}
