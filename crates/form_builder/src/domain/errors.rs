use thiserror::Error;

/// Errors raised by the form builder core.
///
/// All of them are recoverable: the caller surfaces the message and the
/// aborted operation leaves the state untouched.
#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("All fields must have a type, label, and name.")]
    IncompleteField { index: usize },

    #[error("{label} is required.")]
    RequiredField {
        index: usize,
        label: String,
        name: String,
    },

    #[error("Invalid JSON format")]
    ConfigParse(#[source] serde_json::Error),

    #[error("field index {index} out of range (field count: {len})")]
    FieldIndexOutOfRange { index: usize, len: usize },
}

impl BuilderError {
    /// Title used when the error is surfaced in an alert.
    pub fn title(&self) -> &'static str {
        match self {
            BuilderError::IncompleteField { .. } | BuilderError::RequiredField { .. } => {
                "Cannot submit"
            }
            BuilderError::ConfigParse(_) => "Load config",
            BuilderError::FieldIndexOutOfRange { .. } => "Edit field",
        }
    }

    /// Parser position and reason behind a `ConfigParse`, for alert bodies and logs.
    pub fn detail(&self) -> Option<String> {
        match self {
            BuilderError::ConfigParse(source) => Some(source.to_string()),
            _ => None,
        }
    }

    /// User-facing message: the error text followed by the parser detail, if any.
    pub fn report(&self) -> String {
        match self.detail() {
            Some(detail) => format!("{self}
{detail}"),
            None => self.to_string(),
        }
    }
}
