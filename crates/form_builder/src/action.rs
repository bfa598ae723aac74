use serde::{Deserialize, Serialize};
use strum::Display;

use crate::core::effects::TaskResultKind;
use crate::domain::{FieldAttribute, FieldValue};

#[derive(Debug, Clone, PartialEq, Serialize, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Error(String),
    Help,
    FocusNext,
    FocusPrev,
    Update,
    ClosePopup,

    // Field list editing
    AddField,
    RemoveField(usize),
    UpdateField {
        index: usize,
        attribute: FieldAttribute,
        value: String,
    },
    ToggleValidation {
        index: usize,
        rule: String,
        value: bool,
    },

    // Preview form
    SetValue {
        name: String,
        value: FieldValue,
    },
    SubmitForm,

    // Config buffer
    SaveConfig,
    LoadConfig,
    SetConfigBuffer(String),
    ExportConfig,
    ImportConfig,

    /// Show a message in a modal alert.
    Alert {
        title: String,
        message: String,
    },
    /// Completion of a background task scheduled by the reducer.
    TaskFinished(u64, TaskResultKind),
}

impl Action {
    pub fn alert(title: impl Into<String>, message: impl Into<String>) -> Self {
        Action::Alert {
            title: title.into(),
            message: message.into(),
        }
    }
}
