//! Reducer: applies one `Action` to the `RootState` and describes the
//! resulting side effects.
//!
//! Policy:
//!   - No I/O; file access is requested through `Effect::Async`.
//!   - Builder errors never escape: they become an alert plus a log line and
//!     leave the state as it was.
//!   - Actions that do not touch the form state are ignored.

use crate::action::Action;
use crate::core::effects::{Effect, TaskKind, TaskResultKind};
use crate::core::state::RootState;
use crate::domain::BuilderError;

pub fn reduce(state: &mut RootState, action: &Action) -> Vec<Effect> {
    let builder = &mut state.builder;
    match action {
        Action::Quit => {
            state.quit_requested = true;
            Vec::new()
        }
        Action::AddField => {
            let index = builder.add_field();
            vec![Effect::log(format!("added field #{index}"))]
        }
        Action::RemoveField(index) => match builder.remove_field(*index) {
            Ok(removed) => vec![Effect::log(format!(
                "removed field #{index} (name={:?})",
                removed.name
            ))],
            Err(err) => failure(err),
        },
        Action::UpdateField {
            index,
            attribute,
            value,
        } => match builder.update_field(*index, *attribute, value) {
            Ok(()) => Vec::new(),
            Err(err) => failure(err),
        },
        Action::ToggleValidation { index, rule, value } => {
            match builder.toggle_validation(*index, rule, *value) {
                Ok(()) => Vec::new(),
                Err(err) => failure(err),
            }
        }
        Action::SetValue { name, value } => {
            builder.set_value(name, value.clone());
            Vec::new()
        }
        Action::SubmitForm => match builder.submit() {
            Ok(submission) => vec![
                Effect::log(format!(
                    "form submitted with {} value(s)",
                    submission.values.len()
                )),
                Effect::alert("Submit", submission.message()),
            ],
            Err(err) => failure(err),
        },
        Action::SaveConfig => match builder.save_config() {
            Ok(()) => vec![Effect::log(format!(
                "saved {} field(s) to the config buffer",
                builder.len()
            ))],
            Err(err) => vec![
                Effect::warn(format!("save config failed: {err}")),
                Effect::alert("Save config", err.to_string()),
            ],
        },
        Action::LoadConfig => match builder.load_config() {
            Ok(count) => vec![Effect::log(format!(
                "loaded {count} field(s) from the config buffer"
            ))],
            Err(err) => failure(err),
        },
        Action::SetConfigBuffer(text) => {
            builder.set_config_buffer(text.clone());
            Vec::new()
        }
        Action::ExportConfig => {
            if builder.config_buffer().is_empty() {
                return vec![Effect::alert(
                    "Export",
                    "The config buffer is empty. Save the config first.",
                )];
            }
            vec![Effect::async_task(TaskKind::ExportConfig {
                path: state.export_path.clone(),
                contents: builder.config_buffer().to_string(),
            })]
        }
        Action::ImportConfig => vec![Effect::async_task(TaskKind::ImportConfig {
            path: state.export_path.clone(),
        })],
        Action::TaskFinished(id, result) => match result {
            TaskResultKind::Exported { path } => vec![
                Effect::log(format!("[task:{id}] exported config to {}", path.display())),
                Effect::alert("Export", format!("Config written to {}", path.display())),
            ],
            TaskResultKind::Imported { path, contents } => {
                builder.set_config_buffer(contents.clone());
                vec![
                    Effect::log(format!("[task:{id}] imported config from {}", path.display())),
                    Effect::alert(
                        "Import",
                        format!(
                            "Config read from {} into the buffer.\nLoad it to replace the field list.",
                            path.display()
                        ),
                    ),
                ]
            }
            TaskResultKind::Failed { path, error } => vec![
                Effect::warn(format!("[task:{id}] {} failed: {error}", path.display())),
                Effect::alert("File error", format!("{}: {error}", path.display())),
            ],
        },
        _ => Vec::new(),
    }
}

fn failure(err: BuilderError) -> Vec<Effect> {
    let report = err.report();
    vec![
        Effect::warn(format!("{}: {}", err.title(), report.replace('\n', ": "))),
        Effect::alert(err.title(), report),
    ]
}
