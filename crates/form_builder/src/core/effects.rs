/*!
Effect & task model.

The reducer stays pure: it mutates the `FormBuilder` and returns a list of
`Effect`s. The event loop interprets them:

- `Effect::Alert`  opens an alert popup
- `Effect::Log`    writes an info line to the log file
- `Effect::Warn`   writes a warning for a failed operation
- `Effect::Async`  hands a `TaskKind` to the `TaskExecutor`

Task completion re-enters the loop as `Action::TaskFinished(id, TaskResultKind)`.
*/

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Declarative instruction emitted by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Alert { title: String, message: String },
    Log(String),
    Warn(String),
    Async(TaskKind),
}

impl Effect {
    pub fn alert<T: Into<String>, M: Into<String>>(title: T, message: M) -> Self {
        Effect::Alert {
            title: title.into(),
            message: message.into(),
        }
    }
    pub fn log<T: Into<String>>(msg: T) -> Self {
        Effect::Log(msg.into())
    }
    pub fn warn<T: Into<String>>(msg: T) -> Self {
        Effect::Warn(msg.into())
    }
    pub fn async_task(kind: TaskKind) -> Self {
        Effect::Async(kind)
    }
}

/// Background work. Each variant carries everything needed to run it.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskKind {
    /// Write the config buffer to disk.
    ExportConfig { path: PathBuf, contents: String },
    /// Read a config document from disk into the buffer.
    ImportConfig { path: PathBuf },
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::ExportConfig { path, contents } => {
                write!(f, "ExportConfig(path={}, bytes={})", path.display(), contents.len())
            }
            TaskKind::ImportConfig { path } => write!(f, "ImportConfig(path={})", path.display()),
        }
    }
}

/// Outcome reported by the executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TaskResultKind {
    Exported { path: PathBuf },
    Imported { path: PathBuf, contents: String },
    Failed { path: PathBuf, error: String },
}
