/*!
Task executor for the reducer's `Effect::Async(TaskKind)` outputs.

- Scheduling goes through an unbounded channel; `spawn(kind)` never blocks
  the UI loop.
- A single Tokio worker pulls tasks in order, so an export followed by an
  import of the same file observes the written contents.
- Each task reports back as `Action::TaskFinished(id, TaskResultKind)`.
- Pending tasks are dropped when the channel closes on shutdown.
*/

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::action::Action;
use crate::core::effects::{TaskKind, TaskResultKind};

/// Monotonic task identifier type.
pub type TaskId = u64;

/// Cloneable handle for scheduling background tasks.
#[derive(Clone)]
pub struct TaskExecutor {
    tx: mpsc::UnboundedSender<Dispatch>,
}

struct Dispatch {
    id: TaskId,
    kind: TaskKind,
}

impl TaskExecutor {
    /// Create the executor and spawn its worker on the current Tokio runtime.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Dispatch>();
        Worker { rx, action_tx }.spawn();
        Self { tx }
    }

    /// Schedule a task and return its id.
    pub fn spawn(&self, kind: TaskKind) -> TaskId {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        info!("[task:{id}] scheduled {kind}");
        if let Err(e) = self.tx.send(Dispatch { id, kind }) {
            warn!("TaskExecutor channel closed; failed to schedule task: {e}");
        }
        id
    }
}

struct Worker {
    rx: mpsc::UnboundedReceiver<Dispatch>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Worker {
    fn spawn(mut self) {
        tokio::spawn(async move {
            while let Some(dispatch) = self.rx.recv().await {
                let result = run(dispatch.kind).await;
                if let TaskResultKind::Failed { path, error } = &result {
                    warn!("[task:{}] {} failed: {error}", dispatch.id, path.display());
                }
                if self
                    .action_tx
                    .send(Action::TaskFinished(dispatch.id, result))
                    .is_err()
                {
                    break;
                }
            }
            info!("TaskExecutor worker stopped (channel closed)");
        });
    }
}

/// Execute one task to completion.
pub async fn run(kind: TaskKind) -> TaskResultKind {
    match kind {
        TaskKind::ExportConfig { path, contents } => {
            if let Some(parent) = path.parent() {
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    return TaskResultKind::Failed {
                        path,
                        error: e.to_string(),
                    };
                }
            }
            match tokio::fs::write(&path, contents).await {
                Ok(()) => TaskResultKind::Exported { path },
                Err(e) => TaskResultKind::Failed {
                    path,
                    error: e.to_string(),
                },
            }
        }
        TaskKind::ImportConfig { path } => match tokio::fs::read_to_string(&path).await {
            Ok(contents) => TaskResultKind::Imported { path, contents },
            Err(e) => TaskResultKind::Failed {
                path,
                error: e.to_string(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn export_then_import_round_trips_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("form-config.json");

        let exported = run(TaskKind::ExportConfig {
            path: path.clone(),
            contents: "[]".into(),
        })
        .await;
        assert_eq!(exported, TaskResultKind::Exported { path: path.clone() });

        let imported = run(TaskKind::ImportConfig { path: path.clone() }).await;
        assert_eq!(
            imported,
            TaskResultKind::Imported {
                path,
                contents: "[]".into()
            }
        );
    }

    #[tokio::test]
    async fn missing_file_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let result = run(TaskKind::ImportConfig { path }).await;
        assert!(matches!(result, TaskResultKind::Failed { .. }));
    }

    #[tokio::test]
    async fn executor_reports_completion_as_action() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form-config.json");
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let executor = TaskExecutor::new(action_tx);

        let id = executor.spawn(TaskKind::ExportConfig {
            path: path.clone(),
            contents: "[]".into(),
        });
        let action = action_rx.recv().await.unwrap();
        assert_eq!(
            action,
            Action::TaskFinished(id, TaskResultKind::Exported { path })
        );
    }
}
