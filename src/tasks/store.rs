//! Task collection persistence.
//!
//! All state lives in one JSON file (`{"tasks": [...]}`).  Reads are lenient
//! so legacy data always loads; every mutation validates the affected record
//! and rewrites the whole collection through the atomic writer.  The file is
//! a single-writer resource — this layer adds no locking, callers serialize
//! concurrent writers upstream.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::CoreConfig;
use crate::storage::write_json_atomic;
use crate::tasks::model::{RelatedFile, Task, TaskDependency, TaskRecord, TaskStatus};

/// On-disk shape of the tasks file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct TaskFile {
    #[serde(default)]
    tasks: Vec<TaskRecord>,
}

/// Fields for a new task.  Status is always `pending`; id and timestamps are
/// assigned here.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub name: String,
    pub description: String,
    pub notes: Option<String>,
    pub dependencies: Vec<String>,
    pub related_files: Option<Vec<RelatedFile>>,
    pub agent: Option<String>,
}

/// Partial content update.  `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskContentUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub dependencies: Option<Vec<String>>,
    pub related_files: Option<Vec<RelatedFile>>,
    pub implementation_guide: Option<String>,
    pub verification_criteria: Option<String>,
    pub agent: Option<String>,
}

/// Result of [`TaskStore::clear_all_tasks`].
#[derive(Debug)]
pub struct ClearOutcome {
    pub removed: usize,
    pub completed_backed_up: usize,
    /// Backup file under the memory directory; `None` when there was nothing
    /// to clear.
    pub backup_file: Option<PathBuf>,
}

/// Persistence layer for the task collection.
pub struct TaskStore {
    tasks_file: PathBuf,
    memory_dir: PathBuf,
}

impl TaskStore {
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            tasks_file: config.tasks_file(),
            memory_dir: config.memory_dir(),
        }
    }

    /// Load the full collection.  A missing file is an empty collection, not
    /// an error; malformed records load as-is and are caught by validation
    /// when something tries to persist or emit them.
    async fn read(&self) -> Result<Vec<TaskRecord>> {
        let raw = match fs::read_to_string(&self.tasks_file).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("reading {}", self.tasks_file.display()))
            }
        };
        let file: TaskFile = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", self.tasks_file.display()))?;
        Ok(file.tasks)
    }

    async fn write(&self, tasks: Vec<TaskRecord>) -> Result<()> {
        debug!(count = tasks.len(), path = %self.tasks_file.display(), "persisting tasks");
        write_json_atomic(&self.tasks_file, &TaskFile { tasks }).await
    }

    pub async fn all_tasks(&self) -> Result<Vec<TaskRecord>> {
        self.read().await
    }

    pub async fn task_by_id(&self, task_id: &str) -> Result<Option<TaskRecord>> {
        Ok(self.read().await?.into_iter().find(|t| t.id == task_id))
    }

    /// Create a task with a fresh uuid and `pending` status.
    pub async fn create_task(&self, draft: TaskDraft) -> Result<Task> {
        let now = Utc::now();
        let record = TaskRecord {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            status: TaskStatus::Pending.as_str().to_string(),
            description: draft.description,
            notes: draft.notes,
            agent: draft.agent,
            dependencies: draft
                .dependencies
                .into_iter()
                .map(|task_id| TaskDependency { task_id })
                .collect(),
            related_files: draft.related_files,
            created_at: Some(now),
            updated_at: Some(now),
            ..Default::default()
        };
        record.validate()?;

        let mut tasks = self.read().await?;
        tasks.push(record.clone());
        self.write(tasks).await?;

        info!(task_id = %record.id, name = %record.name, "task created");
        Ok(Task::try_from(record)?)
    }

    /// Apply `mutate` to the record with `task_id`, validate, persist.
    async fn update_record<F>(&self, task_id: &str, mutate: F) -> Result<Task>
    where
        F: FnOnce(&mut TaskRecord) -> Result<()>,
    {
        let mut tasks = self.read().await?;
        let record = match tasks.iter_mut().find(|t| t.id == task_id) {
            Some(record) => record,
            None => bail!("task '{task_id}' not found"),
        };

        mutate(record)?;
        record.updated_at = Some(Utc::now());
        record.validate()?;
        let updated = record.clone();

        self.write(tasks).await?;
        Ok(Task::try_from(updated)?)
    }

    /// Move a task to a new status.  Completed tasks are frozen: their
    /// status can no longer change.
    pub async fn update_task_status(&self, task_id: &str, status: TaskStatus) -> Result<Task> {
        self.update_record(task_id, |record| {
            if record.status() == Ok(TaskStatus::Completed) {
                bail!("task '{task_id}' is completed and cannot change status");
            }
            record.status = status.as_str().to_string();
            if status == TaskStatus::Completed {
                record.completed_at = Some(Utc::now());
            }
            Ok(())
        })
        .await
    }

    /// Set the completion summary.  Allowed on completed tasks.
    pub async fn update_task_summary(&self, task_id: &str, summary: &str) -> Result<Task> {
        let summary = summary.to_string();
        self.update_record(task_id, move |record| {
            record.summary = Some(summary);
            Ok(())
        })
        .await
    }

    /// Partial content update.  Rejected on completed tasks.
    pub async fn update_task_content(
        &self,
        task_id: &str,
        updates: TaskContentUpdate,
    ) -> Result<Task> {
        self.update_record(task_id, move |record| {
            if record.status() == Ok(TaskStatus::Completed) {
                bail!("task '{task_id}' is completed and cannot be updated");
            }
            if let Some(name) = updates.name {
                record.name = name;
            }
            if let Some(description) = updates.description {
                record.description = description;
            }
            if let Some(notes) = updates.notes {
                record.notes = Some(notes);
            }
            if let Some(dependencies) = updates.dependencies {
                record.dependencies = dependencies
                    .into_iter()
                    .map(|task_id| TaskDependency { task_id })
                    .collect();
            }
            if let Some(related_files) = updates.related_files {
                record.related_files = Some(related_files);
            }
            if let Some(guide) = updates.implementation_guide {
                record.implementation_guide = Some(guide);
            }
            if let Some(criteria) = updates.verification_criteria {
                record.verification_criteria = Some(criteria);
            }
            if let Some(agent) = updates.agent {
                record.agent = Some(agent);
            }
            Ok(())
        })
        .await
    }

    /// Remove a task.  Completed tasks cannot be deleted.
    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        let mut tasks = self.read().await?;
        let index = match tasks.iter().position(|t| t.id == task_id) {
            Some(index) => index,
            None => bail!("task '{task_id}' not found"),
        };
        if tasks[index].status() == Ok(TaskStatus::Completed) {
            bail!("task '{task_id}' is completed and cannot be deleted");
        }

        let removed = tasks.remove(index);
        self.write(tasks).await?;
        info!(task_id = %removed.id, name = %removed.name, "task deleted");
        Ok(())
    }

    /// Clear the whole collection, backing up completed tasks to the memory
    /// directory first.
    pub async fn clear_all_tasks(&self) -> Result<ClearOutcome> {
        let tasks = self.read().await?;
        if tasks.is_empty() {
            return Ok(ClearOutcome {
                removed: 0,
                completed_backed_up: 0,
                backup_file: None,
            });
        }

        let completed: Vec<TaskRecord> = tasks
            .iter()
            .filter(|t| t.status() == Ok(TaskStatus::Completed))
            .cloned()
            .collect();

        let backup_name = format!(
            "tasks_memory_{}.json",
            Utc::now().format("%Y-%m-%dT%H-%M-%S")
        );
        let backup_path = self.memory_dir.join(backup_name);
        write_json_atomic(&backup_path, &TaskFile { tasks: completed.clone() }).await?;

        let removed = tasks.len();
        self.write(Vec::new()).await?;

        info!(
            removed,
            backed_up = completed.len(),
            backup = %backup_path.display(),
            "cleared all tasks"
        );
        Ok(ClearOutcome {
            removed,
            completed_backed_up: completed.len(),
            backup_file: Some(backup_path),
        })
    }
}
