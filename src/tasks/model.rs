//! Task status model and record validation.
//!
//! Two shapes exist on purpose.  [`TaskRecord`] is what the persistence layer
//! reads and writes: id, name, and status are plain strings so that legacy or
//! hand-edited data always loads, and unknown attributes survive a round trip
//! through the flattened `extra` map.  [`Task`] is the validated shape with a
//! true [`TaskStatus`] sum type; the only way from record to task is through
//! validation.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ─── Status enumeration ───────────────────────────────────────────────────────

/// Closed set of task lifecycle values.
///
/// Declaration order is the seeding order for metrics, not a priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Blocked,
}

impl TaskStatus {
    /// Every status, in declaration order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Blocked,
    ];

    /// Wire value, matching persisted data.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Blocked => "blocked",
        }
    }

    /// Comma-separated list of valid wire values, for error messages.
    pub fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TaskValidationError::UnknownStatus {
                status: s.to_string(),
            })
    }
}

// ─── Validation errors ────────────────────────────────────────────────────────

/// Why a task record failed validation.
///
/// Messages name the offending task where an id is present, and the invalid-
/// status variants enumerate the full valid set so callers can self-correct.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskValidationError {
    #[error("task is missing required field: id")]
    MissingId,

    #[error("task '{id}' is missing required field: name")]
    MissingName { id: String },

    #[error("task '{id}' has invalid status '{status}': expected one of {}", TaskStatus::allowed())]
    InvalidStatus { id: String, status: String },

    #[error("invalid task status '{status}': expected one of {}", TaskStatus::allowed())]
    UnknownStatus { status: String },
}

// ─── Optional attributes ──────────────────────────────────────────────────────

/// A prerequisite reference.  Dependency ids are stored and surfaced but this
/// core never evaluates the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskDependency {
    pub task_id: String,
}

/// How a file relates to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelatedFileType {
    ToModify,
    Reference,
    Create,
    Dependency,
    Other,
}

/// A file associated with a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatedFile {
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: RelatedFileType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_start: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_end: Option<u32>,
}

// ─── Task record (persisted shape) ────────────────────────────────────────────

/// A task as persisted: lenient on load, gated by [`TaskRecord::validate`]
/// before anything is written back or crosses the boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_guide: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_criteria: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<TaskDependency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_files: Option<Vec<RelatedFile>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Implementation-defined attributes this core does not constrain.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TaskRecord {
    /// Check that the record is well-formed: non-empty id, non-empty name,
    /// status drawn from the closed enumeration.
    ///
    /// Pure and non-mutating.  Fails fast on the first violation, in the
    /// fixed order id → name → status.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_empty() {
            return Err(TaskValidationError::MissingId);
        }
        if self.name.is_empty() {
            return Err(TaskValidationError::MissingName {
                id: self.id.clone(),
            });
        }
        if TaskStatus::from_str(&self.status).is_err() {
            return Err(TaskValidationError::InvalidStatus {
                id: self.id.clone(),
                status: self.status.clone(),
            });
        }
        Ok(())
    }

    /// The parsed status, when valid.
    pub fn status(&self) -> Result<TaskStatus, TaskValidationError> {
        TaskStatus::from_str(&self.status)
    }
}

// ─── Task (validated shape) ───────────────────────────────────────────────────

/// A validated task.  Constructed only through [`TryFrom<TaskRecord>`], so a
/// `Task` in hand always satisfies the record invariants.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub status: TaskStatus,
    pub description: String,
    pub notes: Option<String>,
    pub summary: Option<String>,
    pub agent: Option<String>,
    pub analysis_result: Option<String>,
    pub implementation_guide: Option<String>,
    pub verification_criteria: Option<String>,
    pub dependencies: Vec<TaskDependency>,
    pub related_files: Option<Vec<RelatedFile>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskValidationError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        record.validate()?;
        let status = record.status()?;
        // Records predating timestamp tracking get "now", matching the
        // original loader's fallback.
        let now = Utc::now();
        Ok(Task {
            id: record.id,
            name: record.name,
            status,
            description: record.description,
            notes: record.notes,
            summary: record.summary,
            agent: record.agent,
            analysis_result: record.analysis_result,
            implementation_guide: record.implementation_guide,
            verification_criteria: record.verification_criteria,
            dependencies: record.dependencies,
            related_files: record.related_files,
            created_at: record.created_at.unwrap_or(now),
            updated_at: record.updated_at.unwrap_or(now),
            completed_at: record.completed_at,
            extra: record.extra,
        })
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        TaskRecord {
            id: task.id,
            name: task.name,
            status: task.status.as_str().to_string(),
            description: task.description,
            notes: task.notes,
            summary: task.summary,
            agent: task.agent,
            analysis_result: task.analysis_result,
            implementation_guide: task.implementation_guide,
            verification_criteria: task.verification_criteria,
            dependencies: task.dependencies,
            related_files: task.related_files,
            created_at: Some(task.created_at),
            updated_at: Some(task.updated_at),
            completed_at: task.completed_at,
            extra: task.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, status: &str) -> TaskRecord {
        TaskRecord {
            id: id.to_string(),
            name: name.to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_record_passes() {
        assert!(record("t1", "Build", "completed").validate().is_ok());
    }

    #[test]
    fn missing_id_detected_first() {
        // Both id and name are empty: id wins.
        let err = record("", "", "bogus").validate().unwrap_err();
        assert_eq!(err, TaskValidationError::MissingId);
    }

    #[test]
    fn missing_name_names_the_task() {
        let err = record("t9", "", "pending").validate().unwrap_err();
        assert_eq!(err.to_string(), "task 't9' is missing required field: name");
    }

    #[test]
    fn invalid_status_enumerates_valid_values() {
        let err = record("t2", "Test", "done").validate().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("t2"));
        assert!(message.contains("'done'"));
        for status in TaskStatus::ALL {
            assert!(message.contains(status.as_str()), "missing {status}");
        }
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert!(TaskStatus::from_str("paused").is_err());
    }

    #[test]
    fn status_wire_values_are_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn unknown_attributes_survive_round_trip() {
        let raw = r#"{"id":"t1","name":"Build","status":"pending","priority":"high"}"#;
        let record: TaskRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.extra["priority"], "high");
        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["priority"], "high");
    }

    #[test]
    fn validated_task_requires_valid_record() {
        let ok = Task::try_from(record("t1", "Build", "in_progress")).unwrap();
        assert_eq!(ok.status, TaskStatus::InProgress);
        assert!(Task::try_from(record("t1", "Build", "nope")).is_err());
    }
}
