//! Boundary views of task records.
//!
//! Validation is the gate here: a record must pass the status-model checks
//! before it becomes a [`TaskSummary`] or [`TaskDetail`], so nothing
//! malformed leaves the process dressed up as task data.

use crate::tasks::model::{TaskRecord, TaskValidationError};

use super::schemas::{TaskDetail, TaskSummary};

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Minimal view: id, name, status, agent.
pub fn task_summary(record: &TaskRecord) -> Result<TaskSummary, TaskValidationError> {
    record.validate()?;
    Ok(TaskSummary {
        id: record.id.clone(),
        name: record.name.clone(),
        status: record.status()?,
        agent: record.agent.clone(),
    })
}

/// Full view with optional fields omitted when empty and timestamps rendered
/// RFC 3339.
pub fn task_detail(record: &TaskRecord) -> Result<TaskDetail, TaskValidationError> {
    let base = task_summary(record)?;
    Ok(TaskDetail {
        base,
        description: non_empty(&record.description),
        notes: record.notes.clone(),
        implementation_guide: record.implementation_guide.clone(),
        verification_criteria: record.verification_criteria.clone(),
        summary: record.summary.clone(),
        dependencies: if record.dependencies.is_empty() {
            None
        } else {
            Some(record.dependencies.clone())
        },
        related_files: record
            .related_files
            .as_ref()
            .filter(|files| !files.is_empty())
            .cloned(),
        created_at: record.created_at.map(|t| t.to_rfc3339()),
        updated_at: record.updated_at.map(|t| t.to_rfc3339()),
        completed_at: record.completed_at.map(|t| t.to_rfc3339()),
    })
}

/// Detail views for a whole collection; fails on the first invalid record.
pub fn task_details(records: &[TaskRecord]) -> Result<Vec<TaskDetail>, TaskValidationError> {
    records.iter().map(task_detail).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::model::{TaskDependency, TaskStatus};
    use chrono::Utc;

    fn record() -> TaskRecord {
        TaskRecord {
            id: "t1".into(),
            name: "Build".into(),
            status: "completed".into(),
            description: "compile the thing".into(),
            summary: Some("done".into()),
            completed_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    #[test]
    fn summary_carries_parsed_status() {
        let summary = task_summary(&record()).unwrap();
        assert_eq!(summary.status, TaskStatus::Completed);
        assert_eq!(summary.id, "t1");
    }

    #[test]
    fn invalid_record_is_refused() {
        let mut bad = record();
        bad.status = "archived".into();
        assert!(task_summary(&bad).is_err());
        assert!(task_detail(&bad).is_err());
    }

    #[test]
    fn empty_collections_are_omitted() {
        let detail = task_detail(&record()).unwrap();
        assert!(detail.dependencies.is_none());
        assert!(detail.related_files.is_none());
        assert!(detail.notes.is_none());
    }

    #[test]
    fn dependencies_surface_when_present() {
        let mut with_deps = record();
        with_deps.dependencies = vec![TaskDependency {
            task_id: "t0".into(),
        }];
        let detail = task_detail(&with_deps).unwrap();
        assert_eq!(detail.dependencies.unwrap().len(), 1);
    }

    #[test]
    fn detail_serializes_flat() {
        let value = serde_json::to_value(task_detail(&record()).unwrap()).unwrap();
        // Flattened summary fields sit at the top level.
        assert_eq!(value["id"], "t1");
        assert_eq!(value["status"], "completed");
        assert!(value.get("base").is_none());
    }
}
