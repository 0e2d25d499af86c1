//! Round-trip: for every registered tool, a value built from its payload
//! type passes validation, and dropping a required field fails with an error
//! naming that field.

use serde_json::Value;
use std::collections::BTreeMap;
use taskcore::output::schemas::*;
use taskcore::output::OutputRegistry;
use taskcore::tasks::TaskStatus;

fn md(text: &str) -> MarkdownPayload {
    MarkdownPayload {
        markdown: text.to_string(),
        ..Default::default()
    }
}

fn summary() -> TaskSummary {
    TaskSummary {
        id: "t1".to_string(),
        name: "Build".to_string(),
        status: TaskStatus::Pending,
        agent: None,
    }
}

fn detail() -> TaskDetail {
    TaskDetail {
        base: summary(),
        description: Some("compile".to_string()),
        notes: None,
        implementation_guide: None,
        verification_criteria: None,
        summary: None,
        dependencies: None,
        related_files: None,
        created_at: None,
        updated_at: None,
        completed_at: None,
    }
}

fn envelope<P: serde::Serialize>(kind: &str, payload: P) -> Value {
    serde_json::to_value(ToolEnvelope {
        kind: kind.to_string(),
        payload,
    })
    .unwrap()
}

/// A satisfying value per tool, plus one required payload field to knock out.
fn samples() -> Vec<(&'static str, Value, &'static str)> {
    let counts: BTreeMap<String, u64> =
        [("pending".to_string(), 1), ("total".to_string(), 1)].into();

    vec![
        (
            "plan_task",
            envelope(
                "taskManager.plan",
                PlanPayload {
                    markdown: md("## Plan"),
                    prompt: "plan it".to_string(),
                    requirements: None,
                    existing_task_stats: None,
                },
            ),
            "prompt",
        ),
        (
            "analyze_task",
            envelope(
                "taskManager.analyze",
                AnalyzePayload {
                    markdown: md("## Analysis"),
                    summary: "summary".to_string(),
                    initial_concept: "concept".to_string(),
                    previous_analysis: None,
                },
            ),
            "initialConcept",
        ),
        (
            "reflect_task",
            envelope(
                "taskManager.reflect",
                ReflectPayload {
                    markdown: md("## Reflection"),
                    summary: "summary".to_string(),
                    analysis: "analysis".to_string(),
                },
            ),
            "analysis",
        ),
        (
            "split_tasks",
            envelope(
                "taskManager.split",
                SplitPayload {
                    markdown: md("## Split"),
                    update_mode: SplitUpdateMode::Append,
                    success: true,
                    message: "ok".to_string(),
                    created_tasks: Some(vec![detail()]),
                    all_tasks: None,
                    backup_file_path: None,
                },
            ),
            "updateMode",
        ),
        (
            "list_tasks",
            envelope(
                "taskManager.list",
                ListPayload {
                    markdown: md("## Tasks"),
                    requested_status: RequestedStatus::All,
                    counts: counts.clone(),
                    tasks: Some(vec![detail()]),
                },
            ),
            "counts",
        ),
        (
            "execute_task",
            envelope(
                "taskManager.execute",
                ExecutePayload {
                    markdown: md("## Execute"),
                    task_id: "t1".to_string(),
                    task_name: Some("Build".to_string()),
                    status_before: Some(TaskStatus::Pending),
                    status_after: Some(TaskStatus::InProgress),
                    blocked_by: None,
                    complexity: None,
                    dependency_tasks: Some(vec![summary()]),
                },
            ),
            "taskId",
        ),
        (
            "verify_task",
            envelope(
                "taskManager.verify",
                VerifyPayload {
                    markdown: md("## Verify"),
                    task_id: "t1".to_string(),
                    task_name: None,
                    score: 87.5,
                    status_after: Some(TaskStatus::Completed),
                    status_changed: true,
                },
            ),
            "score",
        ),
        (
            "delete_task",
            envelope(
                "taskManager.delete",
                DeletePayload {
                    markdown: md("## Delete"),
                    task_id: "t1".to_string(),
                    success: true,
                    message: "deleted".to_string(),
                },
            ),
            "taskId",
        ),
        (
            "clear_all_tasks",
            envelope(
                "taskManager.clear",
                ClearAllPayload {
                    markdown: md("## Clear"),
                    success: true,
                    message: "cleared".to_string(),
                    backup_file_path: Some("memory/tasks_memory_x.json".to_string()),
                    total_removed: Some(2),
                    completed_backed_up: Some(1),
                },
            ),
            "message",
        ),
        (
            "update_task",
            envelope(
                "taskManager.update",
                UpdatePayload {
                    markdown: md("## Update"),
                    task_id: "t1".to_string(),
                    success: true,
                    message: "updated".to_string(),
                    updated_task: Some(detail()),
                    updated_fields: Some(vec!["notes".to_string()]),
                },
            ),
            "success",
        ),
        (
            "query_task",
            envelope(
                "taskManager.query",
                QueryPayload {
                    markdown: md("## Query"),
                    query: "build".to_string(),
                    is_id: false,
                    page: 1,
                    page_size: 10,
                    results: vec![detail()],
                    pagination: Pagination {
                        current_page: 1,
                        total_pages: 1,
                        total_results: 1,
                        page_size: 10,
                        has_more: false,
                    },
                },
            ),
            "pagination",
        ),
        (
            "get_task_detail",
            envelope(
                "taskManager.detail",
                DetailPayload {
                    markdown: md("## Detail"),
                    task_id: "t1".to_string(),
                    task: Some(detail()),
                },
            ),
            "taskId",
        ),
    ]
}

#[test]
fn every_tool_accepts_a_value_built_from_its_payload_type() {
    let registry = OutputRegistry::new();
    for (name, value, _) in samples() {
        registry
            .validate(name, &value)
            .unwrap_or_else(|e| panic!("{name}: {e}"));
    }
}

#[test]
fn removing_a_required_field_fails_and_names_it() {
    let registry = OutputRegistry::new();
    for (name, mut value, field) in samples() {
        value["payload"].as_object_mut().unwrap().remove(field);
        let err = registry.validate(name, &value).unwrap_err();
        assert!(
            err.to_string().contains(field),
            "{name}: expected '{field}' in: {err}"
        );
    }
}

#[test]
fn sample_set_covers_every_registered_tool() {
    let registry = OutputRegistry::new();
    let mut covered: Vec<_> = samples().into_iter().map(|(name, _, _)| name).collect();
    covered.sort_unstable();
    let mut registered: Vec<_> = registry.tool_names().collect();
    registered.sort_unstable();
    assert_eq!(covered, registered);
}
