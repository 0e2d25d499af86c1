//! Typed structured-content payloads, one per tool.
//!
//! Each tool's return value is a [`ToolEnvelope`] whose `kind` is a per-tool
//! literal pinned by the registry.  The derives here are the single source of
//! truth: the same `JsonSchema` output backs both the compiled validator and
//! the portable schema published to clients.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::tasks::complexity::TaskComplexityAssessment;
use crate::tasks::model::{RelatedFile, TaskDependency, TaskStatus};

/// Envelope around every structured value: `{"kind": "...", "payload": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolEnvelope<P> {
    pub kind: String,
    pub payload: P,
}

/// Fields common to every payload: the rendered markdown body plus optional
/// presentation and error metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkdownPayload {
    /// Human-readable result body; never empty.
    #[schemars(length(min = 1))]
    pub markdown: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

// ─── Shared task views ────────────────────────────────────────────────────────

/// Minimal boundary view of a task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub id: String,
    pub name: String,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

/// Full boundary view of a task.  Timestamps are RFC 3339 strings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetail {
    #[serde(flatten)]
    pub base: TaskSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_guide: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_criteria: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<TaskDependency>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_files: Option<Vec<RelatedFile>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

/// Status filter echoed back by `list_tasks`: `all` or one concrete status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestedStatus {
    All,
    Pending,
    InProgress,
    Completed,
    Blocked,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[schemars(range(min = 1))]
    pub current_page: u32,
    #[schemars(range(min = 1))]
    pub total_pages: u32,
    pub total_results: u64,
    #[schemars(range(min = 1))]
    pub page_size: u32,
    pub has_more: bool,
}

/// How `split_tasks` merged the incoming batch into the existing collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum SplitUpdateMode {
    Append,
    Overwrite,
    Selective,
    ClearAllTasks,
}

// ─── Per-tool payloads ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanPayload {
    #[serde(flatten)]
    pub markdown: MarkdownPayload,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_task_stats: Option<ExistingTaskStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExistingTaskStats {
    pub total: u64,
    pub completed: u64,
    pub pending: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzePayload {
    #[serde(flatten)]
    pub markdown: MarkdownPayload,
    pub summary: String,
    pub initial_concept: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_analysis: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReflectPayload {
    #[serde(flatten)]
    pub markdown: MarkdownPayload,
    pub summary: String,
    pub analysis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SplitPayload {
    #[serde(flatten)]
    pub markdown: MarkdownPayload,
    pub update_mode: SplitUpdateMode,
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_tasks: Option<Vec<TaskDetail>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_tasks: Option<Vec<TaskDetail>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_file_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListPayload {
    #[serde(flatten)]
    pub markdown: MarkdownPayload,
    pub requested_status: RequestedStatus,
    /// Per-status counts plus `total`; statuses outside the enumeration may
    /// appear under their literal key.
    pub counts: BTreeMap<String, u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<TaskDetail>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExecutePayload {
    #[serde(flatten)]
    pub markdown: MarkdownPayload,
    pub task_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_before: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_after: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_by: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<TaskComplexityAssessment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_tasks: Option<Vec<TaskSummary>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPayload {
    #[serde(flatten)]
    pub markdown: MarkdownPayload,
    pub task_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    #[schemars(range(min = 0, max = 100))]
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_after: Option<TaskStatus>,
    pub status_changed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletePayload {
    #[serde(flatten)]
    pub markdown: MarkdownPayload,
    pub task_id: String,
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClearAllPayload {
    #[serde(flatten)]
    pub markdown: MarkdownPayload,
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_removed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_backed_up: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayload {
    #[serde(flatten)]
    pub markdown: MarkdownPayload,
    pub task_id: String,
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_task: Option<TaskDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryPayload {
    #[serde(flatten)]
    pub markdown: MarkdownPayload,
    pub query: String,
    pub is_id: bool,
    #[schemars(range(min = 1))]
    pub page: u32,
    #[schemars(range(min = 1))]
    pub page_size: u32,
    pub results: Vec<TaskDetail>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetailPayload {
    #[serde(flatten)]
    pub markdown: MarkdownPayload,
    pub task_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskDetail>,
}
