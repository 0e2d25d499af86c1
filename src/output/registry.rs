//! Structured-output schema registry.
//!
//! Built once at process start from the fixed tool set, then read-only: safe
//! to share by reference across handlers without synchronization.  Each entry
//! holds the portable JSON Schema for a tool and the compiled validator
//! derived from that exact document, so the published contract and the
//! enforced contract cannot drift.

use jsonschema::JSONSchema;
use schemars::gen::SchemaGenerator;
use schemars::JsonSchema;
use serde_json::{json, Value};
use std::collections::HashMap;
use thiserror::Error;

use super::schemas::{
    AnalyzePayload, ClearAllPayload, DeletePayload, DetailPayload, ExecutePayload, ListPayload,
    PlanPayload, QueryPayload, ReflectPayload, SplitPayload, ToolEnvelope, UpdatePayload,
    VerifyPayload,
};

/// A value failed validation against its tool's schema.
#[derive(Debug, Error)]
#[error("structured content for '{tool}' violates its schema: {}", .violations.join("; "))]
pub struct SchemaViolation {
    pub tool: String,
    /// One entry per violation, each naming the failing instance path.
    pub violations: Vec<String>,
}

struct ToolSchema {
    kind: &'static str,
    schema: Value,
    compiled: JSONSchema,
}

/// Immutable tool-name → schema mapping.
pub struct OutputRegistry {
    entries: HashMap<&'static str, ToolSchema>,
}

impl OutputRegistry {
    /// Build the registry for the full tool set.
    ///
    /// Panics only if a derived schema fails to compile, which is a defect in
    /// this crate, not a runtime condition.
    pub fn new() -> Self {
        let mut registry = Self {
            entries: HashMap::new(),
        };
        registry.register::<PlanPayload>("plan_task", "taskManager.plan");
        registry.register::<AnalyzePayload>("analyze_task", "taskManager.analyze");
        registry.register::<ReflectPayload>("reflect_task", "taskManager.reflect");
        registry.register::<SplitPayload>("split_tasks", "taskManager.split");
        registry.register::<ListPayload>("list_tasks", "taskManager.list");
        registry.register::<ExecutePayload>("execute_task", "taskManager.execute");
        registry.register::<VerifyPayload>("verify_task", "taskManager.verify");
        registry.register::<DeletePayload>("delete_task", "taskManager.delete");
        registry.register::<ClearAllPayload>("clear_all_tasks", "taskManager.clear");
        registry.register::<UpdatePayload>("update_task", "taskManager.update");
        registry.register::<QueryPayload>("query_task", "taskManager.query");
        registry.register::<DetailPayload>("get_task_detail", "taskManager.detail");
        registry
    }

    fn register<P: JsonSchema>(&mut self, name: &'static str, kind: &'static str) {
        let root = SchemaGenerator::default().into_root_schema_for::<ToolEnvelope<P>>();
        let mut schema = serde_json::to_value(root)
            .unwrap_or_else(|e| panic!("schema for '{name}' did not serialize: {e}"));
        // Pin the envelope kind to this tool's literal.
        schema["properties"]["kind"] = json!({ "type": "string", "const": kind });

        let compiled = JSONSchema::compile(&schema)
            .unwrap_or_else(|e| panic!("schema for '{name}' did not compile: {e}"));

        self.entries.insert(
            name,
            ToolSchema {
                kind,
                schema,
                compiled,
            },
        );
    }

    fn entry(&self, name: &str) -> &ToolSchema {
        // The tool set is fixed at compile time; an unknown name is a caller
        // bug, not user input.
        self.entries
            .get(name)
            .unwrap_or_else(|| panic!("no structured output schema registered for tool '{name}'"))
    }

    /// Registered tool names, in no particular order.
    pub fn tool_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// The `kind` literal expected in this tool's envelope.
    pub fn kind(&self, name: &str) -> &'static str {
        self.entry(name).kind
    }

    /// Validate a value against the schema registered under `name`.
    pub fn validate(&self, name: &str, value: &Value) -> Result<(), SchemaViolation> {
        let entry = self.entry(name);
        if let Err(errors) = entry.compiled.validate(value) {
            let violations: Vec<String> = errors
                .map(|e| {
                    let path = e.instance_path.to_string();
                    if path.is_empty() {
                        e.to_string()
                    } else {
                        format!("{path}: {e}")
                    }
                })
                .collect();
            return Err(SchemaViolation {
                tool: name.to_string(),
                violations,
            });
        }
        Ok(())
    }

    /// Portable JSON Schema for a tool — the exact document the validator was
    /// compiled from.  Purely descriptive; clients may introspect or validate
    /// independently.
    pub fn json_schema(&self, name: &str) -> &Value {
        &self.entry(name).schema
    }
}

impl Default for OutputRegistry {
    fn default() -> Self {
        Self::new()
    }
}
