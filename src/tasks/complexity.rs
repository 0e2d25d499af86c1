//! Complexity assessment over a single task.
//!
//! Pure scoring: each metric (description length, dependency count, notes
//! length) maps to a level, the overall level is the highest triggered, and a
//! handful of recommendation strings fall out of the result.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::model::TaskRecord;

// Thresholds: a metric at or above the bound lands in that level.
const DESCRIPTION_MEDIUM: usize = 500;
const DESCRIPTION_HIGH: usize = 1000;
const DESCRIPTION_VERY_HIGH: usize = 2000;
const DEPENDENCIES_MEDIUM: usize = 2;
const DEPENDENCIES_HIGH: usize = 5;
const DEPENDENCIES_VERY_HIGH: usize = 10;
const NOTES_MEDIUM: usize = 200;
const NOTES_HIGH: usize = 500;
const NOTES_VERY_HIGH: usize = 1000;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskComplexityLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

/// Raw numbers behind an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskComplexityMetrics {
    pub description_length: usize,
    pub dependencies_count: usize,
    pub notes_length: usize,
    pub has_notes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskComplexityAssessment {
    pub level: TaskComplexityLevel,
    pub metrics: TaskComplexityMetrics,
    pub recommendations: Vec<String>,
}

fn level_for(value: usize, medium: usize, high: usize, very_high: usize) -> TaskComplexityLevel {
    if value >= very_high {
        TaskComplexityLevel::VeryHigh
    } else if value >= high {
        TaskComplexityLevel::High
    } else if value >= medium {
        TaskComplexityLevel::Medium
    } else {
        TaskComplexityLevel::Low
    }
}

/// Assess a task's complexity from its stored attributes.
pub fn assess(task: &TaskRecord) -> TaskComplexityAssessment {
    let description_length = task.description.chars().count();
    let dependencies_count = task.dependencies.len();
    let notes_length = task.notes.as_deref().map_or(0, |n| n.chars().count());
    let has_notes = task.notes.is_some();

    let level = level_for(
        description_length,
        DESCRIPTION_MEDIUM,
        DESCRIPTION_HIGH,
        DESCRIPTION_VERY_HIGH,
    )
    .max(level_for(
        dependencies_count,
        DEPENDENCIES_MEDIUM,
        DEPENDENCIES_HIGH,
        DEPENDENCIES_VERY_HIGH,
    ))
    .max(level_for(
        notes_length,
        NOTES_MEDIUM,
        NOTES_HIGH,
        NOTES_VERY_HIGH,
    ));

    let mut recommendations = Vec::new();
    match level {
        TaskComplexityLevel::Low => {
            recommendations.push("Low complexity: execute directly.".to_string());
            recommendations
                .push("Define clear completion criteria before starting.".to_string());
        }
        TaskComplexityLevel::Medium => {
            recommendations.push("Moderate complexity: plan the execution steps.".to_string());
            if dependencies_count > 0 {
                recommendations
                    .push("Check the completion state of dependency tasks first.".to_string());
            }
        }
        TaskComplexityLevel::High => {
            recommendations
                .push("High complexity: analyze thoroughly before implementing.".to_string());
            recommendations
                .push("Consider splitting into smaller, independent subtasks.".to_string());
            if dependencies_count > DEPENDENCIES_MEDIUM {
                recommendations.push(
                    "Many dependencies: verify the execution order is correct.".to_string(),
                );
            }
        }
        TaskComplexityLevel::VeryHigh => {
            recommendations.push(
                "Very high complexity: strongly consider splitting into multiple tasks."
                    .to_string(),
            );
            recommendations
                .push("Define scope and interfaces for each subtask up front.".to_string());
            if description_length >= DESCRIPTION_VERY_HIGH {
                recommendations.push(
                    "Very long description: distill it into a structured checklist.".to_string(),
                );
            }
        }
    }

    TaskComplexityAssessment {
        level,
        metrics: TaskComplexityMetrics {
            description_length,
            dependencies_count,
            notes_length,
            has_notes,
        },
        recommendations,
    }
}
