//! Per-status counts over a task collection.
//!
//! Deliberately permissive where the validator is strict: counting never
//! rejects a record, and statuses outside the enumeration are counted under
//! their literal string so reporting stays total over partially-invalid
//! legacy data.

use std::collections::BTreeMap;

use super::model::{TaskRecord, TaskStatus};

/// Key carrying the collection size in the counts map.
pub const TOTAL_KEY: &str = "total";

/// Count records per status.
///
/// Every enumeration value appears in the result, zero-seeded, so statuses
/// with no members report as `0` rather than being absent.  `total` is the
/// record count.  Input order never affects the result.
pub fn count_tasks_by_status(tasks: &[TaskRecord]) -> BTreeMap<String, u64> {
    let mut counts: BTreeMap<String, u64> = TaskStatus::ALL
        .iter()
        .map(|status| (status.as_str().to_string(), 0))
        .collect();

    for task in tasks {
        *counts.entry(task.status.clone()).or_insert(0) += 1;
    }

    counts.insert(TOTAL_KEY.to_string(), tasks.len() as u64);
    counts
}
