//! Atomic file persistence.
//!
//! Every durable artifact (task lists, backups, project metadata) goes
//! through [`write_text_atomic`] or [`write_json_atomic`]: a reader of the
//! target path sees either the prior complete content or the new complete
//! content, never a partial write.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Build the temp-file path for a write: same directory as the target so the
/// final rename stays on one volume (rename is only atomic within a volume),
/// unique per call so writers targeting different paths never collide.
fn temp_path(target: &Path, directory: &Path) -> PathBuf {
    let base = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    directory.join(format!(".tmp-{}-{base}", Uuid::new_v4()))
}

/// Replace `target` with `content`, all-or-nothing.
///
/// Steps: ensure the parent directory exists, write the content to a fresh
/// temp file beside the target, remove any pre-existing target, rename the
/// temp file into place.  On failure the target keeps its pre-call state and
/// the temp file is unlinked best-effort; an orphaned temp file after a crash
/// is an accepted benign artifact, not corruption.
///
/// Concurrent writers against the *same* path are not serialized here — last
/// rename wins.  Callers needing single-writer semantics serialize upstream.
pub async fn write_text_atomic(target: &Path, content: &str) -> Result<()> {
    let directory = target.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(directory)
        .await
        .with_context(|| format!("creating directory {}", directory.display()))?;

    let tmp = temp_path(target, directory);

    if let Err(e) = fs::write(&tmp, content).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e).with_context(|| format!("writing temp file {}", tmp.display()));
    }

    // Tolerate an absent target so repeated writes stay idempotent.
    if let Err(e) = fs::remove_file(target).await {
        if e.kind() != ErrorKind::NotFound {
            let _ = fs::remove_file(&tmp).await;
            return Err(e).with_context(|| format!("removing {}", target.display()));
        }
    }

    if let Err(e) = fs::rename(&tmp, target).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e).with_context(|| format!("renaming temp file onto {}", target.display()));
    }

    Ok(())
}

/// Serialize `value` as indented JSON with a trailing newline and write it
/// atomically to `target`.
pub async fn write_json_atomic<T: Serialize>(target: &Path, value: &T) -> Result<()> {
    let serialized = serde_json::to_string_pretty(value)
        .with_context(|| format!("serializing JSON for {}", target.display()))?;
    write_text_atomic(target, &format!("{serialized}\n")).await
}
