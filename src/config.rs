use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "TASKCORE_DATA_DIR";

const DEFAULT_DATA_DIR: &str = "data";
const TASKS_FILE_NAME: &str = "tasks.json";
const MEMORY_DIR_NAME: &str = "memory";

/// Core configuration: where persisted task state lives.
///
/// The data directory holds `tasks.json` plus a `memory/` subdirectory for
/// timestamped backups taken before destructive operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Root directory for persisted state. Default: `./data`.
    pub data_dir: PathBuf,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl CoreConfig {
    /// Resolve the configuration from the environment, falling back to the
    /// default relative data directory.
    pub fn from_env() -> Self {
        match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self {
                data_dir: PathBuf::from(dir),
            },
            _ => Self::default(),
        }
    }

    /// Rooted at an explicit directory (tests, embedded callers).
    pub fn at<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the task collection file.
    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir.join(TASKS_FILE_NAME)
    }

    /// Directory receiving cleared-task backups.
    pub fn memory_dir(&self) -> PathBuf {
        self.data_dir.join(MEMORY_DIR_NAME)
    }
}
