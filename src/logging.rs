//! Invocation logging and tracing bootstrap.
//!
//! The invocation logger keeps the diagnostic stream quiet under normal
//! operation: successes write nothing, failures write exactly one
//! pipe-delimited line.  stdout belongs to the RPC transport, so everything
//! diagnostic goes to stderr.

use std::io::Write;
use std::time::Duration;

/// Outcome of a completed tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    Success,
    Error,
}

impl ToolOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            ToolOutcome::Success => "success",
            ToolOutcome::Error => "error",
        }
    }
}

/// One record per completed tool invocation.
#[derive(Debug, Clone)]
pub struct ToolLogEntry {
    pub tool_name: String,
    pub outcome: ToolOutcome,
    pub duration: Duration,
    /// Whether the response carried a structured payload.
    pub structured_content: bool,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
}

impl ToolLogEntry {
    pub fn success(tool_name: impl Into<String>, duration: Duration, structured: bool) -> Self {
        Self {
            tool_name: tool_name.into(),
            outcome: ToolOutcome::Success,
            duration,
            structured_content: structured,
            error_code: None,
            error_message: None,
        }
    }

    pub fn error(
        tool_name: impl Into<String>,
        duration: Duration,
        code: Option<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            outcome: ToolOutcome::Error,
            duration,
            structured_content: false,
            error_code: code,
            error_message: message,
        }
    }
}

/// Render the diagnostic line for an entry, `None` for successes.
///
/// Field order is fixed: `[toolName] | status | durationMs | code=... |
/// message`, the last two present only when set.
fn format_entry(entry: &ToolLogEntry) -> Option<String> {
    if entry.outcome == ToolOutcome::Success {
        return None;
    }

    let mut fields = vec![
        format!("[{}]", entry.tool_name),
        entry.outcome.as_str().to_string(),
        format!("{}ms", entry.duration.as_millis()),
    ];
    if let Some(code) = &entry.error_code {
        fields.push(format!("code={code}"));
    }
    if let Some(message) = &entry.error_message {
        fields.push(message.clone());
    }
    Some(fields.join(" | "))
}

/// Record a completed invocation.  Never panics and never surfaces I/O
/// errors — a lost diagnostic line must not fail the tool call it describes.
pub fn log_tool_invocation(entry: &ToolLogEntry) {
    if let Some(line) = format_entry(entry) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{line}");
    }
}

/// Initialize tracing: compact stderr output, level from `RUST_LOG`
/// (default `info`).  Call once at startup.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
