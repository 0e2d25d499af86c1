//! Persistence and structured-output core for a task-tracking MCP server.
//!
//! Three coupled responsibilities live here: the task status model and its
//! validation rules, atomic on-disk persistence of task state, and the
//! structured-content schema registry that checks every value before it
//! crosses the tool boundary.  Prompt rendering, the RPC transport, and CLI
//! bootstrapping are collaborator concerns and stay out of this crate.

pub mod config;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tasks;

pub use config::CoreConfig;
pub use output::registry::OutputRegistry;
pub use tasks::store::TaskStore;
