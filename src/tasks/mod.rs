pub mod complexity;
pub mod metrics;
pub mod model;
pub mod store;

pub use model::{Task, TaskRecord, TaskStatus, TaskValidationError};
pub use store::TaskStore;
