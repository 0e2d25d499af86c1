pub mod registry;
pub mod schemas;
pub mod serializer;

pub use registry::{OutputRegistry, SchemaViolation};
