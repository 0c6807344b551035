//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "load a template" or "generate outputs".

pub mod generate_service;
pub mod loader;
pub mod report;

pub use generate_service::{GenerateOptions, GenerateService};
pub use loader::SourceLoader;
pub use report::{GenerationError, GenerationReport, GenerationState, OutputReport, OutputStatus};
