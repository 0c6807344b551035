//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerateService, SourceLoader)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer sequences the domain layer but contains no naming
//! rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    GenerateOptions, GenerateService, GenerationError, GenerationReport, GenerationState,
    OutputReport, OutputStatus, SourceLoader,
};

// Re-export port traits (for adapter implementation)
pub use ports::{DEFAULT_FILE_MODE, Filesystem, SyntaxBackend, Transform};

pub use error::{ApplicationError, LoadError};
