//! Infrastructure adapters for Stencil.
//!
//! This crate implements the ports defined in `stencil-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod syntax;
pub mod transforms;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use syntax::{RustSyntax, RustTree};
pub use transforms::{PassThrough, Specialize, SplitItems};
