//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stencil-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: Reading the input, writing outputs
//!   - `SyntaxBackend`: Parsing text into a tree and rendering it back
//!   - `Transform`: Generic-to-concrete rewriting of one document
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{DEFAULT_FILE_MODE, Filesystem, SyntaxBackend, Transform};

#[cfg(test)]
pub use output::MockFilesystem;
