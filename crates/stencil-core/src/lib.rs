//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Stencil, a
//! generator that turns one generic source file into concrete, specialized
//! source files.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stencil-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │     (GenerateService, SourceLoader)     │
//! │   Load → Transform → Name → Persist     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, SyntaxBackend, Transform)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stencil-adapters (Infrastructure)    │
//! │ (LocalFilesystem, RustSyntax, Specialize)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (SourceDocument, GenerationResult, naming)│
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stencil_core::prelude::*;
//!
//! let service = GenerateService::new(backend, filesystem);
//! let report = service.generate("gen/sliceutil.rs", "src", &transform);
//! for line in report.error_lines() {
//!     eprintln!("{line}");
//! }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateOptions, GenerateService, GenerationError, GenerationReport, GenerationState,
        LoadError, OutputStatus,
        ports::{Filesystem, SyntaxBackend, Transform},
    };
    pub use crate::domain::{
        CollisionPolicy, Diagnostic, GeneratedSource, GenerationResult, SourceDocument,
        SourceLocation, SyntaxError, derive_filename,
    };
    pub use crate::error::{StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
