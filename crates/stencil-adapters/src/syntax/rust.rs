//! Rust syntax backend built on `syn` and `prettyplease`.

use stencil_core::{
    application::ports::SyntaxBackend,
    domain::{SourceLocation, SyntaxError},
    error::StencilResult,
};

/// Parses Rust files into [`syn::File`] and pretty-prints them back.
///
/// Rendering goes through `prettyplease`, so formatting of the input is not
/// preserved but output is deterministic for a given tree. Regular comments
/// are dropped by the parser; doc comments survive as attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustSyntax;

impl RustSyntax {
    pub fn new() -> Self {
        Self
    }
}

impl SyntaxBackend for RustSyntax {
    type Tree = syn::File;

    fn language(&self) -> &str {
        "rust"
    }

    fn parse(&self, source: &str) -> Result<syn::File, SyntaxError> {
        syn::parse_file(source).map_err(|e| {
            let start = e.span().start();
            let error = SyntaxError::new(e.to_string());
            // Line 0 means the span carries no position.
            if start.line == 0 {
                error
            } else {
                error.at(SourceLocation::new(start.line, start.column + 1))
            }
        })
    }

    fn render(&self, tree: &syn::File) -> StencilResult<Vec<u8>> {
        Ok(prettyplease::unparse(tree).into_bytes())
    }
}
