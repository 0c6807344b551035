//! Syntax backends: parse source text into trees and render them back.

mod rust;

pub use rust::RustSyntax;

/// Tree type produced by [`RustSyntax`].
pub type RustTree = syn::File;
