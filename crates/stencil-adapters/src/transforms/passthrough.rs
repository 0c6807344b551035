use stencil_core::{
    application::ports::Transform,
    domain::{GenerationResult, SourceDocument},
};

/// Emits the loaded tree unchanged under a single output name.
///
/// Useful for normalising a file through the syntax backend.
#[derive(Debug, Clone)]
pub struct PassThrough {
    output_name: String,
}

impl PassThrough {
    pub const NAME: &'static str = "copy";

    pub fn new() -> Self {
        Self::named(Self::NAME)
    }

    /// Use `name` as the output name instead of `copy`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            output_name: name.into(),
        }
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }
}

impl Default for PassThrough {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Transform<T> for PassThrough {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn transform(&self, document: SourceDocument<T>) -> GenerationResult<T> {
        GenerationResult::empty().with_output(self.output_name.clone(), document)
    }
}
