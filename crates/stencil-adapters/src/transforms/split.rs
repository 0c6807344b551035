use syn::Item;

use stencil_core::{
    application::ports::Transform,
    domain::{GenerationResult, SourceDocument},
};

/// Output holding the trait definitions.
pub const IFACE_OUTPUT: &str = "iface";
/// Output holding every other item.
pub const IMPL_OUTPUT: &str = "impl";

/// Splits a Rust file into traits (`iface`) and everything else (`impl`).
///
/// `use` items are copied into both halves. A half that ends up with nothing
/// but `use` items is not emitted, so an empty file produces no output.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitItems;

impl SplitItems {
    pub const NAME: &'static str = "split";

    pub fn new() -> Self {
        Self
    }
}

impl Transform<syn::File> for SplitItems {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn transform(&self, document: SourceDocument<syn::File>) -> GenerationResult<syn::File> {
        let file = document.tree();
        let mut iface = shell(file);
        let mut implementation = shell(file);

        for item in &file.items {
            match item {
                Item::Use(_) => {
                    iface.items.push(item.clone());
                    implementation.items.push(item.clone());
                }
                Item::Trait(_) | Item::TraitAlias(_) => iface.items.push(item.clone()),
                _ => implementation.items.push(item.clone()),
            }
        }

        let mut result = GenerationResult::empty();
        for (name, half) in [(IFACE_OUTPUT, iface), (IMPL_OUTPUT, implementation)] {
            if has_content(&half) {
                result = result.with_output(name, document.derive(half));
            }
        }
        result
    }
}

/// Same shebang and inner attributes, no items.
fn shell(file: &syn::File) -> syn::File {
    syn::File {
        shebang: file.shebang.clone(),
        attrs: file.attrs.clone(),
        items: Vec::new(),
    }
}

fn has_content(file: &syn::File) -> bool {
    file.items.iter().any(|item| !matches!(item, Item::Use(_)))
}
