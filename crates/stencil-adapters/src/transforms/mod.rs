//! Shipped transforms.
//!
//! All of them operate on Rust trees (`syn::File`) except [`PassThrough`],
//! which is generic over the tree type.

mod passthrough;
mod specialize;
mod split;

pub use passthrough::PassThrough;
pub use specialize::{DEFAULT_PLACEHOLDER, Specialize};
pub use split::{IFACE_OUTPUT, IMPL_OUTPUT, SplitItems};

/// Catalog entry describing a shipped transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformInfo {
    pub name: &'static str,
    pub summary: &'static str,
    /// Output names the transform produces.
    pub outputs: &'static str,
}

/// Every shipped transform, in display order.
pub const CATALOG: &[TransformInfo] = &[
    TransformInfo {
        name: PassThrough::NAME,
        summary: "Re-emit the input unchanged under a single name",
        outputs: "copy (or --name)",
    },
    TransformInfo {
        name: Specialize::NAME,
        summary: "Instantiate a placeholder type once per concrete type",
        outputs: "one per --types entry",
    },
    TransformInfo {
        name: SplitItems::NAME,
        summary: "Split traits from the rest of the file",
        outputs: "iface, impl",
    },
];

/// Look up a catalog entry by name.
pub fn find(name: &str) -> Option<&'static TransformInfo> {
    CATALOG.iter().find(|info| info.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_names_are_unique() {
        let mut names: Vec<_> = CATALOG.iter().map(|i| i.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn find_by_name() {
        assert_eq!(find("split").map(|i| i.outputs), Some("iface, impl"));
        assert!(find("nope").is_none());
    }
}
