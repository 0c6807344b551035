// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stencil.
//!
//! This module contains pure generation logic with no I/O. Parsing,
//! rendering and file access are reached through ports defined in the
//! application layer.
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem or console access
//! - **Tree-agnostic**: documents are generic over the syntax tree type
//! - **Owned trees**: a document owns its tree; transforms consume documents
pub mod diagnostic;
pub mod error;
pub mod generation;
pub mod naming;
pub mod source_document;

pub use diagnostic::{Diagnostic, SourceLocation, SyntaxError};
pub use error::{DomainError, ErrorCategory};
pub use generation::{GeneratedSource, GenerationResult, UNSPECIFIED_FAILURE};
pub use naming::{
    CollisionPolicy, PlannedOutput, base_name, derive_filename, plan_filenames,
    validate_output_name,
};
pub use source_document::SourceDocument;

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    // ========================================================================
    // Naming Tests
    // ========================================================================

    #[test]
    fn derive_filename_lowercases_combined_name() {
        let name = derive_filename("Iface", Path::new("templates/Template.go")).unwrap();
        assert_eq!(name, "iface_template.go");
    }

    #[test]
    fn derive_filename_is_deterministic() {
        let path = Path::new("src/gen/sliceutil.rs");
        let first = derive_filename("i32", path).unwrap();
        let second = derive_filename("i32", path).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, "i32_sliceutil.rs");
    }

    #[test]
    fn derive_filename_uses_only_base_name() {
        let a = derive_filename("impl", Path::new("/abs/dir/template.go")).unwrap();
        let b = derive_filename("impl", Path::new("template.go")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn names_differing_by_case_collide() {
        let path = Path::new("template.go");
        assert_eq!(
            derive_filename("Foo", path).unwrap(),
            derive_filename("foo", path).unwrap()
        );
    }

    #[test]
    fn derive_filename_rejects_separator_in_name() {
        let err = derive_filename("../escape", Path::new("t.rs")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidOutputName { .. }));
    }

    #[test]
    fn derive_filename_rejects_empty_name() {
        assert!(derive_filename("", Path::new("t.rs")).is_err());
    }

    #[test]
    fn derive_filename_rejects_path_without_file_name() {
        let err = derive_filename("impl", Path::new("..")).unwrap_err();
        assert!(matches!(err, DomainError::MissingFileName { .. }));
    }

    #[test]
    fn collision_policy_parses_aliases() {
        assert_eq!(
            "last-wins".parse::<CollisionPolicy>().unwrap(),
            CollisionPolicy::LastWriteWins
        );
        assert_eq!(
            "FIRST".parse::<CollisionPolicy>().unwrap(),
            CollisionPolicy::FirstWriteWins
        );
        assert_eq!(
            "reject".parse::<CollisionPolicy>().unwrap(),
            CollisionPolicy::Reject
        );
        assert!("sometimes".parse::<CollisionPolicy>().is_err());
    }

    #[test]
    fn collision_policy_display_round_trips() {
        for policy in CollisionPolicy::ALL {
            assert_eq!(policy.to_string().parse::<CollisionPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn plan_last_write_wins_keeps_both_and_marks_overwrite() {
        let plan = plan_filenames(
            ["Foo", "foo"],
            Path::new("t.go"),
            CollisionPolicy::LastWriteWins,
        )
        .unwrap();

        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|p| p.filename == "foo_t.go"));
        assert!(plan.iter().all(|p| p.skip_reason.is_none()));
        assert_eq!(plan[1].overwrites.as_deref(), Some("Foo"));
    }

    #[test]
    fn plan_first_write_wins_skips_later_duplicate() {
        let plan = plan_filenames(
            ["Foo", "foo"],
            Path::new("t.go"),
            CollisionPolicy::FirstWriteWins,
        )
        .unwrap();

        assert!(plan[0].skip_reason.is_none());
        assert!(plan[1].skip_reason.is_some());
    }

    #[test]
    fn plan_reject_reports_collision() {
        let errors = plan_filenames(["Foo", "foo"], Path::new("t.go"), CollisionPolicy::Reject)
            .unwrap_err();

        assert_eq!(
            errors,
            vec![DomainError::OutputCollision {
                filename: "foo_t.go".into(),
                first: "Foo".into(),
                second: "foo".into(),
            }]
        );
    }

    #[test]
    fn plan_collects_every_invalid_name() {
        let errors = plan_filenames(
            ["ok", "", "a/b"],
            Path::new("t.go"),
            CollisionPolicy::LastWriteWins,
        )
        .unwrap_err();

        assert_eq!(errors.len(), 2);
    }

    // ========================================================================
    // Generation Result Tests
    // ========================================================================

    #[test]
    fn failure_without_diagnostics_gets_one() {
        let result: GenerationResult<()> = GenerationResult::failure(Vec::new());

        assert!(!result.succeeded());
        assert_eq!(result.diagnostics().len(), 1);
        assert_eq!(result.diagnostics()[0].message, UNSPECIFIED_FAILURE);
    }

    #[test]
    fn failure_ignores_added_outputs() {
        let result = GenerationResult::failure(vec![Diagnostic::new("bad")])
            .with_output("impl", SourceDocument::new("tree", "t.rs"));

        assert_eq!(result.output_count(), 0);
    }

    #[test]
    fn empty_success_is_legal() {
        let result: GenerationResult<()> = GenerationResult::empty();
        assert!(result.succeeded());
        assert!(result.outputs().is_empty());
        assert!(result.diagnostics().is_empty());
    }

    #[test]
    fn result_from_std_result() {
        type Raw = Result<Vec<GeneratedSource<&'static str>>, Vec<Diagnostic>>;

        let ok: Raw = Ok(vec![GeneratedSource::new(
            "a",
            SourceDocument::new("x", "t.rs"),
        )]);
        assert!(GenerationResult::from(ok).succeeded());

        let err: Raw = Err(vec![Diagnostic::new("x")]);
        assert!(!GenerationResult::from(err).succeeded());
    }

    // ========================================================================
    // Document Tests
    // ========================================================================

    #[test]
    fn derived_document_keeps_origin() {
        let doc = SourceDocument::new(1_u32, "gen/template.rs");
        let derived = doc.derive("other tree");

        assert_eq!(derived.origin_path(), Path::new("gen/template.rs"));
        assert_eq!(*derived.tree(), "other tree");
    }

    #[test]
    fn document_tree_is_mutable() {
        let mut doc = SourceDocument::new(vec![1, 2], "t.rs");
        doc.tree_mut().push(3);
        assert_eq!(doc.into_tree(), vec![1, 2, 3]);
    }

    #[test]
    fn diagnostic_display_includes_location() {
        let d = Diagnostic::new("unexpected token").at(SourceLocation::new(3, 7));
        assert_eq!(d.to_string(), "unexpected token (line 3, column 7)");
        assert_eq!(Diagnostic::new("plain").to_string(), "plain");
    }
}
