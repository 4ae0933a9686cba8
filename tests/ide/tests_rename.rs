//! Rename and prepare-rename tests.

use crate::helpers::source_fixtures::*;
use crate::helpers::workspace_helpers::*;
use rstest::rstest;
use tessera::hir::codes;
use tessera::ide::{prepare_rename, rename};
use tessera::TextSize;
use tokio_util::sync::CancellationToken;

#[test]
fn test_rename_across_documents_and_rebuild() {
    let workspace = workspace_from_sources(&[("a.lang", DECLARES_FOO), ("b.lang", USES_FOO)]);
    let cancel = CancellationToken::new();

    let edit = rename(
        &workspace,
        &uri("b.lang"),
        offset_of(USES_FOO, "foo", 0),
        "bar",
        &cancel,
    )
    .unwrap()
    .expect("foo resolves");
    assert_eq!(edit.len(), 2);
    assert_eq!(edit.edits_for(&uri("a.lang")).len(), 1);
    assert_eq!(edit.edits_for(&uri("b.lang")).len(), 1);

    let new_a = apply_edits(DECLARES_FOO, edit.edits_for(&uri("a.lang")));
    let new_b = apply_edits(USES_FOO, edit.edits_for(&uri("b.lang")));
    assert_eq!(new_a, "def bar;\n");
    assert_eq!(new_b, "use bar;\n");
    build_into(&workspace, &[("a.lang", new_a.as_str()), ("b.lang", new_b.as_str())]);

    let b = document(&workspace, "b.lang");
    let target = b.references()[0].target().expect("bar resolves");
    assert_eq!(target.name, "bar");
    assert_eq!(target.document_uri, uri("a.lang"));
    assert!(
        b.diagnostics()
            .iter()
            .all(|d| d.code.as_deref() != Some(codes::UNDEFINED_REFERENCE))
    );
    assert!(workspace.analysis().workspace_symbols("foo").unwrap().is_empty());
}

#[test]
fn test_rename_respects_shadowing() {
    let workspace = workspace_from_sources(&[("s.lang", NESTED_SHADOWING)]);
    let edit = rename(
        &workspace,
        &uri("s.lang"),
        offset_of(NESTED_SHADOWING, "shape", 1),
        "form",
        &CancellationToken::new(),
    )
    .unwrap()
    .unwrap();

    let renamed = apply_edits(NESTED_SHADOWING, edit.edits_for(&uri("s.lang")));
    assert_eq!(
        renamed,
        "\ndef shape;\npackage geometry {\n    def form;\n    use form;\n}\nuse shape;\n"
    );
}

#[rstest]
#[case::empty("")]
#[case::leading_digit("1bar")]
#[case::space("b ar")]
#[case::trailing_semicolon("bar;")]
#[case::keyword("package")]
fn test_rename_to_invalid_identifier(#[case] new_name: &str) {
    let workspace = workspace_from_sources(&[("a.lang", DECLARES_FOO), ("b.lang", USES_FOO)]);
    let edit = rename(
        &workspace,
        &uri("a.lang"),
        offset_of(DECLARES_FOO, "foo", 0),
        new_name,
        &CancellationToken::new(),
    )
    .unwrap();
    assert!(edit.is_none());
}

#[test]
fn test_rename_unresolved_reference() {
    let workspace = workspace_from_sources(&[("b.lang", USES_FOO)]);
    let edit = rename(
        &workspace,
        &uri("b.lang"),
        offset_of(USES_FOO, "foo", 0),
        "bar",
        &CancellationToken::new(),
    )
    .unwrap();
    assert!(edit.is_none());
}

#[test]
fn test_prepare_rename() {
    let workspace = workspace_from_sources(&[
        ("a.lang", DECLARES_FOO),
        ("b.lang", "use foo; use missing;"),
    ]);
    let cancel = CancellationToken::new();

    let on_declaration =
        prepare_rename(&workspace, &uri("a.lang"), TextSize::new(5), &cancel).unwrap();
    assert_eq!(
        on_declaration.map(|s| s.range.start()),
        Some(offset_of(DECLARES_FOO, "foo", 0))
    );

    let on_reference =
        prepare_rename(&workspace, &uri("b.lang"), TextSize::new(4), &cancel).unwrap();
    assert!(on_reference.is_some());

    let b_text = "use foo; use missing;";
    let unresolved = prepare_rename(
        &workspace,
        &uri("b.lang"),
        offset_of(b_text, "missing", 0),
        &cancel,
    )
    .unwrap();
    assert!(unresolved.is_none());

    let on_keyword =
        prepare_rename(&workspace, &uri("a.lang"), TextSize::new(0), &cancel).unwrap();
    assert!(on_keyword.is_none());
}
