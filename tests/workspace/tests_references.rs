//! Declaration lookup and reference search tests.

use crate::helpers::source_fixtures::*;
use crate::helpers::workspace_helpers::*;
use tessera::{LangError, TextRange, TextSize};
use tessera::base::{DocumentUri, LineIndex};
use tessera::hir::{AstNodeDescription, DefaultScopeComputation, LocalScopes, ScopeComputation};
use tessera::parser::{SourceFile, SyntaxToken};
use tessera::workspace::{
    BuildOptions, Document, FindReferencesOptions, LanguageServices, Workspace,
};
use tokio_util::sync::CancellationToken;

fn token_at(document: &Document, needle: &str, nth: usize) -> SyntaxToken {
    let offset = offset_of(document.text(), needle, nth);
    document
        .syntax()
        .and_then(|root| root.token_at_offset(offset).right_biased())
        .expect("token at offset")
}

#[test]
fn test_declaration_name_resolves_to_itself() {
    let workspace = workspace_from_sources(&[("a.lang", DECLARES_FOO)]);
    let a = document(&workspace, "a.lang");

    let declaration = workspace
        .references()
        .find_declaration(&a, &token_at(&a, "foo", 0))
        .unwrap()
        .unwrap();
    assert_eq!(declaration.description.name, "foo");
    assert_eq!(declaration.description.path.to_string(), "/0");
    assert!(declaration.node.is_some());
}

#[test]
fn test_keyword_has_no_declaration() {
    let workspace = workspace_from_sources(&[("a.lang", DECLARES_FOO)]);
    let a = document(&workspace, "a.lang");
    let found = workspace
        .references()
        .find_declaration(&a, &token_at(&a, "def", 0))
        .unwrap();
    assert!(found.is_none());
}

#[test]
fn test_inner_scope_shadows_outer() {
    let workspace = workspace_from_sources(&[("s.lang", NESTED_SHADOWING)]);
    let doc = document(&workspace, "s.lang");
    let references = workspace.references();

    // occurrences of "shape": outer def, inner def, inner use, outer use
    let inner = references
        .find_declaration(&doc, &token_at(&doc, "shape", 2))
        .unwrap()
        .unwrap();
    assert_eq!(inner.description.path.to_string(), "/1/0");

    let outer = references
        .find_declaration(&doc, &token_at(&doc, "shape", 3))
        .unwrap()
        .unwrap();
    assert_eq!(outer.description.path.to_string(), "/0");
}

#[test]
fn test_find_declaration_node_points_at_name() {
    let workspace = workspace_from_sources(&[("a.lang", DECLARES_FOO), ("b.lang", USES_FOO)]);
    let b = document(&workspace, "b.lang");

    let location = workspace
        .references()
        .find_declaration_node(&b, &token_at(&b, "foo", 0))
        .unwrap()
        .unwrap();
    assert_eq!(location.uri, uri("a.lang"));
    assert_eq!(
        location.segment.range,
        TextRange::at(offset_of(DECLARES_FOO, "foo", 0), TextSize::new(3))
    );
}

#[test]
fn test_name_location_of_resolved_declaration() {
    let workspace = workspace_from_sources(&[("a.lang", TYPED_DEFINITIONS)]);
    let doc = document(&workspace, "a.lang");
    let token = token_at(&doc, "engine", 1);
    let references = workspace.references();

    let declaration = references.find_declaration(&doc, &token).unwrap().unwrap();
    let location = references.name_location(&declaration);
    assert_eq!(location.uri, uri("a.lang"));
    assert_eq!(
        location.segment.range,
        TextRange::at(offset_of(TYPED_DEFINITIONS, "engine", 0), TextSize::new(6))
    );
    assert_eq!(
        references.find_declaration_node(&doc, &token).unwrap(),
        Some(location)
    );
}

#[test]
fn test_lookups_are_deterministic() {
    let workspace = workspace_from_sources(&[
        ("a.lang", TYPED_DEFINITIONS),
        ("b.lang", NESTED_SHADOWING),
    ]);
    let doc = document(&workspace, "a.lang");
    let token = token_at(&doc, "engine", 2);
    let references = workspace.references();

    let first = references.find_declaration(&doc, &token).unwrap().unwrap();
    for _ in 0..5 {
        let again = references.find_declaration(&doc, &token).unwrap().unwrap();
        assert_eq!(again.description, first.description);
    }
    assert_eq!(first.description.path.to_string(), "/0/0");
}

#[test]
fn test_find_references_across_documents() {
    let workspace = workspace_from_sources(&[
        ("a.lang", "def foo; use foo;"),
        ("b.lang", USES_FOO),
        ("c.lang", "use foo; use foo;"),
    ]);
    let target = workspace.index().exports_of(&uri("a.lang")).unwrap()[0].clone();
    let references = workspace.references();
    let cancel = CancellationToken::new();

    let all = references
        .find_references(&target, FindReferencesOptions::default(), &cancel)
        .unwrap();
    let sources: Vec<_> = all.iter().map(|r| r.source_uri.as_str().to_string()).collect();
    assert_eq!(
        sources,
        vec!["memory:/a.lang", "memory:/b.lang", "memory:/c.lang", "memory:/c.lang"]
    );
    assert!(all.iter().all(|r| !r.is_declaration));
    assert!(all[2].segment.range.start() < all[3].segment.range.start());

    let local = references
        .find_references(
            &target,
            FindReferencesOptions {
                only_local: true,
                include_declaration: true,
            },
            &cancel,
        )
        .unwrap();
    assert_eq!(local.len(), 2);
    assert!(local[0].is_declaration);
    assert_eq!(local[0].segment, target.name_segment);
}

#[test]
fn test_find_references_cancelled() {
    let workspace = workspace_from_sources(&[("a.lang", DECLARES_FOO), ("b.lang", USES_FOO)]);
    let target = workspace.index().exports_of(&uri("a.lang")).unwrap()[0].clone();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = workspace
        .references()
        .find_references(&target, FindReferencesOptions::default(), &cancel)
        .unwrap_err();
    assert!(matches!(err, LangError::Cancelled));
}

/// Exports every declaration under a path that does not exist.
struct MisplacedExports;

impl ScopeComputation for MisplacedExports {
    fn compute_exports(
        &self,
        uri: &DocumentUri,
        file: &SourceFile,
        line_index: &LineIndex,
    ) -> Vec<AstNodeDescription> {
        DefaultScopeComputation::default()
            .compute_exports(uri, file, line_index)
            .into_iter()
            .map(|mut description| {
                description.path = description.path.child(9);
                description
            })
            .collect()
    }

    fn compute_local_scopes(
        &self,
        uri: &DocumentUri,
        file: &SourceFile,
        line_index: &LineIndex,
    ) -> LocalScopes {
        DefaultScopeComputation::default().compute_local_scopes(uri, file, line_index)
    }
}

#[test]
fn test_dangling_index_entry_is_an_error() {
    let services = LanguageServices {
        scope_computation: std::sync::Arc::new(MisplacedExports),
        ..LanguageServices::default()
    };
    let workspace = Workspace::with_services(services, BuildOptions::default());
    build_into(&workspace, &[("a.lang", DECLARES_FOO), ("b.lang", USES_FOO)]);
    let b = document(&workspace, "b.lang");

    let err = workspace
        .references()
        .find_declaration(&b, &token_at(&b, "foo", 0))
        .unwrap_err();
    assert!(matches!(err, LangError::DanglingPath { .. }));
}
