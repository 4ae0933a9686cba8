//! Persisted index tests.

use crate::helpers::source_fixtures::*;
use crate::helpers::workspace_helpers::*;
use tessera::LangError;
use tessera::ide::get_definition;
use tessera::workspace::{INDEX_FORMAT_VERSION, Workspace};
use tokio_util::sync::CancellationToken;

#[test]
fn test_seeded_index_resolves_unopened_documents() {
    let saved = workspace_from_sources(&[("a.lang", DECLARES_FOO)]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.json");
    saved.index().write_to_file(&path).unwrap();

    let workspace = Workspace::new();
    assert_eq!(workspace.index().read_from_file(&path).unwrap(), 1);
    workspace.set_document(uri("b.lang"), USES_FOO).unwrap();

    let b = document(&workspace, "b.lang");
    let target = b.references()[0].target().unwrap();
    assert_eq!(target.document_uri, uri("a.lang"));

    // a.lang is not loaded: the link falls back to the recorded name range
    let offset = offset_of(USES_FOO, "foo", 0);
    let link = get_definition(&workspace, &uri("b.lang"), offset, &CancellationToken::new())
        .unwrap()
        .unwrap();
    assert_eq!(link.target_uri, uri("a.lang"));
    assert_eq!(link.target_range, target.name_segment);
    assert_eq!(link.target_selection_range, target.name_segment);
}

#[test]
fn test_opened_document_replaces_seeded_slice() {
    let saved = workspace_from_sources(&[("a.lang", DECLARES_FOO)]);
    let mut json = Vec::new();
    saved.save_index(&mut json).unwrap();

    let workspace = Workspace::new();
    workspace.seed_index(json.as_slice()).unwrap();
    build_into(&workspace, &[("a.lang", "def bar;"), ("b.lang", USES_FOO)]);

    assert!(document(&workspace, "b.lang").references()[0].is_error());
    let persisted = workspace.index().to_persisted();
    assert_eq!(persisted.format, INDEX_FORMAT_VERSION);
    assert_eq!(persisted.documents.len(), 2);
    assert_eq!(persisted.documents[0].exports[0].name, "bar");
}

#[test]
fn test_malformed_index_is_rejected() {
    let workspace = Workspace::new();
    let err = workspace.seed_index("{ not json".as_bytes()).unwrap_err();
    assert!(matches!(err, LangError::Json(_)));
    assert!(workspace.index().uris().is_empty());
}
