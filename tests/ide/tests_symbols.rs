//! Workspace symbol tests.

use crate::helpers::source_fixtures::*;
use crate::helpers::workspace_helpers::*;
use rstest::rstest;
use tessera::ide::{FuzzyMatcher, SymbolKind, workspace_symbols, workspace_symbols_with};
use tokio_util::sync::CancellationToken;

fn symbol_workspace() -> tessera::Workspace {
    workspace_from_sources(&[
        ("a.lang", "def fooBar; package vehicles { def nested; }"),
        ("b.lang", "def foo_baz; def alpha;"),
        ("c.lang", "def alpha;"),
    ])
}

#[rstest]
#[case::empty_query("", vec!["alpha", "alpha", "fooBar", "foo_baz", "vehicles"])]
#[case::word_start("bar", vec!["fooBar"])]
#[case::case_insensitive("FB", vec!["fooBar", "foo_baz"])]
#[case::nested_not_exported("nested", vec![])]
#[case::no_match("zzz", vec![])]
fn test_symbol_query(#[case] query: &str, #[case] expected: Vec<&str>) {
    let workspace = symbol_workspace();
    let symbols = workspace_symbols(workspace.index(), query, &CancellationToken::new()).unwrap();
    let names: Vec<_> = symbols.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_symbols_sorted_by_name_then_document() {
    let workspace = symbol_workspace();
    let symbols = workspace_symbols(workspace.index(), "alpha", &CancellationToken::new()).unwrap();
    let uris: Vec<_> = symbols.iter().map(|s| s.uri.clone()).collect();
    assert_eq!(uris, vec![uri("b.lang"), uri("c.lang")]);
}

#[test]
fn test_symbol_kinds_and_ranges() {
    let workspace = symbol_workspace();
    let symbols = workspace_symbols(workspace.index(), "", &CancellationToken::new()).unwrap();

    let vehicles = symbols.iter().find(|s| s.name == "vehicles").unwrap();
    assert_eq!(vehicles.kind, SymbolKind::Namespace);
    assert_eq!(vehicles.kind.to_lsp(), 3);

    let foo = symbols.iter().find(|s| s.name == "fooBar").unwrap();
    assert_eq!(foo.kind, SymbolKind::Class);
    assert_eq!(foo.range.range.start(), offset_of("def fooBar;", "fooBar", 0));
}

struct Exact;

impl FuzzyMatcher for Exact {
    fn matches(&self, query: &str, text: &str) -> bool {
        query == text.to_lowercase()
    }
}

#[test]
fn test_custom_matcher() {
    let workspace = symbol_workspace();
    let symbols =
        workspace_symbols_with(workspace.index(), "FOOBAR", &Exact, &CancellationToken::new())
            .unwrap();
    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols[0].name, "fooBar");
}

#[test]
fn test_cancelled_search_leaves_index_untouched() {
    let workspace = symbol_workspace();
    let before: Vec<_> = workspace.index().all_elements(None).collect();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = workspace_symbols(workspace.index(), "", &cancel).unwrap_err();
    assert!(err.is_cancelled());
    let after: Vec<_> = workspace.index().all_elements(None).collect();
    assert_eq!(before, after);
}

#[test]
fn test_symbols_follow_document_changes() {
    let workspace = symbol_workspace();
    workspace.set_document(uri("c.lang"), "def omega;").unwrap();
    let analysis = workspace.analysis();

    assert_eq!(analysis.workspace_symbols("alpha").unwrap().len(), 1);
    assert_eq!(analysis.workspace_symbols("omega").unwrap().len(), 1);
}
