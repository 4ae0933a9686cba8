//! Parser tests for the `.lang` grammar.

use crate::helpers::source_fixtures::*;
use rstest::rstest;
use tessera::parser::{AstNode, Member, SyntaxKind, parse};

#[rstest]
#[case(NESTED_SHADOWING)]
#[case(TYPED_DEFINITIONS)]
#[case(WITH_SYNTAX_ERROR)]
#[case("/* block */ def a; // line\n")]
#[case("}}} garbage {{")]
fn test_cst_is_lossless(#[case] source: &str) {
    let parse = parse(source);
    assert_eq!(parse.syntax().text().to_string(), source);
}

#[test]
fn test_members_and_bodies() {
    let file = parse(TYPED_DEFINITIONS).source_file();
    let members: Vec<_> = file.members().collect();
    assert_eq!(members.len(), 2);

    let Member::Package(vehicles) = &members[0] else {
        panic!("expected a package, got {:?}", members[0]);
    };
    assert_eq!(vehicles.syntax().kind(), SyntaxKind::PACKAGE);
    let inner = members[0].members();
    assert_eq!(inner.len(), 2);
    assert_eq!(inner[1].members().len(), 1);

    let truck = &members[1];
    assert_eq!(
        truck.name_ref().and_then(|r| r.text()).as_deref(),
        Some("vehicles")
    );
}

#[test]
fn test_missing_semicolon_recovers() {
    let parse = parse(WITH_SYNTAX_ERROR);
    assert_eq!(parse.errors.len(), 1);
    assert_eq!(parse.errors[0].message, "expected ';' or '{'");

    let names: Vec<_> = parse
        .source_file()
        .members()
        .filter_map(|m| m.name().and_then(|n| n.text()))
        .collect();
    assert_eq!(names, vec!["ok", "broken"]);
    assert_eq!(parse.source_file().members().count(), 3);
}

#[test]
fn test_stray_tokens_become_error_nodes() {
    let parse = parse("; def a;");
    assert!(!parse.ok());
    assert_eq!(parse.errors[0].message, "expected 'package', 'def' or 'use'");
    assert!(
        parse
            .syntax()
            .children()
            .any(|n| n.kind() == SyntaxKind::ERROR)
    );
    assert_eq!(parse.source_file().members().count(), 1);
}

#[test]
fn test_unclosed_body_reports_at_end() {
    let source = "package p { def a;";
    let parse = parse(source);
    let last = parse.errors.last().unwrap();
    assert_eq!(last.message, "expected '}'");
    assert_eq!(u32::from(last.range.start()) as usize, source.len());
    assert!(last.range.is_empty());
}
