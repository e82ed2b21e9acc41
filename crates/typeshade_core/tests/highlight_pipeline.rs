//! End-to-end tests for the erasure highlight pipeline.
//!
//! These tests parse real TypeScript, classify the tree and check the
//! overlay left on an in-memory display surface.

use typeshade_ast::{NodeData, Span, SyntaxKind, TreeBuilder, walk};
use typeshade_core::{
    ErasureRule, HighlightSession, LineIndex, MemorySurface, QueryOutcome, QueryPanel,
    TextPosition, classify, collect_erased, to_range,
};
use typeshade_parser::{CompilerOptions, Parser, TypeScriptParser};

fn parse(source: &str) -> typeshade_ast::SyntaxTree {
    TypeScriptParser::new()
        .parse(source, &CompilerOptions::default())
        .unwrap()
}

#[test]
fn test_type_alias_line_is_highlighted_and_const_line_is_not() {
    let source = "type T = number;\nconst x = 1;";
    let tree = parse(source);
    let index = LineIndex::new(source);

    let erased = collect_erased(&tree);
    assert_eq!(erased.len(), 1);
    assert_eq!(tree.kind(erased[0]), SyntaxKind::TypeAliasDeclaration);

    let range = to_range(&tree, erased[0], |offset| index.position_at(offset)).unwrap();
    assert_eq!(range.start, TextPosition::new(0, 0));
    assert_eq!(range.end.line, 0);
    assert!(range.end.column >= "type T = number".len() as u32);

    // Nothing on the second line is erased.
    let on_second_line = erased
        .iter()
        .filter(|&&id| tree.span(id).start >= 17)
        .count();
    assert_eq!(on_second_line, 0);
}

#[test]
fn test_ranges_are_monotonic() {
    let source = "\
import type { Options } from \"./options\";
import { run } from \"./run\";

interface Shape {
    area(): number;
}

type Pair<T> = [T, T];

const shapes: Shape[] = [];
let total: number = 0;

function measure(shape: Shape): number {
    return shape.area();
}
";
    let tree = parse(source);
    let index = LineIndex::new(source);

    let erased = collect_erased(&tree);
    assert!(!erased.is_empty());
    for id in erased {
        let range = to_range(&tree, id, |offset| index.position_at(offset)).unwrap();
        assert!(
            range.start <= range.end,
            "{:?} has inverted range {:?}",
            tree.kind(id),
            range
        );
    }
}

#[test]
fn test_each_rule_fires_on_real_source() {
    let source = "import type { A } from \"a\";\nimport { b } from \"b\";\nconst x: A = b;\nfunction f(p: number) {}";
    let tree = parse(source);

    let mut rules = Vec::new();
    walk(&tree, |id, _| {
        if let Some(rule) = classify(&tree, id) {
            rules.push((tree.kind(id), rule));
        }
    });

    assert!(rules.contains(&(SyntaxKind::ImportDeclaration, ErasureRule::TypeOnlyImport)));
    assert!(rules.contains(&(SyntaxKind::TypeAnnotation, ErasureRule::VariableTypeAnnotation)));
    assert!(rules.contains(&(SyntaxKind::TypeReference, ErasureRule::TypeOnlyKind)));
    // The value import and the parameter annotation stay.
    let imports = rules
        .iter()
        .filter(|(kind, _)| *kind == SyntaxKind::ImportDeclaration)
        .count();
    assert_eq!(imports, 1);
    let annotations = rules
        .iter()
        .filter(|(kind, _)| *kind == SyntaxKind::TypeAnnotation)
        .count();
    assert_eq!(annotations, 1);
}

#[test]
fn test_kind_rule_wins_over_import_flag() {
    let mut builder = TreeBuilder::new();
    builder
        .start_node(SyntaxKind::SourceFile, Span::new(0, 16), NodeData::None)
        .unwrap();
    let node = builder
        .leaf(
            SyntaxKind::TypeAliasDeclaration,
            Span::new(0, 16),
            NodeData::import(true),
        )
        .unwrap();
    builder.finish_node().unwrap();
    let tree = builder.finish().unwrap();

    assert_eq!(classify(&tree, node), Some(ErasureRule::TypeOnlyKind));
}

#[test]
fn test_malformed_query_leaves_overlay_untouched() {
    let source = "interface A {}\ntype B = A;";
    let tree = parse(source);
    let session = HighlightSession::new(MemorySurface::new(), "highlight-error");
    session
        .highlight_source(&TypeScriptParser::new(), source, &CompilerOptions::default())
        .unwrap();
    let before = session.decorations();
    assert_eq!(before.len(), 3);

    let mut panel = QueryPanel::new();
    let outcome = panel.submit(&tree, "InterfaceDeclaration[name=\"A\"");

    assert!(matches!(outcome, QueryOutcome::Failed { .. }));
    assert_eq!(session.decorations(), before);
}

#[test]
fn test_repeated_highlight_is_equivalent() {
    let source = "let n: number = 1;";
    let session = HighlightSession::new(MemorySurface::new(), "highlight-error");
    let parser = TypeScriptParser::new();
    let options = CompilerOptions::default();

    session.highlight_source(&parser, source, &options).unwrap();
    let first = session.decorations();
    session.highlight_source(&parser, source, &options).unwrap();

    assert_eq!(session.decorations(), first);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].start, TextPosition::new(0, 5));
}
