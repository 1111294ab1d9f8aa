use text_size::TextSize;

use super::*;
use crate::syntax::scanner::Scanner;

fn node_of_kind(
    tree: &SyntaxTree,
    kind: SyntaxKind,
) -> NodeId {
    tree.descendants().into_iter().find(|&id| tree.kind(id) == kind).unwrap()
}

#[test]
fn wraps_punctuation_with_parent() {
    let tree = SyntaxTree::parse("a;");
    let stmt = node_of_kind(&tree, SyntaxKind::ExprStmt);
    let scanned = Scanner::new(tree.text(), TextSize::from(1)).next_token();

    let Element::Token(semicolon) = token(&tree, scanned, stmt) else {
        panic!("expected a synthetic token");
    };
    assert_eq!(semicolon.kind, SyntaxKind::Semicolon);
    assert_eq!((u32::from(semicolon.pos), u32::from(semicolon.end)), (1, 2));
    assert_eq!(semicolon.parent, stmt);
}

#[test]
fn as_keyword_is_admitted_in_as_expression() {
    let tree = SyntaxTree::parse("x as number");
    let as_expr = node_of_kind(&tree, SyntaxKind::AsExpr);
    let scanned = Scanner::new(tree.text(), TextSize::from(1)).next_token();

    let element = token(&tree, scanned, as_expr);
    assert_eq!(element.kind(&tree), SyntaxKind::Ident);
    assert_eq!(element.snapshot(&tree).text, "as");
}

#[test]
#[should_panic(expected = "did not expect ExprStmt to have Ident in its trivia")]
fn identifier_in_gap_is_an_invariant_violation() {
    let tree = SyntaxTree::parse("a;");
    let stmt = node_of_kind(&tree, SyntaxKind::ExprStmt);
    let scanned = Scanner::new(tree.text(), TextSize::from(0)).next_token();
    token(&tree, scanned, stmt);
}

#[test]
fn checked_out_buffer_is_empty() {
    let tree = SyntaxTree::parse("a;");
    {
        let mut buffer = checkout();
        buffer.push(Element::Node(tree.root()));
        buffer.push(Element::Node(tree.root()));
    }
    for _ in 0..4 {
        assert!(checkout().is_empty());
    }
}

#[test]
fn into_vec_keeps_contents() {
    let tree = SyntaxTree::parse("a;");
    let mut buffer = checkout();
    buffer.push(Element::Node(tree.root()));
    let items = buffer.into_vec();
    assert_eq!(items, vec![Element::Node(tree.root())]);
}

#[test]
fn pool_is_bounded() {
    let buffers: Vec<ElementBuffer> = (0..MAX_POOLED_BUFFERS * 2)
        .map(|_| {
            let mut buffer = checkout();
            buffer.reserve(1);
            buffer
        })
        .collect();
    drop(buffers);
    assert!(pooled_buffers() <= MAX_POOLED_BUFFERS);
}
