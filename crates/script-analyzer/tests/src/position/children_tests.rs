use expect_test::{Expect, expect};

use super::*;

fn render(
    tree: &SyntaxTree,
    element: &Element,
) -> String {
    let mut out = String::new();
    for child in children_of(tree, element).iter() {
        let snapshot = child.snapshot(tree);
        out.push_str(&format!("{:?}@{}..{}", snapshot.kind, snapshot.full_start, snapshot.end));
        if child.is_token(tree) && !snapshot.text.is_empty() {
            out.push_str(&format!(" {:?}", snapshot.text));
        }
        out.push('\n');
    }
    out
}

fn first_of_kind(
    tree: &SyntaxTree,
    kind: SyntaxKind,
) -> Element {
    let id = tree.descendants().into_iter().find(|&id| tree.kind(id) == kind).unwrap();
    Element::Node(id)
}

fn check(
    text: &str,
    kind: SyntaxKind,
    expect: Expect,
) {
    let tree = SyntaxTree::parse(text);
    expect.assert_eq(&render(&tree, &first_of_kind(&tree, kind)));
}

#[test]
fn call_arguments_become_a_syntax_list() {
    check(
        "f(a, b);",
        SyntaxKind::CallExpr,
        expect![[r#"
            Ident@0..1 "f"
            LParen@1..2 "("
            SyntaxList@2..6
            RParen@6..7 ")"
        "#]],
    );
}

#[test]
fn syntax_list_interleaves_separators() {
    let tree = SyntaxTree::parse("f(a, b);");
    let call = first_of_kind(&tree, SyntaxKind::CallExpr);
    let children = children_of(&tree, &call);
    let list = children.iter().find(|child| matches!(child, Element::List(_))).unwrap();
    expect![[r#"
        Ident@2..3 "a"
        Comma@3..4 ","
        Ident@4..6 "b"
    "#]]
    .assert_eq(&render(&tree, list));
}

#[test]
fn doc_comment_comes_first() {
    check(
        "/** @param {number} a */\nfunction f(a) {}",
        SyntaxKind::FunctionDecl,
        expect![[r#"
            JsDoc@0..24
            KwFunction@0..33 "function"
            Ident@33..35 "f"
            LParen@35..36 "("
            SyntaxList@36..37
            RParen@37..38 ")"
            Block@38..41
        "#]],
    );
}

#[test]
fn doc_nodes_only_list_declared_children() {
    let text = "/** @param {number} a */\nfunction f(a) {}";
    check(
        text,
        SyntaxKind::JsDoc,
        expect![[r#"
            JsDocTag@4..21
        "#]],
    );
    check(
        text,
        SyntaxKind::JsDocTag,
        expect![[r#"
            Ident@5..10 "param"
            Ident@20..21 "a"
        "#]],
    );
}

#[test]
fn empty_block_keeps_its_braces() {
    check(
        "function f() {}",
        SyntaxKind::Block,
        expect![[r#"
            LBrace@12..14 "{"
            SyntaxList@14..14
            RBrace@14..15 "}"
        "#]],
    );
}

#[test]
fn missing_argument_stays_in_place() {
    let tree = SyntaxTree::parse("f(,)");
    let call = first_of_kind(&tree, SyntaxKind::CallExpr);
    let children = children_of(&tree, &call);
    let list = children.iter().find(|child| matches!(child, Element::List(_))).unwrap();
    expect![[r#"
        Ident@2..2
        Comma@2..3 ","
    "#]]
    .assert_eq(&render(&tree, list));
}

#[test]
fn tokens_have_no_children() {
    let tree = SyntaxTree::parse("a;");
    let ident = first_of_kind(&tree, SyntaxKind::Ident);
    assert!(children_of(&tree, &ident).is_empty());

    let stmt = first_of_kind(&tree, SyntaxKind::ExprStmt);
    let semicolon = children_of(&tree, &stmt).iter().find(|child| matches!(child, Element::Token(_))).cloned().unwrap();
    assert!(children_of(&tree, &semicolon).is_empty());
}

#[test]
fn children_are_ordered_and_disjoint() {
    let text = "class A { static #n = 1; m(x: number) { return x as number; } }\nlet a = [1, , 2];";
    let tree = SyntaxTree::parse(text);
    for id in tree.descendants() {
        let children = children_of(&tree, &Element::Node(id));
        for pair in children.windows(2) {
            assert!(
                pair[0].end(&tree) <= pair[1].start(&tree, false),
                "{:?} overlaps {:?}",
                pair[0].snapshot(&tree),
                pair[1].snapshot(&tree)
            );
        }
    }
}

#[test]
fn repeated_calls_give_equal_children() {
    let tree = SyntaxTree::parse("if (a) { b(); } else c;");
    let root = Element::Node(tree.root());
    let first = children_of(&tree, &root).into_vec();
    let second = children_of(&tree, &root).into_vec();
    assert_eq!(first, second);
}
