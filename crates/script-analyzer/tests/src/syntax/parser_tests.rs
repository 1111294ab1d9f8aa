use super::*;

fn check(
    input: &str,
    expected_tree: &str,
) {
    let tree = Parser::new(input).parse();
    let actual_tree = tree.debug_dump();
    assert_eq!(actual_tree.trim(), expected_tree.trim());
}

#[test]
fn test_empty() {
    check(
        "",
        r#"
SourceFile@0..0
  [0..0]
  Eof@0..0
"#,
    );
}

#[test]
fn test_variable_statement() {
    check(
        "const x = 1;",
        r#"
SourceFile@0..12
  [0..12]
    VariableStmt@0..12
      VariableDeclList@0..11
        [5..11]
          VariableDecl@5..11
            Ident@5..7 "x"
            Number@9..11 "1"
  Eof@12..12
"#,
    );
}

#[test]
fn test_function_with_doc_comment() {
    check(
        "/** @param {number} a */\nfunction f(a) {}",
        r#"
SourceFile@0..41
  [0..41]
    FunctionDecl@0..41
      JsDoc@0..24
        [4..21]
          JsDocTag@4..21
            Ident@5..10 "param"
            Ident@20..21 "a"
      Ident@33..35 "f"
      [36..37]
        Parameter@36..37
          Ident@36..37 "a"
      Block@38..41
        [40..40]
  Eof@41..41
"#,
    );
}

#[test]
fn test_missing_argument_is_zero_width() {
    check(
        "f(,)",
        r#"
SourceFile@0..4
  [0..4]
    ExprStmt@0..4
      CallExpr@0..4
        Ident@0..1 "f"
        [2..3]
          Ident@2..2
  Eof@4..4
"#,
    );
}

#[test]
fn test_class_member_modifiers() {
    check(
        "class A { static #n = 1; }",
        r##"
SourceFile@0..26
  [0..26]
    ClassDecl@0..26
      Ident@5..7 "A"
      [9..24]
        PropertyDecl@9..24
          [9..16]
            KwStatic@9..16 "static"
          PrivateIdent@16..19 "#n"
          Number@21..23 "1"
  Eof@26..26
"##,
    );
}

#[test]
fn test_as_expression() {
    check(
        "x as number",
        r#"
SourceFile@0..11
  [0..11]
    ExprStmt@0..11
      AsExpr@0..11
        Ident@0..1 "x"
        KwNumber@4..11 "number"
  Eof@11..11
"#,
    );
}

#[test]
fn test_binary_precedence() {
    check(
        "a + b * c",
        r#"
SourceFile@0..9
  [0..9]
    ExprStmt@0..9
      BinaryExpr@0..9
        Ident@0..1 "a"
        Plus@1..3 "+"
        BinaryExpr@3..9
          Ident@3..5 "b"
          Star@5..7 "*"
          Ident@7..9 "c"
  Eof@9..9
"#,
    );
}

#[test]
fn test_arrow_function() {
    check(
        "(a) => a",
        r#"
SourceFile@0..8
  [0..8]
    ExprStmt@0..8
      ArrowFunction@0..8
        [1..2]
          Parameter@1..2
            Ident@1..2 "a"
        Ident@6..8 "a"
  Eof@8..8
"#,
    );
}

#[test]
fn test_stray_token_is_skipped() {
    check(
        ") x",
        r#"
SourceFile@0..3
  [0..3]
    ExprStmt@1..3
      Ident@1..3 "x"
  Eof@3..3
"#,
    );
}

#[test]
fn test_parents_are_linked() {
    let tree = Parser::new("/** d */ const x = 1;").parse();
    let root = tree.root();
    assert_eq!(tree.parent(root), None);

    let statement = tree.documented_nodes()[0];
    assert_eq!(tree.kind(statement), SyntaxKind::VariableStmt);
    assert_eq!(tree.parent(statement), Some(root));

    let doc = tree.js_doc(statement)[0];
    assert_eq!(tree.kind(doc), SyntaxKind::JsDoc);
    assert_eq!(tree.parent(doc), Some(statement));

    let x = tree
        .descendants()
        .into_iter()
        .find(|&id| tree.kind(id) == SyntaxKind::Ident)
        .unwrap();
    assert_eq!(tree.kind(tree.parent(x).unwrap()), SyntaxKind::VariableDecl);
}

#[test]
fn test_start_skips_trivia_or_includes_doc() {
    let tree = Parser::new("/** d */ const x = 1;").parse();
    let statement = tree.documented_nodes()[0];
    assert_eq!(u32::from(tree.pos(statement)), 0);
    assert_eq!(u32::from(tree.start(statement, false)), 9);
    assert_eq!(u32::from(tree.start(statement, true)), 0);
}

#[test]
fn test_empty_doc_comment_is_not_attached() {
    let tree = Parser::new("/**/ function f() {}").parse();
    assert!(tree.documented_nodes().is_empty());
}

#[test]
fn test_spans_are_nested() {
    let text = "class C extends B {\n  constructor(private a: number) { super.x(a); }\n  m?(): string[] { return this.#p ?? [1, , 2]; }\n}\nwhile (i++ < 3) if (!x) y = { a: 1, b } as any; else z;";
    let tree = Parser::new(text).parse();
    for id in tree.descendants() {
        let node = tree.node(id);
        assert!(node.pos <= node.end);
        if let Some(parent) = node.parent {
            let parent = tree.node(parent);
            assert!(parent.pos <= node.pos && node.end <= parent.end, "{:?} escapes {:?}", node.kind, parent.kind);
        }
    }
    assert_eq!(u32::from(tree.end(tree.root())), text.len() as u32);
}
