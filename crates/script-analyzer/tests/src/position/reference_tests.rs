use super::*;

fn closing_paren(
    tree: &SyntaxTree,
    element: &Element,
) -> bool {
    element.kind(tree) == SyntaxKind::RParen
}

fn find(
    text: &str,
    offset: u32,
    options: TokenAtOptions<'_>,
) -> (SyntaxKind, u32, u32) {
    let tree = SyntaxTree::parse(text);
    let found = ReferenceSearch.token_at(&tree, TextSize::from(offset), options);
    (found.kind(&tree), found.pos(&tree).into(), found.end(&tree).into())
}

#[test]
fn identifier_under_cursor() {
    assert_eq!(find("const x = 1;", 6, TokenAtOptions::default()), (SyntaxKind::Ident, 5, 7));
}

#[test]
fn offset_in_leading_trivia_falls_back_to_following_token() {
    assert_eq!(find("const x = 1;", 5, TokenAtOptions::default()), (SyntaxKind::Ident, 5, 7));
}

#[test]
fn descend_without_fallback_stops_at_node() {
    let tree = SyntaxTree::parse("const x = 1;");
    let found = ReferenceSearch.descend(&tree, TextSize::from(5), TokenAtOptions::default());
    assert_eq!(found.kind(&tree), SyntaxKind::VariableDeclList);
}

#[test]
fn end_position_belongs_to_next_token_by_default() {
    assert_eq!(find("a;", 1, TokenAtOptions::default()), (SyntaxKind::Semicolon, 1, 2));
}

#[test]
fn include_end_position_keeps_left_token() {
    let options = TokenAtOptions {
        include_end_position: true,
        ..TokenAtOptions::default()
    };
    assert_eq!(find("a;", 1, options), (SyntaxKind::Ident, 0, 1));
}

#[test]
fn predicate_picks_token_ending_at_offset() {
    let options = TokenAtOptions {
        include_preceding_token_at_end_position: Some(&closing_paren),
        ..TokenAtOptions::default()
    };
    assert_eq!(find("f();", 3, options), (SyntaxKind::RParen, 2, 3));
    assert_eq!(find("f();", 3, TokenAtOptions::default()), (SyntaxKind::Semicolon, 3, 4));
}

#[test]
fn rejected_predicate_falls_through() {
    let reject = |_: &SyntaxTree, _: &Element| false;
    let options = TokenAtOptions {
        include_preceding_token_at_end_position: Some(&reject),
        ..TokenAtOptions::default()
    };
    assert_eq!(find("f();", 3, options), (SyntaxKind::Semicolon, 3, 4));
}

#[test]
fn zero_width_argument_is_skipped() {
    assert_eq!(find("f(,)", 2, TokenAtOptions::default()), (SyntaxKind::Comma, 2, 3));
}

#[test]
fn end_of_file_is_reachable() {
    assert_eq!(find("a;  ", 4, TokenAtOptions::default()), (SyntaxKind::Eof, 2, 4));
    assert_eq!(find("", 0, TokenAtOptions::default()), (SyntaxKind::Eof, 0, 0));
}

#[test]
fn keyword_inside_nested_block() {
    let text = "function f() { if (a) { return b; } }";
    let offset = text.find("return").unwrap() as u32 + 2;
    let (kind, _, end) = find(text, offset, TokenAtOptions::default());
    assert_eq!(kind, SyntaxKind::KwReturn);
    assert_eq!(end as usize, text.find("return").unwrap() + "return".len());
}

#[test]
fn empty_statement_list_is_skipped_at_end_position() {
    let options = TokenAtOptions {
        include_end_position: true,
        ..TokenAtOptions::default()
    };
    assert_eq!(find("", 0, options), (SyntaxKind::Eof, 0, 0));
    assert_eq!(find("   ", 0, options), (SyntaxKind::Eof, 0, 3));
    assert_eq!(find("// c", 0, options), (SyntaxKind::Eof, 0, 4));
}

#[test]
fn empty_argument_list_never_wins_over_its_delimiter() {
    let options = TokenAtOptions {
        include_end_position: true,
        ..TokenAtOptions::default()
    };
    assert_eq!(find("f();", 2, options), (SyntaxKind::LParen, 1, 2));
    assert_eq!(find("() => 1;", 1, options), (SyntaxKind::LParen, 0, 1));
}
