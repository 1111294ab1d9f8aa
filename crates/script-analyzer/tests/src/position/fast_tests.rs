use super::*;

fn find(
    text: &str,
    offset: u32,
    options: TokenAtOptions<'_>,
) -> (SyntaxKind, u32, u32) {
    let tree = SyntaxTree::parse(text);
    let found = FastSearch.token_at(&tree, TextSize::from(offset), options);
    (found.kind(&tree), found.pos(&tree).into(), found.end(&tree).into())
}

fn opening_paren(
    tree: &SyntaxTree,
    element: &Element,
) -> bool {
    element.kind(tree) == SyntaxKind::LParen
}

fn closing_paren(
    tree: &SyntaxTree,
    element: &Element,
) -> bool {
    element.kind(tree) == SyntaxKind::RParen
}

#[test]
fn identifier_under_cursor() {
    assert_eq!(find("const x = 1;", 6, TokenAtOptions::default()), (SyntaxKind::Ident, 5, 7));
    assert_eq!(find("const x = 1;", 5, TokenAtOptions::default()), (SyntaxKind::Ident, 5, 7));
}

#[test]
fn gap_is_scanned_once_for_keywords() {
    assert_eq!(find("const x = 1;", 0, TokenAtOptions::default()), (SyntaxKind::KwConst, 0, 5));
    assert_eq!(find("const x = 1;", 8, TokenAtOptions::default()), (SyntaxKind::Equal, 7, 9));
}

#[test]
fn descend_without_fallback_stops_at_node() {
    let tree = SyntaxTree::parse("const x = 1;");
    let found = FastSearch.descend(&tree, TextSize::from(5), TokenAtOptions::default());
    assert_eq!(found.kind(&tree), SyntaxKind::VariableDeclList);
}

#[test]
fn include_end_position_keeps_left_token() {
    let options = TokenAtOptions {
        include_end_position: true,
        ..TokenAtOptions::default()
    };
    assert_eq!(find("a;", 1, options), (SyntaxKind::Ident, 0, 1));
    assert_eq!(find("a;", 1, TokenAtOptions::default()), (SyntaxKind::Semicolon, 1, 2));
}

#[test]
fn predicate_on_last_token_of_previous_subtree() {
    let options = TokenAtOptions {
        include_preceding_token_at_end_position: Some(&closing_paren),
        ..TokenAtOptions::default()
    };
    assert_eq!(find("f();", 3, options), (SyntaxKind::RParen, 2, 3));
}

#[test]
fn gap_token_wins_over_zero_width_node() {
    let options = TokenAtOptions {
        include_preceding_token_at_end_position: Some(&opening_paren),
        ..TokenAtOptions::default()
    };
    assert_eq!(find("f(,)", 2, options), (SyntaxKind::LParen, 1, 2));
    assert_eq!(find("f(,)", 2, TokenAtOptions::default()), (SyntaxKind::Comma, 2, 3));
}

#[test]
fn list_members_before_offset_are_skipped() {
    let text = "g(a, b, c, d, e, f);";
    let offset = text.find('e').unwrap() as u32;
    assert_eq!(find(text, offset, TokenAtOptions::default()), (SyntaxKind::Ident, offset - 1, offset + 1));
    assert_eq!(find(text, offset + 1, TokenAtOptions::default()), (SyntaxKind::Comma, offset + 1, offset + 2));
}

#[test]
fn end_of_file_is_reachable() {
    assert_eq!(find("a;  ", 4, TokenAtOptions::default()), (SyntaxKind::Eof, 2, 4));
    assert_eq!(find("", 0, TokenAtOptions::default()), (SyntaxKind::Eof, 0, 0));
}

#[test]
fn offset_in_doc_comment_lands_on_doc_node() {
    let tree = SyntaxTree::parse("/** doc */\nfunction f() {}");
    let found = FastSearch.token_at(&tree, TextSize::from(5), TokenAtOptions::default());
    assert_eq!(found.kind(&tree), SyntaxKind::JsDoc);
}
