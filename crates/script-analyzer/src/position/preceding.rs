use text_size::TextSize;

use crate::{
    position::{Element, children_of},
    syntax::{SyntaxKind, SyntaxTree},
};

/// Last token that starts before `offset`, searching under `start` (the
/// root when `None`).
///
/// An offset strictly inside a token yields that token. Returns `None` when
/// no token starts before the offset, for example in an empty source.
pub fn preceding_token(
    tree: &SyntaxTree,
    offset: TextSize,
    start: Option<&Element>,
) -> Option<Element> {
    match start {
        Some(element) => find(tree, offset, element),
        None => find(tree, offset, &Element::Node(tree.root())),
    }
}

fn find(
    tree: &SyntaxTree,
    offset: TextSize,
    n: &Element,
) -> Option<Element> {
    if is_non_trivial_token(tree, n) {
        return Some(n.clone());
    }

    let children = children_of(tree, n);
    let i = children.partition_point(|child| child.end(tree) <= offset);
    if let Some(child) = children.get(i) {
        let look_in_previous = child.start(tree, true) >= offset || !has_tokens(tree, child);
        if !look_in_previous {
            return find(tree, offset, child);
        }
        let candidate = rightmost_child_with_tokens(tree, &children[..i])?;
        if candidate.kind(tree).is_jsdoc() && !children_of(tree, candidate).is_empty() {
            return find(tree, offset, candidate);
        }
        return rightmost_token(tree, candidate);
    }

    let candidate = rightmost_child_with_tokens(tree, &children)?;
    rightmost_token(tree, candidate)
}

fn is_non_trivial_token(
    tree: &SyntaxTree,
    element: &Element,
) -> bool {
    let kind = element.kind(tree);
    kind.is_token() && kind != SyntaxKind::Eof && !element.is_zero_width(tree)
}

fn has_tokens(
    tree: &SyntaxTree,
    element: &Element,
) -> bool {
    if element.kind(tree) == SyntaxKind::Eof {
        return element.as_node().is_some_and(|id| !tree.js_doc(id).is_empty());
    }
    element.end(tree) != element.start(tree, false)
}

fn rightmost_child_with_tokens<'c>(
    tree: &SyntaxTree,
    children: &'c [Element],
) -> Option<&'c Element> {
    children.iter().rev().find(|child| has_tokens(tree, child))
}

fn rightmost_token(
    tree: &SyntaxTree,
    n: &Element,
) -> Option<Element> {
    if is_non_trivial_token(tree, n) {
        return Some(n.clone());
    }
    let children = children_of(tree, n);
    if children.is_empty() {
        return Some(n.clone());
    }
    let candidate = rightmost_child_with_tokens(tree, &children)?;
    rightmost_token(tree, candidate)
}

#[cfg(test)]
#[path = "../../tests/src/position/preceding_tests.rs"]
mod tests;
