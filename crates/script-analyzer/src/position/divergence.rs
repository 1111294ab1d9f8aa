//! Known disagreement between the two engines.
//!
//! A doc comment is a child of the declaration it documents, but its span
//! starts at the comment text while the declaration's span starts at the
//! trivia before it. For an offset between the two the reference engine can
//! land on a token of the declaration while the fast engine lands on the
//! comment, or the other way around.

use serde::Serialize;
use text_size::TextSize;

use crate::{
    position::{Element, EngineKind, TokenAtOptions, TokenPredicate, TokenSnapshot},
    syntax::{SyntaxKind, SyntaxTree},
};

/// Whether `offset` lies between the full start of a documented declaration
/// and the end of one of its doc comments.
pub fn in_doc_comment_trivia(
    tree: &SyntaxTree,
    offset: TextSize,
) -> bool {
    tree.documented_nodes().iter().any(|&node| {
        let pos = tree.pos(node);
        pos <= offset && tree.js_doc(node).iter().any(|&doc| offset <= tree.end(doc))
    })
}

/// Results of both engines for one query that did not match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Divergence {
    pub offset: u32,
    pub reference: Option<TokenSnapshot>,
    pub fast: Option<TokenSnapshot>,
    pub whitelisted: bool,
}

/// Runs [`token_at`](crate::position::PositionSearch::token_at) on both engines and reports a mismatch
/// in kind or full start.
pub fn compare_engines(
    tree: &SyntaxTree,
    offset: TextSize,
    options: TokenAtOptions<'_>,
) -> Option<Divergence> {
    let reference = EngineKind::Reference.engine().token_at(tree, offset, options);
    let fast = EngineKind::Fast.engine().token_at(tree, offset, options);
    compare(tree, offset, Some(reference), Some(fast))
}

/// Same as [`compare_engines`] for [`touching_property_name`](crate::position::PositionSearch::touching_property_name).
pub fn compare_touching(
    tree: &SyntaxTree,
    offset: TextSize,
) -> Option<Divergence> {
    let reference = EngineKind::Reference.engine().touching_property_name(tree, offset);
    let fast = EngineKind::Fast.engine().touching_property_name(tree, offset);
    compare(tree, offset, reference, fast)
}

fn compare(
    tree: &SyntaxTree,
    offset: TextSize,
    reference: Option<Element>,
    fast: Option<Element>,
) -> Option<Divergence> {
    let key = |element: &Element| (element.kind(tree), element.pos(tree));
    if reference.as_ref().map(key) == fast.as_ref().map(key) {
        return None;
    }
    Some(Divergence {
        offset: offset.into(),
        reference: reference.map(|element| element.snapshot(tree)),
        fast: fast.map(|element| element.snapshot(tree)),
        whitelisted: in_doc_comment_trivia(tree, offset),
    })
}

/// Accepts `)`, `]` and `}`. The predicate used when cross-checking.
pub fn closing_punctuation(
    tree: &SyntaxTree,
    element: &Element,
) -> bool {
    matches!(element.kind(tree), SyntaxKind::RParen | SyntaxKind::RBracket | SyntaxKind::RBrace)
}

/// Every combination of the trivia flag, the end flag and the predicate
/// (absent or [`closing_punctuation`]).
pub fn option_grid() -> Vec<TokenAtOptions<'static>> {
    let mut grid = Vec::with_capacity(8);
    for allow_position_in_leading_trivia in [false, true] {
        for include_end_position in [false, true] {
            for predicate in [None, Some(&closing_punctuation as TokenPredicate<'static>)] {
                grid.push(TokenAtOptions {
                    allow_position_in_leading_trivia,
                    include_end_position,
                    include_preceding_token_at_end_position: predicate,
                });
            }
        }
    }
    grid
}

#[cfg(test)]
#[path = "../../tests/src/position/divergence_tests.rs"]
mod tests;
