use std::cmp::Ordering;

use text_size::TextSize;
use tracing::trace;

use crate::{
    position::{Element, PositionSearch, TokenAtOptions, binary_search_by, children_of, preceding_token},
    syntax::{SyntaxKind, SyntaxTree},
};

/// Straightforward engine: materializes the children of every node on the
/// path and binary-searches them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceSearch;

impl PositionSearch for ReferenceSearch {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn descend(
        &self,
        tree: &SyntaxTree,
        offset: TextSize,
        options: TokenAtOptions<'_>,
    ) -> Element {
        let mut current = Element::Node(tree.root());
        loop {
            let mut children = children_of(tree, &current);
            let mut level = Level {
                tree,
                offset,
                options,
                found_token: None,
            };
            let index = binary_search_by(children.len(), |middle| level.compare(&children, middle));

            if let Some(token) = level.found_token {
                return token;
            }
            match index {
                Some(index) => {
                    current = children.swap_remove(index);
                    trace!(kind = ?current.kind(tree), pos = u32::from(current.pos(tree)), "descend");
                },
                None => return current,
            }
        }
    }
}

struct Level<'t, 'p> {
    tree: &'t SyntaxTree,
    offset: TextSize,
    options: TokenAtOptions<'p>,
    found_token: Option<Element>,
}

impl Level<'_, '_> {
    fn bound_start(
        &self,
        child: &Element,
    ) -> TextSize {
        if self.options.allow_position_in_leading_trivia {
            child.pos(self.tree)
        } else {
            child.start(self.tree, true)
        }
    }

    fn compare(
        &mut self,
        children: &[Element],
        middle: usize,
    ) -> Ordering {
        let child = &children[middle];
        let end = child.end(self.tree);
        if end < self.offset {
            return Ordering::Less;
        }
        let start = self.bound_start(child);
        if start > self.offset {
            return Ordering::Greater;
        }

        if self.contains(child) {
            if let Some(previous) = self.previous(children, middle)
                && self.contains(previous)
            {
                return Ordering::Greater;
            }
            return Ordering::Equal;
        }

        if start == self.offset
            && (self.is_empty_list(child) || self.options.include_preceding_token_at_end_position.is_some())
            && let Some(previous) = self.previous(children, middle)
            && previous.end(self.tree) == self.offset
            && self.contains(previous)
        {
            return Ordering::Greater;
        }
        Ordering::Less
    }

    fn is_empty_list(
        &self,
        child: &Element,
    ) -> bool {
        child.is_zero_width(self.tree) && !child.is_token(self.tree)
    }

    /// Nearest sibling to the left, looking through empty lists.
    fn previous<'c>(
        &self,
        children: &'c [Element],
        middle: usize,
    ) -> Option<&'c Element> {
        children[..middle].iter().rev().find(|child| !self.is_empty_list(child))
    }

    fn contains(
        &mut self,
        child: &Element,
    ) -> bool {
        let end = child.end(self.tree);
        if end < self.offset || self.bound_start(child) > self.offset {
            return false;
        }
        if self.offset < end || (self.offset == end && child.kind(self.tree) == SyntaxKind::Eof) {
            return true;
        }
        // An empty list holds no token to land on.
        if self.offset == end && self.options.include_end_position && !self.is_empty_list(child) {
            return true;
        }
        if self.options.include_preceding_token_at_end_position.is_some()
            && end == self.offset
            && let Some(token) = preceding_token(self.tree, self.offset, Some(child))
            && self.options.accepts_preceding(self.tree, self.offset, &token)
        {
            self.found_token = Some(token);
            return true;
        }
        false
    }
}

#[cfg(test)]
#[path = "../../tests/src/position/reference_tests.rs"]
mod tests;
