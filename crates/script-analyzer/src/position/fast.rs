use std::ops::ControlFlow;

use text_size::TextSize;
use tracing::trace;

use crate::{
    position::{Element, PositionSearch, TokenAtOptions, factory, preceding_token},
    syntax::{Child, ListId, NodeId, SyntaxKind, SyntaxTree, scanner::Scanner},
};

/// Latency-oriented engine.
///
/// Walks the declared children of each node lazily, keeping a `[left, right)`
/// bracket of text that may still hold the offset. Node lists are entered with
/// a binary search over their members. Gap tokens are only scanned once, for
/// the final bracket of the innermost node.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastSearch;

impl PositionSearch for FastSearch {
    fn name(&self) -> &'static str {
        "fast"
    }

    fn descend(
        &self,
        tree: &SyntaxTree,
        offset: TextSize,
        options: TokenAtOptions<'_>,
    ) -> Element {
        let mut current = tree.root();
        loop {
            match Walk::new(tree, current, offset, options).run() {
                Step::Descend(next) => {
                    trace!(kind = ?tree.kind(next), pos = u32::from(tree.pos(next)), "descend");
                    current = next;
                },
                Step::Found(element) => return element,
            }
        }
    }
}

enum Step {
    Descend(NodeId),
    Found(Element),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Test {
    Before,
    Contains,
    After,
}

struct Walk<'t, 'p> {
    tree: &'t SyntaxTree,
    current: NodeId,
    offset: TextSize,
    options: TokenAtOptions<'p>,
    left: TextSize,
    right: TextSize,
    next: Option<NodeId>,
    /// First child ending exactly at the offset; its last token may win.
    prev_subtree: Option<NodeId>,
    gap_token: Option<Element>,
}

impl<'t, 'p> Walk<'t, 'p> {
    fn new(
        tree: &'t SyntaxTree,
        current: NodeId,
        offset: TextSize,
        options: TokenAtOptions<'p>,
    ) -> Self {
        Self {
            tree,
            current,
            offset,
            options,
            left: tree.pos(current),
            right: tree.end(current),
            next: None,
            prev_subtree: None,
            gap_token: None,
        }
    }

    fn run(mut self) -> Step {
        let tree = self.tree;
        let current = self.current;
        if tree.kind(current).is_token() {
            return Step::Found(Element::Node(current));
        }

        self.visit_js_doc();
        if self.next.is_none() {
            let _ = tree.for_each_child(current, |child| match child {
                Child::Node(node) => self.visit_node(node),
                Child::List(list) => self.visit_list(list),
            });
        }

        if let Some(prev) = self.prev_subtree
            && let Some(token) = preceding_token(tree, self.offset, Some(&Element::Node(prev)))
            && self.options.accepts_preceding(tree, self.offset, &token)
        {
            return Step::Found(token);
        }
        if let Some(token) = self.gap_token.take() {
            return Step::Found(token);
        }
        match self.next {
            Some(next) => Step::Descend(next),
            None => Step::Found(self.scan_gap()),
        }
    }

    /// Doc comments start at their own text, not at the trivia in front of
    /// them, so the owner's start stands in for theirs. The bracket is never
    /// moved past a doc comment.
    fn visit_js_doc(&mut self) {
        let tree = self.tree;
        let start = if self.options.allow_position_in_leading_trivia {
            tree.pos(self.current)
        } else {
            tree.start(self.current, true)
        };
        for &doc in tree.js_doc(self.current) {
            let end = tree.end(doc);
            if end < self.offset || (end == self.offset && !self.options.include_end_position) {
                continue;
            }
            if start > self.offset {
                continue;
            }
            self.next = Some(doc);
            return;
        }
    }

    fn test(
        &self,
        node: NodeId,
    ) -> Test {
        let tree = self.tree;
        let end = tree.end(node);
        if end < self.offset
            || (end == self.offset && !self.options.include_end_position && tree.kind(node) != SyntaxKind::Eof)
        {
            return Test::Before;
        }
        let start = if self.options.allow_position_in_leading_trivia {
            tree.pos(node)
        } else {
            tree.start(node, true)
        };
        if start > self.offset {
            Test::After
        } else {
            Test::Contains
        }
    }

    fn visit_node(
        &mut self,
        node: NodeId,
    ) -> ControlFlow<()> {
        let tree = self.tree;
        let pos = tree.pos(node);
        let end = tree.end(node);

        // A gap token ending where this node begins comes first.
        if self.left < pos && pos == self.offset && !tree.kind(self.current).is_jsdoc() {
            let at_end = self.options.include_end_position || self.options.include_preceding_token_at_end_position.is_some();
            if at_end
                && let Some(token) = self.gap_token_ending_at(pos)
                && (self.options.include_end_position || self.options.accepts_preceding(tree, self.offset, &token))
            {
                self.gap_token = Some(token);
                return ControlFlow::Break(());
            }
        }

        if end == self.offset
            && tree.kind(node) != SyntaxKind::Eof
            && self.options.include_preceding_token_at_end_position.is_some()
            && self.prev_subtree.is_none()
        {
            self.prev_subtree = Some(node);
        }

        match self.test(node) {
            Test::Before => {
                self.left = end;
                ControlFlow::Continue(())
            },
            Test::After => {
                self.right = pos;
                ControlFlow::Break(())
            },
            Test::Contains => {
                self.next = Some(node);
                ControlFlow::Break(())
            },
        }
    }

    fn visit_list(
        &mut self,
        list: ListId,
    ) -> ControlFlow<()> {
        let tree = self.tree;
        let nodes = &tree.list(list).nodes;
        if nodes.is_empty() {
            return ControlFlow::Continue(());
        }
        let first = nodes.partition_point(|&node| tree.end(node) < self.offset);
        if first > 0 {
            self.left = tree.end(nodes[first - 1]);
        }
        for &node in &nodes[first..] {
            self.visit_node(node)?;
        }
        ControlFlow::Continue(())
    }

    fn gap_token_ending_at(
        &self,
        target: TextSize,
    ) -> Option<Element> {
        let mut scanner = Scanner::new(self.tree.text(), self.left);
        loop {
            let token = scanner.next_token();
            if token.kind == SyntaxKind::Eof || token.end > target {
                return None;
            }
            if token.end == target {
                return Some(factory::token(self.tree, token, self.current));
            }
        }
    }

    /// One bounded re-scan of the bracket left over in the current node.
    fn scan_gap(&self) -> Element {
        let tree = self.tree;
        let kind = tree.kind(self.current);
        if kind.is_token() || kind.is_jsdoc() {
            return Element::Node(self.current);
        }

        let mut scanner = Scanner::new(tree.text(), self.left);
        let mut left = self.left;
        while left < self.right {
            let scanned = scanner.next_token();
            if scanned.kind == SyntaxKind::Eof {
                break;
            }
            let start = if self.options.allow_position_in_leading_trivia {
                scanned.pos
            } else {
                scanned.start
            };
            if start > self.offset {
                break;
            }
            if self.offset < scanned.end || (self.offset == scanned.end && self.options.include_end_position) {
                return factory::token(tree, scanned, self.current);
            }
            if scanned.end == self.offset && self.options.include_preceding_token_at_end_position.is_some() {
                let token = factory::token(tree, scanned, self.current);
                if self.options.accepts_preceding(tree, self.offset, &token) {
                    return token;
                }
            }
            left = scanned.end;
        }
        Element::Node(self.current)
    }
}

#[cfg(test)]
#[path = "../../tests/src/position/fast_tests.rs"]
mod tests;
