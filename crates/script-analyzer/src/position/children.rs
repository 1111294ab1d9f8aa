use std::ops::ControlFlow;

use text_size::TextSize;

use crate::{
    position::{
        Element, SyntaxList,
        factory::{self, ElementBuffer},
    },
    syntax::{Child, ListId, NodeId, SyntaxKind, SyntaxTree, scanner::Scanner},
};

/// Ordered children of an element, held in a pooled buffer.
pub type Children = ElementBuffer;

/// Declared children interleaved with the tokens found in the gaps between
/// them. Node lists come back as [`SyntaxList`] elements.
pub fn children_of(
    tree: &SyntaxTree,
    element: &Element,
) -> Children {
    let mut out = factory::checkout();
    match element {
        Element::Token(_) => {},
        Element::List(list) => out.extend(list.children().iter().cloned()),
        Element::Node(id) => node_children(tree, *id, &mut out),
    }
    out
}

fn node_children(
    tree: &SyntaxTree,
    id: NodeId,
    out: &mut Vec<Element>,
) {
    let kind = tree.kind(id);
    if kind.is_token() {
        return;
    }

    if kind.is_jsdoc() {
        let _ = tree.for_each_child(id, |child| {
            match child {
                Child::Node(node) => out.push(Element::Node(node)),
                Child::List(list) => out.extend(tree.list(list).nodes.iter().map(|&node| Element::Node(node))),
            }
            ControlFlow::<()>::Continue(())
        });
        return;
    }

    out.extend(tree.js_doc(id).iter().map(|&doc| Element::Node(doc)));

    let mut pos = tree.pos(id);
    let _ = tree.for_each_child(id, |child| {
        match child {
            Child::Node(node) => {
                add_synthetic(tree, id, pos, tree.pos(node), out);
                out.push(Element::Node(node));
                pos = tree.end(node);
            },
            Child::List(list) => {
                let nodes = tree.list(list);
                add_synthetic(tree, id, pos, nodes.pos, out);
                out.push(Element::List(syntax_list(tree, id, list)));
                pos = nodes.end;
            },
        }
        ControlFlow::<()>::Continue(())
    });
    add_synthetic(tree, id, pos, tree.end(id), out);
}

fn syntax_list(
    tree: &SyntaxTree,
    parent: NodeId,
    list: ListId,
) -> SyntaxList {
    let nodes = tree.list(list);
    let mut children = Vec::with_capacity(nodes.nodes.len() * 2);
    let mut pos = nodes.pos;
    for &node in &nodes.nodes {
        add_synthetic(tree, parent, pos, tree.pos(node), &mut children);
        children.push(Element::Node(node));
        pos = tree.end(node);
    }
    add_synthetic(tree, parent, pos, nodes.end, &mut children);
    SyntaxList::new(list, parent, nodes.pos, nodes.end, children)
}

/// Re-scans `[pos, end)` and appends one token per lexeme that fits.
fn add_synthetic(
    tree: &SyntaxTree,
    parent: NodeId,
    mut pos: TextSize,
    end: TextSize,
    out: &mut Vec<Element>,
) {
    if pos >= end {
        return;
    }
    let mut scanner = Scanner::new(tree.text(), pos);
    while pos < end {
        let token = scanner.next_token();
        if token.kind == SyntaxKind::Eof {
            break;
        }
        if token.end <= end {
            out.push(factory::token(tree, token, parent));
        }
        pos = token.end;
    }
}

#[cfg(test)]
#[path = "../../tests/src/position/children_tests.rs"]
mod tests;
