use std::{
    ops::{Deref, DerefMut},
    sync::{Mutex, PoisonError},
};

use once_cell::sync::Lazy;
use tracing::error;

use crate::{
    position::{Element, SyntheticToken},
    syntax::{NodeId, SyntaxKind, SyntaxTree, scanner::ScannedToken},
};

const MAX_POOLED_BUFFERS: usize = 64;
const MAX_POOLED_CAPACITY: usize = 256;

static BUFFERS: Lazy<Mutex<Vec<Vec<Element>>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A child buffer borrowed from the process-wide pool.
///
/// Dropping it clears the contents and hands the allocation back.
#[derive(Debug, Default)]
pub struct ElementBuffer {
    items: Vec<Element>,
}

impl ElementBuffer {
    pub fn into_vec(mut self) -> Vec<Element> {
        std::mem::take(&mut self.items)
    }
}

impl Deref for ElementBuffer {
    type Target = Vec<Element>;

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl DerefMut for ElementBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.items
    }
}

impl Drop for ElementBuffer {
    fn drop(&mut self) {
        let mut items = std::mem::take(&mut self.items);
        if items.capacity() == 0 || items.capacity() > MAX_POOLED_CAPACITY {
            return;
        }
        items.clear();
        let mut pool = BUFFERS.lock().unwrap_or_else(PoisonError::into_inner);
        if pool.len() < MAX_POOLED_BUFFERS {
            pool.push(items);
        }
    }
}

pub(crate) fn checkout() -> ElementBuffer {
    let items = BUFFERS.lock().unwrap_or_else(PoisonError::into_inner).pop().unwrap_or_default();
    ElementBuffer {
        items,
    }
}

#[cfg(test)]
pub(crate) fn pooled_buffers() -> usize {
    BUFFERS.lock().unwrap_or_else(PoisonError::into_inner).len()
}

/// Wraps a scanned gap token. Identifiers and literals are always nodes, so
/// meeting one here means the tree and the text disagree.
pub(crate) fn token(
    tree: &SyntaxTree,
    scanned: ScannedToken,
    parent: NodeId,
) -> Element {
    let parent_kind = tree.kind(parent);
    let admitted = scanned.kind == SyntaxKind::Ident && parent_kind.admits_stray_identifier();
    if scanned.kind.is_node_only_token() && !admitted {
        error!(
            kind = ?scanned.kind,
            parent = ?parent_kind,
            start = u32::from(scanned.start),
            "scanned a token that should have been a tree node"
        );
        panic!("did not expect {parent_kind:?} to have {:?} in its trivia", scanned.kind);
    }
    Element::Token(SyntheticToken {
        kind: scanned.kind,
        pos: scanned.pos,
        start: scanned.start,
        end: scanned.end,
        parent,
    })
}

#[cfg(test)]
#[path = "../../tests/src/position/factory_tests.rs"]
mod tests;
