//! Offset to token resolution over a parsed [`SyntaxTree`].
//!
//! The tree keeps identifiers, literals and structural nodes, but not the
//! punctuation and keywords between them. Those are recovered by re-scanning
//! the gaps on demand, so a lookup can land on any lexical token of the text.
//!
//! Two engines implement [`PositionSearch`]: [`ReferenceSearch`] materializes
//! every level's children before searching them, [`FastSearch`] narrows a byte
//! bracket over the declared children and scans a single gap at the end.

mod children;
pub mod divergence;
mod factory;
mod fast;
mod preceding;
mod reference;
pub mod service;
pub mod stats;

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use text_size::{TextRange, TextSize};

use crate::syntax::{ListId, NodeId, SyntaxKind, SyntaxTree, scanner};

pub use children::{Children, children_of};
pub use factory::ElementBuffer;
pub use fast::FastSearch;
pub use preceding::preceding_token;
pub use reference::ReferenceSearch;
pub use service::PositionService;
pub use stats::QueryStats;

/// A lexical token recovered from a gap between declared children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyntheticToken {
    pub kind: SyntaxKind,
    pub pos: TextSize,
    pub start: TextSize,
    pub end: TextSize,
    /// Node whose gap the token was scanned from.
    pub parent: NodeId,
}

/// A node list together with the tokens between its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxList {
    pub list: ListId,
    pub parent: NodeId,
    pub pos: TextSize,
    pub end: TextSize,
    children: Arc<[Element]>,
}

impl SyntaxList {
    pub(crate) fn new(
        list: ListId,
        parent: NodeId,
        pos: TextSize,
        end: TextSize,
        children: Vec<Element>,
    ) -> Self {
        Self {
            list,
            parent,
            pos,
            end,
            children: children.into(),
        }
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }
}

/// Anything a position search can stand on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Node(NodeId),
    Token(SyntheticToken),
    List(SyntaxList),
}

impl Element {
    pub fn kind(
        &self,
        tree: &SyntaxTree,
    ) -> SyntaxKind {
        match self {
            Element::Node(id) => tree.kind(*id),
            Element::Token(token) => token.kind,
            Element::List(_) => SyntaxKind::SyntaxList,
        }
    }

    /// Full start, including leading trivia.
    pub fn pos(
        &self,
        tree: &SyntaxTree,
    ) -> TextSize {
        match self {
            Element::Node(id) => tree.pos(*id),
            Element::Token(token) => token.pos,
            Element::List(list) => list.pos,
        }
    }

    pub fn end(
        &self,
        tree: &SyntaxTree,
    ) -> TextSize {
        match self {
            Element::Node(id) => tree.end(*id),
            Element::Token(token) => token.end,
            Element::List(list) => list.end,
        }
    }

    /// Start of the first real token; see [`SyntaxTree::start`].
    pub fn start(
        &self,
        tree: &SyntaxTree,
        include_js_doc: bool,
    ) -> TextSize {
        match self {
            Element::Node(id) => tree.start(*id, include_js_doc),
            Element::Token(token) => token.start,
            Element::List(list) => {
                if list.pos == list.end {
                    return list.pos;
                }
                match list.children.first() {
                    Some(first) => first.start(tree, include_js_doc),
                    None => scanner::skip_trivia(tree.text(), list.pos),
                }
            },
        }
    }

    pub fn is_token(
        &self,
        tree: &SyntaxTree,
    ) -> bool {
        self.kind(tree).is_token()
    }

    pub fn is_zero_width(
        &self,
        tree: &SyntaxTree,
    ) -> bool {
        self.pos(tree) == self.end(tree)
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Element::Node(id) => Some(*id),
            _ => None,
        }
    }

    pub fn snapshot(
        &self,
        tree: &SyntaxTree,
    ) -> TokenSnapshot {
        let start = self.start(tree, false);
        let end = self.end(tree);
        let text = if start < end {
            tree.text_of(TextRange::new(start, end)).to_string()
        } else {
            String::new()
        };
        TokenSnapshot {
            kind: self.kind(tree),
            full_start: self.pos(tree).into(),
            start: start.into(),
            end: end.into(),
            text,
        }
    }
}

/// Owned, printable record of a lookup result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSnapshot {
    pub kind: SyntaxKind,
    pub full_start: u32,
    pub start: u32,
    pub end: u32,
    pub text: String,
}

impl fmt::Display for TokenSnapshot {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:?}@{}..{}", self.kind, self.full_start, self.end)?;
        if !self.text.is_empty() {
            write!(f, " {:?}", self.text)?;
        }
        Ok(())
    }
}

pub type TokenPredicate<'p> = &'p dyn Fn(&SyntaxTree, &Element) -> bool;

/// Containment policy for [`PositionSearch::token_at`].
#[derive(Clone, Copy, Default)]
pub struct TokenAtOptions<'p> {
    /// Count an offset in a node's leading trivia as inside that node.
    pub allow_position_in_leading_trivia: bool,
    /// Count an offset equal to a node's end as inside that node.
    pub include_end_position: bool,
    /// At a node's end, return the token right before the offset when this
    /// accepts it.
    pub include_preceding_token_at_end_position: Option<TokenPredicate<'p>>,
}

impl fmt::Debug for TokenAtOptions<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("TokenAtOptions")
            .field("allow_position_in_leading_trivia", &self.allow_position_in_leading_trivia)
            .field("include_end_position", &self.include_end_position)
            .field(
                "include_preceding_token_at_end_position",
                &self.include_preceding_token_at_end_position.is_some(),
            )
            .finish()
    }
}

impl<'p> TokenAtOptions<'p> {
    pub(crate) fn accepts_preceding(
        &self,
        tree: &SyntaxTree,
        offset: TextSize,
        token: &Element,
    ) -> bool {
        match self.include_preceding_token_at_end_position {
            Some(predicate) => token.end(tree) == offset && predicate(tree, token),
            None => false,
        }
    }
}

fn is_property_name_like(
    tree: &SyntaxTree,
    element: &Element,
) -> bool {
    element.kind(tree).is_property_name_like()
}

/// Lookup of the element at a text offset.
pub trait PositionSearch: Send + Sync {
    fn name(&self) -> &'static str;

    /// A single descent from the root under `options`.
    fn descend(
        &self,
        tree: &SyntaxTree,
        offset: TextSize,
        options: TokenAtOptions<'_>,
    ) -> Element;

    /// Innermost token containing `offset`, or the deepest node when no token
    /// does.
    ///
    /// When leading trivia is excluded and the descent stops short of a token,
    /// the lookup is repeated with trivia allowed, so an offset in whitespace
    /// resolves to the token that owns it.
    fn token_at(
        &self,
        tree: &SyntaxTree,
        offset: TextSize,
        options: TokenAtOptions<'_>,
    ) -> Element {
        let found = self.descend(tree, offset, options);
        if options.allow_position_in_leading_trivia || found.is_token(tree) {
            return found;
        }
        self.descend(
            tree,
            offset,
            TokenAtOptions {
                allow_position_in_leading_trivia: true,
                ..options
            },
        )
    }

    /// The name-like token under or immediately before the cursor.
    fn touching_property_name(
        &self,
        tree: &SyntaxTree,
        offset: TextSize,
    ) -> Option<Element> {
        let found = self.token_at(
            tree,
            offset,
            TokenAtOptions {
                allow_position_in_leading_trivia: false,
                include_end_position: false,
                include_preceding_token_at_end_position: Some(&is_property_name_like),
            },
        );
        is_property_name_like(tree, &found).then_some(found)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Reference,
    #[default]
    Fast,
}

impl EngineKind {
    pub fn engine(self) -> &'static dyn PositionSearch {
        match self {
            EngineKind::Reference => &ReferenceSearch,
            EngineKind::Fast => &FastSearch,
        }
    }
}

/// [`PositionSearch::token_at`] on the engine selected by `engine`.
pub fn token_at(
    tree: &SyntaxTree,
    offset: TextSize,
    options: TokenAtOptions<'_>,
    engine: EngineKind,
) -> Element {
    engine.engine().token_at(tree, offset, options)
}

/// Binary search with the probe order of a midpoint over an inclusive upper
/// bound. Returns the index `compare` reported as equal.
pub(crate) fn binary_search_by(
    len: usize,
    mut compare: impl FnMut(usize) -> std::cmp::Ordering,
) -> Option<usize> {
    use std::cmp::Ordering;

    let mut low = 0;
    let mut high = len;
    while low < high {
        let middle = low + (high - 1 - low) / 2;
        match compare(middle) {
            Ordering::Less => low = middle + 1,
            Ordering::Greater => high = middle,
            Ordering::Equal => return Some(middle),
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/src/position/element_tests.rs"]
mod tests;
