//! Immutable concrete syntax trees for Heron
//!
//! Nodes are addressed by slot index and carry only their cumulative
//! text width; absolute positions are recomputed on demand by the
//! [`red`] layer. Trees are never mutated: [`SyntaxNode::modify`]
//! returns the same node when nothing changed and otherwise builds a
//! replacement that shares every unmodified subtree, which is what makes
//! repeated incremental edits cheap.

pub mod kind;
pub mod red;
pub mod token;
pub mod view;

pub use kind::SyntaxKind;
pub use red::{RedElement, RedNode, RedToken};
pub use token::SyntaxToken;

use std::rc::Rc;

/// A child slot entry: either an inner node or a terminal token
#[derive(Clone, Debug)]
pub enum SyntaxElement {
    /// An inner node
    Node(Rc<SyntaxNode>),
    /// A terminal token
    Token(Rc<SyntaxToken>),
}

impl SyntaxElement {
    /// The kind of the wrapped node or token
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Self::Node(node) => node.kind(),
            Self::Token(token) => token.kind(),
        }
    }

    /// Width in bytes, trivia included
    pub fn width(&self) -> u32 {
        match self {
            Self::Node(node) => node.width(),
            Self::Token(token) => token.width(),
        }
    }

    /// The inner node, if this element is one
    pub fn as_node(&self) -> Option<&Rc<SyntaxNode>> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    /// The token, if this element is one
    pub fn as_token(&self) -> Option<&Rc<SyntaxToken>> {
        match self {
            Self::Node(_) => None,
            Self::Token(token) => Some(token),
        }
    }

    /// Whether two elements are the same allocation
    pub fn ptr_eq(&self, other: &SyntaxElement) -> bool {
        match (self, other) {
            (Self::Node(left), Self::Node(right)) => Rc::ptr_eq(left, right),
            (Self::Token(left), Self::Token(right)) => Rc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl From<Rc<SyntaxNode>> for SyntaxElement {
    fn from(node: Rc<SyntaxNode>) -> Self {
        Self::Node(node)
    }
}

impl From<Rc<SyntaxToken>> for SyntaxElement {
    fn from(token: Rc<SyntaxToken>) -> Self {
        Self::Token(token)
    }
}

/// An inner node of the concrete syntax tree
///
/// Slots are positional: `None` marks an elided optional child. The
/// node's width is the sum of its children's widths, fixed at
/// construction. Nodes store no absolute position and no parent edge;
/// both are reconstructed from the traversal path by [`red::RedNode`].
#[derive(Debug)]
pub struct SyntaxNode {
    kind: SyntaxKind,
    slots: Box<[Option<SyntaxElement>]>,
    width: u32,
}

impl SyntaxNode {
    /// Creates a node from its child slots
    pub fn new(kind: SyntaxKind, slots: Vec<Option<SyntaxElement>>) -> Rc<Self> {
        debug_assert!(!kind.is_token(), "token kind {kind:?} used for a node");
        let width = slots
            .iter()
            .flatten()
            .map(SyntaxElement::width)
            .sum();
        Rc::new(Self {
            kind,
            slots: slots.into_boxed_slice(),
            width,
        })
    }

    /// Creates a list node whose slots are all present
    pub fn list(elements: impl IntoIterator<Item = SyntaxElement>) -> Rc<Self> {
        Self::new(
            SyntaxKind::List,
            elements.into_iter().map(Some).collect(),
        )
    }

    /// The node kind
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Width in bytes, trivia included
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of child slots, elided ones included
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// The child in the given slot, `None` for elided or out-of-range
    pub fn child_in_slot(&self, index: usize) -> Option<&SyntaxElement> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Byte offset of a slot relative to this node's own position
    pub fn slot_offset(&self, index: usize) -> u32 {
        self.slots[..index.min(self.slots.len())]
            .iter()
            .flatten()
            .map(SyntaxElement::width)
            .sum()
    }

    /// All present children in slot order
    pub fn children(&self) -> impl Iterator<Item = &SyntaxElement> {
        self.slots.iter().flatten()
    }

    /// Non-destructive replacement of this node's children
    ///
    /// Returns `self` (the identical allocation) when every given slot
    /// is reference-equal to the current one; otherwise builds a new
    /// node of the same kind around the given slots. The new node has no
    /// position; positions belong to whoever attaches it to a tree.
    pub fn modify(self: &Rc<Self>, slots: Vec<Option<SyntaxElement>>) -> Rc<Self> {
        let unchanged = slots.len() == self.slots.len()
            && self
                .slots
                .iter()
                .zip(&slots)
                .all(|(current, new)| match (current, new) {
                    (None, None) => true,
                    (Some(current), Some(new)) => current.ptr_eq(new),
                    _ => false,
                });
        if unchanged {
            Rc::clone(self)
        } else {
            Self::new(self.kind, slots)
        }
    }
}
