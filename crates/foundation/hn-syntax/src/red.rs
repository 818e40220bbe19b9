//! Positioned facade over the width-only tree
//!
//! A red node pairs a green node with the absolute position obtained by
//! walking down from the root. The invariant: a child's position is its
//! parent's position plus the widths of the preceding sibling slots.
//! Only the root's position is supplied externally. Parent links are not
//! stored; descent reconstructs everything positional, so the facade is
//! `Copy` and allocation-free.

use crate::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
use hn_span::Span;

/// A node with its absolute position
#[derive(Copy, Clone, Debug)]
pub struct RedNode<'a> {
    green: &'a SyntaxNode,
    position: u32,
}

impl<'a> RedNode<'a> {
    /// Attaches a green node at the given origin
    pub fn new(green: &'a SyntaxNode, position: u32) -> Self {
        Self { green, position }
    }

    /// The underlying width-only node
    pub fn green(&self) -> &'a SyntaxNode {
        self.green
    }

    /// The node kind
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    /// Absolute byte position of this node's first character
    pub fn position(&self) -> u32 {
        self.position
    }

    /// The absolute span covered by this node, trivia included
    pub fn span(&self) -> Span {
        Span::at(self.position, self.green.width())
    }

    /// The positioned child in the given slot
    pub fn child(&self, slot: usize) -> Option<RedElement<'a>> {
        let element = self.green.child_in_slot(slot)?;
        let position = self.position + self.green.slot_offset(slot);
        Some(RedElement::at(element, position))
    }

    /// The positioned child in the given slot, when it is a node
    pub fn node_child(&self, slot: usize) -> Option<RedNode<'a>> {
        match self.child(slot)? {
            RedElement::Node(node) => Some(node),
            RedElement::Token(_) => None,
        }
    }

    /// The positioned child in the given slot, when it is a token
    pub fn token_child(&self, slot: usize) -> Option<RedToken<'a>> {
        match self.child(slot)? {
            RedElement::Node(_) => None,
            RedElement::Token(token) => Some(token),
        }
    }

    /// All present children of this node, with positions
    pub fn children(&self) -> RedChildren<'a> {
        RedChildren {
            green: Some(self.green),
            position: self.position,
            slot: 0,
        }
    }

    /// Elements of the list node held in the given slot
    ///
    /// Yields nothing when the slot is elided or holds a non-list child.
    pub fn list_child(&self, slot: usize) -> RedChildren<'a> {
        match self.node_child(slot) {
            Some(list) if list.kind() == SyntaxKind::List => list.children(),
            _ => RedChildren::empty(),
        }
    }
}

/// A token with its absolute position
#[derive(Copy, Clone, Debug)]
pub struct RedToken<'a> {
    green: &'a SyntaxToken,
    position: u32,
}

impl<'a> RedToken<'a> {
    /// The underlying token
    pub fn green(&self) -> &'a SyntaxToken {
        self.green
    }

    /// The token kind
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    /// The literal text, trivia excluded
    pub fn text(&self) -> &'a str {
        self.green.text()
    }

    /// Absolute byte position, leading trivia included
    pub fn position(&self) -> u32 {
        self.position
    }

    /// The absolute span, trivia included
    pub fn span(&self) -> Span {
        Span::at(self.position, self.green.width())
    }

    /// The absolute span of the literal text alone
    pub fn text_span(&self) -> Span {
        Span::at(
            self.position + self.green.leading_width(),
            self.green.text_width(),
        )
    }
}

/// A positioned child: node or token
#[derive(Copy, Clone, Debug)]
pub enum RedElement<'a> {
    /// An inner node
    Node(RedNode<'a>),
    /// A terminal token
    Token(RedToken<'a>),
}

impl<'a> RedElement<'a> {
    pub(crate) fn at(element: &'a SyntaxElement, position: u32) -> Self {
        match element {
            SyntaxElement::Node(node) => Self::Node(RedNode {
                green: node,
                position,
            }),
            SyntaxElement::Token(token) => Self::Token(RedToken {
                green: token,
                position,
            }),
        }
    }

    /// The kind of the wrapped node or token
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Self::Node(node) => node.kind(),
            Self::Token(token) => token.kind(),
        }
    }

    /// The absolute span, trivia included
    pub fn span(&self) -> Span {
        match self {
            Self::Node(node) => node.span(),
            Self::Token(token) => token.span(),
        }
    }

    /// The node, if this element is one
    pub fn as_node(&self) -> Option<RedNode<'a>> {
        match self {
            Self::Node(node) => Some(*node),
            Self::Token(_) => None,
        }
    }

    /// The token, if this element is one
    pub fn as_token(&self) -> Option<RedToken<'a>> {
        match self {
            Self::Node(_) => None,
            Self::Token(token) => Some(*token),
        }
    }
}

/// Iterator over the present children of a node, with positions
#[derive(Clone, Debug)]
pub struct RedChildren<'a> {
    green: Option<&'a SyntaxNode>,
    position: u32,
    slot: usize,
}

impl RedChildren<'_> {
    fn empty() -> Self {
        Self {
            green: None,
            position: 0,
            slot: 0,
        }
    }
}

impl<'a> Iterator for RedChildren<'a> {
    type Item = RedElement<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let green = self.green?;
        while self.slot < green.slot_count() {
            let slot = self.slot;
            self.slot += 1;
            if let Some(element) = green.child_in_slot(slot) {
                let position = self.position;
                self.position += element.width();
                return Some(RedElement::at(element, position));
            }
        }
        None
    }
}
