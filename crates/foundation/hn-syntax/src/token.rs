//! Terminal tokens
//!
//! A token owns its literal text plus the whitespace and comments around
//! it. Trivia counts toward the token's width so that sibling offsets
//! reproduce absolute source positions exactly.

use crate::SyntaxKind;
use std::rc::Rc;

/// A terminal leaf of the syntax tree
#[derive(Debug, PartialEq, Eq)]
pub struct SyntaxToken {
    kind: SyntaxKind,
    text: String,
    leading_trivia: String,
    trailing_trivia: String,
}

impl SyntaxToken {
    /// Creates a token without trivia
    pub fn new(kind: SyntaxKind, text: impl Into<String>) -> Rc<Self> {
        Self::with_trivia(kind, text, "", "")
    }

    /// Creates a token with leading and trailing trivia
    pub fn with_trivia(
        kind: SyntaxKind,
        text: impl Into<String>,
        leading_trivia: impl Into<String>,
        trailing_trivia: impl Into<String>,
    ) -> Rc<Self> {
        debug_assert!(kind.is_token(), "non-token kind {kind:?} used for a token");
        Rc::new(Self {
            kind,
            text: text.into(),
            leading_trivia: leading_trivia.into(),
            trailing_trivia: trailing_trivia.into(),
        })
    }

    /// The token kind
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// The literal text, trivia excluded
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whitespace and comments before the text
    pub fn leading_trivia(&self) -> &str {
        &self.leading_trivia
    }

    /// Whitespace and comments after the text
    pub fn trailing_trivia(&self) -> &str {
        &self.trailing_trivia
    }

    /// Total width in bytes, trivia included
    pub fn width(&self) -> u32 {
        (self.leading_trivia.len() + self.text.len() + self.trailing_trivia.len()) as u32
    }

    /// Width of the literal text alone
    pub fn text_width(&self) -> u32 {
        self.text.len() as u32
    }

    /// Width of the leading trivia alone
    pub fn leading_width(&self) -> u32 {
        self.leading_trivia.len() as u32
    }
}
