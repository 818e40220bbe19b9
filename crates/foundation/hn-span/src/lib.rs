//! Source file spans and locations
//!
//! Positions in Heron source text are byte offsets. Syntax trees store
//! only widths; absolute spans are computed during traversal by adding
//! the widths of preceding siblings to the parent's position.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// A unique identifier for a source file
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct SourceId(pub u32);

impl SourceId {
    /// Creates a new source file identifier
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// A byte offset span in a source file
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Start offset, inclusive
    pub start: u32,
    /// End offset, exclusive
    pub end: u32,
}

impl Span {
    /// Creates a span from start and end offsets
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Creates a span from a start offset and a width
    pub fn at(start: u32, width: u32) -> Self {
        Self {
            start,
            end: start + width,
        }
    }

    /// Creates a zero-width span anchored at the given offset
    pub fn empty(offset: u32) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// The span as a `usize` range, for slicing source text
    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Width of the span in bytes
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether the span covers no text
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The smallest span covering both `self` and `other`
    pub fn to(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}..{}", self.start, self.end)
    }
}

/// A span with its owning source file
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct SourceSpan {
    /// The file this span belongs to
    pub source: SourceId,
    /// The span within the file
    pub span: Span,
}

impl SourceSpan {
    /// Creates a span bound to a source file
    pub fn new(source: SourceId, span: Span) -> Self {
        Self { source, span }
    }

    /// The span as a `usize` range
    pub fn range(&self) -> Range<usize> {
        self.span.range()
    }
}
