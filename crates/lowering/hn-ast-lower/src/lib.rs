//! CST → AST lowering
//!
//! This crate turns a module-part syntax tree into the semantic AST the
//! type checker consumes. One transform rule exists per concrete syntax
//! kind the module grammar can reach; kinds without a rule deliberately
//! lower to nothing, or to a degraded placeholder plus a diagnostic
//! where a result is mandatory. Nothing here aborts: a malformed
//! literal or unknown construct never prevents the rest of the file
//! from lowering.
//!
//! The interesting moving parts:
//! - literal and identifier canonicalization ([`literal`])
//! - anonymous-type hoisting: inline record descriptors become fresh
//!   top-level definitions carried out-of-band in [`Lowered::hoisted`]
//! - recursive final-flag propagation across destructuring bindings

pub mod context;
mod expr;
pub mod literal;
mod lower;
mod types;

pub use context::LowerContext;
pub use lower::lower_module_part;

use hn_ast::{TopLevelNode, TypeDefinition};

/// Output of one transform rule
///
/// `node` is the primary lowered result. `hoisted` carries top-level
/// declarations synthesized as a side effect of the transform — today
/// always hoisted anonymous type definitions — in declaration order, so
/// the caller can splice them in ahead of the primary node.
#[derive(Clone, Debug)]
pub struct Lowered<T> {
    /// The primary lowered node
    pub node: T,
    /// Top-level declarations synthesized during this transform
    pub hoisted: Vec<TypeDefinition>,
}

impl<T> Lowered<T> {
    /// Wraps a node with no side outputs
    pub fn new(node: T) -> Self {
        Self {
            node,
            hoisted: Vec::new(),
        }
    }

    /// Wraps a node together with hoisted declarations
    pub fn with_hoisted(node: T, hoisted: Vec<TypeDefinition>) -> Self {
        Self { node, hoisted }
    }

    /// Transforms the primary node, keeping the hoisted list
    pub fn map<U>(self, transform: impl FnOnce(T) -> U) -> Lowered<U> {
        Lowered {
            node: transform(self.node),
            hoisted: self.hoisted,
        }
    }
}

impl Lowered<Option<TopLevelNode>> {
    /// The deliberately empty output for unhandled syntax kinds
    pub fn empty() -> Self {
        Self::new(None)
    }

    /// All produced declarations: hoisted ones first, then the primary
    pub fn into_nodes(self) -> Vec<TopLevelNode> {
        self.hoisted
            .into_iter()
            .map(TopLevelNode::TypeDefinition)
            .chain(self.node)
            .collect()
    }
}
