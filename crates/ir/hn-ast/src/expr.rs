//! Expression and literal nodes

use crate::{Identifier, ty::Type};
use derive_more::Display;
use hn_span::Span;

/// An expression
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A canonicalized literal
    Literal(Literal),
    /// A variable reference, possibly module-qualified
    VarRef(VarRef),
    /// `expr.field`
    FieldAccess(FieldAccessExpr),
    /// `name(args)`
    Invocation(Invocation),
    /// `op expr`
    Unary(UnaryExpr),
    /// `lhs op rhs`
    Binary(BinaryExpr),
    /// `{ key: value, ...spread }`
    Mapping(MappingConstructorExpr),
    /// Placeholder for a construct with no lowering rule
    Unknown(Span),
}

impl Expr {
    /// Originating span
    pub fn pos(&self) -> Span {
        match self {
            Self::Literal(literal) => literal.pos,
            Self::VarRef(var_ref) => var_ref.pos,
            Self::FieldAccess(access) => access.pos,
            Self::Invocation(invocation) => invocation.pos,
            Self::Unary(unary) => unary.pos,
            Self::Binary(binary) => binary.pos,
            Self::Mapping(mapping) => mapping.pos,
            Self::Unknown(pos) => *pos,
        }
    }
}

/// A reference to a variable
#[derive(Clone, Debug, PartialEq)]
pub struct VarRef {
    /// Module alias qualifier, when written `alias:name`
    pub pkg_alias: Option<Identifier>,
    /// The referenced name
    pub name: Identifier,
    /// Originating span
    pub pos: Span,
}

/// `expr.field`
#[derive(Clone, Debug, PartialEq)]
pub struct FieldAccessExpr {
    /// The accessed expression
    pub expr: Box<Expr>,
    /// The accessed field
    pub field: Identifier,
    /// How the field is selected
    pub field_kind: FieldKind,
    /// Whether this is optional (`?.`) access
    pub optional_access: bool,
    /// Originating span
    pub pos: Span,
}

/// How a field access selects fields
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum FieldKind {
    /// A single named field
    Single,
    /// All fields
    All,
}

/// A function invocation
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    /// Module alias qualifier, when written `alias:name(...)`
    pub pkg_alias: Option<Identifier>,
    /// The invoked name
    pub name: Identifier,
    /// Argument expressions, in source order
    pub args: Vec<Expr>,
    /// Originating span
    pub pos: Span,
}

/// `op expr`
#[derive(Clone, Debug, PartialEq)]
pub struct UnaryExpr {
    /// The operator
    pub op: OperatorKind,
    /// The operand
    pub expr: Box<Expr>,
    /// Originating span
    pub pos: Span,
}

/// `lhs op rhs`
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryExpr {
    /// The operator
    pub op: OperatorKind,
    /// Left operand
    pub lhs: Box<Expr>,
    /// Right operand
    pub rhs: Box<Expr>,
    /// Originating span
    pub pos: Span,
}

/// `{ key: value, ...spread }`
#[derive(Clone, Debug, PartialEq)]
pub struct MappingConstructorExpr {
    /// Fields in source order
    pub fields: Vec<MappingField>,
    /// Originating span
    pub pos: Span,
}

/// One field of a mapping constructor
#[derive(Clone, Debug, PartialEq)]
pub enum MappingField {
    /// `key: value`
    KeyValue {
        /// The key expression
        key: Expr,
        /// Whether the key was written in computed `[key]` form
        computed_key: bool,
        /// The value expression
        value: Expr,
    },
    /// `...expr`
    Spread {
        /// The spread expression
        expr: Expr,
    },
}

/// Unary and binary operators
#[derive(Copy, Clone, Debug, Display, Eq, Hash, PartialEq)]
pub enum OperatorKind {
    /// `+`
    #[display("+")]
    Add,
    /// `-`
    #[display("-")]
    Sub,
    /// `*`
    #[display("*")]
    Mul,
    /// `/`
    #[display("/")]
    Div,
    /// `%`
    #[display("%")]
    Mod,
    /// `==`
    #[display("==")]
    Equal,
    /// `!=`
    #[display("!=")]
    NotEqual,
    /// `<`
    #[display("<")]
    LessThan,
    /// `<=`
    #[display("<=")]
    LessEqual,
    /// `>`
    #[display(">")]
    GreaterThan,
    /// `>=`
    #[display(">=")]
    GreaterEqual,
    /// `&&`
    #[display("&&")]
    And,
    /// `||`
    #[display("||")]
    Or,
    /// `!`
    #[display("!")]
    Not,
}

impl OperatorKind {
    /// Resolves an operator from its source text
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            "%" => Some(Self::Mod),
            "==" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            "<" => Some(Self::LessThan),
            "<=" => Some(Self::LessEqual),
            ">" => Some(Self::GreaterThan),
            ">=" => Some(Self::GreaterEqual),
            "&&" => Some(Self::And),
            "||" => Some(Self::Or),
            "!" => Some(Self::Not),
            _ => None,
        }
    }
}

/// A canonicalized literal value
#[derive(Clone, Debug, PartialEq)]
pub struct Literal {
    /// The semantic type of the literal
    pub ty: Type,
    /// The canonical value
    pub value: LiteralValue,
    /// The exact source spelling, for diagnostics fidelity
    pub original_value: String,
    /// Originating span
    pub pos: Span,
}

/// The payload of a literal
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    /// A parsed 64-bit integer
    Int(i64),
    /// A floating point literal, kept textual until semantic analysis
    Float(String),
    /// A decimal-discriminated floating point literal
    Decimal(String),
    /// An unescaped string
    String(String),
    /// A boolean
    Bool(bool),
    /// Nil
    Nil,
    /// A base16/base64 byte-array literal, kept textual
    ByteArray(String),
    /// Degraded value: the original text of an out-of-range numeral
    Raw(String),
}
