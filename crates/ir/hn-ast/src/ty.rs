//! Type nodes and the type-tag table

use crate::{Identifier, SimpleVariable};
use derive_more::Display;
use hn_span::Span;
use rustc_hash::FxHashMap;

/// A type annotation in the AST
#[derive(Clone, Debug, PartialEq)]
pub enum TypeNode {
    /// A built-in value type such as `int`
    Value {
        /// Which value type
        kind: TypeKind,
        /// Originating span
        pos: Span,
    },
    /// A reference to a named type, possibly module-qualified
    UserDefined(UserDefinedType),
    /// An inline record descriptor
    Record(RecordTypeNode),
    /// An array type, produced for rest parameters
    Array(ArrayTypeNode),
    /// Placeholder for a descriptor with no lowering rule
    Unknown(Span),
}

impl TypeNode {
    /// The nil value type at the given span
    pub fn nil(pos: Span) -> Self {
        Self::Value {
            kind: TypeKind::Nil,
            pos,
        }
    }

    /// Originating span
    pub fn pos(&self) -> Span {
        match self {
            Self::Value { pos, .. } => *pos,
            Self::UserDefined(user) => user.pos,
            Self::Record(record) => record.pos,
            Self::Array(array) => array.pos,
            Self::Unknown(pos) => *pos,
        }
    }
}

/// A reference to a named type
#[derive(Clone, Debug, PartialEq)]
pub struct UserDefinedType {
    /// Module alias qualifier, when written `alias:Name`
    pub pkg_alias: Option<Identifier>,
    /// The referenced type name
    pub type_name: Identifier,
    /// Originating span
    pub pos: Span,
}

/// An inline record descriptor
#[derive(Clone, Debug, PartialEq)]
pub struct RecordTypeNode {
    /// Field declarations, in source order
    pub fields: Vec<SimpleVariable>,
    /// Type of the rest descriptor, when one was written
    pub rest_field_type: Option<Box<TypeNode>>,
    /// Included types, from `*T;` references
    pub type_refs: Vec<TypeNode>,
    /// True exactly when no rest descriptor is present
    pub sealed: bool,
    /// Whether the record was written inline rather than named
    pub is_anonymous: bool,
    /// Whether the record was written in a local scope
    pub is_local: bool,
    /// Originating span
    pub pos: Span,
}

/// An array type
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayTypeNode {
    /// Element type
    pub elem_type: Box<TypeNode>,
    /// Number of dimensions
    pub dimensions: u32,
    /// Originating span
    pub pos: Span,
}

/// Built-in value type names
#[derive(Copy, Clone, Debug, Display, Eq, Hash, PartialEq)]
pub enum TypeKind {
    /// `()`
    #[display("()")]
    Nil,
    /// `int`
    #[display("int")]
    Int,
    /// `byte`
    #[display("byte")]
    Byte,
    /// `float`
    #[display("float")]
    Float,
    /// `decimal`
    #[display("decimal")]
    Decimal,
    /// `string`
    #[display("string")]
    String,
    /// `boolean`
    #[display("boolean")]
    Boolean,
    /// `json`
    #[display("json")]
    Json,
    /// `any`
    #[display("any")]
    Any,
    /// `anydata`
    #[display("anydata")]
    Anydata,
    /// `error`
    #[display("error")]
    Error,
}

impl TypeKind {
    /// Resolves a value type from its source text
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "()" => Some(Self::Nil),
            "int" => Some(Self::Int),
            "byte" => Some(Self::Byte),
            "float" => Some(Self::Float),
            "decimal" => Some(Self::Decimal),
            "string" => Some(Self::String),
            "boolean" => Some(Self::Boolean),
            "json" => Some(Self::Json),
            "any" => Some(Self::Any),
            "anydata" => Some(Self::Anydata),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Tags naming the semantic types literals can take
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeTag {
    /// 64-bit integer
    Int,
    /// Unsigned byte
    Byte,
    /// 64-bit float
    Float,
    /// Arbitrary-precision decimal
    Decimal,
    /// Unicode string
    String,
    /// Boolean
    Boolean,
    /// Nil
    Nil,
    /// Byte array
    ByteArray,
}

/// A resolved semantic type handle
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Type {
    /// The tag this type resolves
    pub tag: TypeTag,
    /// Display name of the type
    pub name: &'static str,
}

/// Lookup table from type tags to semantic types
///
/// One table is scoped to each compilation context; it stands in for the
/// semantic analyzer's richer symbol table at this stage.
#[derive(Clone, Debug)]
pub struct TypeTable {
    types: FxHashMap<TypeTag, Type>,
}

impl TypeTable {
    /// Creates a table with every tag registered
    pub fn new() -> Self {
        let entries = [
            (TypeTag::Int, "int"),
            (TypeTag::Byte, "byte"),
            (TypeTag::Float, "float"),
            (TypeTag::Decimal, "decimal"),
            (TypeTag::String, "string"),
            (TypeTag::Boolean, "boolean"),
            (TypeTag::Nil, "()"),
            (TypeTag::ByteArray, "byte[]"),
        ];
        let mut types = FxHashMap::default();
        for (tag, name) in entries {
            types.insert(tag, Type { tag, name });
        }
        Self { types }
    }

    /// Resolves the semantic type for a tag
    pub fn type_from_tag(&self, tag: TypeTag) -> Type {
        self.types
            .get(&tag)
            .copied()
            .unwrap_or(Type { tag, name: "" })
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}
