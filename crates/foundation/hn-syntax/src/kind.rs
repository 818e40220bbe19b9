//! Concrete syntax kinds
//!
//! One enum covers both non-terminal nodes and terminal tokens, so a
//! child slot can hold either and still be classified with one call.

/// Kind of a concrete syntax node or token
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum SyntaxKind {
    // Non-terminals
    /// Ordered list of nodes or tokens, separators included
    List,
    /// Root of a module: imports, members, eof
    ModulePart,
    /// `import org/a.b as c version 1.0.0;`
    ImportDecl,
    /// Organization qualifier of an import: `org/`
    ImportOrgName,
    /// Version clause of an import: `version 1.0.0`
    ImportVersion,
    /// Alias clause of an import: `as c`
    ImportPrefix,
    /// `public type Name <descriptor>;`
    TypeDefinition,
    /// `record { ... }`
    RecordTypeDesc,
    /// `T name?;` or `T name;` inside a record
    RecordField,
    /// `T name = expr;` inside a record
    RecordFieldWithDefault,
    /// `T...;` rest descriptor inside a record
    RecordRestDescriptor,
    /// `*T;` type inclusion inside a record
    TypeReference,
    /// `public function name(...) returns T { ... }`
    FunctionDefinition,
    /// `T name` parameter
    RequiredParam,
    /// `T name = expr` parameter
    DefaultableParam,
    /// `T... name` parameter
    RestParam,
    /// `returns T`
    ReturnTypeDesc,
    /// `{ stmt* }`
    BlockStatement,
    /// `final T name = expr;` or a destructuring declaration
    LocalVarDecl,
    /// `expr;`
    ExpressionStatement,
    /// `lhs op rhs`
    BinaryExpression,
    /// `op expr`
    UnaryExpression,
    /// `expr.field`
    FieldAccess,
    /// `name(args)` or `mod:name(args)`
    FunctionCall,
    /// `{ key: value, ...spread }`
    MappingConstructor,
    /// `key: value` mapping field
    SpecificField,
    /// `...expr` mapping field
    SpreadField,
    /// Plain call argument
    PositionalArg,
    /// `name = expr` call argument
    NamedArg,
    /// `...expr` call argument
    RestArg,
    /// `prefix:identifier`
    QualifiedNameReference,
    /// `()` nil type descriptor
    NilTypeDesc,
    /// `[a, b, ...rest]` binding pattern
    ListBindingPattern,
    /// `{a: p, b, ...rest}` binding pattern
    MappingBindingPattern,
    /// One `name: pattern` entry of a mapping binding pattern
    FieldBindingPattern,
    /// `error(reason, field = p, ...rest)` binding pattern
    ErrorBindingPattern,
    /// `...name` rest binding
    RestBindingPattern,
    /// A single bound name
    CaptureBindingPattern,

    // Tokens
    /// Identifier text, including quoted `'name` literals
    IdentifierToken,
    /// `"..."` string literal
    StringLiteralToken,
    /// Base-10 integer literal
    DecimalIntegerLiteralToken,
    /// `0x`-prefixed integer literal
    HexIntegerLiteralToken,
    /// Base-10 floating point literal
    DecimalFloatLiteralToken,
    /// `0x`-prefixed floating point literal
    HexFloatLiteralToken,
    /// `base16`/`base64` byte-array literal
    ByteArrayLiteralToken,
    /// `true`
    TrueKeyword,
    /// `false`
    FalseKeyword,
    /// `import`
    ImportKeyword,
    /// `as`
    AsKeyword,
    /// `version`
    VersionKeyword,
    /// `type`
    TypeKeyword,
    /// `record`
    RecordKeyword,
    /// `function`
    FunctionKeyword,
    /// `returns`
    ReturnsKeyword,
    /// `public`
    PublicKeyword,
    /// `private`
    PrivateKeyword,
    /// `final`
    FinalKeyword,
    /// `var`
    VarKeyword,
    /// `error`
    ErrorKeyword,
    /// A built-in value type name such as `int` or `string`
    SimpleTypeKeyword,
    /// `{`
    OpenBraceToken,
    /// `}`
    CloseBraceToken,
    /// `(`
    OpenParenToken,
    /// `)`
    CloseParenToken,
    /// `[`
    OpenBracketToken,
    /// `]`
    CloseBracketToken,
    /// `;`
    SemicolonToken,
    /// `:`
    ColonToken,
    /// `,`
    CommaToken,
    /// `.`
    DotToken,
    /// `=`
    EqualToken,
    /// `?`
    QuestionMarkToken,
    /// `...`
    EllipsisToken,
    /// `/`
    SlashToken,
    /// `*`
    AsteriskToken,
    /// Any unary or binary operator
    OperatorToken,
    /// End of file
    EofToken,
}

impl SyntaxKind {
    /// Whether this kind names a terminal token
    pub const fn is_token(self) -> bool {
        matches!(
            self,
            Self::IdentifierToken
                | Self::StringLiteralToken
                | Self::DecimalIntegerLiteralToken
                | Self::HexIntegerLiteralToken
                | Self::DecimalFloatLiteralToken
                | Self::HexFloatLiteralToken
                | Self::ByteArrayLiteralToken
                | Self::TrueKeyword
                | Self::FalseKeyword
                | Self::ImportKeyword
                | Self::AsKeyword
                | Self::VersionKeyword
                | Self::TypeKeyword
                | Self::RecordKeyword
                | Self::FunctionKeyword
                | Self::ReturnsKeyword
                | Self::PublicKeyword
                | Self::PrivateKeyword
                | Self::FinalKeyword
                | Self::VarKeyword
                | Self::ErrorKeyword
                | Self::SimpleTypeKeyword
                | Self::OpenBraceToken
                | Self::CloseBraceToken
                | Self::OpenParenToken
                | Self::CloseParenToken
                | Self::OpenBracketToken
                | Self::CloseBracketToken
                | Self::SemicolonToken
                | Self::ColonToken
                | Self::CommaToken
                | Self::DotToken
                | Self::EqualToken
                | Self::QuestionMarkToken
                | Self::EllipsisToken
                | Self::SlashToken
                | Self::AsteriskToken
                | Self::OperatorToken
                | Self::EofToken
        )
    }

    /// Whether this kind is a literal-bearing token
    pub const fn is_literal_token(self) -> bool {
        matches!(
            self,
            Self::StringLiteralToken
                | Self::DecimalIntegerLiteralToken
                | Self::HexIntegerLiteralToken
                | Self::DecimalFloatLiteralToken
                | Self::HexFloatLiteralToken
                | Self::ByteArrayLiteralToken
        )
    }
}
