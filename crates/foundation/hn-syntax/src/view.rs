//! Typed views over positioned nodes
//!
//! Each concrete node kind has a fixed slot layout. A view wraps a
//! [`RedNode`] and names those slots, so consumers read
//! `import_decl.module_name()` instead of `node.child(2)`. Views are
//! `Copy` and do no work until an accessor is called.

use crate::red::{RedChildren, RedElement, RedNode, RedToken};
use crate::SyntaxKind;

macro_rules! view {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Debug)]
        pub struct $name<'a>(RedNode<'a>);

        impl<'a> $name<'a> {
            /// Reinterprets `node` when its kind matches this view
            pub fn cast(node: RedNode<'a>) -> Option<Self> {
                (node.kind() == SyntaxKind::$name).then_some(Self(node))
            }

            /// The node behind this view
            pub fn node(&self) -> RedNode<'a> {
                self.0
            }
        }
    };
}

view! {
    /// `imports* members* eof`
    ModulePart
}

impl<'a> ModulePart<'a> {
    /// Import declarations, in source order
    pub fn imports(&self) -> RedChildren<'a> {
        self.0.list_child(0)
    }

    /// Module-level member declarations, in source order
    pub fn members(&self) -> RedChildren<'a> {
        self.0.list_child(1)
    }

    /// The end-of-file token
    pub fn eof_token(&self) -> Option<RedToken<'a>> {
        self.0.token_child(2)
    }
}

view! {
    /// `import org/a.b as c version 1.0.0;`
    ImportDecl
}

impl<'a> ImportDecl<'a> {
    /// Optional organization qualifier
    pub fn org_name(&self) -> Option<ImportOrgName<'a>> {
        self.0.node_child(1).and_then(ImportOrgName::cast)
    }

    /// Dotted module name components
    pub fn module_name(&self) -> impl Iterator<Item = RedToken<'a>> + use<'a> {
        self.0
            .list_child(2)
            .filter_map(|element| element.as_token())
            .filter(|token| token.kind() == SyntaxKind::IdentifierToken)
    }

    /// Optional version clause
    pub fn version(&self) -> Option<ImportVersion<'a>> {
        self.0.node_child(3).and_then(ImportVersion::cast)
    }

    /// Optional alias clause
    pub fn prefix(&self) -> Option<ImportPrefix<'a>> {
        self.0.node_child(4).and_then(ImportPrefix::cast)
    }
}

view! {
    /// `org/`
    ImportOrgName
}

impl<'a> ImportOrgName<'a> {
    /// The organization name token
    pub fn org_name(&self) -> Option<RedToken<'a>> {
        self.0.token_child(0)
    }
}

view! {
    /// `version 1.0.0`
    ImportVersion
}

impl<'a> ImportVersion<'a> {
    /// The version number token
    pub fn version_number(&self) -> Option<RedToken<'a>> {
        self.0.token_child(1)
    }
}

view! {
    /// `as prefix`
    ImportPrefix
}

impl<'a> ImportPrefix<'a> {
    /// The alias token
    pub fn prefix(&self) -> Option<RedToken<'a>> {
        self.0.token_child(1)
    }
}

view! {
    /// `public type Name <descriptor>;`
    TypeDefinition
}

impl<'a> TypeDefinition<'a> {
    /// Optional `public`/`private` qualifier
    pub fn visibility_qualifier(&self) -> Option<RedToken<'a>> {
        self.0.token_child(0)
    }

    /// The defined type's name
    pub fn type_name(&self) -> Option<RedToken<'a>> {
        self.0.token_child(2)
    }

    /// The descriptor the name is bound to
    pub fn type_descriptor(&self) -> Option<RedNode<'a>> {
        self.0.node_child(3)
    }
}

view! {
    /// `record { fields* }`
    RecordTypeDesc
}

impl<'a> RecordTypeDesc<'a> {
    /// Field descriptors, rest descriptor and inclusions included
    pub fn fields(&self) -> RedChildren<'a> {
        self.0.list_child(2)
    }
}

view! {
    /// `T name?;` or `T name;`
    RecordField
}

impl<'a> RecordField<'a> {
    /// The field's declared type
    pub fn type_name(&self) -> Option<RedElement<'a>> {
        self.0.child(0)
    }

    /// The field name token
    pub fn field_name(&self) -> Option<RedToken<'a>> {
        self.0.token_child(1)
    }

    /// The optionality marker, when present
    pub fn question_mark_token(&self) -> Option<RedToken<'a>> {
        self.0.token_child(2)
    }
}

view! {
    /// `T name = expr;`
    RecordFieldWithDefault
}

impl<'a> RecordFieldWithDefault<'a> {
    /// The field's declared type
    pub fn type_name(&self) -> Option<RedElement<'a>> {
        self.0.child(0)
    }

    /// The field name token
    pub fn field_name(&self) -> Option<RedToken<'a>> {
        self.0.token_child(1)
    }

    /// The default value expression
    pub fn expression(&self) -> Option<RedElement<'a>> {
        self.0.child(3)
    }
}

view! {
    /// `T...;`
    RecordRestDescriptor
}

impl<'a> RecordRestDescriptor<'a> {
    /// The rest field's type
    pub fn type_name(&self) -> Option<RedElement<'a>> {
        self.0.child(0)
    }
}

view! {
    /// `*T;`
    TypeReference
}

impl<'a> TypeReference<'a> {
    /// The included type's name
    pub fn type_name(&self) -> Option<RedElement<'a>> {
        self.0.child(1)
    }
}

view! {
    /// `public function name(params) returns T { ... }`
    FunctionDefinition
}

impl<'a> FunctionDefinition<'a> {
    /// Optional `public`/`private` qualifier
    pub fn visibility_qualifier(&self) -> Option<RedToken<'a>> {
        self.0.token_child(0)
    }

    /// The function name token
    pub fn function_name(&self) -> Option<RedToken<'a>> {
        self.0.token_child(2)
    }

    /// Parameter declarations, in source order
    pub fn parameters(&self) -> RedChildren<'a> {
        self.0.list_child(4)
    }

    /// Optional `returns` clause
    pub fn return_type_desc(&self) -> Option<ReturnTypeDesc<'a>> {
        self.0.node_child(6).and_then(ReturnTypeDesc::cast)
    }

    /// The block body
    pub fn function_body(&self) -> Option<BlockStatement<'a>> {
        self.0.node_child(7).and_then(BlockStatement::cast)
    }
}

view! {
    /// `T name`
    RequiredParam
}

impl<'a> RequiredParam<'a> {
    /// Optional visibility qualifier
    pub fn visibility_qualifier(&self) -> Option<RedToken<'a>> {
        self.0.token_child(2)
    }

    /// The parameter's declared type
    pub fn type_name(&self) -> Option<RedElement<'a>> {
        self.0.child(3)
    }

    /// The parameter name token
    pub fn param_name(&self) -> Option<RedToken<'a>> {
        self.0.token_child(4)
    }
}

view! {
    /// `T name = expr`
    DefaultableParam
}

impl<'a> DefaultableParam<'a> {
    /// Optional visibility qualifier
    pub fn visibility_qualifier(&self) -> Option<RedToken<'a>> {
        self.0.token_child(2)
    }

    /// The parameter's declared type
    pub fn type_name(&self) -> Option<RedElement<'a>> {
        self.0.child(3)
    }

    /// The parameter name token
    pub fn param_name(&self) -> Option<RedToken<'a>> {
        self.0.token_child(4)
    }

    /// The default value expression
    pub fn expression(&self) -> Option<RedElement<'a>> {
        self.0.child(6)
    }
}

view! {
    /// `T... name`
    RestParam
}

impl<'a> RestParam<'a> {
    /// The element type of the rest parameter
    pub fn type_name(&self) -> Option<RedElement<'a>> {
        self.0.child(1)
    }

    /// The parameter name token
    pub fn param_name(&self) -> Option<RedToken<'a>> {
        self.0.token_child(3)
    }
}

view! {
    /// `returns T`
    ReturnTypeDesc
}

impl<'a> ReturnTypeDesc<'a> {
    /// The declared return type
    pub fn type_name(&self) -> Option<RedElement<'a>> {
        self.0.child(2)
    }
}

view! {
    /// `{ stmt* }`
    BlockStatement
}

impl<'a> BlockStatement<'a> {
    /// Statements, in source order
    pub fn statements(&self) -> RedChildren<'a> {
        self.0.list_child(1)
    }
}

view! {
    /// `final T name = expr;` or a destructuring declaration
    LocalVarDecl
}

impl<'a> LocalVarDecl<'a> {
    /// The `final` keyword, when present
    pub fn final_keyword(&self) -> Option<RedToken<'a>> {
        self.0.token_child(1)
    }

    /// The declared type, or the `var` keyword
    pub fn type_name(&self) -> Option<RedElement<'a>> {
        self.0.child(2)
    }

    /// The bound name token, for a simple declaration
    pub fn variable_name(&self) -> Option<RedToken<'a>> {
        self.0.token_child(3)
    }

    /// The binding pattern, for a destructuring declaration
    pub fn binding_pattern(&self) -> Option<RedNode<'a>> {
        self.0.node_child(3)
    }

    /// The initializer expression, when present
    pub fn initializer(&self) -> Option<RedElement<'a>> {
        self.0.child(5)
    }
}

view! {
    /// `expr;`
    ExpressionStatement
}

impl<'a> ExpressionStatement<'a> {
    /// The inner expression
    pub fn expression(&self) -> Option<RedElement<'a>> {
        self.0.child(0)
    }
}

view! {
    /// `lhs op rhs`
    BinaryExpression
}

impl<'a> BinaryExpression<'a> {
    /// Left operand
    pub fn lhs_expr(&self) -> Option<RedElement<'a>> {
        self.0.child(0)
    }

    /// Operator token
    pub fn operator(&self) -> Option<RedToken<'a>> {
        self.0.token_child(1)
    }

    /// Right operand
    pub fn rhs_expr(&self) -> Option<RedElement<'a>> {
        self.0.child(2)
    }
}

view! {
    /// `op expr`
    UnaryExpression
}

impl<'a> UnaryExpression<'a> {
    /// Operator token
    pub fn unary_operator(&self) -> Option<RedToken<'a>> {
        self.0.token_child(0)
    }

    /// Operand
    pub fn expression(&self) -> Option<RedElement<'a>> {
        self.0.child(1)
    }
}

view! {
    /// `expr.field`
    FieldAccess
}

impl<'a> FieldAccess<'a> {
    /// The accessed expression
    pub fn expression(&self) -> Option<RedElement<'a>> {
        self.0.child(0)
    }

    /// The field name token
    pub fn field_name(&self) -> Option<RedToken<'a>> {
        self.0.token_child(2)
    }
}

view! {
    /// `name(args)` or `mod:name(args)`
    FunctionCall
}

impl<'a> FunctionCall<'a> {
    /// The called name: identifier token or qualified name reference
    pub fn function_name(&self) -> Option<RedElement<'a>> {
        self.0.child(0)
    }

    /// Call arguments, in source order
    pub fn arguments(&self) -> RedChildren<'a> {
        self.0.list_child(2)
    }
}

view! {
    /// Plain call argument
    PositionalArg
}

impl<'a> PositionalArg<'a> {
    /// The argument expression
    pub fn expression(&self) -> Option<RedElement<'a>> {
        self.0.child(1)
    }
}

view! {
    /// `name = expr` call argument
    NamedArg
}

impl<'a> NamedArg<'a> {
    /// The argument expression
    pub fn expression(&self) -> Option<RedElement<'a>> {
        self.0.child(3)
    }
}

view! {
    /// `...expr` call argument
    RestArg
}

impl<'a> RestArg<'a> {
    /// The spread expression
    pub fn expression(&self) -> Option<RedElement<'a>> {
        self.0.child(2)
    }
}

view! {
    /// `{ key: value, ...spread }`
    MappingConstructor
}

impl<'a> MappingConstructor<'a> {
    /// Mapping fields, in source order
    pub fn fields(&self) -> RedChildren<'a> {
        self.0.list_child(1)
    }
}

view! {
    /// `key: value`
    SpecificField
}

impl<'a> SpecificField<'a> {
    /// The field name token
    pub fn field_name(&self) -> Option<RedToken<'a>> {
        self.0.token_child(0)
    }

    /// The value expression
    pub fn value_expr(&self) -> Option<RedElement<'a>> {
        self.0.child(2)
    }
}

view! {
    /// `...expr`
    SpreadField
}

impl<'a> SpreadField<'a> {
    /// The spread expression
    pub fn value_expr(&self) -> Option<RedElement<'a>> {
        self.0.child(1)
    }
}

view! {
    /// `prefix:identifier`
    QualifiedNameReference
}

impl<'a> QualifiedNameReference<'a> {
    /// The module prefix token
    pub fn module_prefix(&self) -> Option<RedToken<'a>> {
        self.0.token_child(0)
    }

    /// The referenced identifier token
    pub fn identifier(&self) -> Option<RedToken<'a>> {
        self.0.token_child(2)
    }
}

view! {
    /// `[a, b, ...rest]`
    ListBindingPattern
}

impl<'a> ListBindingPattern<'a> {
    /// Member binding patterns, in source order
    pub fn members(&self) -> impl Iterator<Item = RedNode<'a>> + use<'a> {
        self.0
            .list_child(1)
            .filter_map(|element| element.as_node())
    }

    /// The rest binding, when present
    pub fn rest_binding(&self) -> Option<RestBindingPattern<'a>> {
        self.0.node_child(2).and_then(RestBindingPattern::cast)
    }
}

view! {
    /// `{a: p, b, ...rest}`
    MappingBindingPattern
}

impl<'a> MappingBindingPattern<'a> {
    /// Field binding entries, in source order
    pub fn fields(&self) -> impl Iterator<Item = FieldBindingPattern<'a>> + use<'a> {
        self.0
            .list_child(1)
            .filter_map(|element| element.as_node())
            .filter_map(FieldBindingPattern::cast)
    }

    /// The rest binding, when present
    pub fn rest_binding(&self) -> Option<RestBindingPattern<'a>> {
        self.0.node_child(2).and_then(RestBindingPattern::cast)
    }
}

view! {
    /// `name: pattern` or shorthand `name`
    FieldBindingPattern
}

impl<'a> FieldBindingPattern<'a> {
    /// The bound field's name token
    pub fn field_name(&self) -> Option<RedToken<'a>> {
        self.0.token_child(0)
    }

    /// The nested pattern; absent for the shorthand form
    pub fn pattern(&self) -> Option<RedNode<'a>> {
        self.0.node_child(2)
    }
}

view! {
    /// `error(reason, field = p, ...rest)`
    ErrorBindingPattern
}

impl<'a> ErrorBindingPattern<'a> {
    /// The reason binding
    pub fn reason(&self) -> Option<RedNode<'a>> {
        self.0.node_child(2)
    }

    /// Detail field bindings, in source order
    pub fn detail_fields(&self) -> impl Iterator<Item = FieldBindingPattern<'a>> + use<'a> {
        self.0
            .list_child(3)
            .filter_map(|element| element.as_node())
            .filter_map(FieldBindingPattern::cast)
    }

    /// The rest detail binding, when present
    pub fn rest_detail(&self) -> Option<RestBindingPattern<'a>> {
        self.0.node_child(4).and_then(RestBindingPattern::cast)
    }
}

view! {
    /// `...name`
    RestBindingPattern
}

impl<'a> RestBindingPattern<'a> {
    /// The bound name token
    pub fn variable_name(&self) -> Option<RedToken<'a>> {
        self.0.token_child(1)
    }
}

view! {
    /// A single bound name
    CaptureBindingPattern
}

impl<'a> CaptureBindingPattern<'a> {
    /// The bound name token
    pub fn variable_name(&self) -> Option<RedToken<'a>> {
        self.0.token_child(0)
    }
}
