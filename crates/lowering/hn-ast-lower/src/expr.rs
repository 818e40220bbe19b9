//! Expression lowering

use crate::context::LowerContext;
use crate::literal::{is_simple_literal, lower_simple_literal, nil_literal};
use crate::lower::create_identifier;
use crate::Lowered;
use hn_ast::{
    BinaryExpr, Expr, FieldAccessExpr, FieldKind, Identifier, Invocation, MappingConstructorExpr,
    MappingField, OperatorKind, UnaryExpr, VarRef,
};
use hn_diagnostic::DiagnosticCode;
use hn_span::Span;
use hn_syntax::view::{
    BinaryExpression, FieldAccess, FunctionCall, MappingConstructor, NamedArg, PositionalArg,
    QualifiedNameReference, RestArg, SpecificField, SpreadField, UnaryExpression,
};
use hn_syntax::{RedElement, RedNode, RedToken, SyntaxKind};

/// Lowers an expression
///
/// An absent expression slot lowers to the nil literal spelled `null`;
/// the written `()` form arrives as a nil type descriptor node. Any
/// construct without a rule degrades to [`Expr::Unknown`] plus an
/// `UnsupportedConstruct` diagnostic, since an expression position
/// always requires a primary result.
pub(crate) fn lower_expression(
    ctx: &mut LowerContext,
    element: Option<RedElement<'_>>,
    fallback_pos: Span,
) -> Lowered<Expr> {
    let Some(element) = element else {
        return Lowered::new(Expr::Literal(nil_literal(ctx, fallback_pos, "null")));
    };
    match element {
        RedElement::Token(token) if is_simple_literal(token.kind()) => {
            Lowered::new(Expr::Literal(lower_simple_literal(ctx, token)))
        }
        RedElement::Token(token) if token.kind() == SyntaxKind::IdentifierToken => {
            Lowered::new(Expr::VarRef(var_ref_from_token(ctx, token)))
        }
        RedElement::Token(token) => {
            ctx.sink.error_with_arg(
                DiagnosticCode::UnsupportedConstruct,
                token.text_span(),
                format!("{:?}", token.kind()),
            );
            Lowered::new(Expr::Unknown(token.span()))
        }
        RedElement::Node(node) => lower_expression_node(ctx, node),
    }
}

fn lower_expression_node(ctx: &mut LowerContext, node: RedNode<'_>) -> Lowered<Expr> {
    let pos = node.span();
    match node.kind() {
        SyntaxKind::NilTypeDesc => Lowered::new(Expr::Literal(nil_literal(ctx, pos, "()"))),
        SyntaxKind::MappingConstructor => lower_mapping_constructor(ctx, node),
        SyntaxKind::UnaryExpression => lower_unary(ctx, node),
        SyntaxKind::BinaryExpression => lower_binary(ctx, node),
        SyntaxKind::FieldAccess => lower_field_access(ctx, node),
        SyntaxKind::FunctionCall => lower_function_call(ctx, node),
        other => {
            ctx.sink.error_with_arg(
                DiagnosticCode::UnsupportedConstruct,
                pos,
                format!("{other:?}"),
            );
            Lowered::new(Expr::Unknown(pos))
        }
    }
}

fn var_ref_from_token(ctx: &mut LowerContext, token: RedToken<'_>) -> VarRef {
    let pos = token.text_span();
    VarRef {
        pkg_alias: None,
        name: create_identifier(ctx, pos, token.text()),
        pos,
    }
}

fn lower_mapping_constructor(ctx: &mut LowerContext, node: RedNode<'_>) -> Lowered<Expr> {
    let pos = node.span();
    let Some(mapping) = MappingConstructor::cast(node) else {
        return Lowered::new(Expr::Unknown(pos));
    };
    let mut fields = Vec::new();
    let mut hoisted = Vec::new();
    for element in mapping.fields() {
        let Some(field_node) = element.as_node() else {
            continue;
        };
        match field_node.kind() {
            SyntaxKind::SpreadField => {
                let Some(spread) = SpreadField::cast(field_node) else {
                    continue;
                };
                let value = lower_expression(ctx, spread.value_expr(), field_node.span());
                hoisted.extend(value.hoisted);
                fields.push(MappingField::Spread { expr: value.node });
            }
            SyntaxKind::SpecificField => {
                let Some(specific) = SpecificField::cast(field_node) else {
                    continue;
                };
                let key = match specific.field_name() {
                    Some(token) => Expr::VarRef(var_ref_from_token(ctx, token)),
                    None => Expr::Unknown(field_node.span()),
                };
                let value = lower_expression(ctx, specific.value_expr(), field_node.span());
                hoisted.extend(value.hoisted);
                fields.push(MappingField::KeyValue {
                    key,
                    computed_key: false,
                    value: value.node,
                });
            }
            _ => {}
        }
    }
    Lowered::with_hoisted(
        Expr::Mapping(MappingConstructorExpr { fields, pos }),
        hoisted,
    )
}

fn lower_unary(ctx: &mut LowerContext, node: RedNode<'_>) -> Lowered<Expr> {
    let pos = node.span();
    let Some(unary) = UnaryExpression::cast(node) else {
        return Lowered::new(Expr::Unknown(pos));
    };
    let Some(op) = operator_kind(ctx, unary.unary_operator(), pos) else {
        return Lowered::new(Expr::Unknown(pos));
    };
    let operand = lower_expression(ctx, unary.expression(), pos);
    operand.map(|expr| {
        Expr::Unary(UnaryExpr {
            op,
            expr: Box::new(expr),
            pos,
        })
    })
}

fn lower_binary(ctx: &mut LowerContext, node: RedNode<'_>) -> Lowered<Expr> {
    let pos = node.span();
    let Some(binary) = BinaryExpression::cast(node) else {
        return Lowered::new(Expr::Unknown(pos));
    };
    let Some(op) = operator_kind(ctx, binary.operator(), pos) else {
        return Lowered::new(Expr::Unknown(pos));
    };
    let lhs = lower_expression(ctx, binary.lhs_expr(), pos);
    let rhs = lower_expression(ctx, binary.rhs_expr(), pos);
    let mut hoisted = lhs.hoisted;
    hoisted.extend(rhs.hoisted);
    Lowered::with_hoisted(
        Expr::Binary(BinaryExpr {
            op,
            lhs: Box::new(lhs.node),
            rhs: Box::new(rhs.node),
            pos,
        }),
        hoisted,
    )
}

fn operator_kind(
    ctx: &mut LowerContext,
    token: Option<RedToken<'_>>,
    pos: Span,
) -> Option<OperatorKind> {
    let Some(token) = token else {
        ctx.sink
            .error_with_arg(DiagnosticCode::UnsupportedConstruct, pos, "operator");
        return None;
    };
    let kind = OperatorKind::from_text(token.text());
    if kind.is_none() {
        ctx.sink.error_with_arg(
            DiagnosticCode::UnsupportedConstruct,
            token.text_span(),
            token.text(),
        );
    }
    kind
}

fn lower_field_access(ctx: &mut LowerContext, node: RedNode<'_>) -> Lowered<Expr> {
    let pos = node.span();
    let Some(access) = FieldAccess::cast(node) else {
        return Lowered::new(Expr::Unknown(pos));
    };
    let field = match access.field_name() {
        Some(token) => create_identifier(ctx, token.text_span(), token.text()),
        None => create_identifier(ctx, pos, ""),
    };
    let base = lower_expression(ctx, access.expression(), pos);
    base.map(|expr| {
        Expr::FieldAccess(FieldAccessExpr {
            expr: Box::new(expr),
            field,
            field_kind: FieldKind::Single,
            optional_access: false,
            pos,
        })
    })
}

fn lower_function_call(ctx: &mut LowerContext, node: RedNode<'_>) -> Lowered<Expr> {
    let pos = node.span();
    let Some(call) = FunctionCall::cast(node) else {
        return Lowered::new(Expr::Unknown(pos));
    };
    let (pkg_alias, name) = match call.function_name() {
        Some(target) => name_reference(ctx, &target),
        None => (None, create_identifier(ctx, pos, "")),
    };

    let mut args = Vec::new();
    let mut hoisted = Vec::new();
    for element in call.arguments() {
        let Some(arg_node) = element.as_node() else {
            continue;
        };
        let expression = match arg_node.kind() {
            SyntaxKind::PositionalArg => {
                PositionalArg::cast(arg_node).and_then(|arg| arg.expression())
            }
            SyntaxKind::NamedArg => NamedArg::cast(arg_node).and_then(|arg| arg.expression()),
            SyntaxKind::RestArg => RestArg::cast(arg_node).and_then(|arg| arg.expression()),
            other => {
                ctx.sink.error_with_arg(
                    DiagnosticCode::UnsupportedConstruct,
                    arg_node.span(),
                    format!("{other:?}"),
                );
                args.push(Expr::Unknown(arg_node.span()));
                continue;
            }
        };
        let out = lower_expression(ctx, expression, arg_node.span());
        hoisted.extend(out.hoisted);
        args.push(out.node);
    }

    Lowered::with_hoisted(
        Expr::Invocation(Invocation {
            pkg_alias,
            name,
            args,
            pos,
        }),
        hoisted,
    )
}

/// Splits a name into its module qualifier and identifier
///
/// A qualified name reference yields both parts; a bare token yields an
/// unqualified name.
pub(crate) fn name_reference(
    ctx: &mut LowerContext,
    element: &RedElement<'_>,
) -> (Option<Identifier>, Identifier) {
    match element {
        RedElement::Node(node) if node.kind() == SyntaxKind::QualifiedNameReference => {
            let Some(reference) = QualifiedNameReference::cast(*node) else {
                return (None, create_identifier(ctx, node.span(), ""));
            };
            let pkg_alias = reference
                .module_prefix()
                .map(|token| create_identifier(ctx, token.text_span(), token.text()));
            let name = match reference.identifier() {
                Some(token) => create_identifier(ctx, token.text_span(), token.text()),
                None => create_identifier(ctx, node.span(), ""),
            };
            (pkg_alias, name)
        }
        RedElement::Token(token) => (
            None,
            create_identifier(ctx, token.text_span(), token.text()),
        ),
        RedElement::Node(node) => {
            ctx.sink.error_with_arg(
                DiagnosticCode::UnsupportedConstruct,
                node.span(),
                format!("{:?}", node.kind()),
            );
            (None, create_identifier(ctx, node.span(), ""))
        }
    }
}
