//! Type descriptor lowering and anonymous-type hoisting

use crate::context::LowerContext;
use crate::expr::lower_expression;
use crate::lower::{create_identifier, create_simple_var};
use crate::Lowered;
use hn_ast::{
    RecordTypeNode, Requiredness, TypeDefinition, TypeKind, TypeNode, UserDefinedType, Visibility,
};
use hn_diagnostic::DiagnosticCode;
use hn_span::Span;
use hn_syntax::view::{
    QualifiedNameReference, RecordField, RecordFieldWithDefault, RecordRestDescriptor,
    RecordTypeDesc, TypeReference,
};
use hn_syntax::{RedElement, RedNode, SyntaxKind};

/// Lowers a type descriptor to a type node
///
/// An absent descriptor lowers to nil. Inline record descriptors are
/// hoisted: the record becomes a fresh public, anonymous top-level type
/// definition and the use site becomes a reference to the generated
/// name.
pub(crate) fn lower_type(
    ctx: &mut LowerContext,
    element: Option<RedElement<'_>>,
    fallback_pos: Span,
) -> Lowered<TypeNode> {
    let Some(element) = element else {
        return Lowered::new(TypeNode::nil(fallback_pos));
    };
    match element {
        RedElement::Token(token) => {
            let pos = token.text_span();
            if token.kind() == SyntaxKind::IdentifierToken {
                return Lowered::new(TypeNode::UserDefined(UserDefinedType {
                    pkg_alias: None,
                    type_name: create_identifier(ctx, pos, token.text()),
                    pos,
                }));
            }
            let text: String = token.text().split_whitespace().collect();
            match TypeKind::from_text(&text) {
                Some(kind) => Lowered::new(TypeNode::Value { kind, pos }),
                None => {
                    ctx.sink.error_with_arg(
                        DiagnosticCode::UnsupportedConstruct,
                        pos,
                        token.text(),
                    );
                    Lowered::new(TypeNode::Unknown(pos))
                }
            }
        }
        RedElement::Node(node) => match node.kind() {
            SyntaxKind::QualifiedNameReference => Lowered::new(lower_qualified_type(ctx, node)),
            SyntaxKind::NilTypeDesc => Lowered::new(TypeNode::nil(node.span())),
            SyntaxKind::RecordTypeDesc => hoist_anonymous_record(ctx, node),
            other => {
                ctx.sink.error_with_arg(
                    DiagnosticCode::UnsupportedConstruct,
                    node.span(),
                    format!("{other:?}"),
                );
                Lowered::new(TypeNode::Unknown(node.span()))
            }
        },
    }
}

fn lower_qualified_type(ctx: &mut LowerContext, node: RedNode<'_>) -> TypeNode {
    let Some(reference) = QualifiedNameReference::cast(node) else {
        return TypeNode::Unknown(node.span());
    };
    let pkg_alias = reference
        .module_prefix()
        .map(|token| create_identifier(ctx, token.text_span(), token.text()));
    let type_name = match reference.identifier() {
        Some(token) => create_identifier(ctx, token.text_span(), token.text()),
        None => create_identifier(ctx, node.span(), ""),
    };
    TypeNode::UserDefined(UserDefinedType {
        pkg_alias,
        type_name,
        pos: node.span(),
    })
}

/// Synthesizes a top-level definition for an inline record descriptor
/// and rewrites the use site into a reference to it
fn hoist_anonymous_record(ctx: &mut LowerContext, node: RedNode<'_>) -> Lowered<TypeNode> {
    let Some(record_view) = RecordTypeDesc::cast(node) else {
        return Lowered::new(TypeNode::Unknown(node.span()));
    };
    let record_out = lower_record_type(ctx, record_view);
    let mut hoisted = record_out.hoisted;
    let mut record = record_out.node;
    record.is_anonymous = true;

    let generated = ctx.next_anonymous_type_name();
    let name = create_identifier(ctx, node.span(), &generated);
    hoisted.push(TypeDefinition {
        name: name.clone(),
        type_node: TypeNode::Record(record),
        visibility: Visibility::Public,
        is_anonymous: true,
        pos: node.span(),
    });

    Lowered::with_hoisted(
        TypeNode::UserDefined(UserDefinedType {
            pkg_alias: None,
            type_name: name,
            pos: node.span(),
        }),
        hoisted,
    )
}

/// Lowers a record type descriptor
///
/// The record is sealed exactly when no rest descriptor is present.
pub(crate) fn lower_record_type(
    ctx: &mut LowerContext,
    record: RecordTypeDesc<'_>,
) -> Lowered<RecordTypeNode> {
    let mut fields = Vec::new();
    let mut type_refs = Vec::new();
    let mut rest_field_type = None;
    let mut has_rest_field = false;
    let mut hoisted = Vec::new();

    for element in record.fields() {
        let Some(node) = element.as_node() else {
            continue;
        };
        match node.kind() {
            SyntaxKind::RecordField => {
                let Some(field) = RecordField::cast(node) else {
                    continue;
                };
                let mut out =
                    create_simple_var(ctx, field.field_name(), field.type_name(), node.span());
                out.node.visibility = Visibility::Public;
                out.node.requiredness = if field.question_mark_token().is_some() {
                    Some(Requiredness::Optional)
                } else {
                    Some(Requiredness::Required)
                };
                hoisted.extend(out.hoisted);
                fields.push(out.node);
            }
            SyntaxKind::RecordFieldWithDefault => {
                let Some(field) = RecordFieldWithDefault::cast(node) else {
                    continue;
                };
                let mut out =
                    create_simple_var(ctx, field.field_name(), field.type_name(), node.span());
                out.node.visibility = Visibility::Public;
                out.node.requiredness = Some(Requiredness::Required);
                if field.expression().is_some() {
                    let default = lower_expression(ctx, field.expression(), node.span());
                    hoisted.extend(default.hoisted);
                    out.node.initializer = Some(default.node);
                }
                hoisted.extend(out.hoisted);
                fields.push(out.node);
            }
            SyntaxKind::RecordRestDescriptor => {
                let Some(rest) = RecordRestDescriptor::cast(node) else {
                    continue;
                };
                let out = lower_type(ctx, rest.type_name(), node.span());
                hoisted.extend(out.hoisted);
                rest_field_type = Some(Box::new(out.node));
                has_rest_field = true;
            }
            SyntaxKind::TypeReference => {
                let Some(reference) = TypeReference::cast(node) else {
                    continue;
                };
                let out = lower_type(ctx, reference.type_name(), node.span());
                hoisted.extend(out.hoisted);
                type_refs.push(out.node);
            }
            _ => {}
        }
    }

    Lowered::with_hoisted(
        RecordTypeNode {
            fields,
            rest_field_type,
            type_refs,
            sealed: !has_rest_field,
            is_anonymous: false,
            is_local: false,
            pos: record.node().span(),
        },
        hoisted,
    )
}
