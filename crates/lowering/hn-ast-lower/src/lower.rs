//! Module-level lowering: imports, members, functions, statements,
//! binding patterns

use crate::context::LowerContext;
use crate::expr::lower_expression;
use crate::literal::{
    is_alphanumeric_identifier, strip_quoted_identifier, unescape, IDENTIFIER_LITERAL_PREFIX,
};
use crate::types::{lower_record_type, lower_type};
use crate::Lowered;
use hn_ast::{
    ArrayTypeNode, Block, CompilationUnit, ErrorDetailEntry, ErrorVariable, Expr, ExpressionStmt,
    Function, Identifier, Import, RecordVariable, RecordVariableEntry, SimpleVariable, Statement,
    TopLevelNode, TupleVariable, TypeDefinition, TypeNode, Variable, VariableDef, Visibility,
};
use hn_diagnostic::DiagnosticCode;
use hn_span::Span;
use hn_syntax::view::{
    BlockStatement, CaptureBindingPattern, DefaultableParam, ErrorBindingPattern,
    ExpressionStatement, FunctionDefinition, ImportDecl, ListBindingPattern, LocalVarDecl,
    MappingBindingPattern, ModulePart, RecordTypeDesc, RequiredParam, RestParam,
    RestBindingPattern, TypeDefinition as TypeDefinitionView,
};
use hn_syntax::{RedElement, RedNode, RedToken, SyntaxKind, SyntaxNode};
use std::rc::Rc;

/// Lowers a module-part CST into a compilation unit
///
/// Imports come first, then members in source order; type definitions
/// hoisted out of inline descriptors are spliced in immediately before
/// the member that contained them. Diagnostics accumulate in the
/// context's sink; lowering itself never fails.
pub fn lower_module_part(root: &Rc<SyntaxNode>, ctx: &mut LowerContext) -> CompilationUnit {
    let red = RedNode::new(root, 0);
    let mut unit = CompilationUnit::new(ctx.source_name.clone(), red.span());
    let Some(module) = ModulePart::cast(red) else {
        ctx.sink.error_with_arg(
            DiagnosticCode::UnsupportedConstruct,
            red.span(),
            format!("{:?}", red.kind()),
        );
        return unit;
    };

    for element in module.imports() {
        let Some(node) = element.as_node() else {
            continue;
        };
        let Some(import_view) = ImportDecl::cast(node) else {
            continue;
        };
        let mut import = lower_import(ctx, import_view);
        import.comp_unit = Identifier::new(ctx.interner.intern(&unit.name), import.pos);
        unit.add_top_level_node(TopLevelNode::Import(import));
    }

    for element in module.members() {
        let Some(node) = element.as_node() else {
            continue;
        };
        for top_level in lower_member(ctx, node).into_nodes() {
            unit.add_top_level_node(top_level);
        }
    }
    unit
}

/// Canonicalizes identifier text
///
/// Quoted identifier literals are unescaped and prefix-stripped; a
/// value outside `[0-9a-zA-Z.]` is reported but the identifier is still
/// produced from the attempted value.
pub(crate) fn create_identifier(ctx: &mut LowerContext, pos: Span, value: &str) -> Identifier {
    if value.starts_with(IDENTIFIER_LITERAL_PREFIX) {
        if !is_alphanumeric_identifier(&strip_quoted_identifier(value)) {
            ctx.sink.error(
                DiagnosticCode::IdentifierLiteralOnlySupportsAlphanumerics,
                pos,
            );
        }
        let unescaped = unescape(value);
        Identifier {
            value: ctx
                .interner
                .intern(&unescaped[IDENTIFIER_LITERAL_PREFIX.len_utf8()..]),
            original_text: Some(value.to_string()),
            is_literal: true,
            pos,
        }
    } else {
        Identifier::new(ctx.interner.intern(value), pos)
    }
}

/// Builds a named, typed variable with no flags set
pub(crate) fn create_simple_var(
    ctx: &mut LowerContext,
    name: Option<RedToken<'_>>,
    type_element: Option<RedElement<'_>>,
    pos: Span,
) -> Lowered<SimpleVariable> {
    let name = match name {
        Some(token) => create_identifier(ctx, token.text_span(), token.text()),
        None => create_identifier(ctx, pos, ""),
    };
    lower_type(ctx, type_element, pos)
        .map(|type_node| SimpleVariable::new(name, Some(type_node), pos))
}

fn lower_import(ctx: &mut LowerContext, view: ImportDecl<'_>) -> Import {
    let pos = view.node().span();
    let org_name = view
        .org_name()
        .and_then(|org| org.org_name())
        .map(|token| create_identifier(ctx, token.text_span(), token.text()));
    let module_name: Vec<Identifier> = view
        .module_name()
        .map(|token| create_identifier(ctx, token.text_span(), token.text()))
        .collect();
    let version = view
        .version()
        .and_then(|version| version.version_number())
        .map(|token| create_identifier(ctx, token.text_span(), token.text()));

    // The alias defaults to the last module name component.
    let prefix = view.prefix().and_then(|prefix| prefix.prefix());
    let alias = match prefix {
        Some(token) if !token.text().is_empty() => {
            create_identifier(ctx, token.text_span(), token.text())
        }
        _ => match module_name.last() {
            Some(last) => last.clone(),
            None => create_identifier(ctx, pos, ""),
        },
    };

    let comp_unit = create_identifier(ctx, pos, "");
    Import {
        org_name,
        module_name,
        version,
        alias,
        comp_unit,
        pos,
    }
}

fn lower_member(ctx: &mut LowerContext, node: RedNode<'_>) -> Lowered<Option<TopLevelNode>> {
    match node.kind() {
        SyntaxKind::TypeDefinition => match TypeDefinitionView::cast(node) {
            Some(view) => lower_type_definition(ctx, view)
                .map(|definition| Some(TopLevelNode::TypeDefinition(definition))),
            None => Lowered::empty(),
        },
        SyntaxKind::FunctionDefinition => match FunctionDefinition::cast(node) {
            Some(view) => {
                lower_function(ctx, view).map(|function| Some(TopLevelNode::Function(function)))
            }
            None => Lowered::empty(),
        },
        // Kinds without a lowering rule are a deliberate no-op.
        _ => Lowered::empty(),
    }
}

fn lower_type_definition(
    ctx: &mut LowerContext,
    view: TypeDefinitionView<'_>,
) -> Lowered<TypeDefinition> {
    let pos = view.node().span();
    let name = match view.type_name() {
        Some(token) => create_identifier(ctx, token.text_span(), token.text()),
        None => create_identifier(ctx, pos, ""),
    };

    // A record descriptor bound to a name is lowered in place; only
    // record descriptors in type-reference positions get hoisted.
    let descriptor = view.type_descriptor();
    let (type_node, hoisted) = match descriptor.and_then(RecordTypeDesc::cast) {
        Some(record_view) => {
            let out = lower_record_type(ctx, record_view);
            let mut record = out.node;
            record.is_anonymous = false;
            record.is_local = false;
            (TypeNode::Record(record), out.hoisted)
        }
        None => {
            let out = lower_type(ctx, descriptor.map(RedElement::Node), pos);
            (out.node, out.hoisted)
        }
    };

    let visibility = match view.visibility_qualifier() {
        Some(token) if token.kind() == SyntaxKind::PublicKeyword => Visibility::Public,
        _ => Visibility::Default,
    };

    Lowered::with_hoisted(
        TypeDefinition {
            name,
            type_node,
            visibility,
            is_anonymous: false,
            pos,
        },
        hoisted,
    )
}

fn lower_function(ctx: &mut LowerContext, view: FunctionDefinition<'_>) -> Lowered<Function> {
    let pos = view.node().span();
    let name = match view.function_name() {
        Some(token) => create_identifier(ctx, token.text_span(), token.text()),
        None => create_identifier(ctx, pos, ""),
    };
    let visibility = match view.visibility_qualifier().map(|token| token.kind()) {
        Some(SyntaxKind::PublicKeyword) => Visibility::Public,
        Some(SyntaxKind::PrivateKeyword) => Visibility::Private,
        _ => Visibility::Default,
    };

    let mut params = Vec::new();
    let mut rest_param = None;
    let mut hoisted = Vec::new();

    for element in view.parameters() {
        let Some(node) = element.as_node() else {
            continue;
        };
        match node.kind() {
            SyntaxKind::RequiredParam => {
                let Some(param) = RequiredParam::cast(node) else {
                    continue;
                };
                let mut out =
                    create_simple_var(ctx, param.param_name(), param.type_name(), node.span());
                if is_public(param.visibility_qualifier()) {
                    out.node.visibility = Visibility::Public;
                }
                hoisted.extend(out.hoisted);
                params.push(out.node);
            }
            SyntaxKind::DefaultableParam => {
                let Some(param) = DefaultableParam::cast(node) else {
                    continue;
                };
                let mut out =
                    create_simple_var(ctx, param.param_name(), param.type_name(), node.span());
                if is_public(param.visibility_qualifier()) {
                    out.node.visibility = Visibility::Public;
                }
                let default = lower_expression(ctx, param.expression(), node.span());
                out.node.initializer = Some(default.node);
                hoisted.extend(out.hoisted);
                hoisted.extend(default.hoisted);
                params.push(out.node);
            }
            SyntaxKind::RestParam => {
                let Some(param) = RestParam::cast(node) else {
                    continue;
                };
                let mut out =
                    create_simple_var(ctx, param.param_name(), param.type_name(), node.span());
                // A rest parameter collects into an array of its type.
                let elem_type = out
                    .node
                    .type_node
                    .take()
                    .unwrap_or_else(|| TypeNode::nil(node.span()));
                out.node.type_node = Some(TypeNode::Array(ArrayTypeNode {
                    elem_type: Box::new(elem_type),
                    dimensions: 1,
                    pos: node.span(),
                }));
                hoisted.extend(out.hoisted);
                rest_param = Some(out.node);
            }
            _ => {}
        }
    }

    let return_type = match view.return_type_desc() {
        Some(return_desc) => {
            let out = lower_type(ctx, return_desc.type_name(), return_desc.node().span());
            hoisted.extend(out.hoisted);
            out.node
        }
        None => TypeNode::nil(pos),
    };

    let body = match view.function_body() {
        Some(block_view) => {
            let out = lower_block(ctx, block_view);
            hoisted.extend(out.hoisted);
            out.node
        }
        None => Block {
            statements: Vec::new(),
            pos,
        },
    };

    Lowered::with_hoisted(
        Function {
            name,
            visibility,
            params,
            rest_param,
            return_type,
            body,
            pos,
        },
        hoisted,
    )
}

fn is_public(token: Option<RedToken<'_>>) -> bool {
    token.is_some_and(|token| token.kind() == SyntaxKind::PublicKeyword)
}

fn lower_block(ctx: &mut LowerContext, view: BlockStatement<'_>) -> Lowered<Block> {
    let mut statements = Vec::new();
    let mut hoisted = Vec::new();
    for element in view.statements() {
        let Some(node) = element.as_node() else {
            continue;
        };
        let out = lower_statement(ctx, node);
        hoisted.extend(out.hoisted);
        if let Some(statement) = out.node {
            statements.push(statement);
        }
    }
    Lowered::with_hoisted(
        Block {
            statements,
            pos: view.node().span(),
        },
        hoisted,
    )
}

fn lower_statement(ctx: &mut LowerContext, node: RedNode<'_>) -> Lowered<Option<Statement>> {
    match node.kind() {
        SyntaxKind::LocalVarDecl => match LocalVarDecl::cast(node) {
            Some(view) => lower_var_decl(ctx, view)
                .map(|definition| Some(Statement::VariableDef(definition))),
            None => Lowered::new(None),
        },
        SyntaxKind::ExpressionStatement => match ExpressionStatement::cast(node) {
            Some(view) => {
                let pos = node.span();
                lower_expression(ctx, view.expression(), pos).map(|expr| {
                    Some(Statement::Expression(ExpressionStmt { expr, pos }))
                })
            }
            None => Lowered::new(None),
        },
        other => {
            ctx.sink.error_with_arg(
                DiagnosticCode::UnsupportedConstruct,
                node.span(),
                format!("{other:?}"),
            );
            Lowered::new(None)
        }
    }
}

fn lower_var_decl(ctx: &mut LowerContext, view: LocalVarDecl<'_>) -> Lowered<VariableDef> {
    let pos = view.node().span();
    let declared_final = view.final_keyword().is_some();
    let type_element = view.type_name();
    let declared_with_var = matches!(
        &type_element,
        Some(element) if element.kind() == SyntaxKind::VarKeyword
    );
    let mut hoisted = Vec::new();

    let mut variable = if let Some(name_token) = view.variable_name() {
        let name = create_identifier(ctx, name_token.text_span(), name_token.text());
        let mut simple = SimpleVariable::new(name, None, pos);
        if declared_with_var {
            simple.is_declared_with_var = true;
        } else {
            let out = lower_type(ctx, type_element, pos);
            hoisted.extend(out.hoisted);
            simple.type_node = Some(out.node);
        }
        Variable::Simple(simple)
    } else if let Some(pattern) = view.binding_pattern() {
        lower_binding_pattern(ctx, pattern)
    } else {
        Variable::Simple(SimpleVariable::new(create_identifier(ctx, pos, ""), None, pos))
    };

    if view.initializer().is_some() {
        let out = lower_expression(ctx, view.initializer(), pos);
        hoisted.extend(out.hoisted);
        set_initializer(&mut variable, out.node);
    }
    if declared_final {
        mark_variable_final(&mut variable);
    }

    Lowered::with_hoisted(VariableDef { variable, pos }, hoisted)
}

fn lower_binding_pattern(ctx: &mut LowerContext, node: RedNode<'_>) -> Variable {
    let pos = node.span();
    match node.kind() {
        SyntaxKind::CaptureBindingPattern => {
            let name = CaptureBindingPattern::cast(node).and_then(|view| view.variable_name());
            Variable::Simple(simple_binding(ctx, name, pos))
        }
        SyntaxKind::RestBindingPattern => {
            let name = RestBindingPattern::cast(node).and_then(|view| view.variable_name());
            Variable::Simple(simple_binding(ctx, name, pos))
        }
        SyntaxKind::ListBindingPattern => {
            let Some(view) = ListBindingPattern::cast(node) else {
                return Variable::Simple(simple_binding(ctx, None, pos));
            };
            let members = view
                .members()
                .map(|member| lower_binding_pattern(ctx, member))
                .collect();
            let rest = view
                .rest_binding()
                .map(|rest| Box::new(lower_binding_pattern(ctx, rest.node())));
            Variable::Tuple(TupleVariable {
                members,
                rest,
                initializer: None,
                is_final: false,
                pos,
            })
        }
        SyntaxKind::MappingBindingPattern => {
            let Some(view) = MappingBindingPattern::cast(node) else {
                return Variable::Simple(simple_binding(ctx, None, pos));
            };
            let mut entries = Vec::new();
            for field in view.fields() {
                let field_pos = field.node().span();
                let key = match field.field_name() {
                    Some(token) => create_identifier(ctx, token.text_span(), token.text()),
                    None => create_identifier(ctx, field_pos, ""),
                };
                // `{name}` is shorthand for `{name: name}`.
                let binding = match field.pattern() {
                    Some(pattern) => lower_binding_pattern(ctx, pattern),
                    None => Variable::Simple(simple_binding(ctx, field.field_name(), field_pos)),
                };
                entries.push(RecordVariableEntry { key, binding });
            }
            let rest = view
                .rest_binding()
                .map(|rest| Box::new(lower_binding_pattern(ctx, rest.node())));
            Variable::Record(RecordVariable {
                entries,
                rest,
                initializer: None,
                is_final: false,
                pos,
            })
        }
        SyntaxKind::ErrorBindingPattern => {
            let Some(view) = ErrorBindingPattern::cast(node) else {
                return Variable::Simple(simple_binding(ctx, None, pos));
            };
            let reason = match view.reason() {
                Some(reason) => lower_binding_pattern(ctx, reason),
                None => Variable::Simple(simple_binding(ctx, None, pos)),
            };
            let mut detail = Vec::new();
            for field in view.detail_fields() {
                let field_pos = field.node().span();
                let key = match field.field_name() {
                    Some(token) => create_identifier(ctx, token.text_span(), token.text()),
                    None => create_identifier(ctx, field_pos, ""),
                };
                let binding = match field.pattern() {
                    Some(pattern) => lower_binding_pattern(ctx, pattern),
                    None => Variable::Simple(simple_binding(ctx, field.field_name(), field_pos)),
                };
                detail.push(ErrorDetailEntry { key, binding });
            }
            let rest_detail = view
                .rest_detail()
                .map(|rest| Box::new(lower_binding_pattern(ctx, rest.node())));
            Variable::Error(ErrorVariable {
                reason: Box::new(reason),
                detail,
                rest_detail,
                initializer: None,
                is_final: false,
                pos,
            })
        }
        other => {
            ctx.sink.error_with_arg(
                DiagnosticCode::UnsupportedConstruct,
                pos,
                format!("{other:?}"),
            );
            Variable::Simple(simple_binding(ctx, None, pos))
        }
    }
}

fn simple_binding(
    ctx: &mut LowerContext,
    name: Option<RedToken<'_>>,
    pos: Span,
) -> SimpleVariable {
    let name = match name {
        Some(token) => create_identifier(ctx, token.text_span(), token.text()),
        None => create_identifier(ctx, pos, ""),
    };
    SimpleVariable::new(name, None, pos)
}

fn set_initializer(variable: &mut Variable, expr: Expr) {
    match variable {
        Variable::Simple(var) => var.initializer = Some(expr),
        Variable::Tuple(var) => var.initializer = Some(expr),
        Variable::Record(var) => var.initializer = Some(expr),
        Variable::Error(var) => var.initializer = Some(expr),
    }
}

/// Propagates the final flag through a binding pattern
///
/// This is a transitive closure over the pattern shape: tuple members
/// and rest, record field values and rest, error reason, detail values
/// and rest detail all become final, recursively.
pub(crate) fn mark_variable_final(variable: &mut Variable) {
    match variable {
        Variable::Simple(var) => var.is_final = true,
        Variable::Tuple(var) => {
            var.is_final = true;
            for member in &mut var.members {
                mark_variable_final(member);
            }
            if let Some(rest) = &mut var.rest {
                mark_variable_final(rest);
            }
        }
        Variable::Record(var) => {
            var.is_final = true;
            for entry in &mut var.entries {
                mark_variable_final(&mut entry.binding);
            }
            if let Some(rest) = &mut var.rest {
                mark_variable_final(rest);
            }
        }
        Variable::Error(var) => {
            var.is_final = true;
            mark_variable_final(&mut var.reason);
            for entry in &mut var.detail {
                mark_variable_final(&mut entry.binding);
            }
            if let Some(rest) = &mut var.rest_detail {
                mark_variable_final(rest);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_ast::{LiteralValue, Requiredness};
    use hn_syntax::{SyntaxElement, SyntaxToken};

    fn t(kind: SyntaxKind, text: &str) -> SyntaxElement {
        SyntaxToken::new(kind, text).into()
    }

    fn ts(kind: SyntaxKind, text: &str) -> SyntaxElement {
        SyntaxToken::with_trivia(kind, text, "", " ").into()
    }

    fn module_with(
        imports: Vec<SyntaxElement>,
        members: Vec<SyntaxElement>,
    ) -> Rc<SyntaxNode> {
        SyntaxNode::new(
            SyntaxKind::ModulePart,
            vec![
                Some(SyntaxNode::list(imports).into()),
                Some(SyntaxNode::list(members).into()),
                Some(t(SyntaxKind::EofToken, "")),
            ],
        )
    }

    fn import_node(
        org: Option<&str>,
        modules: &[&str],
        alias: Option<&str>,
        version: Option<&str>,
    ) -> SyntaxElement {
        let org_name = org.map(|name| {
            SyntaxNode::new(
                SyntaxKind::ImportOrgName,
                vec![
                    Some(t(SyntaxKind::IdentifierToken, name)),
                    Some(t(SyntaxKind::SlashToken, "/")),
                ],
            )
            .into()
        });
        let mut components = Vec::new();
        for (index, name) in modules.iter().enumerate() {
            if index > 0 {
                components.push(t(SyntaxKind::DotToken, "."));
            }
            components.push(t(SyntaxKind::IdentifierToken, name));
        }
        let version = version.map(|number| {
            SyntaxNode::new(
                SyntaxKind::ImportVersion,
                vec![
                    Some(ts(SyntaxKind::VersionKeyword, "version")),
                    Some(t(SyntaxKind::DecimalFloatLiteralToken, number)),
                ],
            )
            .into()
        });
        let prefix = alias.map(|name| {
            SyntaxNode::new(
                SyntaxKind::ImportPrefix,
                vec![
                    Some(ts(SyntaxKind::AsKeyword, "as")),
                    Some(t(SyntaxKind::IdentifierToken, name)),
                ],
            )
            .into()
        });
        SyntaxNode::new(
            SyntaxKind::ImportDecl,
            vec![
                Some(ts(SyntaxKind::ImportKeyword, "import")),
                org_name,
                Some(SyntaxNode::list(components).into()),
                version,
                prefix,
                Some(t(SyntaxKind::SemicolonToken, ";")),
            ],
        )
        .into()
    }

    fn record_field(type_text: &str, name: &str, optional: bool) -> SyntaxElement {
        SyntaxNode::new(
            SyntaxKind::RecordField,
            vec![
                Some(ts(SyntaxKind::SimpleTypeKeyword, type_text)),
                Some(t(SyntaxKind::IdentifierToken, name)),
                optional.then(|| t(SyntaxKind::QuestionMarkToken, "?")),
                Some(t(SyntaxKind::SemicolonToken, ";")),
            ],
        )
        .into()
    }

    fn record_rest(type_text: &str) -> SyntaxElement {
        SyntaxNode::new(
            SyntaxKind::RecordRestDescriptor,
            vec![
                Some(t(SyntaxKind::SimpleTypeKeyword, type_text)),
                Some(t(SyntaxKind::EllipsisToken, "...")),
                Some(t(SyntaxKind::SemicolonToken, ";")),
            ],
        )
        .into()
    }

    fn record_desc(fields: Vec<SyntaxElement>) -> SyntaxElement {
        SyntaxNode::new(
            SyntaxKind::RecordTypeDesc,
            vec![
                Some(ts(SyntaxKind::RecordKeyword, "record")),
                Some(ts(SyntaxKind::OpenBraceToken, "{")),
                Some(SyntaxNode::list(fields).into()),
                Some(t(SyntaxKind::CloseBraceToken, "}")),
            ],
        )
        .into()
    }

    fn type_def(name: &str, descriptor: SyntaxElement) -> SyntaxElement {
        SyntaxNode::new(
            SyntaxKind::TypeDefinition,
            vec![
                Some(ts(SyntaxKind::PublicKeyword, "public")),
                Some(ts(SyntaxKind::TypeKeyword, "type")),
                Some(ts(SyntaxKind::IdentifierToken, name)),
                Some(descriptor),
                Some(t(SyntaxKind::SemicolonToken, ";")),
            ],
        )
        .into()
    }

    fn required_param(type_element: SyntaxElement, name: &str) -> SyntaxElement {
        SyntaxNode::new(
            SyntaxKind::RequiredParam,
            vec![
                None,
                None,
                None,
                Some(type_element),
                Some(t(SyntaxKind::IdentifierToken, name)),
            ],
        )
        .into()
    }

    fn empty_block() -> SyntaxElement {
        SyntaxNode::new(
            SyntaxKind::BlockStatement,
            vec![
                Some(t(SyntaxKind::OpenBraceToken, "{")),
                Some(SyntaxNode::list(Vec::new()).into()),
                Some(t(SyntaxKind::CloseBraceToken, "}")),
            ],
        )
        .into()
    }

    fn function_def(name: &str, params: Vec<SyntaxElement>, body: SyntaxElement) -> SyntaxElement {
        SyntaxNode::new(
            SyntaxKind::FunctionDefinition,
            vec![
                None,
                Some(ts(SyntaxKind::FunctionKeyword, "function")),
                Some(t(SyntaxKind::IdentifierToken, name)),
                Some(t(SyntaxKind::OpenParenToken, "(")),
                Some(SyntaxNode::list(params).into()),
                Some(ts(SyntaxKind::CloseParenToken, ")")),
                None,
                Some(body),
            ],
        )
        .into()
    }

    fn capture(name: &str) -> SyntaxElement {
        SyntaxNode::new(
            SyntaxKind::CaptureBindingPattern,
            vec![Some(t(SyntaxKind::IdentifierToken, name))],
        )
        .into()
    }

    #[test]
    fn test_import_alias_defaults_to_last_component() {
        let mut ctx = LowerContext::new("main.hn");
        let root = module_with(
            vec![import_node(None, &["lang", "value"], None, None)],
            Vec::new(),
        );
        let unit = lower_module_part(&root, &mut ctx);
        assert_eq!(unit.top_level_nodes.len(), 1);
        let TopLevelNode::Import(import) = &unit.top_level_nodes[0] else {
            unreachable!("expected an import");
        };
        assert_eq!(ctx.interner.resolve(&import.alias.value), "value");
        assert!(import.org_name.is_none());
        assert!(import.version.is_none());
        assert_eq!(ctx.interner.resolve(&import.comp_unit.value), "main.hn");
    }

    #[test]
    fn test_import_explicit_alias_org_and_version() {
        let mut ctx = LowerContext::new("main.hn");
        let root = module_with(
            vec![import_node(Some("heron"), &["net", "http"], Some("web"), Some("1.0"))],
            Vec::new(),
        );
        let unit = lower_module_part(&root, &mut ctx);
        let TopLevelNode::Import(import) = &unit.top_level_nodes[0] else {
            unreachable!("expected an import");
        };
        assert_eq!(ctx.interner.resolve(&import.alias.value), "web");
        let org = import.org_name.as_ref().map(|org| ctx.interner.resolve(&org.value));
        assert_eq!(org.as_deref(), Some("heron"));
        let version = import.version.as_ref().map(|v| ctx.interner.resolve(&v.value));
        assert_eq!(version.as_deref(), Some("1.0"));
        let components: Vec<String> = import
            .module_name
            .iter()
            .map(|part| ctx.interner.resolve(&part.value))
            .collect();
        assert_eq!(components, vec!["net".to_string(), "http".to_string()]);
    }

    #[test]
    fn test_quoted_identifier_round_trip() {
        let mut ctx = LowerContext::new("main.hn");
        let identifier = create_identifier(&mut ctx, Span::new(0, 4), "'abc");
        assert!(identifier.is_literal);
        assert_eq!(ctx.interner.resolve(&identifier.value), "abc");
        assert_eq!(identifier.original_text.as_deref(), Some("'abc"));
        assert!(ctx.sink.is_empty());
    }

    #[test]
    fn test_invalid_quoted_identifier_still_produced() {
        let mut ctx = LowerContext::new("main.hn");
        let identifier = create_identifier(&mut ctx, Span::new(0, 10), "'has space");
        assert!(identifier.is_literal);
        assert_eq!(ctx.interner.resolve(&identifier.value), "has space");
        assert_eq!(ctx.sink.len(), 1);
        assert_eq!(
            ctx.sink.diagnostics()[0].code,
            DiagnosticCode::IdentifierLiteralOnlySupportsAlphanumerics
        );
    }

    #[test]
    fn test_record_without_rest_is_sealed() {
        let mut ctx = LowerContext::new("main.hn");
        let root = module_with(
            Vec::new(),
            vec![type_def(
                "Person",
                record_desc(vec![
                    record_field("string", "name", false),
                    record_field("int", "age", true),
                ]),
            )],
        );
        let unit = lower_module_part(&root, &mut ctx);
        let TopLevelNode::TypeDefinition(definition) = &unit.top_level_nodes[0] else {
            unreachable!("expected a type definition");
        };
        let TypeNode::Record(record) = &definition.type_node else {
            unreachable!("expected a record descriptor");
        };
        assert!(record.sealed);
        assert!(!record.is_anonymous);
        assert_eq!(record.fields.len(), 2);
        assert_eq!(record.fields[0].requiredness, Some(Requiredness::Required));
        assert_eq!(record.fields[1].requiredness, Some(Requiredness::Optional));
        assert_eq!(record.fields[0].visibility, Visibility::Public);
        assert_eq!(definition.visibility, Visibility::Public);
    }

    #[test]
    fn test_record_with_rest_is_unsealed() {
        let mut ctx = LowerContext::new("main.hn");
        let root = module_with(
            Vec::new(),
            vec![type_def(
                "Open",
                record_desc(vec![record_field("string", "name", false), record_rest("int")]),
            )],
        );
        let unit = lower_module_part(&root, &mut ctx);
        let TopLevelNode::TypeDefinition(definition) = &unit.top_level_nodes[0] else {
            unreachable!("expected a type definition");
        };
        let TypeNode::Record(record) = &definition.type_node else {
            unreachable!("expected a record descriptor");
        };
        assert!(!record.sealed);
        assert!(record.rest_field_type.is_some());
    }

    #[test]
    fn test_anonymous_types_hoist_with_unique_names() {
        let mut ctx = LowerContext::new("main.hn");
        let root = module_with(
            Vec::new(),
            vec![function_def(
                "handle",
                vec![
                    required_param(record_desc(Vec::new()), "first"),
                    required_param(record_desc(Vec::new()), "second"),
                ],
                empty_block(),
            )],
        );
        let unit = lower_module_part(&root, &mut ctx);
        // Two hoisted definitions spliced ahead of the function.
        assert_eq!(unit.top_level_nodes.len(), 3);
        let mut names = Vec::new();
        for node in &unit.top_level_nodes[..2] {
            let TopLevelNode::TypeDefinition(definition) = node else {
                unreachable!("expected hoisted type definitions first");
            };
            assert!(definition.is_anonymous);
            assert_eq!(definition.visibility, Visibility::Public);
            names.push(ctx.interner.resolve(&definition.name.value));
        }
        assert_ne!(names[0], names[1]);
        let TopLevelNode::Function(function) = &unit.top_level_nodes[2] else {
            unreachable!("expected the function last");
        };
        assert_eq!(function.params.len(), 2);
        let Some(TypeNode::UserDefined(reference)) = &function.params[0].type_node else {
            unreachable!("expected a reference to the hoisted type");
        };
        assert_eq!(ctx.interner.resolve(&reference.type_name.value), names[0]);
    }

    #[test]
    fn test_final_propagates_through_tuple_pattern() {
        let mut ctx = LowerContext::new("main.hn");
        let pattern = SyntaxNode::new(
            SyntaxKind::ListBindingPattern,
            vec![
                Some(t(SyntaxKind::OpenBracketToken, "[")),
                Some(
                    SyntaxNode::list(vec![
                        capture("x"),
                        t(SyntaxKind::CommaToken, ","),
                        capture("y"),
                    ])
                    .into(),
                ),
                None,
                Some(t(SyntaxKind::CloseBracketToken, "]")),
            ],
        );
        let decl = SyntaxNode::new(
            SyntaxKind::LocalVarDecl,
            vec![
                None,
                Some(ts(SyntaxKind::FinalKeyword, "final")),
                Some(ts(SyntaxKind::VarKeyword, "var")),
                Some(pattern.into()),
                Some(ts(SyntaxKind::EqualToken, "=")),
                Some(t(SyntaxKind::IdentifierToken, "pair")),
                Some(t(SyntaxKind::SemicolonToken, ";")),
            ],
        );
        let red = RedNode::new(&decl, 0);
        let view = LocalVarDecl::cast(red).unwrap();
        let out = lower_var_decl(&mut ctx, view);
        let Variable::Tuple(tuple) = &out.node.variable else {
            unreachable!("expected a tuple binding");
        };
        assert!(tuple.is_final);
        assert_eq!(tuple.members.len(), 2);
        assert!(tuple.members.iter().all(Variable::is_final));
        assert!(tuple.initializer.is_some());
    }

    #[test]
    fn test_final_propagates_through_error_pattern() {
        let mut ctx = LowerContext::new("main.hn");
        let detail = SyntaxNode::new(
            SyntaxKind::FieldBindingPattern,
            vec![
                Some(t(SyntaxKind::IdentifierToken, "detail")),
                Some(t(SyntaxKind::ColonToken, ":")),
                Some(capture("value")),
            ],
        );
        let rest = SyntaxNode::new(
            SyntaxKind::RestBindingPattern,
            vec![
                Some(t(SyntaxKind::EllipsisToken, "...")),
                Some(t(SyntaxKind::IdentifierToken, "others")),
            ],
        );
        let pattern = SyntaxNode::new(
            SyntaxKind::ErrorBindingPattern,
            vec![
                Some(t(SyntaxKind::ErrorKeyword, "error")),
                Some(t(SyntaxKind::OpenParenToken, "(")),
                Some(capture("reason")),
                Some(SyntaxNode::list(vec![detail.into()]).into()),
                Some(rest.into()),
                Some(t(SyntaxKind::CloseParenToken, ")")),
            ],
        );
        let mut variable = lower_binding_pattern(&mut ctx, RedNode::new(&pattern, 0));
        mark_variable_final(&mut variable);
        let Variable::Error(error) = &variable else {
            unreachable!("expected an error binding");
        };
        assert!(error.is_final);
        assert!(error.reason.is_final());
        assert!(error.detail[0].binding.is_final());
        assert!(error.rest_detail.as_ref().is_some_and(|rest| rest.is_final()));
    }

    #[test]
    fn test_unknown_member_is_skipped_silently() {
        let mut ctx = LowerContext::new("main.hn");
        let stray = SyntaxNode::new(
            SyntaxKind::MappingConstructor,
            vec![
                Some(t(SyntaxKind::OpenBraceToken, "{")),
                Some(SyntaxNode::list(Vec::new()).into()),
                Some(t(SyntaxKind::CloseBraceToken, "}")),
            ],
        );
        let root = module_with(Vec::new(), vec![stray.into()]);
        let unit = lower_module_part(&root, &mut ctx);
        assert!(unit.top_level_nodes.is_empty());
        assert!(ctx.sink.is_empty());
    }

    #[test]
    fn test_integer_overflow_degrades_to_original_text() {
        let mut ctx = LowerContext::new("main.hn");
        let decl = SyntaxNode::new(
            SyntaxKind::LocalVarDecl,
            vec![
                None,
                None,
                Some(ts(SyntaxKind::SimpleTypeKeyword, "int")),
                Some(t(SyntaxKind::IdentifierToken, "n")),
                Some(ts(SyntaxKind::EqualToken, "=")),
                Some(t(
                    SyntaxKind::DecimalIntegerLiteralToken,
                    "99999999999999999999",
                )),
                Some(t(SyntaxKind::SemicolonToken, ";")),
            ],
        );
        let red = RedNode::new(&decl, 0);
        let out = lower_var_decl(&mut ctx, LocalVarDecl::cast(red).unwrap());
        let Variable::Simple(simple) = &out.node.variable else {
            unreachable!("expected a simple variable");
        };
        let Some(Expr::Literal(literal)) = &simple.initializer else {
            unreachable!("expected a literal initializer");
        };
        assert_eq!(
            literal.value,
            LiteralValue::Raw("99999999999999999999".to_string())
        );
        assert_eq!(ctx.sink.len(), 1);
        assert_eq!(ctx.sink.diagnostics()[0].code, DiagnosticCode::IntegerTooLarge);
    }

    #[test]
    fn test_var_declaration_sets_inference_flag() {
        let mut ctx = LowerContext::new("main.hn");
        let decl = SyntaxNode::new(
            SyntaxKind::LocalVarDecl,
            vec![
                None,
                None,
                Some(ts(SyntaxKind::VarKeyword, "var")),
                Some(t(SyntaxKind::IdentifierToken, "x")),
                Some(ts(SyntaxKind::EqualToken, "=")),
                Some(t(SyntaxKind::DecimalIntegerLiteralToken, "1")),
                Some(t(SyntaxKind::SemicolonToken, ";")),
            ],
        );
        let red = RedNode::new(&decl, 0);
        let out = lower_var_decl(&mut ctx, LocalVarDecl::cast(red).unwrap());
        let Variable::Simple(simple) = &out.node.variable else {
            unreachable!("expected a simple variable");
        };
        assert!(simple.is_declared_with_var);
        assert!(simple.type_node.is_none());
    }
}
