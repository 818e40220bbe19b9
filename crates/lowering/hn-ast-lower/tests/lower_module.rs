//! Whole-unit lowering tests over a hand-built module CST

use expect_test::expect;
use hn_ast::{
    CompilationUnit, Expr, Identifier, LiteralValue, MappingField, Requiredness, Statement,
    TopLevelNode, TypeNode, Variable, Visibility,
};
use hn_ast_lower::{lower_module_part, LowerContext};
use hn_intern::Interner;
use hn_syntax::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
use std::fmt::Write as _;
use std::rc::Rc;

fn t(kind: SyntaxKind, text: &str) -> SyntaxElement {
    SyntaxToken::new(kind, text).into()
}

fn ts(kind: SyntaxKind, text: &str) -> SyntaxElement {
    SyntaxToken::with_trivia(kind, text, "", " ").into()
}

fn module_with(imports: Vec<SyntaxElement>, members: Vec<SyntaxElement>) -> Rc<SyntaxNode> {
    SyntaxNode::new(
        SyntaxKind::ModulePart,
        vec![
            Some(SyntaxNode::list(imports).into()),
            Some(SyntaxNode::list(members).into()),
            Some(t(SyntaxKind::EofToken, "")),
        ],
    )
}

fn import_node(org: Option<&str>, modules: &[&str]) -> SyntaxElement {
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
    SyntaxNode::new(
        SyntaxKind::ImportDecl,
        vec![
            Some(ts(SyntaxKind::ImportKeyword, "import")),
            org_name,
            Some(SyntaxNode::list(components).into()),
            None,
            None,
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

fn block(statements: Vec<SyntaxElement>) -> SyntaxElement {
    SyntaxNode::new(
        SyntaxKind::BlockStatement,
        vec![
            Some(ts(SyntaxKind::OpenBraceToken, "{")),
            Some(SyntaxNode::list(statements).into()),
            Some(t(SyntaxKind::CloseBraceToken, "}")),
        ],
    )
    .into()
}

fn function_def(
    name: &str,
    params: Vec<SyntaxElement>,
    body: SyntaxElement,
) -> SyntaxElement {
    SyntaxNode::new(
        SyntaxKind::FunctionDefinition,
        vec![
            Some(ts(SyntaxKind::PublicKeyword, "public")),
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

fn final_tuple_decl() -> SyntaxElement {
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
    SyntaxNode::new(
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
    )
    .into()
}

fn call_statement() -> SyntaxElement {
    let callee = SyntaxNode::new(
        SyntaxKind::QualifiedNameReference,
        vec![
            Some(t(SyntaxKind::IdentifierToken, "log")),
            Some(t(SyntaxKind::ColonToken, ":")),
            Some(t(SyntaxKind::IdentifierToken, "print")),
        ],
    );
    let argument = SyntaxNode::new(
        SyntaxKind::PositionalArg,
        vec![None, Some(t(SyntaxKind::IdentifierToken, "msg"))],
    );
    let call = SyntaxNode::new(
        SyntaxKind::FunctionCall,
        vec![
            Some(callee.into()),
            Some(t(SyntaxKind::OpenParenToken, "(")),
            Some(SyntaxNode::list(vec![argument.into()]).into()),
            Some(t(SyntaxKind::CloseParenToken, ")")),
        ],
    );
    SyntaxNode::new(
        SyntaxKind::ExpressionStatement,
        vec![Some(call.into()), Some(t(SyntaxKind::SemicolonToken, ";"))],
    )
    .into()
}

fn resolve(identifier: &Identifier, interner: &Interner) -> String {
    interner.resolve(&identifier.value)
}

fn visibility_prefix(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "public ",
        Visibility::Private => "private ",
        Visibility::Default => "",
    }
}

fn render_type(type_node: &TypeNode, interner: &Interner) -> String {
    match type_node {
        TypeNode::Value { kind, .. } => kind.to_string(),
        TypeNode::UserDefined(user) => match &user.pkg_alias {
            Some(alias) => format!(
                "{}:{}",
                interner.resolve(&alias.value),
                resolve(&user.type_name, interner)
            ),
            None => resolve(&user.type_name, interner),
        },
        TypeNode::Record(record) => {
            if record.sealed {
                "record(sealed)".to_string()
            } else {
                "record(open)".to_string()
            }
        }
        TypeNode::Array(array) => format!("{}[]", render_type(&array.elem_type, interner)),
        TypeNode::Unknown(_) => "<unknown>".to_string(),
    }
}

fn render_expr(expr: &Expr, interner: &Interner) -> String {
    match expr {
        Expr::Literal(literal) => match &literal.value {
            LiteralValue::Int(value) => format!("{value}"),
            LiteralValue::Float(text) | LiteralValue::Decimal(text) => text.clone(),
            LiteralValue::String(text) => format!("{text:?}"),
            LiteralValue::Bool(value) => format!("{value}"),
            LiteralValue::Nil => "()".to_string(),
            LiteralValue::ByteArray(text) | LiteralValue::Raw(text) => text.clone(),
        },
        Expr::VarRef(var_ref) => match &var_ref.pkg_alias {
            Some(alias) => format!(
                "{}:{}",
                interner.resolve(&alias.value),
                resolve(&var_ref.name, interner)
            ),
            None => resolve(&var_ref.name, interner),
        },
        Expr::FieldAccess(access) => format!(
            "{}.{}",
            render_expr(&access.expr, interner),
            resolve(&access.field, interner)
        ),
        Expr::Invocation(invocation) => {
            let name = match &invocation.pkg_alias {
                Some(alias) => format!(
                    "{}:{}",
                    interner.resolve(&alias.value),
                    resolve(&invocation.name, interner)
                ),
                None => resolve(&invocation.name, interner),
            };
            let args: Vec<String> = invocation
                .args
                .iter()
                .map(|arg| render_expr(arg, interner))
                .collect();
            format!("{name}({})", args.join(", "))
        }
        Expr::Unary(unary) => format!("({}{})", unary.op, render_expr(&unary.expr, interner)),
        Expr::Binary(binary) => format!(
            "({} {} {})",
            render_expr(&binary.lhs, interner),
            binary.op,
            render_expr(&binary.rhs, interner)
        ),
        Expr::Mapping(mapping) => {
            let fields: Vec<String> = mapping
                .fields
                .iter()
                .map(|field| match field {
                    MappingField::KeyValue { key, value, .. } => format!(
                        "{}: {}",
                        render_expr(key, interner),
                        render_expr(value, interner)
                    ),
                    MappingField::Spread { expr } => {
                        format!("...{}", render_expr(expr, interner))
                    }
                })
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
        Expr::Unknown(_) => "<unknown>".to_string(),
    }
}

fn render_variable(variable: &Variable, interner: &Interner) -> String {
    let mut out = String::new();
    if variable.is_final() {
        out.push_str("final ");
    }
    match variable {
        Variable::Simple(simple) => {
            out.push_str(&resolve(&simple.name, interner));
            if let Some(type_node) = &simple.type_node {
                let _ = write!(out, ": {}", render_type(type_node, interner));
            } else if simple.is_declared_with_var {
                out.push_str(": var");
            }
            if let Some(initializer) = &simple.initializer {
                let _ = write!(out, " = {}", render_expr(initializer, interner));
            }
        }
        Variable::Tuple(tuple) => {
            let members: Vec<String> = tuple
                .members
                .iter()
                .map(|member| render_variable(member, interner))
                .collect();
            let _ = write!(out, "[{}]", members.join(", "));
            if let Some(initializer) = &tuple.initializer {
                let _ = write!(out, " = {}", render_expr(initializer, interner));
            }
        }
        Variable::Record(record) => {
            let entries: Vec<String> = record
                .entries
                .iter()
                .map(|entry| {
                    format!(
                        "{}: {}",
                        resolve(&entry.key, interner),
                        render_variable(&entry.binding, interner)
                    )
                })
                .collect();
            let _ = write!(out, "{{{}}}", entries.join(", "));
            if let Some(initializer) = &record.initializer {
                let _ = write!(out, " = {}", render_expr(initializer, interner));
            }
        }
        Variable::Error(error) => {
            let _ = write!(out, "error({})", render_variable(&error.reason, interner));
            if let Some(initializer) = &error.initializer {
                let _ = write!(out, " = {}", render_expr(initializer, interner));
            }
        }
    }
    out
}

fn render_unit(unit: &CompilationUnit, interner: &Interner) -> String {
    let mut out = format!("unit {}\n", unit.name);
    for node in &unit.top_level_nodes {
        match node {
            TopLevelNode::Import(import) => {
                out.push_str("  import ");
                if let Some(org) = &import.org_name {
                    let _ = write!(out, "{}/", resolve(org, interner));
                }
                let components: Vec<String> = import
                    .module_name
                    .iter()
                    .map(|part| resolve(part, interner))
                    .collect();
                out.push_str(&components.join("."));
                if let Some(version) = &import.version {
                    let _ = write!(out, " version {}", resolve(version, interner));
                }
                let _ = writeln!(out, " as {}", resolve(&import.alias, interner));
            }
            TopLevelNode::TypeDefinition(definition) => {
                let _ = writeln!(
                    out,
                    "  {}{}type {} = {}",
                    visibility_prefix(definition.visibility),
                    if definition.is_anonymous { "anonymous " } else { "" },
                    resolve(&definition.name, interner),
                    render_type(&definition.type_node, interner)
                );
                if let TypeNode::Record(record) = &definition.type_node {
                    for field in &record.fields {
                        let requiredness = match field.requiredness {
                            Some(Requiredness::Optional) => " (optional)",
                            Some(Requiredness::Required) => " (required)",
                            None => "",
                        };
                        let type_text = field
                            .type_node
                            .as_ref()
                            .map_or_else(|| "<none>".to_string(), |ty| render_type(ty, interner));
                        let _ = writeln!(
                            out,
                            "    {}field {}: {}{}",
                            visibility_prefix(field.visibility),
                            resolve(&field.name, interner),
                            type_text,
                            requiredness
                        );
                    }
                    if let Some(rest) = &record.rest_field_type {
                        let _ = writeln!(out, "    rest: {}", render_type(rest, interner));
                    }
                }
            }
            TopLevelNode::Function(function) => {
                let params: Vec<String> = function
                    .params
                    .iter()
                    .map(|param| {
                        let type_text = param
                            .type_node
                            .as_ref()
                            .map_or_else(|| "<none>".to_string(), |ty| render_type(ty, interner));
                        format!("{}: {}", resolve(&param.name, interner), type_text)
                    })
                    .collect();
                let _ = writeln!(
                    out,
                    "  {}function {}({}) returns {}",
                    visibility_prefix(function.visibility),
                    resolve(&function.name, interner),
                    params.join(", "),
                    render_type(&function.return_type, interner)
                );
                for statement in &function.body.statements {
                    match statement {
                        Statement::VariableDef(definition) => {
                            let _ = writeln!(
                                out,
                                "    def {}",
                                render_variable(&definition.variable, interner)
                            );
                        }
                        Statement::Expression(expression) => {
                            let _ = writeln!(
                                out,
                                "    expr {}",
                                render_expr(&expression.expr, interner)
                            );
                        }
                    }
                }
            }
        }
    }
    out
}

#[test]
fn test_lower_whole_module() {
    let root = module_with(
        vec![import_node(Some("heron"), &["log"])],
        vec![
            type_def(
                "Person",
                record_desc(vec![
                    record_field("string", "name", false),
                    record_field("int", "age", true),
                ]),
            ),
            function_def(
                "greet",
                vec![
                    required_param(ts(SyntaxKind::SimpleTypeKeyword, "string"), "msg"),
                    required_param(record_desc(Vec::new()), "opts"),
                ],
                block(vec![final_tuple_decl(), call_statement()]),
            ),
        ],
    );

    let mut ctx = LowerContext::new("main.hn");
    let unit = lower_module_part(&root, &mut ctx);
    assert!(ctx.sink.is_empty(), "unexpected diagnostics: {:?}", ctx.sink);

    let rendered = render_unit(&unit, &ctx.interner);
    expect![[r#"
        unit main.hn
          import heron/log as log
          public type Person = record(sealed)
            public field name: string (required)
            public field age: int (optional)
          public anonymous type $anonType$0 = record(sealed)
          public function greet(msg: string, opts: $anonType$0) returns ()
            def final [final x, final y] = pair
            expr log:print(msg)
    "#]]
    .assert_eq(&rendered);
}

#[test]
fn test_lowering_survives_malformed_literals() {
    let bad_literal = SyntaxNode::new(
        SyntaxKind::ExpressionStatement,
        vec![
            Some(t(
                SyntaxKind::DecimalIntegerLiteralToken,
                "99999999999999999999",
            )),
            Some(t(SyntaxKind::SemicolonToken, ";")),
        ],
    );
    let good_call = call_statement();
    let root = module_with(
        Vec::new(),
        vec![function_def(
            "broken",
            Vec::new(),
            block(vec![bad_literal.into(), good_call]),
        )],
    );

    let mut ctx = LowerContext::new("main.hn");
    let unit = lower_module_part(&root, &mut ctx);

    // The bad literal is reported but the rest of the unit still lowers.
    assert_eq!(ctx.sink.len(), 1);
    let TopLevelNode::Function(function) = &unit.top_level_nodes[0] else {
        panic!("expected a function");
    };
    assert_eq!(function.body.statements.len(), 2);
}
