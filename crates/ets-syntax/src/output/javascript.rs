//! JavaScript writer for the ETS IR.
//!
//! Rendering is a pure function of the node. A node that already carries
//! `text` renders as that text; string literals are requoted first so they
//! always come out quoted. Type-only constructs render as nothing and
//! decorators are never emitted.

use crate::ir::{
    Argument, BindingKind, DeclarationKind, EnumMember, ExportClause, HeritageClause, Modifier, Node,
    NodeData, Parameter,
};
use crate::kind::SyntaxKind;
use crate::resource;
use crate::traits::Writer;
use std::fmt::Write;

/// Static instance of the JavaScript writer.
pub static JS_WRITER: JsWriter = JsWriter;

/// Renders IR nodes as JavaScript source.
pub struct JsWriter;

impl JsWriter {
    /// Emit a node (usually a source file) as JavaScript.
    pub fn emit(node: &Node) -> String {
        render(node)
    }
}

impl Writer for JsWriter {
    fn language(&self) -> &'static str {
        "javascript"
    }

    fn extension(&self) -> &'static str {
        "js"
    }

    fn render(&self, node: &Node) -> String {
        render(node)
    }
}

fn join(nodes: &[Node], sep: &str) -> String {
    nodes.iter().map(render).collect::<Vec<_>>().join(sep)
}

/// `{\n<inner>\n}`, or `{\n}` when there is nothing inside.
fn braced(inner: String) -> String {
    if inner.is_empty() {
        "{\n}".to_string()
    } else {
        format!("{{\n{inner}\n}}")
    }
}

/// Body of a control statement. Blocks are braced; any other statement
/// stays inline so re-parsing gives back the same shape.
fn statement_body(body: &Node) -> String {
    if body.syntax_kind() == Some(SyntaxKind::Block) {
        return braced(render(body));
    }
    let inline = render(body);
    if inline.is_empty() { ";".to_string() } else { inline }
}

fn body_of(body: Option<&Node>) -> String {
    match body {
        Some(body) => statement_body(body),
        None => "{ }".to_string(),
    }
}

/// Keywords that survive into JavaScript, in written order.
fn modifier_prefix(modifiers: &[Modifier]) -> String {
    let mut out = String::new();
    for m in modifiers {
        if SyntaxKind::from_u16(m.kind).is_some_and(SyntaxKind::is_emitted_modifier) {
            out.push_str(&m.text);
            out.push(' ');
        }
    }
    out
}

fn render_parameter(param: &Parameter) -> String {
    let mut out = String::new();
    if param.has_dot_dot_dot {
        out.push_str("...");
    }
    match &param.binding_pattern {
        Some(pattern) => out.push_str(&render(pattern)),
        None => out.push_str(&param.name),
    }
    if let Some(init) = &param.initializer {
        out.push_str(" = ");
        out.push_str(&render(init));
    } else if let Some(text) = &param.initializer_text {
        out.push_str(" = ");
        out.push_str(text);
    }
    out
}

fn render_parameters(params: &[Parameter]) -> String {
    params
        .iter()
        .map(render_parameter)
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_arguments(args: &[Argument]) -> String {
    args.iter()
        .map(|arg| match arg {
            Argument::Text(text) => text.clone(),
            Argument::Node(node) => render(node),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_class(prefix: &str, name: &str, heritage: &[HeritageClause], members: &[Node]) -> String {
    let mut out = format!("{prefix}class");
    if !name.is_empty() {
        out.push(' ');
        out.push_str(name);
    }
    let base = heritage
        .iter()
        .find(|h| h.token == "extends")
        .and_then(|h| h.types.first());
    if let Some(base) = base {
        write!(out, " extends {base}").unwrap();
    }
    let body: Vec<String> = members
        .iter()
        .filter(|m| m.syntax_kind().is_some())
        .map(render)
        .filter(|m| !m.is_empty())
        .map(|m| format!("  {m}"))
        .collect();
    if body.is_empty() {
        out.push_str(" {}");
    } else {
        write!(out, " {{\n{}\n}}", body.join("\n")).unwrap();
    }
    out
}

fn render_variable_statement(is_export: bool, list: &Node) -> String {
    let NodeData::VariableDeclarationList {
        declaration_kind,
        declarations,
    } = list.data()
    else {
        return render(list);
    };
    let decls: Vec<String> = declarations
        .iter()
        .map(|decl| match decl.data() {
            NodeData::VariableDeclaration {
                name,
                initializer: None,
                ..
            } if *declaration_kind == DeclarationKind::Const => format!("{name} = undefined"),
            _ => render(decl),
        })
        .collect();
    let export = if is_export { "export " } else { "" };
    format!("{export}{} {};", declaration_kind.as_str(), decls.join(", "))
}

/// Loop heads print declaration lists with their keyword.
fn render_loop_head(node: &Node) -> String {
    match node.data() {
        NodeData::VariableDeclarationList {
            declaration_kind, ..
        } => format!("{} {}", declaration_kind.as_str(), render(node)),
        _ => render(node),
    }
}

fn render_clause(out: &mut String, clause: &Node) {
    let statements = match clause.data() {
        NodeData::CaseClause {
            expression,
            statements,
        } => {
            writeln!(out, "  case {}:", render(expression)).unwrap();
            statements
        }
        NodeData::DefaultClause { statements } => {
            out.push_str("  default:\n");
            statements
        }
        _ => return,
    };
    for stmt in statements {
        writeln!(out, "    {}", render(stmt)).unwrap();
    }
    // Every case ends in an explicit break.
    if matches!(clause.data(), NodeData::CaseClause { .. }) {
        out.push_str("    break;\n");
    }
}

fn render_catch(clause: &Node) -> String {
    match clause.data() {
        NodeData::CatchClause {
            variable_declaration: Some(var),
            block,
        } => format!(" catch ({}) {}", render(var), braced(render(block))),
        NodeData::CatchClause { block, .. } => format!(" catch {}", braced(render(block))),
        _ => String::new(),
    }
}

fn render_enum(name: &str, is_export: bool, members: &[EnumMember]) -> String {
    let export = if is_export { "export " } else { "" };
    let mut out = format!("{export}var {name};\n(function ({name}) {{\n");
    let mut next = 0f64;
    for member in members {
        let key = &member.name;
        match &member.initializer {
            Some(init) if init.kind_name() == "StringLiteral" => {
                writeln!(out, "  {name}[\"{key}\"] = {};", render(init)).unwrap();
            }
            Some(init) => {
                let value = render(init);
                if let Ok(n) = value.parse::<f64>() {
                    next = n + 1.0;
                }
                writeln!(out, "  {name}[{name}[\"{key}\"] = {value}] = \"{key}\";").unwrap();
            }
            None => {
                writeln!(out, "  {name}[{name}[\"{key}\"] = {next}] = \"{key}\";").unwrap();
                next += 1.0;
            }
        }
    }
    write!(out, "}})({name} || ({name} = {{}}));").unwrap();
    out
}

fn render_import(node: &NodeData) -> String {
    let NodeData::ImportDeclaration {
        module_specifier,
        import_clause,
        is_type_only,
    } = node
    else {
        return String::new();
    };
    if *is_type_only {
        return String::new();
    }
    let Some(clause) = import_clause else {
        return format!("import {module_specifier};");
    };

    let mut parts = Vec::new();
    if let Some(name) = &clause.name {
        parts.push(name.clone());
    }
    let mut named = Vec::new();
    for binding in &clause.named_bindings {
        match (binding.kind, &binding.property_name) {
            (BindingKind::Namespace, _) => parts.push(format!("* as {}", binding.name)),
            (BindingKind::Named, Some(original)) => {
                named.push(format!("{original} as {}", binding.name))
            }
            (BindingKind::Named, None) => named.push(binding.name.clone()),
        }
    }
    if !named.is_empty() || parts.is_empty() {
        parts.push(format!("{{ {} }}", named.join(", ")));
    }
    format!("import {} from {module_specifier};", parts.join(", "))
}

fn render_export(clause: Option<&ExportClause>, module_specifier: Option<&str>) -> String {
    let from = module_specifier
        .map(|m| format!(" from {m}"))
        .unwrap_or_default();
    match clause {
        None => format!("export *{from};"),
        Some(ExportClause {
            namespace: Some(ns),
            ..
        }) => format!("export * as {ns}{from};"),
        Some(clause) => {
            let elements: Vec<String> = clause
                .elements
                .iter()
                .map(|e| match &e.property_name {
                    Some(original) => format!("{original} as {}", e.name),
                    None => e.name.clone(),
                })
                .collect();
            format!("export {{ {} }}{from};", elements.join(", "))
        }
    }
}

fn render(node: &Node) -> String {
    use NodeData as D;

    if let D::StringLiteral {} = node.data() {
        let text = node.text().unwrap_or_default();
        if text.starts_with(['"', '\'']) {
            return text.to_string();
        }
        return format!("\"{text}\"");
    }
    if let Some(text) = node.text() {
        return text.to_string();
    }

    match node.data() {
        D::SourceFile { statements, .. } => {
            let parts: Vec<String> = statements
                .iter()
                .map(render)
                .filter(|s| !s.is_empty())
                .collect();
            if parts.is_empty() {
                String::new()
            } else {
                parts.join("\n") + "\n"
            }
        }

        D::ClassDeclaration {
            name,
            modifiers,
            heritage_clauses,
            members,
            ..
        } => render_class(&modifier_prefix(modifiers), name, heritage_clauses, members),
        D::ClassExpression {
            name,
            heritage_clauses,
            members,
            ..
        } => render_class("", name, heritage_clauses, members),
        D::MethodDeclaration {
            name,
            modifiers,
            parameters,
            body,
            asterisk_token,
            ..
        } => match body {
            Some(body) => format!(
                "{}{}{name}({}) {}",
                modifier_prefix(modifiers),
                if *asterisk_token { "*" } else { "" },
                render_parameters(parameters),
                braced(render(body))
            ),
            // Overload signatures and abstract members
            None => String::new(),
        },
        D::GetAccessor {
            name,
            modifiers,
            body,
        } => format!(
            "{}get {name}() {}",
            modifier_prefix(modifiers),
            body_of(body.as_deref())
        ),
        D::SetAccessor {
            name,
            modifiers,
            parameters,
            body,
        } => format!(
            "{}set {name}({}) {}",
            modifier_prefix(modifiers),
            render_parameters(parameters),
            body_of(body.as_deref())
        ),
        D::Constructor {
            parameters, body, ..
        } => format!(
            "constructor({}) {}",
            render_parameters(parameters),
            body_of(body.as_deref())
        ),
        D::PropertyDeclaration {
            name,
            initializer,
            initializer_text,
            modifiers,
            ..
        } => {
            let mut out = modifier_prefix(modifiers);
            out.push_str(name);
            if let Some(init) = initializer {
                write!(out, " = {}", render(init)).unwrap();
            } else if let Some(text) = initializer_text {
                write!(out, " = {text}").unwrap();
            }
            out.push(';');
            out
        }
        D::FunctionDeclaration {
            name,
            modifiers,
            parameters,
            body,
            asterisk_token,
            ..
        } => match body {
            Some(body) => format!(
                "{}function{} {name}({}) {}",
                modifier_prefix(modifiers),
                if *asterisk_token { "*" } else { "" },
                render_parameters(parameters),
                braced(render(body))
            ),
            None => String::new(),
        },
        D::InterfaceDeclaration { .. } | D::TypeAliasDeclaration { .. } => String::new(),
        D::EnumDeclaration {
            name,
            is_export,
            members,
        } => render_enum(name, *is_export, members),
        data @ D::ImportDeclaration { .. } => render_import(data),
        D::ExportDeclaration {
            export_clause,
            module_specifier,
            is_type_only,
        } => {
            if *is_type_only {
                String::new()
            } else {
                render_export(export_clause.as_ref(), module_specifier.as_deref())
            }
        }
        D::ExportAssignment {
            expression,
            is_export_equals,
        } => {
            if *is_export_equals {
                format!("module.exports = {};", render(expression))
            } else {
                format!("export default {};", render(expression))
            }
        }

        D::Block { statements } => statements
            .iter()
            .map(render)
            .filter(|s| !s.is_empty())
            .map(|s| format!("  {s}"))
            .collect::<Vec<_>>()
            .join("\n"),
        D::VariableStatement {
            is_export,
            declaration_list,
        } => render_variable_statement(*is_export, declaration_list),
        D::VariableDeclarationList { declarations, .. } => join(declarations, ", "),
        D::VariableDeclaration {
            name, initializer, ..
        } => match initializer {
            Some(init) => format!("{name} = {}", render(init)),
            None => name.clone(),
        },
        D::ExpressionStatement { expression } => format!("{};", render(expression)),
        D::ReturnStatement { expression } => match expression {
            Some(e) => format!("return {};", render(e)),
            None => "return;".to_string(),
        },
        D::ThrowStatement { expression } => format!("throw {};", render(expression)),
        D::IfStatement {
            expression,
            then_statement,
            else_statement,
        } => {
            let mut out = format!(
                "if ({}) {}",
                render(expression),
                statement_body(then_statement)
            );
            match else_statement.as_deref() {
                Some(chained) if chained.kind_name() == "IfStatement" => {
                    write!(out, " else {}", render(chained)).unwrap();
                }
                Some(other) => write!(out, " else {}", statement_body(other)).unwrap(),
                None => {}
            }
            out
        }
        D::ForStatement {
            initializer,
            condition,
            incrementor,
            statement,
        } => format!(
            "for ({}; {}; {}) {}",
            initializer.as_deref().map(render_loop_head).unwrap_or_default(),
            condition.as_deref().map(render).unwrap_or_default(),
            incrementor.as_deref().map(render).unwrap_or_default(),
            body_of(statement.as_deref())
        ),
        D::ForInStatement {
            initializer,
            expression,
            statement,
        } => format!(
            "for ({} in {}) {}",
            render_loop_head(initializer),
            render(expression),
            body_of(statement.as_deref())
        ),
        D::ForOfStatement {
            initializer,
            expression,
            statement,
            await_modifier,
        } => format!(
            "for {}({} of {}) {}",
            if *await_modifier { "await " } else { "" },
            render_loop_head(initializer),
            render(expression),
            body_of(statement.as_deref())
        ),
        D::WhileStatement {
            expression,
            statement,
        } => format!(
            "while ({}) {}",
            render(expression),
            body_of(statement.as_deref())
        ),
        D::DoStatement {
            expression,
            statement,
        } => format!(
            "do {} while ({})",
            body_of(statement.as_deref()),
            render(expression)
        ),
        D::SwitchStatement {
            expression,
            case_block,
        } => {
            let mut out = format!("switch ({}) {{\n", render(expression));
            if let D::CaseBlock { clauses } = case_block.data() {
                for clause in clauses {
                    render_clause(&mut out, clause);
                }
            }
            out.push('}');
            out
        }
        D::CaseBlock { clauses } => {
            let mut out = String::new();
            for clause in clauses {
                render_clause(&mut out, clause);
            }
            out
        }
        D::CaseClause { .. } | D::DefaultClause { .. } => {
            let mut out = String::new();
            render_clause(&mut out, node);
            out
        }
        D::TryStatement {
            try_block,
            catch_clause,
            finally_block,
        } => {
            let mut out = format!("try {}", braced(render(try_block)));
            if let Some(clause) = catch_clause {
                out.push_str(&render_catch(clause));
            }
            if let Some(finally) = finally_block {
                write!(out, " finally {}", braced(render(finally))).unwrap();
            }
            out
        }
        D::CatchClause { .. } => render_catch(node).trim_start().to_string(),
        D::BreakStatement { label } => match label {
            Some(label) => format!("break {label};"),
            None => "break;".to_string(),
        },
        D::ContinueStatement { label } => match label {
            Some(label) => format!("continue {label};"),
            None => "continue;".to_string(),
        },
        D::LabeledStatement { label, statement } => format!("{label}: {}", render(statement)),
        D::EmptyStatement {} => String::new(),

        D::Identifier { name } => name.clone(),
        D::CallExpression {
            expression,
            arguments,
            question_dot_token,
            ..
        } => format!(
            "{}{}({})",
            render(expression),
            if *question_dot_token { "?." } else { "" },
            render_arguments(arguments)
        ),
        D::ResourceReferenceExpression {
            arguments,
            resource_ref_type,
            ..
        } => resource::resolve(*resource_ref_type, arguments),
        D::PropertyAccessExpression {
            expression,
            name,
            question_dot_token,
        } => format!(
            "{}{}{name}",
            render(expression),
            if *question_dot_token { "?." } else { "." }
        ),
        D::ElementAccessExpression {
            expression,
            argument_expression,
            question_dot_token,
        } => format!(
            "{}{}[{}]",
            render(expression),
            if *question_dot_token { "?." } else { "" },
            render(argument_expression)
        ),
        D::NewExpression {
            expression,
            arguments,
        } => format!("new {}({})", render(expression), join(arguments, ", ")),
        D::ParenthesizedExpression { expression } => format!("({})", render(expression)),
        D::TypeOfExpression { expression } => format!("typeof {}", render(expression)),
        D::VoidExpression { expression } => format!("void {}", render(expression)),
        D::DeleteExpression { expression } => format!("delete {}", render(expression)),
        D::AwaitExpression { expression } => format!("await {}", render(expression)),
        D::YieldExpression {
            expression,
            asterisk_token,
        } => {
            let mut out = String::from(if *asterisk_token { "yield*" } else { "yield" });
            if let Some(e) = expression {
                write!(out, " {}", render(e)).unwrap();
            }
            out
        }
        D::PrefixUnaryExpression { operator, operand } => {
            let operand = render(operand);
            // `- -x` must not collapse into `--x`
            let sep = if (operator == "-" || operator == "+") && operand.starts_with(operator.as_str())
            {
                " "
            } else {
                ""
            };
            format!("{operator}{sep}{operand}")
        }
        D::PostfixUnaryExpression { operator, operand } => {
            format!("{}{operator}", render(operand))
        }
        D::BinaryExpression {
            left,
            operator,
            right,
        } => {
            if operator == "," {
                format!("{}, {}", render(left), render(right))
            } else {
                format!("{} {operator} {}", render(left), render(right))
            }
        }
        D::ConditionalExpression {
            condition,
            when_true,
            when_false,
        } => format!(
            "{} ? {} : {}",
            render(condition),
            render(when_true),
            render(when_false)
        ),
        D::NonNullExpression { expression }
        | D::AsExpression { expression, .. }
        | D::SatisfiesExpression { expression, .. }
        | D::TypeAssertion { expression, .. } => render(expression),
        D::ImportExpression { expression } => format!("import({})", render(expression)),
        D::ArrowFunction {
            parameters,
            body,
            is_async,
        } => {
            let body = match body.data() {
                D::Block { .. } => braced(render(body)),
                _ => render(body),
            };
            format!(
                "{}({}) => {body}",
                if *is_async { "async " } else { "" },
                render_parameters(parameters)
            )
        }
        D::FunctionExpression {
            name,
            parameters,
            body,
            is_async,
            asterisk_token,
        } => format!(
            "{}function{} {name}({}) {}",
            if *is_async { "async " } else { "" },
            if *asterisk_token { "*" } else { "" },
            render_parameters(parameters),
            braced(render(body))
        ),
        D::TaggedTemplateExpression { tag, template } => {
            format!("{}{}", render(tag), render(template))
        }
        D::TemplateExpression {
            head,
            template_spans,
        } => {
            let mut out = format!("`{}", head.text);
            for span in template_spans {
                write!(out, "${{{}}}{}", render(&span.expression), span.literal.text).unwrap();
            }
            out.push('`');
            out
        }
        D::ArrayLiteralExpression { elements } => format!("[{}]", join(elements, ", ")),
        D::ObjectLiteralExpression { properties } => {
            if properties.is_empty() {
                "{}".to_string()
            } else {
                format!("{{{}}}", join(properties, ", "))
            }
        }
        D::PropertyAssignment { name, value } => format!("{name}: {}", render(value)),
        D::ShorthandPropertyAssignment { name, .. } => name.clone(),
        D::SpreadAssignment { expression } | D::SpreadElement { expression } => {
            format!("...{}", render(expression))
        }
        D::ObjectBindingPattern { elements } => format!("{{{}}}", join(elements, ", ")),
        D::ArrayBindingPattern { elements } => format!("[{}]", join(elements, ", ")),
        D::BindingElement {
            name,
            property_name,
            initializer,
            dot_dot_dot_token,
        } => {
            let mut out = String::new();
            if *dot_dot_dot_token {
                out.push_str("...");
            }
            if let Some(prop) = property_name {
                write!(out, "{prop}: ").unwrap();
            }
            out.push_str(name);
            if let Some(init) = initializer {
                write!(out, " = {}", render(init)).unwrap();
            }
            out
        }

        D::NumericLiteral {}
        | D::RegularExpressionLiteral {}
        | D::NoSubstitutionTemplateLiteral {}
        | D::StringLiteral {} => String::new(),
        D::TrueLiteral {} => "true".to_string(),
        D::FalseLiteral {} => "false".to_string(),
        D::NullLiteral {} => "null".to_string(),
        D::ThisKeyword {} => "this".to_string(),
        D::SuperKeyword {} => "super".to_string(),

        D::Opaque {} => serde_json::to_string(node).unwrap_or_default(),
    }
}
