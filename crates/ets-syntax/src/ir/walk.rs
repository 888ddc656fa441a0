//! Child enumeration and pre-order traversal.

use super::{Argument, Node, NodeData, Parameter};

fn push_params<'a>(out: &mut Vec<&'a Node>, params: &'a [Parameter]) {
    for param in params {
        out.extend(param.binding_pattern.as_ref());
        out.extend(param.initializer.as_ref());
    }
}

impl Node {
    /// Every child node, in field order.
    pub fn children(&self) -> Vec<&Node> {
        use NodeData as D;
        let mut out: Vec<&Node> = Vec::new();
        match self.data() {
            D::SourceFile { statements, .. }
            | D::Block { statements }
            | D::DefaultClause { statements } => out.extend(statements),

            D::ClassDeclaration { members, .. } | D::ClassExpression { members, .. } => {
                out.extend(members)
            }

            D::MethodDeclaration {
                parameters, body, ..
            }
            | D::SetAccessor {
                parameters, body, ..
            }
            | D::Constructor {
                parameters, body, ..
            }
            | D::FunctionDeclaration {
                parameters, body, ..
            } => {
                push_params(&mut out, parameters);
                out.extend(body.as_deref());
            }
            D::GetAccessor { body, .. } => out.extend(body.as_deref()),
            D::ArrowFunction {
                parameters, body, ..
            }
            | D::FunctionExpression {
                parameters, body, ..
            } => {
                push_params(&mut out, parameters);
                out.push(body);
            }

            D::PropertyDeclaration { initializer, .. }
            | D::VariableDeclaration { initializer, .. } => out.extend(initializer.as_deref()),
            D::BindingElement { initializer, .. } => out.extend(initializer.as_deref()),

            D::EnumDeclaration { members, .. } => {
                out.extend(members.iter().filter_map(|m| m.initializer.as_ref()))
            }

            D::VariableStatement {
                declaration_list, ..
            } => out.push(declaration_list),
            D::VariableDeclarationList { declarations, .. } => out.extend(declarations),

            D::ExportAssignment { expression, .. }
            | D::ExpressionStatement { expression }
            | D::ThrowStatement { expression }
            | D::ParenthesizedExpression { expression }
            | D::TypeOfExpression { expression }
            | D::VoidExpression { expression }
            | D::DeleteExpression { expression }
            | D::AwaitExpression { expression }
            | D::NonNullExpression { expression }
            | D::AsExpression { expression, .. }
            | D::SatisfiesExpression { expression, .. }
            | D::TypeAssertion { expression, .. }
            | D::ImportExpression { expression }
            | D::SpreadAssignment { expression }
            | D::SpreadElement { expression } => out.push(expression),

            D::ReturnStatement { expression } | D::YieldExpression { expression, .. } => {
                out.extend(expression.as_deref())
            }

            D::IfStatement {
                expression,
                then_statement,
                else_statement,
            } => {
                out.push(expression);
                out.push(then_statement);
                out.extend(else_statement.as_deref());
            }
            D::ForStatement {
                initializer,
                condition,
                incrementor,
                statement,
            } => {
                out.extend(initializer.as_deref());
                out.extend(condition.as_deref());
                out.extend(incrementor.as_deref());
                out.extend(statement.as_deref());
            }
            D::ForInStatement {
                initializer,
                expression,
                statement,
            }
            | D::ForOfStatement {
                initializer,
                expression,
                statement,
                ..
            } => {
                out.push(initializer);
                out.push(expression);
                out.extend(statement.as_deref());
            }
            D::WhileStatement {
                expression,
                statement,
            }
            | D::DoStatement {
                expression,
                statement,
            } => {
                out.push(expression);
                out.extend(statement.as_deref());
            }
            D::SwitchStatement {
                expression,
                case_block,
            } => {
                out.push(expression);
                out.push(case_block);
            }
            D::CaseBlock { clauses } => out.extend(clauses),
            D::CaseClause {
                expression,
                statements,
            } => {
                out.push(expression);
                out.extend(statements);
            }
            D::TryStatement {
                try_block,
                catch_clause,
                finally_block,
            } => {
                out.push(try_block);
                out.extend(catch_clause.as_deref());
                out.extend(finally_block.as_deref());
            }
            D::CatchClause {
                variable_declaration,
                block,
            } => {
                out.extend(variable_declaration.as_deref());
                out.push(block);
            }
            D::LabeledStatement { statement, .. } => out.push(statement),

            D::CallExpression {
                expression,
                arguments,
                ..
            } => {
                out.push(expression);
                out.extend(arguments.iter().filter_map(Argument::as_node));
            }
            D::ResourceReferenceExpression { expression, .. }
            | D::PropertyAccessExpression { expression, .. } => out.push(expression),
            D::ElementAccessExpression {
                expression,
                argument_expression,
                ..
            } => {
                out.push(expression);
                out.push(argument_expression);
            }
            D::NewExpression {
                expression,
                arguments,
            } => {
                out.push(expression);
                out.extend(arguments);
            }
            D::PrefixUnaryExpression { operand, .. } | D::PostfixUnaryExpression { operand, .. } => {
                out.push(operand)
            }
            D::BinaryExpression { left, right, .. } => {
                out.push(left);
                out.push(right);
            }
            D::ConditionalExpression {
                condition,
                when_true,
                when_false,
            } => {
                out.push(condition);
                out.push(when_true);
                out.push(when_false);
            }
            D::TaggedTemplateExpression { tag, template } => {
                out.push(tag);
                out.push(template);
            }
            D::TemplateExpression { template_spans, .. } => {
                out.extend(template_spans.iter().map(|span| &span.expression))
            }
            D::ArrayLiteralExpression { elements }
            | D::ObjectBindingPattern { elements }
            | D::ArrayBindingPattern { elements } => out.extend(elements),
            D::ObjectLiteralExpression { properties } => out.extend(properties),
            D::PropertyAssignment { value, .. } | D::ShorthandPropertyAssignment { value, .. } => {
                out.push(value)
            }

            D::InterfaceDeclaration { .. }
            | D::TypeAliasDeclaration { .. }
            | D::ImportDeclaration { .. }
            | D::ExportDeclaration { .. }
            | D::BreakStatement { .. }
            | D::ContinueStatement { .. }
            | D::Identifier { .. }
            | D::StringLiteral {}
            | D::NumericLiteral {}
            | D::RegularExpressionLiteral {}
            | D::NoSubstitutionTemplateLiteral {}
            | D::TrueLiteral {}
            | D::FalseLiteral {}
            | D::NullLiteral {}
            | D::ThisKeyword {}
            | D::SuperKeyword {}
            | D::EmptyStatement {}
            | D::Opaque {} => {}
        }
        out
    }

    /// Visit this node and every descendant, parents first.
    pub fn walk(&self, visit: &mut impl FnMut(&Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// First node in pre-order matching `pred`.
    pub fn find(&self, pred: &impl Fn(&Node) -> bool) -> Option<&Node> {
        if pred(self) {
            return Some(self);
        }
        self.children().into_iter().find_map(|child| child.find(pred))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Node {
        Node::new(NodeData::Identifier { name: name.into() }).with_text(name)
    }

    #[test]
    fn walk_visits_in_pre_order() {
        let tree = Node::new(NodeData::BinaryExpression {
            left: Box::new(ident("a")),
            operator: "+".into(),
            right: Box::new(ident("b")),
        });
        let mut seen = Vec::new();
        tree.walk(&mut |n| seen.push(n.name().unwrap_or(n.kind_name()).to_string()));
        assert_eq!(seen, ["BinaryExpression", "a", "b"]);
    }

    #[test]
    fn flattened_call_arguments_are_not_children() {
        let call = Node::new(NodeData::CallExpression {
            expression: Box::new(ident("f")),
            arguments: vec![
                Argument::Text("1".into()),
                Argument::Node(Box::new(ident("x"))),
            ],
            question_dot_token: false,
            is_chained_call: false,
            is_special_component: false,
            component_name: None,
            method_name: None,
        });
        let names: Vec<_> = call.children().iter().filter_map(|c| c.name()).collect();
        assert_eq!(names, ["f", "x"]);
    }
}
