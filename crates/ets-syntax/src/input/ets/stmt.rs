//! Statements and control flow.

use super::ReadContext;
use crate::ir::{DeclarationKind, Node, NodeData};
use crate::traits::ReadError;
use tree_sitter::Node as TsNode;

impl<'a> ReadContext<'a> {
    fn read_optional(&self, node: Option<TsNode>) -> Result<Option<Box<Node>>, ReadError> {
        node.map(|n| self.boxed(n)).transpose()
    }

    /// The expression inside `( ... )` conditions.
    fn unwrap_parens<'t>(&self, node: TsNode<'t>) -> TsNode<'t> {
        if node.kind() == "parenthesized_expression" {
            if let Some(inner) = self.first_named_child(node) {
                return inner;
            }
        }
        node
    }

    fn condition(&self, node: TsNode, field: &str) -> Result<Box<Node>, ReadError> {
        let cond = self.field(node, field)?;
        self.boxed(self.unwrap_parens(cond))
    }

    pub(super) fn read_block(&self, node: TsNode) -> Result<Node, ReadError> {
        Ok(Node::new(NodeData::Block {
            statements: self.read_statements(node)?,
        }))
    }

    pub(super) fn read_expression_statement(&self, node: TsNode) -> Result<Node, ReadError> {
        let inner = self
            .first_named_child(node)
            .ok_or_else(|| ReadError::UnexpectedNode {
                expected: "expression".into(),
                got: self.node_text(node).to_string(),
            })?;
        Ok(Node::new(NodeData::ExpressionStatement {
            expression: self.boxed(inner)?,
        }))
    }

    pub(super) fn read_return(&self, node: TsNode) -> Result<Node, ReadError> {
        Ok(Node::new(NodeData::ReturnStatement {
            expression: self.read_optional(self.first_named_child(node))?,
        }))
    }

    pub(super) fn read_throw(&self, node: TsNode) -> Result<Node, ReadError> {
        let inner = self
            .first_named_child(node)
            .ok_or_else(|| ReadError::UnexpectedNode {
                expected: "thrown expression".into(),
                got: self.node_text(node).to_string(),
            })?;
        let throw = Node::new(NodeData::ThrowStatement {
            expression: self.boxed(inner)?,
        });
        Ok(self.materialize(throw))
    }

    pub(super) fn read_if(&self, node: TsNode) -> Result<Node, ReadError> {
        let else_statement = match node.child_by_field_name("alternative") {
            // else_clause wraps the statement
            Some(clause) => self.read_optional(self.first_named_child(clause))?,
            None => None,
        };
        Ok(Node::new(NodeData::IfStatement {
            expression: self.condition(node, "condition")?,
            then_statement: self.boxed(self.field(node, "consequence")?)?,
            else_statement,
        }))
    }

    /// Initializer or condition slot of a C-style `for`.
    fn read_for_clause(&self, node: Option<TsNode>) -> Result<Option<Box<Node>>, ReadError> {
        let Some(node) = node else {
            return Ok(None);
        };
        match node.kind() {
            "lexical_declaration" | "variable_declaration" => {
                Ok(Some(Box::new(self.read_declaration_list(node)?)))
            }
            "expression_statement" => self.read_optional(self.first_named_child(node)),
            "empty_statement" | ";" => Ok(None),
            _ => self.boxed(node).map(Some),
        }
    }

    pub(super) fn read_for(&self, node: TsNode) -> Result<Node, ReadError> {
        let for_stmt = Node::new(NodeData::ForStatement {
            initializer: self.read_for_clause(node.child_by_field_name("initializer"))?,
            condition: self.read_for_clause(node.child_by_field_name("condition"))?,
            incrementor: self.read_optional(node.child_by_field_name("increment"))?,
            statement: self.read_optional(node.child_by_field_name("body"))?,
        });
        Ok(self.materialize(for_stmt))
    }

    /// `for (... in ...)` and `for (... of ...)`.
    pub(super) fn read_for_in(&self, node: TsNode) -> Result<Node, ReadError> {
        let left = self.field(node, "left")?;
        let initializer = match node.child_by_field_name("kind") {
            Some(kind) => Node::new(NodeData::VariableDeclarationList {
                declaration_kind: DeclarationKind::from_keyword(self.node_text(kind)),
                declarations: vec![Node::new(NodeData::VariableDeclaration {
                    name: self.node_text(left).to_string(),
                    type_annotation: String::new(),
                    initializer: None,
                })],
            }),
            None => self.read_node(left)?,
        };
        let expression = self.boxed(self.field(node, "right")?)?;
        let statement = self.read_optional(node.child_by_field_name("body"))?;

        let is_of = node
            .child_by_field_name("operator")
            .is_some_and(|op| self.node_text(op) == "of");
        let data = if is_of {
            NodeData::ForOfStatement {
                initializer: Box::new(initializer),
                expression,
                statement,
                await_modifier: self.has_token(node, "await"),
            }
        } else {
            NodeData::ForInStatement {
                initializer: Box::new(initializer),
                expression,
                statement,
            }
        };
        Ok(self.materialize(Node::new(data)))
    }

    pub(super) fn read_while(&self, node: TsNode) -> Result<Node, ReadError> {
        let while_stmt = Node::new(NodeData::WhileStatement {
            expression: self.condition(node, "condition")?,
            statement: self.read_optional(node.child_by_field_name("body"))?,
        });
        Ok(self.materialize(while_stmt))
    }

    pub(super) fn read_do(&self, node: TsNode) -> Result<Node, ReadError> {
        let do_stmt = Node::new(NodeData::DoStatement {
            expression: self.condition(node, "condition")?,
            statement: self.read_optional(node.child_by_field_name("body"))?,
        });
        Ok(self.materialize(do_stmt))
    }

    pub(super) fn read_switch(&self, node: TsNode) -> Result<Node, ReadError> {
        let body = self.field(node, "body")?;
        let mut clauses = Vec::new();
        for clause in self.named_children(body) {
            match clause.kind() {
                "switch_case" => {
                    let value = self.field(clause, "value")?;
                    let mut statements = Vec::new();
                    let mut chained = false;
                    for stmt in self.named_children(clause) {
                        if stmt.id() != value.id() {
                            self.push_statement(stmt, false, &mut chained, &mut statements)?;
                        }
                    }
                    clauses.push(Node::new(NodeData::CaseClause {
                        expression: self.boxed(value)?,
                        statements,
                    }));
                }
                "switch_default" => {
                    clauses.push(Node::new(NodeData::DefaultClause {
                        statements: self.read_statements(clause)?,
                    }));
                }
                _ => {}
            }
        }

        let switch = Node::new(NodeData::SwitchStatement {
            expression: self.condition(node, "value")?,
            case_block: Box::new(Node::new(NodeData::CaseBlock { clauses })),
        });
        Ok(self.materialize(switch))
    }

    pub(super) fn read_try(&self, node: TsNode) -> Result<Node, ReadError> {
        let try_block = Box::new(self.read_block(self.field(node, "body")?)?);

        let catch_clause = match node.child_by_field_name("handler") {
            Some(handler) => {
                let variable_declaration = handler.child_by_field_name("parameter").map(|p| {
                    Box::new(Node::new(NodeData::VariableDeclaration {
                        name: self.node_text(p).to_string(),
                        type_annotation: self.type_text(handler.child_by_field_name("type")),
                        initializer: None,
                    }))
                });
                Some(Box::new(Node::new(NodeData::CatchClause {
                    variable_declaration,
                    block: Box::new(self.read_block(self.field(handler, "body")?)?),
                })))
            }
            None => None,
        };

        let finally_block = match node.child_by_field_name("finalizer") {
            Some(finalizer) => Some(Box::new(self.read_block(self.field(finalizer, "body")?)?)),
            None => None,
        };

        let try_stmt = Node::new(NodeData::TryStatement {
            try_block,
            catch_clause,
            finally_block,
        });
        Ok(self.materialize(try_stmt))
    }

    /// `break` or `continue` with an optional label.
    pub(super) fn read_jump(&self, node: TsNode, is_break: bool) -> Node {
        let label = node
            .child_by_field_name("label")
            .map(|l| self.node_text(l).to_string());
        if is_break {
            Node::new(NodeData::BreakStatement { label })
        } else {
            Node::new(NodeData::ContinueStatement { label })
        }
    }

    pub(super) fn read_labeled(&self, node: TsNode) -> Result<Node, ReadError> {
        Ok(Node::new(NodeData::LabeledStatement {
            label: self.node_text(self.field(node, "label")?).to_string(),
            statement: self.boxed(self.field(node, "body")?)?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::input::ets::read_ets;
    use crate::ir::{DeclarationKind, Node, NodeData};
    use crate::pipeline::ParseOptions;

    fn first(code: &str) -> Node {
        let root = read_ets(code, "test.ets", &ParseOptions::default()).unwrap();
        match root.data() {
            NodeData::SourceFile { statements, .. } => statements[0].clone(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn if_condition_is_unwrapped() {
        let stmt = first("if (a) { b(); } else c();\n");
        let NodeData::IfStatement {
            expression,
            else_statement,
            ..
        } = stmt.data()
        else {
            panic!("expected if");
        };
        assert_eq!(expression.kind_name(), "Identifier");
        assert_eq!(
            else_statement.as_ref().map(|e| e.kind_name()),
            Some("ExpressionStatement")
        );
    }

    #[test]
    fn for_slots() {
        let stmt = first("for (let i = 0; i < n; i++) { work(i); }\n");
        let NodeData::ForStatement {
            initializer,
            condition,
            incrementor,
            statement,
        } = stmt.data()
        else {
            panic!("expected for");
        };
        assert_eq!(
            initializer.as_ref().map(|n| n.kind_name()),
            Some("VariableDeclarationList")
        );
        assert_eq!(
            condition.as_ref().map(|n| n.kind_name()),
            Some("BinaryExpression")
        );
        assert_eq!(
            incrementor.as_ref().map(|n| n.kind_name()),
            Some("PostfixUnaryExpression")
        );
        assert!(statement.is_some());
        assert!(stmt.text().is_some_and(|t| t.starts_with("for (let i = 0; i < n; i++)")));
    }

    #[test]
    fn empty_for_slots() {
        let stmt = first("for (;;) {}\n");
        let NodeData::ForStatement {
            initializer,
            condition,
            incrementor,
            ..
        } = stmt.data()
        else {
            panic!("expected for");
        };
        assert!(initializer.is_none() && condition.is_none() && incrementor.is_none());
    }

    #[test]
    fn for_of_declaration_kind() {
        let stmt = first("for await (let x of xs) {}\n");
        let NodeData::ForOfStatement {
            initializer,
            await_modifier,
            ..
        } = stmt.data()
        else {
            panic!("expected for-of");
        };
        assert!(await_modifier);
        assert!(matches!(
            initializer.data(),
            NodeData::VariableDeclarationList {
                declaration_kind: DeclarationKind::Let,
                ..
            }
        ));
    }

    #[test]
    fn switch_clauses() {
        let stmt = first("switch (k) { case 1: a(); case 2: break; default: b(); }\n");
        let NodeData::SwitchStatement { case_block, .. } = stmt.data() else {
            panic!("expected switch");
        };
        let kinds: Vec<_> = case_block.children().iter().map(|c| c.kind_name()).collect();
        assert_eq!(kinds, ["CaseClause", "CaseClause", "DefaultClause"]);
    }

    #[test]
    fn catch_without_binding() {
        let stmt = first("try { a(); } catch { b(); }\n");
        let NodeData::TryStatement {
            catch_clause: Some(clause),
            finally_block,
            ..
        } = stmt.data()
        else {
            panic!("expected try");
        };
        assert!(finally_block.is_none());
        assert!(matches!(
            clause.data(),
            NodeData::CatchClause {
                variable_declaration: None,
                ..
            }
        ));
    }

    #[test]
    fn labeled_continue() {
        let stmt = first("outer: for (;;) { continue outer; }\n");
        assert!(matches!(
            stmt.data(),
            NodeData::LabeledStatement { label, .. } if label == "outer"
        ));
        let cont = stmt.find(&|n| n.kind_name() == "ContinueStatement").unwrap();
        assert!(matches!(
            cont.data(),
            NodeData::ContinueStatement { label: Some(l) } if l == "outer"
        ));
    }
}
