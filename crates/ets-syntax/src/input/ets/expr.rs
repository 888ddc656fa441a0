//! Expressions, literals and binding patterns.

use super::ReadContext;
use crate::ir::{Argument, Node, NodeData, Parameter, TemplateSpan, TemplateText};
use crate::kind::SyntaxKind;
use crate::resource::ResourceRefType;
use crate::traits::ReadError;
use tree_sitter::Node as TsNode;

/// Built-in components whose arguments stay structured.
const SPECIAL_COMPONENTS: &[&str] = &["ForEach", "If"];

/// Re-quote a string literal with double quotes, keeping its escapes.
fn double_quoted(raw: &str) -> String {
    let quote = raw.chars().next();
    if !matches!(quote, Some('"' | '\'')) {
        return format!("\"{raw}\"");
    }
    let inner = &raw[1..raw.len().saturating_sub(1).max(1)];
    if quote == Some('"') {
        return format!("\"{inner}\"");
    }

    let mut out = String::with_capacity(inner.len() + 2);
    out.push('"');
    let mut escaped = false;
    for c in inner.chars() {
        match c {
            '"' if !escaped => out.push_str("\\\""),
            '\'' if escaped => {
                out.pop();
                out.push('\'');
            }
            _ => out.push(c),
        }
        escaped = c == '\\' && !escaped;
    }
    out.push('"');
    out
}

/// Innermost identifier of a call chain such as `Text(a).fontSize(1)`.
fn chain_root(mut node: &Node) -> Option<String> {
    loop {
        match node.data() {
            NodeData::CallExpression { expression, .. }
            | NodeData::PropertyAccessExpression { expression, .. } => node = expression,
            NodeData::Identifier { name } => return Some(name.clone()),
            _ => return None,
        }
    }
}

/// Component name and method for a callee like `Text(..).fontSize`.
fn chained_member(callee: &Node) -> Option<(Option<String>, String)> {
    match callee.data() {
        NodeData::PropertyAccessExpression {
            expression: target,
            name,
            ..
        } if target.syntax_kind() == Some(SyntaxKind::CallExpression) => {
            Some((chain_root(target), name.clone()))
        }
        _ => None,
    }
}

impl<'a> ReadContext<'a> {
    /// Rebuild the call chain `chain` with `receiver` in place of its root
    /// identifier, so `width(1).height(2)` on `Column()` becomes
    /// `Column().width(1).height(2)`. `None` if the chain has no identifier
    /// root.
    pub(super) fn rebase_chain(&self, chain: &Node, receiver: Node) -> Option<Node> {
        match chain.data() {
            NodeData::Identifier { name } => {
                let access = Node::new(NodeData::PropertyAccessExpression {
                    expression: Box::new(receiver),
                    name: name.clone(),
                    question_dot_token: false,
                });
                Some(self.materialize(access))
            }
            NodeData::PropertyAccessExpression {
                expression,
                name,
                question_dot_token,
            } => {
                let access = Node::new(NodeData::PropertyAccessExpression {
                    expression: Box::new(self.rebase_chain(expression, receiver)?),
                    name: name.clone(),
                    question_dot_token: *question_dot_token,
                });
                Some(self.materialize(access))
            }
            NodeData::CallExpression {
                expression,
                arguments,
                question_dot_token,
                is_special_component,
                ..
            } => {
                let callee = self.rebase_chain(expression, receiver)?;
                let (component_name, method_name) = chained_member(&callee)
                    .map(|(root, method)| (root, Some(method)))
                    .unwrap_or_default();
                Some(Node::new(NodeData::CallExpression {
                    is_chained_call: method_name.is_some(),
                    expression: Box::new(callee),
                    arguments: arguments.clone(),
                    question_dot_token: *question_dot_token,
                    is_special_component: *is_special_component,
                    component_name,
                    method_name,
                }))
            }
            _ => None,
        }
    }

    fn expect_child<'t>(&self, node: TsNode<'t>, what: &str) -> Result<TsNode<'t>, ReadError> {
        self.first_named_child(node)
            .ok_or_else(|| ReadError::UnexpectedNode {
                expected: what.to_string(),
                got: self.node_text(node).to_string(),
            })
    }

    fn has_optional_chain(&self, node: TsNode) -> bool {
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .any(|c| c.kind() == "optional_chain" || c.kind() == "?.");
        found
    }

    pub(super) fn read_expr(&self, node: TsNode) -> Result<Node, ReadError> {
        let text = self.node_text(node);
        let converted = match node.kind() {
            "identifier"
            | "property_identifier"
            | "private_property_identifier"
            | "shorthand_property_identifier"
            | "shorthand_property_identifier_pattern"
            | "statement_identifier"
            | "type_identifier"
            | "undefined" => Node::new(NodeData::Identifier {
                name: text.to_string(),
            })
            .with_text(text),
            "this" => Node::new(NodeData::ThisKeyword {}).with_text(text),
            "super" => Node::new(NodeData::SuperKeyword {}).with_text(text),
            "true" => Node::new(NodeData::TrueLiteral {}).with_text(text),
            "false" => Node::new(NodeData::FalseLiteral {}).with_text(text),
            "null" => Node::new(NodeData::NullLiteral {}).with_text(text),
            "number" => Node::new(NodeData::NumericLiteral {}).with_text(text),
            "regex" => Node::new(NodeData::RegularExpressionLiteral {}).with_text(text),
            "string" => Node::new(NodeData::StringLiteral {}).with_text(double_quoted(text)),
            "template_string" => self.read_template(node)?,

            "call_expression" => self.read_call(node)?,
            "member_expression" => self.read_member(node)?,
            "subscript_expression" => self.read_subscript(node)?,
            "new_expression" => self.read_new(node)?,
            "parenthesized_expression" => Node::new(NodeData::ParenthesizedExpression {
                expression: self.boxed(self.expect_child(node, "expression")?)?,
            }),
            "unary_expression" => self.read_unary(node)?,
            "update_expression" => self.read_update(node)?,
            "binary_expression" | "augmented_assignment_expression" => {
                Node::new(NodeData::BinaryExpression {
                    left: self.boxed(self.field(node, "left")?)?,
                    operator: self.node_text(self.field(node, "operator")?).to_string(),
                    right: self.boxed(self.field(node, "right")?)?,
                })
            }
            "assignment_expression" => Node::new(NodeData::BinaryExpression {
                left: self.boxed(self.field(node, "left")?)?,
                operator: "=".into(),
                right: self.boxed(self.field(node, "right")?)?,
            }),
            "sequence_expression" => self.read_sequence(node)?,
            "ternary_expression" => Node::new(NodeData::ConditionalExpression {
                condition: self.boxed(self.field(node, "condition")?)?,
                when_true: self.boxed(self.field(node, "consequence")?)?,
                when_false: self.boxed(self.field(node, "alternative")?)?,
            }),
            "await_expression" => Node::new(NodeData::AwaitExpression {
                expression: self.boxed(self.expect_child(node, "awaited expression")?)?,
            }),
            "yield_expression" => Node::new(NodeData::YieldExpression {
                expression: match self.first_named_child(node) {
                    Some(inner) => Some(self.boxed(inner)?),
                    None => None,
                },
                asterisk_token: self.has_token(node, "*"),
            }),

            "array" => Node::new(NodeData::ArrayLiteralExpression {
                elements: self.read_list(node)?,
            }),
            "object" => self.read_object(node)?,
            "pair" => Node::new(NodeData::PropertyAssignment {
                name: self.node_text(self.field(node, "key")?).to_string(),
                value: self.boxed(self.field(node, "value")?)?,
            }),
            "spread_element" => Node::new(NodeData::SpreadElement {
                expression: self.boxed(self.expect_child(node, "spread operand")?)?,
            }),

            "arrow_function" => self.read_arrow(node)?,
            "function_expression" | "function" | "generator_function" => {
                self.read_function_expression(node)?
            }
            "class" => self.read_class_expression(node)?,

            "as_expression" | "satisfies_expression" => self.read_type_cast(node)?,
            "non_null_expression" => {
                let non_null = Node::new(NodeData::NonNullExpression {
                    expression: self.boxed(self.expect_child(node, "expression")?)?,
                });
                self.materialize(non_null)
            }
            "type_assertion" => self.read_type_assertion(node)?,
            "instantiation_expression" => self.read_node(self.expect_child(node, "expression")?)?,

            "object_pattern" | "array_pattern" => self.read_binding_pattern(node)?,

            _ => self.opaque(node),
        };
        Ok(converted)
    }

    fn read_list(&self, node: TsNode) -> Result<Vec<Node>, ReadError> {
        self.named_children(node)
            .into_iter()
            .map(|child| self.read_node(child))
            .collect()
    }

    fn read_template(&self, node: TsNode) -> Result<Node, ReadError> {
        let subs: Vec<TsNode> = self
            .named_children(node)
            .into_iter()
            .filter(|c| c.kind() == "template_substitution")
            .collect();
        if subs.is_empty() {
            return Ok(
                Node::new(NodeData::NoSubstitutionTemplateLiteral {}).with_text(self.node_text(node))
            );
        }

        let close = node.end_byte().saturating_sub(1);
        let head = self.slice(node.start_byte() + 1, subs[0].start_byte());
        let mut template_spans = Vec::with_capacity(subs.len());
        for (i, sub) in subs.iter().enumerate() {
            let literal_end = subs.get(i + 1).map_or(close, |next| next.start_byte());
            template_spans.push(TemplateSpan {
                expression: self.read_node(self.expect_child(*sub, "substitution")?)?,
                literal: TemplateText {
                    text: self.slice(sub.end_byte(), literal_end).to_string(),
                },
            });
        }

        let template = Node::new(NodeData::TemplateExpression {
            head: TemplateText {
                text: head.to_string(),
            },
            template_spans,
        });
        Ok(self.materialize(template))
    }

    fn read_call(&self, node: TsNode) -> Result<Node, ReadError> {
        let callee = self.field(node, "function")?;
        let args = node.child_by_field_name("arguments");

        if let Some(template) = args.filter(|a| a.kind() == "template_string") {
            return Ok(Node::new(NodeData::TaggedTemplateExpression {
                tag: self.boxed(callee)?,
                template: self.boxed(template)?,
            }));
        }

        let arg_nodes = args.map(|a| self.named_children(a)).unwrap_or_default();

        if callee.kind() == "import" {
            let specifier = arg_nodes.first().copied().ok_or_else(|| ReadError::UnexpectedNode {
                expected: "module specifier".into(),
                got: self.node_text(node).to_string(),
            })?;
            let import = Node::new(NodeData::ImportExpression {
                expression: self.boxed(specifier)?,
            });
            return Ok(self.materialize(import));
        }

        let expression = self.boxed(callee)?;
        let callee_name = match expression.data() {
            NodeData::Identifier { name } => Some(name.clone()),
            _ => None,
        };

        if let Some(resource_ref_type) = callee_name.as_deref().and_then(ResourceRefType::from_callee)
        {
            return Ok(Node::new(NodeData::ResourceReferenceExpression {
                expression,
                arguments: arg_nodes
                    .iter()
                    .map(|a| self.node_text(*a).to_string())
                    .collect(),
                resource_ref_type,
            }));
        }

        let is_special_component = callee_name
            .as_deref()
            .is_some_and(|name| SPECIAL_COMPONENTS.contains(&name));
        let keep_nodes = callee_name.as_deref() == Some("ForEach");

        let mut arguments = Vec::with_capacity(arg_nodes.len());
        for arg in arg_nodes {
            let converted = self.read_node(arg)?;
            arguments.push(if keep_nodes {
                Argument::Node(Box::new(converted))
            } else {
                self.flatten_argument(arg, converted)
            });
        }

        let (is_chained_call, component_name, method_name) = match chained_member(&expression) {
            Some((root, method)) => (true, root, Some(method)),
            None if is_special_component => (false, callee_name.clone(), None),
            None => (false, None, None),
        };

        Ok(Node::new(NodeData::CallExpression {
            expression,
            arguments,
            question_dot_token: self.has_optional_chain(node),
            is_chained_call,
            is_special_component,
            component_name,
            method_name,
        }))
    }

    /// Flatten a call argument to text unless it is a literal container or
    /// a function.
    ///
    /// Flattened arguments keep their source text, so a resource reference
    /// nested in another call, as in `Image($r('app.media.icon'))`, is not
    /// resolved.
    fn flatten_argument(&self, raw: TsNode, converted: Node) -> Argument {
        use SyntaxKind as K;
        match converted.syntax_kind() {
            Some(
                K::ObjectLiteralExpression
                | K::ArrayLiteralExpression
                | K::ArrowFunction
                | K::FunctionExpression,
            ) => return Argument::Node(Box::new(converted)),
            Some(K::StringLiteral) => {
                let text = converted.text().unwrap_or_default();
                return Argument::Text(if text.starts_with(['"', '\'']) {
                    text.to_string()
                } else {
                    format!("\"{text}\"")
                });
            }
            _ => {}
        }
        if let Some(text) = converted.text() {
            return Argument::Text(text.to_string());
        }
        let source = self.node_text(raw);
        if !source.is_empty() {
            return Argument::Text(source.to_string());
        }
        tracing::debug!(kind = converted.kind_name(), "argument has no source text");
        Argument::Text(serde_json::to_string(&converted).unwrap_or_default())
    }

    fn read_member(&self, node: TsNode) -> Result<Node, ReadError> {
        let access = Node::new(NodeData::PropertyAccessExpression {
            expression: self.boxed(self.field(node, "object")?)?,
            name: self.node_text(self.field(node, "property")?).to_string(),
            question_dot_token: self.has_optional_chain(node),
        });
        Ok(self.materialize(access))
    }

    fn read_subscript(&self, node: TsNode) -> Result<Node, ReadError> {
        let access = Node::new(NodeData::ElementAccessExpression {
            expression: self.boxed(self.field(node, "object")?)?,
            argument_expression: self.boxed(self.field(node, "index")?)?,
            question_dot_token: self.has_optional_chain(node),
        });
        Ok(self.materialize(access))
    }

    fn read_new(&self, node: TsNode) -> Result<Node, ReadError> {
        let arguments = match node.child_by_field_name("arguments") {
            Some(args) => self.read_list(args)?,
            None => Vec::new(),
        };
        Ok(Node::new(NodeData::NewExpression {
            expression: self.boxed(self.field(node, "constructor")?)?,
            arguments,
        }))
    }

    fn read_unary(&self, node: TsNode) -> Result<Node, ReadError> {
        let operator = self.node_text(self.field(node, "operator")?);
        let expression = self.boxed(self.field(node, "argument")?)?;
        Ok(Node::new(match operator {
            "typeof" => NodeData::TypeOfExpression { expression },
            "void" => NodeData::VoidExpression { expression },
            "delete" => NodeData::DeleteExpression { expression },
            _ => NodeData::PrefixUnaryExpression {
                operator: operator.to_string(),
                operand: expression,
            },
        }))
    }

    fn read_update(&self, node: TsNode) -> Result<Node, ReadError> {
        let operator = self.field(node, "operator")?;
        let argument = self.field(node, "argument")?;
        let op = self.node_text(operator).to_string();
        let operand = self.boxed(argument)?;
        Ok(Node::new(if operator.start_byte() < argument.start_byte() {
            NodeData::PrefixUnaryExpression {
                operator: op,
                operand,
            }
        } else {
            NodeData::PostfixUnaryExpression {
                operator: op,
                operand,
            }
        }))
    }

    /// `a, b, c` as left-nested comma operators.
    fn read_sequence(&self, node: TsNode) -> Result<Node, ReadError> {
        let mut parts = self.read_list(node)?.into_iter();
        let mut acc = parts.next().ok_or_else(|| ReadError::UnexpectedNode {
            expected: "sequence operand".into(),
            got: self.node_text(node).to_string(),
        })?;
        for right in parts {
            acc = Node::new(NodeData::BinaryExpression {
                left: Box::new(acc),
                operator: ",".into(),
                right: Box::new(right),
            });
        }
        Ok(acc)
    }

    fn read_object(&self, node: TsNode) -> Result<Node, ReadError> {
        let mut properties = Vec::new();
        for prop in self.named_children(node) {
            let converted = match prop.kind() {
                "shorthand_property_identifier" => {
                    let name = self.node_text(prop);
                    Node::new(NodeData::ShorthandPropertyAssignment {
                        name: name.to_string(),
                        value: self.boxed(prop)?,
                    })
                }
                "spread_element" => Node::new(NodeData::SpreadAssignment {
                    expression: self.boxed(self.expect_child(prop, "spread operand")?)?,
                }),
                _ => self.read_node(prop)?,
            };
            properties.push(converted);
        }
        let object = Node::new(NodeData::ObjectLiteralExpression { properties });
        Ok(self.materialize(object))
    }

    fn read_arrow(&self, node: TsNode) -> Result<Node, ReadError> {
        let parameters = match (
            node.child_by_field_name("parameters"),
            node.child_by_field_name("parameter"),
        ) {
            (Some(params), _) => self.read_parameters(params)?,
            (None, Some(single)) => vec![Parameter {
                name: self.node_text(single).to_string(),
                ..Parameter::default()
            }],
            (None, None) => Vec::new(),
        };
        let arrow = Node::new(NodeData::ArrowFunction {
            parameters,
            body: self.boxed(self.field(node, "body")?)?,
            is_async: self.has_token(node, "async"),
        });
        Ok(self.materialize(arrow))
    }

    fn read_function_expression(&self, node: TsNode) -> Result<Node, ReadError> {
        let parameters = match node.child_by_field_name("parameters") {
            Some(params) => self.read_parameters(params)?,
            None => Vec::new(),
        };
        let function = Node::new(NodeData::FunctionExpression {
            name: node
                .child_by_field_name("name")
                .map(|n| self.node_text(n).to_string())
                .unwrap_or_default(),
            parameters,
            body: Box::new(self.read_block(self.field(node, "body")?)?),
            is_async: self.has_token(node, "async"),
            asterisk_token: node.kind() == "generator_function" || self.has_token(node, "*"),
        });
        Ok(self.materialize(function))
    }

    /// `x as T` and `x satisfies T`.
    fn read_type_cast(&self, node: TsNode) -> Result<Node, ReadError> {
        let children = self.named_children(node);
        let (Some(value), Some(ty)) = (children.first(), children.last()) else {
            return Ok(self.opaque(node));
        };
        let expression = self.boxed(*value)?;
        let type_annotation = self.node_text(*ty).to_string();
        let cast = if node.kind() == "as_expression" {
            NodeData::AsExpression {
                expression,
                type_annotation,
            }
        } else {
            NodeData::SatisfiesExpression {
                expression,
                type_annotation,
            }
        };
        Ok(self.materialize(Node::new(cast)))
    }

    /// `<T>x`.
    fn read_type_assertion(&self, node: TsNode) -> Result<Node, ReadError> {
        let children = self.named_children(node);
        let (Some(ty), Some(value)) = (children.first(), children.last()) else {
            return Ok(self.opaque(node));
        };
        let assertion = Node::new(NodeData::TypeAssertion {
            expression: self.boxed(*value)?,
            type_annotation: self
                .node_text(*ty)
                .trim_start_matches('<')
                .trim_end_matches('>')
                .to_string(),
        });
        Ok(self.materialize(assertion))
    }

    pub(super) fn read_binding_pattern(&self, node: TsNode) -> Result<Node, ReadError> {
        let mut elements = Vec::new();
        for part in self.named_children(node) {
            elements.push(self.read_binding_element(part)?);
        }
        Ok(Node::new(if node.kind() == "object_pattern" {
            NodeData::ObjectBindingPattern { elements }
        } else {
            NodeData::ArrayBindingPattern { elements }
        }))
    }

    fn read_binding_element(&self, node: TsNode) -> Result<Node, ReadError> {
        let mut property_name = None;
        let mut initializer = None;
        let mut dot_dot_dot_token = false;
        let target = match node.kind() {
            "pair_pattern" => {
                property_name = Some(self.node_text(self.field(node, "key")?).to_string());
                let value = self.field(node, "value")?;
                if value.kind() == "assignment_pattern" {
                    initializer = Some(self.boxed(self.field(value, "right")?)?);
                    self.field(value, "left")?
                } else {
                    value
                }
            }
            "object_assignment_pattern" | "assignment_pattern" => {
                initializer = Some(self.boxed(self.field(node, "right")?)?);
                self.field(node, "left")?
            }
            "rest_pattern" => {
                dot_dot_dot_token = true;
                self.expect_child(node, "rest target")?
            }
            _ => node,
        };
        Ok(Node::new(NodeData::BindingElement {
            name: self.node_text(target).to_string(),
            property_name,
            initializer,
            dot_dot_dot_token,
        }))
    }
}
