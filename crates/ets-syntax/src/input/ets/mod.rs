//! Tree-sitter based ETS reader.
//!
//! The source is preprocessed (structs become classes), parsed with the
//! TypeScript grammar, and converted to IR in one top-down pass. Nodes whose
//! output depends on regenerated text get it rendered immediately through the
//! [`Writer`] handed to the reader.

mod decl;
mod expr;
mod stmt;

use crate::ir::{Node, NodeData};
use crate::output::JsWriter;
use crate::pipeline::ParseOptions;
use crate::preprocess::{Preprocessed, preprocess};
use crate::kind::SyntaxKind;
use crate::traits::{ReadError, Reader, Writer};
use tree_sitter::{Node as TsNode, Parser, Tree};

/// Static instance of the ETS reader.
pub static ETS_READER: EtsReader = EtsReader;

/// ETS reader using tree-sitter.
pub struct EtsReader;

impl Reader for EtsReader {
    fn language(&self) -> &'static str {
        "ets"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["ets"]
    }

    fn read(
        &self,
        source: &str,
        file_name: &str,
        options: &ParseOptions,
    ) -> Result<Node, ReadError> {
        read_ets(source, file_name, options)
    }
}

/// Parse ETS source into IR, rendering eager text with [`JsWriter`].
pub fn read_ets(source: &str, file_name: &str, options: &ParseOptions) -> Result<Node, ReadError> {
    read_ets_with(source, file_name, options, &JsWriter)
}

/// Parse ETS source into IR, rendering eager text with `writer`.
pub fn read_ets_with(
    source: &str,
    file_name: &str,
    options: &ParseOptions,
    writer: &dyn Writer,
) -> Result<Node, ReadError> {
    let preprocessed = preprocess(source);
    tracing::debug!(
        file = file_name,
        structs = preprocessed.structs.len(),
        "preprocessed source"
    );

    let tree = parse(&preprocessed.code)?;
    let root = tree.root_node();

    if root.has_error() {
        if let Some(bad) = first_syntax_error(root) {
            let pos = bad.start_position();
            let (line, column) = (pos.row + 1, pos.column + 1);
            if options.strict {
                return Err(ReadError::Syntax {
                    line,
                    column,
                    snippet: describe_error(bad, &preprocessed.code),
                });
            }
            tracing::warn!(
                file = file_name,
                line,
                column,
                "source has syntax errors; converting best-effort"
            );
        }
    }

    let ctx = ReadContext::new(&preprocessed, writer);
    ctx.read_source_file(root, file_name)
}

fn parse(code: &str) -> Result<Tree, ReadError> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_typescript::language().into())
        .map_err(|err| ReadError::Language(err.to_string()))?;

    parser
        .parse(code, None)
        .ok_or_else(|| ReadError::Parse("parser returned no tree".into()))
}

fn first_syntax_error(node: TsNode) -> Option<TsNode> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_syntax_error(child) {
            return Some(found);
        }
    }
    None
}

fn describe_error(node: TsNode, code: &str) -> String {
    if node.is_missing() {
        return format!("missing `{}`", node.kind());
    }
    let text = node.utf8_text(code.as_bytes()).unwrap_or("");
    let first_line = text.lines().next().unwrap_or("");
    let snippet: String = first_line.chars().take(40).collect();
    format!("unexpected `{snippet}`")
}

/// Export context for a declaration wrapped in `export_statement`.
#[derive(Default)]
pub(super) struct Export<'t> {
    pub decorators: Vec<TsNode<'t>>,
    pub is_export: bool,
    pub is_default: bool,
}

pub(super) struct ReadContext<'a> {
    source: &'a str,
    preprocessed: &'a Preprocessed,
    writer: &'a dyn Writer,
}

impl<'a> ReadContext<'a> {
    fn new(preprocessed: &'a Preprocessed, writer: &'a dyn Writer) -> Self {
        Self {
            source: &preprocessed.code,
            preprocessed,
            writer,
        }
    }

    fn node_text(&self, node: TsNode) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Source text between two byte offsets.
    fn slice(&self, start: usize, end: usize) -> &'a str {
        self.source.get(start..end).unwrap_or("")
    }

    fn field<'t>(&self, node: TsNode<'t>, name: &str) -> Result<TsNode<'t>, ReadError> {
        node.child_by_field_name(name)
            .ok_or_else(|| ReadError::UnexpectedNode {
                expected: format!("`{name}` of {}", node.kind()),
                got: self.node_text(node).chars().take(40).collect(),
            })
    }

    /// Named children, without comments.
    fn named_children<'t>(&self, node: TsNode<'t>) -> Vec<TsNode<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|child| !is_comment(child.kind()))
            .collect()
    }

    fn first_named_child<'t>(&self, node: TsNode<'t>) -> Option<TsNode<'t>> {
        self.named_children(node).into_iter().next()
    }

    /// Whether `node` has an anonymous child token of this kind.
    fn has_token(&self, node: TsNode, token: &str) -> bool {
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .any(|child| !child.is_named() && child.kind() == token);
        found
    }

    fn boxed(&self, node: TsNode) -> Result<Box<Node>, ReadError> {
        self.read_node(node).map(Box::new)
    }

    /// Render `node` with the writer and cache the result as its text.
    fn materialize(&self, node: Node) -> Node {
        let text = self.writer.render(&node);
        node.with_text(text)
    }

    fn opaque(&self, node: TsNode) -> Node {
        Node::opaque(node.kind_id(), node.kind())
    }

    fn read_source_file(&self, root: TsNode, file_name: &str) -> Result<Node, ReadError> {
        let statements = self.read_statements(root)?;
        tracing::debug!(
            file = file_name,
            statements = statements.len(),
            "converted source file"
        );
        Ok(Node::new(NodeData::SourceFile {
            file_name: file_name.to_string(),
            statements,
        }))
    }

    /// Convert the statements under a program or block.
    ///
    /// Statements inside `ERROR` nodes are spliced in place.
    fn read_statements(&self, node: TsNode) -> Result<Vec<Node>, ReadError> {
        let mut out = Vec::new();
        let mut chained = false;
        for child in self.named_children(node) {
            self.push_statement(child, false, &mut chained, &mut out)?;
        }
        Ok(out)
    }

    /// Convert one statement into `out`.
    ///
    /// `chained` records a `.` left behind by error recovery, as in
    /// `Column() { ... }.width(100)`; the next statement is re-attached to
    /// the preceding component call.
    fn push_statement(
        &self,
        node: TsNode,
        recovered: bool,
        chained: &mut bool,
        out: &mut Vec<Node>,
    ) -> Result<(), ReadError> {
        if node.is_error() {
            let mut cursor = node.walk();
            let children: Vec<TsNode> = node.children(&mut cursor).collect();
            for child in children {
                if !child.is_named() {
                    if child.kind() == "." {
                        *chained = true;
                    }
                    continue;
                }
                if !is_comment(child.kind()) {
                    self.push_statement(child, true, chained, out)?;
                }
            }
            return Ok(());
        }
        let converted = match self.read_node(node) {
            Ok(converted) => converted,
            Err(err) if node.has_error() => {
                tracing::debug!(kind = node.kind(), %err, "keeping malformed statement opaque");
                self.opaque(node)
            }
            Err(err) => return Err(err),
        };
        if std::mem::take(chained) && self.attach_attribute(&converted, out) {
            return Ok(());
        }
        if recovered && !is_statement_kind(node.kind()) {
            out.push(Node::new(NodeData::ExpressionStatement {
                expression: Box::new(converted),
            }));
        } else {
            out.push(converted);
        }
        Ok(())
    }

    /// Rebase an attribute chain such as `width(100).height(50)` onto the
    /// last component call in `out`, skipping its trailing-closure blocks.
    fn attach_attribute(&self, attribute: &Node, out: &mut [Node]) -> bool {
        let attribute = match attribute.data() {
            NodeData::ExpressionStatement { expression } => expression.as_ref(),
            _ => attribute,
        };
        let Some(slot) = out
            .iter_mut()
            .rev()
            .find(|stmt| stmt.syntax_kind() != Some(SyntaxKind::Block))
        else {
            return false;
        };
        let NodeData::ExpressionStatement { expression } = slot.data() else {
            return false;
        };
        if expression.syntax_kind() != Some(SyntaxKind::CallExpression) {
            return false;
        }
        let Some(rebased) = self.rebase_chain(attribute, expression.as_ref().clone()) else {
            return false;
        };
        tracing::debug!(kind = rebased.kind_name(), "re-attached attribute chain");
        *slot = Node::new(NodeData::ExpressionStatement {
            expression: Box::new(rebased),
        });
        true
    }

    /// Convert any node; unmodelled kinds become opaque.
    fn read_node(&self, node: TsNode) -> Result<Node, ReadError> {
        let none = Export::default();
        match node.kind() {
            // Declarations
            "class_declaration" | "abstract_class_declaration" => {
                self.read_class_declaration(node, &none)
            }
            "function_declaration" | "generator_function_declaration" => {
                self.read_function_declaration(node, &none)
            }
            "lexical_declaration" | "variable_declaration" => {
                self.read_variable_statement(node, &none)
            }
            "interface_declaration" | "type_alias_declaration" => self.read_type_only(node),
            "enum_declaration" => self.read_enum(node, &none),
            "import_statement" => self.read_import(node),
            "export_statement" => self.read_export(node),
            "method_definition" => self.read_method(node, &[]),
            "public_field_definition" => self.read_property(node),

            // Statements
            "statement_block" => self.read_block(node),
            "expression_statement" => self.read_expression_statement(node),
            "return_statement" => self.read_return(node),
            "throw_statement" => self.read_throw(node),
            "if_statement" => self.read_if(node),
            "for_statement" => self.read_for(node),
            "for_in_statement" => self.read_for_in(node),
            "while_statement" => self.read_while(node),
            "do_statement" => self.read_do(node),
            "switch_statement" => self.read_switch(node),
            "try_statement" => self.read_try(node),
            "break_statement" => Ok(self.read_jump(node, true)),
            "continue_statement" => Ok(self.read_jump(node, false)),
            "labeled_statement" => self.read_labeled(node),
            "empty_statement" => Ok(Node::new(NodeData::EmptyStatement {})),

            _ => self.read_expr(node),
        }
    }
}

fn is_comment(kind: &str) -> bool {
    matches!(kind, "comment" | "html_comment")
}

fn is_statement_kind(kind: &str) -> bool {
    kind.ends_with("_statement")
        || kind.ends_with("_declaration")
        || matches!(kind, "statement_block" | "method_definition" | "public_field_definition")
}
