//! Declarations: classes, members, functions, variables, modules.

use super::{Export, ReadContext};
use crate::ir::{
    BindingKind, DeclarationKind, Decorator, EnumMember, ExportClause, ExportSpecifier,
    HeritageClause, ImportBinding, ImportClause, Modifier, Node, NodeData, Parameter,
};
use crate::kind::SyntaxKind;
use crate::traits::ReadError;
use regex::Regex;
use std::sync::LazyLock;
use tree_sitter::Node as TsNode;

static DECORATOR_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@(\w+)").unwrap());

/// Fall back to the first decorator-shaped modifier when direct extraction
/// found nothing.
fn recover_decorators(decorators: &mut Vec<Decorator>, modifiers: &[Modifier]) {
    if !decorators.is_empty() {
        return;
    }
    let recovered = modifiers
        .iter()
        .filter(|m| m.is(SyntaxKind::Decorator))
        .find_map(|m| DECORATOR_NAME.captures(&m.text));
    if let Some(caps) = recovered {
        decorators.push(Decorator {
            name: caps[1].to_string(),
            arguments: None,
            full_text: caps[0].to_string(),
        });
    }
}

impl<'a> ReadContext<'a> {
    fn children_by_field<'t>(&self, node: TsNode<'t>, field: &str) -> Vec<TsNode<'t>> {
        let mut cursor = node.walk();
        node.children_by_field_name(field, &mut cursor).collect()
    }

    /// Text of a type annotation without its leading colon.
    pub(super) fn type_text(&self, node: Option<TsNode>) -> String {
        node.map(|n| self.node_text(n).trim_start_matches(':').trim().to_string())
            .unwrap_or_default()
    }

    /// Name of a class member or object key as written.
    fn member_name(&self, node: TsNode) -> String {
        self.node_text(node).to_string()
    }

    /// Direct extraction for `@Name` and `@Name(args)`.
    fn read_decorator(&self, node: TsNode) -> Option<Decorator> {
        let full_text = self.node_text(node).to_string();
        let inner = self.first_named_child(node)?;
        match inner.kind() {
            "identifier" => Some(Decorator {
                name: self.node_text(inner).to_string(),
                arguments: None,
                full_text,
            }),
            "call_expression" => {
                let callee = inner.child_by_field_name("function")?;
                if callee.kind() != "identifier" {
                    return None;
                }
                let arguments = inner
                    .child_by_field_name("arguments")
                    .map(|args| {
                        self.named_children(args)
                            .into_iter()
                            .map(|arg| self.node_text(arg).to_string())
                            .collect()
                    })
                    .unwrap_or_default();
                Some(Decorator {
                    name: self.node_text(callee).to_string(),
                    arguments: Some(arguments),
                    full_text,
                })
            }
            _ => None,
        }
    }

    fn decorator_modifiers(&self, decorators: &[TsNode]) -> Vec<Modifier> {
        decorators
            .iter()
            .map(|d| Modifier::new(SyntaxKind::Decorator, self.node_text(*d)))
            .collect()
    }

    /// Keyword modifiers that appear before the `stop` child.
    fn keyword_modifiers(&self, node: TsNode, stop: Option<TsNode>) -> Vec<Modifier> {
        let mut out = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if stop.is_some_and(|s| s.id() == child.id()) {
                break;
            }
            let keyword = match child.kind() {
                "accessibility_modifier" | "override_modifier" => self.node_text(child),
                kind if !child.is_named() => kind,
                _ => continue,
            };
            if let Some(kind) = SyntaxKind::from_modifier_keyword(keyword) {
                out.push(Modifier::new(kind, keyword));
            }
        }
        out
    }

    fn export_modifiers(&self, export: &Export) -> Vec<Modifier> {
        let mut out = self.decorator_modifiers(&export.decorators);
        if export.is_export {
            out.push(Modifier::new(SyntaxKind::ExportKeyword, "export"));
        }
        if export.is_default {
            out.push(Modifier::new(SyntaxKind::DefaultKeyword, "default"));
        }
        out
    }

    fn read_heritage(&self, node: TsNode) -> Vec<HeritageClause> {
        let Some(heritage) = self
            .named_children(node)
            .into_iter()
            .find(|c| c.kind() == "class_heritage")
        else {
            return Vec::new();
        };
        self.named_children(heritage)
            .into_iter()
            .filter_map(|clause| {
                let token = match clause.kind() {
                    "extends_clause" => "extends",
                    "implements_clause" => "implements",
                    _ => return None,
                };
                let types = self
                    .named_children(clause)
                    .into_iter()
                    .filter(|t| t.kind() != "type_arguments")
                    .map(|t| self.node_text(t).to_string())
                    .collect();
                Some(HeritageClause {
                    token: token.to_string(),
                    types,
                })
            })
            .collect()
    }

    fn read_class_members(&self, node: TsNode) -> Result<Vec<Node>, ReadError> {
        let Some(body) = node.child_by_field_name("body") else {
            return Ok(Vec::new());
        };
        let mut members = Vec::new();
        let mut pending: Vec<TsNode> = Vec::new();
        for child in self.named_children(body) {
            match child.kind() {
                "decorator" => pending.push(child),
                "method_definition" => {
                    members.push(self.read_method(child, &pending)?);
                    pending.clear();
                }
                // Overloads and abstract members have no body.
                "method_signature" | "abstract_method_signature" => {
                    members.push(self.read_method(child, &pending)?);
                    pending.clear();
                }
                "public_field_definition" => {
                    members.push(self.read_property(child)?);
                    pending.clear();
                }
                _ => {
                    members.push(self.opaque(child));
                    pending.clear();
                }
            }
        }
        Ok(members)
    }

    /// Decorators for a class: the ones extracted before a component struct,
    /// then the written ones the extraction did not already cover.
    fn class_decorators(&self, name: &str, written: &[TsNode]) -> Vec<Decorator> {
        let extracted = self.preprocessed.decorators_for(name).unwrap_or_default();
        let mut decorators = extracted.to_vec();
        for inline in written.iter().filter_map(|d| self.read_decorator(*d)) {
            if !extracted.iter().any(|d| d.name == inline.name) {
                decorators.push(inline);
            }
        }
        decorators
    }

    pub(super) fn read_class_declaration(
        &self,
        node: TsNode,
        export: &Export,
    ) -> Result<Node, ReadError> {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.node_text(n))
            .unwrap_or("");

        let mut written = export.decorators.clone();
        written.extend(self.children_by_field(node, "decorator"));

        let mut modifiers = self.export_modifiers(export);
        modifiers.extend(self.decorator_modifiers(&self.children_by_field(node, "decorator")));
        if node.kind() == "abstract_class_declaration" {
            modifiers.push(Modifier::new(SyntaxKind::AbstractKeyword, "abstract"));
        }

        let mut decorators = self.class_decorators(name, &written);
        recover_decorators(&mut decorators, &modifiers);

        Ok(Node::new(NodeData::ClassDeclaration {
            name: name.to_string(),
            is_export: export.is_export,
            decorators,
            modifiers,
            heritage_clauses: self.read_heritage(node),
            members: self.read_class_members(node)?,
        }))
    }

    pub(super) fn read_class_expression(&self, node: TsNode) -> Result<Node, ReadError> {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.node_text(n))
            .unwrap_or("");
        let written = self.children_by_field(node, "decorator");
        let class = Node::new(NodeData::ClassExpression {
            name: name.to_string(),
            decorators: self.class_decorators(name, &written),
            heritage_clauses: self.read_heritage(node),
            members: self.read_class_members(node)?,
        });
        Ok(self.materialize(class))
    }

    /// Methods, accessors and constructors; `decorators` are the sibling
    /// decorator nodes written before the member.
    pub(super) fn read_method(
        &self,
        node: TsNode,
        decorators: &[TsNode],
    ) -> Result<Node, ReadError> {
        let name_node = self.field(node, "name")?;
        let name = self.member_name(name_node);

        let mut modifiers = self.decorator_modifiers(decorators);
        modifiers.extend(self.keyword_modifiers(node, Some(name_node)));

        let mut is_getter = false;
        let mut is_setter = false;
        let mut asterisk_token = false;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.id() == name_node.id() {
                break;
            }
            match child.kind() {
                "get" if !child.is_named() => is_getter = true,
                "set" if !child.is_named() => is_setter = true,
                "*" => asterisk_token = true,
                _ => {}
            }
        }

        let parameters = match node.child_by_field_name("parameters") {
            Some(params) => self.read_parameters(params)?,
            None => Vec::new(),
        };
        let body = match node.child_by_field_name("body") {
            Some(body) => Some(Box::new(self.read_block(body)?)),
            None => None,
        };

        if is_getter {
            let getter = Node::new(NodeData::GetAccessor {
                name,
                modifiers,
                body,
            });
            return Ok(self.materialize(getter));
        }
        if is_setter {
            let setter = Node::new(NodeData::SetAccessor {
                name,
                modifiers,
                parameters,
                body,
            });
            return Ok(self.materialize(setter));
        }
        if name == "constructor" {
            return Ok(Node::new(NodeData::Constructor {
                modifiers,
                parameters,
                body,
            }));
        }

        let mut direct: Vec<Decorator> = decorators
            .iter()
            .filter_map(|d| self.read_decorator(*d))
            .collect();
        recover_decorators(&mut direct, &modifiers);

        Ok(Node::new(NodeData::MethodDeclaration {
            name,
            decorators: direct,
            modifiers,
            parameters,
            body,
            asterisk_token,
        }))
    }

    pub(super) fn read_property(&self, node: TsNode) -> Result<Node, ReadError> {
        let name_node = self.field(node, "name")?;
        let written = self.children_by_field(node, "decorator");

        let mut modifiers = self.decorator_modifiers(&written);
        modifiers.extend(self.keyword_modifiers(node, Some(name_node)));

        let mut decorators: Vec<Decorator> = written
            .iter()
            .filter_map(|d| self.read_decorator(*d))
            .collect();
        recover_decorators(&mut decorators, &modifiers);

        let (initializer, initializer_text) = match node.child_by_field_name("value") {
            Some(value) => {
                let init = self.read_node(value)?;
                let text = init
                    .text()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.node_text(value).to_string());
                (Some(Box::new(init)), Some(text))
            }
            None => (None, None),
        };

        Ok(Node::new(NodeData::PropertyDeclaration {
            name: self.member_name(name_node),
            type_annotation: self.type_text(node.child_by_field_name("type")),
            initializer,
            initializer_text,
            decorators,
            modifiers,
        }))
    }

    pub(super) fn read_parameters(&self, node: TsNode) -> Result<Vec<Parameter>, ReadError> {
        let mut out = Vec::new();
        for param in self.named_children(node) {
            match param.kind() {
                "required_parameter" | "optional_parameter" => {
                    out.push(self.read_parameter(param)?);
                }
                "identifier" => out.push(Parameter {
                    name: self.node_text(param).to_string(),
                    ..Parameter::default()
                }),
                _ => {}
            }
        }
        Ok(out)
    }

    fn read_parameter(&self, node: TsNode) -> Result<Parameter, ReadError> {
        let mut pattern = self.field(node, "pattern")?;
        let mut has_dot_dot_dot = false;
        if pattern.kind() == "rest_pattern" {
            has_dot_dot_dot = true;
            if let Some(inner) = self.first_named_child(pattern) {
                pattern = inner;
            }
        }

        let binding_pattern = match pattern.kind() {
            "object_pattern" | "array_pattern" => Some(self.read_binding_pattern(pattern)?),
            _ => None,
        };

        let (initializer, initializer_text) = match node.child_by_field_name("value") {
            Some(value) => {
                let init = self.read_node(value)?;
                let text = init
                    .text()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.node_text(value).to_string());
                (Some(init), Some(text))
            }
            None => (None, None),
        };

        Ok(Parameter {
            name: self.node_text(pattern).to_string(),
            type_annotation: self.type_text(node.child_by_field_name("type")),
            has_dot_dot_dot,
            question_token: node.kind() == "optional_parameter",
            binding_pattern,
            initializer,
            initializer_text,
        })
    }

    pub(super) fn read_function_declaration(
        &self,
        node: TsNode,
        export: &Export,
    ) -> Result<Node, ReadError> {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.node_text(n))
            .unwrap_or("");

        let mut modifiers = self.export_modifiers(export);
        if self.has_token(node, "async") {
            modifiers.push(Modifier::new(SyntaxKind::AsyncKeyword, "async"));
        }

        let parameters = match node.child_by_field_name("parameters") {
            Some(params) => self.read_parameters(params)?,
            None => Vec::new(),
        };
        let body = match node.child_by_field_name("body") {
            Some(body) => Some(Box::new(self.read_block(body)?)),
            None => None,
        };

        Ok(Node::new(NodeData::FunctionDeclaration {
            name: name.to_string(),
            is_export: export.is_export,
            modifiers,
            parameters,
            body,
            asterisk_token: node.kind() == "generator_function_declaration"
                || self.has_token(node, "*"),
        }))
    }

    pub(super) fn read_variable_statement(
        &self,
        node: TsNode,
        export: &Export,
    ) -> Result<Node, ReadError> {
        let list = self.read_declaration_list(node)?;
        Ok(Node::new(NodeData::VariableStatement {
            is_export: export.is_export,
            declaration_list: Box::new(list),
        }))
    }

    pub(super) fn read_declaration_list(&self, node: TsNode) -> Result<Node, ReadError> {
        let declaration_kind = match node.kind() {
            "variable_declaration" => DeclarationKind::Var,
            _ => node
                .child_by_field_name("kind")
                .map(|k| DeclarationKind::from_keyword(self.node_text(k)))
                .unwrap_or_default(),
        };

        let mut declarations = Vec::new();
        for declarator in self.named_children(node) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            let name = self.field(declarator, "name")?;
            let initializer = match declarator.child_by_field_name("value") {
                Some(value) => Some(Box::new(self.read_node(value)?)),
                None => None,
            };
            declarations.push(Node::new(NodeData::VariableDeclaration {
                name: self.node_text(name).to_string(),
                type_annotation: self.type_text(declarator.child_by_field_name("type")),
                initializer,
            }));
        }

        Ok(Node::new(NodeData::VariableDeclarationList {
            declaration_kind,
            declarations,
        }))
    }

    pub(super) fn read_type_only(&self, node: TsNode) -> Result<Node, ReadError> {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.node_text(n).to_string())
            .unwrap_or_default();
        let data = if node.kind() == "interface_declaration" {
            NodeData::InterfaceDeclaration {
                name,
                is_type_only: true,
            }
        } else {
            NodeData::TypeAliasDeclaration {
                name,
                is_type_only: true,
            }
        };
        Ok(Node::new(data))
    }

    pub(super) fn read_enum(&self, node: TsNode, export: &Export) -> Result<Node, ReadError> {
        let name = self.node_text(self.field(node, "name")?).to_string();
        let mut members = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            for member in self.named_children(body) {
                match member.kind() {
                    "enum_assignment" => {
                        let member_name = self.field(member, "name")?;
                        let initializer = match member.child_by_field_name("value") {
                            Some(value) => Some(self.read_node(value)?),
                            None => None,
                        };
                        members.push(EnumMember {
                            name: unquote(self.node_text(member_name)),
                            initializer,
                        });
                    }
                    _ => members.push(EnumMember {
                        name: unquote(self.node_text(member)),
                        initializer: None,
                    }),
                }
            }
        }
        Ok(Node::new(NodeData::EnumDeclaration {
            name,
            is_export: export.is_export,
            members,
        }))
    }

    pub(super) fn read_import(&self, node: TsNode) -> Result<Node, ReadError> {
        let source = self.field(node, "source")?;
        let import_clause = self
            .named_children(node)
            .into_iter()
            .find(|c| c.kind() == "import_clause")
            .map(|clause| self.read_import_clause(clause));

        Ok(Node::new(NodeData::ImportDeclaration {
            module_specifier: self.node_text(source).to_string(),
            import_clause,
            is_type_only: self.has_token(node, "type"),
        }))
    }

    fn read_import_clause(&self, node: TsNode) -> ImportClause {
        let mut name = None;
        let mut named_bindings = Vec::new();
        for part in self.named_children(node) {
            match part.kind() {
                "identifier" => name = Some(self.node_text(part).to_string()),
                "namespace_import" => {
                    if let Some(ident) = self.first_named_child(part) {
                        named_bindings.push(ImportBinding {
                            kind: BindingKind::Namespace,
                            name: self.node_text(ident).to_string(),
                            property_name: None,
                        });
                    }
                }
                "named_imports" => {
                    for spec in self.named_children(part) {
                        if spec.kind() != "import_specifier" {
                            continue;
                        }
                        let (local, imported) = self.specifier_names(spec);
                        named_bindings.push(ImportBinding {
                            kind: BindingKind::Named,
                            name: local,
                            property_name: imported,
                        });
                    }
                }
                _ => {}
            }
        }
        ImportClause {
            name,
            named_bindings,
        }
    }

    /// Local name and, when aliased, the original name of a specifier.
    fn specifier_names(&self, spec: TsNode) -> (String, Option<String>) {
        let name = spec
            .child_by_field_name("name")
            .map(|n| self.node_text(n).to_string())
            .unwrap_or_default();
        match spec.child_by_field_name("alias") {
            Some(alias) => (self.node_text(alias).to_string(), Some(name)),
            None => (name, None),
        }
    }

    pub(super) fn read_export(&self, node: TsNode) -> Result<Node, ReadError> {
        let export = Export {
            decorators: self.children_by_field(node, "decorator"),
            is_export: true,
            is_default: self.has_token(node, "default"),
        };

        if let Some(declaration) = node.child_by_field_name("declaration") {
            return match declaration.kind() {
                "class_declaration" | "abstract_class_declaration" => {
                    self.read_class_declaration(declaration, &export)
                }
                "function_declaration" | "generator_function_declaration" => {
                    self.read_function_declaration(declaration, &export)
                }
                "lexical_declaration" | "variable_declaration" => {
                    self.read_variable_statement(declaration, &export)
                }
                "enum_declaration" => self.read_enum(declaration, &export),
                _ => self.read_node(declaration),
            };
        }

        if let Some(value) = node.child_by_field_name("value") {
            return Ok(Node::new(NodeData::ExportAssignment {
                expression: Box::new(self.read_node(value)?),
                is_export_equals: false,
            }));
        }

        if self.has_token(node, "=") {
            let expression = self
                .named_children(node)
                .into_iter()
                .next()
                .ok_or_else(|| ReadError::UnexpectedNode {
                    expected: "expression after `export =`".into(),
                    got: self.node_text(node).to_string(),
                })?;
            return Ok(Node::new(NodeData::ExportAssignment {
                expression: Box::new(self.read_node(expression)?),
                is_export_equals: true,
            }));
        }

        let mut export_clause = None;
        for part in self.named_children(node) {
            match part.kind() {
                "export_clause" => {
                    let elements = self
                        .named_children(part)
                        .into_iter()
                        .filter(|s| s.kind() == "export_specifier")
                        .map(|spec| {
                            let (name, property_name) = self.specifier_names(spec);
                            ExportSpecifier {
                                name,
                                property_name,
                            }
                        })
                        .collect();
                    export_clause = Some(ExportClause {
                        namespace: None,
                        elements,
                    });
                }
                "namespace_export" => {
                    export_clause = Some(ExportClause {
                        namespace: self
                            .first_named_child(part)
                            .map(|n| self.node_text(n).to_string()),
                        elements: Vec::new(),
                    });
                }
                _ => {}
            }
        }

        Ok(Node::new(NodeData::ExportDeclaration {
            export_clause,
            module_specifier: node
                .child_by_field_name("source")
                .map(|s| self.node_text(s).to_string()),
            is_type_only: self.has_token(node, "type"),
        }))
    }
}

fn unquote(name: &str) -> String {
    name.trim_matches(|c| c == '"' || c == '\'').to_string()
}

#[cfg(test)]
mod tests {
    use crate::input::ets::read_ets;
    use crate::ir::{Node, NodeData};
    use crate::kind::SyntaxKind;
    use crate::pipeline::ParseOptions;

    fn first(code: &str) -> Node {
        let root = read_ets(code, "test.ets", &ParseOptions::default()).unwrap();
        match root.data() {
            NodeData::SourceFile { statements, .. } => statements[0].clone(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn struct_gets_extracted_decorators() {
        let class = first("@Entry\n@Component\nstruct Index {\n  build() {}\n}\n");
        let NodeData::ClassDeclaration {
            name,
            is_export,
            decorators,
            ..
        } = class.data()
        else {
            panic!("expected class, got {class:?}");
        };
        assert_eq!(name, "Index");
        assert!(is_export);
        let names: Vec<_> = decorators.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Entry", "Component"]);
    }

    #[test]
    fn stacked_struct_decorators_with_object_arguments() {
        let class = first("@Reusable\n@Component({ k: f(1) })\n@CustomDialog\nstruct X {}\n");
        let NodeData::ClassDeclaration { decorators, .. } = class.data() else {
            panic!("expected class, got {class:?}");
        };
        let names: Vec<_> = decorators.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Reusable", "Component", "CustomDialog"]);
        assert_eq!(decorators[1].arguments, Some(vec!["{ k: f(1) }".to_string()]));
        assert_eq!(decorators[1].full_text, "@Component({ k: f(1) })");
    }

    #[test]
    fn unmatched_struct_decorators_come_from_the_tree() {
        // Two levels of nesting defeat extraction; the written decorators
        // still reach the class.
        let class = first("@Reusable\n@Component({ k: f(g(1)) })\nstruct X {}\n");
        let NodeData::ClassDeclaration { decorators, .. } = class.data() else {
            panic!("expected class, got {class:?}");
        };
        let names: Vec<_> = decorators.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Reusable", "Component"]);
    }

    #[test]
    fn plain_class_keeps_written_decorators() {
        let class = first("@Observed\nclass Model {}\n");
        let NodeData::ClassDeclaration { decorators, .. } = class.data() else {
            panic!("expected class");
        };
        assert_eq!(decorators.len(), 1);
        assert_eq!(decorators[0].name, "Observed");
        assert_eq!(decorators[0].full_text, "@Observed");
    }

    #[test]
    fn property_decorators_and_modifiers() {
        let class = first("class A {\n  @State private count: number = 0\n}\n");
        let NodeData::ClassDeclaration { members, .. } = class.data() else {
            panic!("expected class");
        };
        let NodeData::PropertyDeclaration {
            name,
            type_annotation,
            initializer_text,
            decorators,
            modifiers,
            ..
        } = members[0].data()
        else {
            panic!("expected property");
        };
        assert_eq!(name, "count");
        assert_eq!(type_annotation, "number");
        assert_eq!(initializer_text.as_deref(), Some("0"));
        assert_eq!(decorators[0].name, "State");
        assert_eq!(decorators[0].full_text, "@State");
        assert!(modifiers.iter().any(|m| m.is(SyntaxKind::PrivateKeyword)));
    }

    #[test]
    fn member_access_decorator_recovered_from_modifiers() {
        let class = first("class A {\n  @ns.Watch value: number = 1\n}\n");
        let NodeData::ClassDeclaration { members, .. } = class.data() else {
            panic!("expected class");
        };
        let NodeData::PropertyDeclaration { decorators, .. } = members[0].data() else {
            panic!("expected property");
        };
        assert_eq!(decorators.len(), 1);
        assert_eq!(decorators[0].name, "ns");
        assert_eq!(decorators[0].full_text, "@ns");
    }

    #[test]
    fn method_decorators_attach_to_next_method() {
        let class = first("class A {\n  @Builder\n  header(title: string) {}\n  plain() {}\n}\n");
        let NodeData::ClassDeclaration { members, .. } = class.data() else {
            panic!("expected class");
        };
        let decorated: Vec<usize> = members
            .iter()
            .map(|m| match m.data() {
                NodeData::MethodDeclaration { decorators, .. } => decorators.len(),
                _ => usize::MAX,
            })
            .collect();
        assert_eq!(decorated, [1, 0]);
    }

    #[test]
    fn accessors_and_constructor() {
        let class = first(
            "class A {\n  constructor(x) {}\n  get v() { return 1; }\n  set v(n) {}\n}\n",
        );
        let NodeData::ClassDeclaration { members, .. } = class.data() else {
            panic!("expected class");
        };
        let kinds: Vec<_> = members.iter().map(|m| m.kind_name()).collect();
        assert_eq!(kinds, ["Constructor", "GetAccessor", "SetAccessor"]);
        assert!(members[1].text().is_some());
    }

    #[test]
    fn rest_and_optional_parameters() {
        let func = first("function f(a?: number, ...rest: string[]) {}\n");
        let NodeData::FunctionDeclaration { parameters, .. } = func.data() else {
            panic!("expected function");
        };
        assert!(parameters[0].question_token);
        assert_eq!(parameters[0].type_annotation, "number");
        assert!(parameters[1].has_dot_dot_dot);
        assert_eq!(parameters[1].name, "rest");
    }

    #[test]
    fn import_clause_shapes() {
        let import = first("import Def, { a, b as c } from './m';\n");
        let NodeData::ImportDeclaration {
            module_specifier,
            import_clause: Some(clause),
            is_type_only,
        } = import.data()
        else {
            panic!("expected import");
        };
        assert_eq!(module_specifier, "'./m'");
        assert!(!is_type_only);
        assert_eq!(clause.name.as_deref(), Some("Def"));
        assert_eq!(clause.named_bindings[1].name, "c");
        assert_eq!(clause.named_bindings[1].property_name.as_deref(), Some("b"));
    }

    #[test]
    fn type_only_declarations() {
        assert!(first("interface Props { a: number }\n").is_type_only());
        assert!(first("type Id = string;\n").is_type_only());
        assert!(first("import type { T } from './t';\n").is_type_only());
    }

    #[test]
    fn exported_variable_flag() {
        let stmt = first("export const a = 1, b = 2;\n");
        let NodeData::VariableStatement {
            is_export,
            declaration_list,
        } = stmt.data()
        else {
            panic!("expected variable statement");
        };
        assert!(is_export);
        assert_eq!(declaration_list.children().len(), 2);
    }
}
