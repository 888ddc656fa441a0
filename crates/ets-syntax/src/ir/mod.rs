//! Intermediate representation produced by the ETS reader.
//!
//! A [`Node`] serializes to one flat JSON object: `kind`, `kindName`, the
//! kind-specific fields of its [`NodeData`], and an optional pre-rendered
//! `text`. Nodes own their children; the tree has no back references.

mod structure_eq;
mod walk;

pub use structure_eq::{StructureEq, option_structure_eq, vec_structure_eq};

use crate::kind::{self, SyntaxKind, opaque_kind, pascal_case};
use crate::resource::ResourceRefType;
use serde::Serialize;

/// A single IR node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    kind: u16,
    #[serde(rename = "kindName")]
    kind_name: String,
    #[serde(flatten)]
    data: NodeData,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl Node {
    /// Build a node; `kind` and `kindName` follow from the variant.
    ///
    /// `NodeData::Opaque` carries no grammar kind here, so it is numbered as
    /// grammar id 0 and named after that grammar kind. Use [`Node::opaque`]
    /// to keep the real grammar kind.
    pub fn new(data: NodeData) -> Self {
        let (kind, kind_name) = match data.syntax_kind() {
            Some(known) => (known as u16, known.name().to_string()),
            None => {
                let id = opaque_kind(0);
                (id, kind::kind_name(id).unwrap_or_default())
            }
        };
        Self {
            kind,
            kind_name,
            data,
            text: None,
        }
    }

    /// A node for a grammar kind the IR does not model.
    pub fn opaque(grammar_id: u16, grammar_kind: &str) -> Self {
        Self {
            kind: opaque_kind(grammar_id),
            kind_name: pascal_case(grammar_kind),
            data: NodeData::Opaque {},
            text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn kind(&self) -> u16 {
        self.kind
    }

    pub fn kind_name(&self) -> &str {
        &self.kind_name
    }

    pub fn syntax_kind(&self) -> Option<SyntaxKind> {
        self.data.syntax_kind()
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Name carried by identifiers and named declarations.
    pub fn name(&self) -> Option<&str> {
        match &self.data {
            NodeData::Identifier { name }
            | NodeData::ClassDeclaration { name, .. }
            | NodeData::ClassExpression { name, .. }
            | NodeData::MethodDeclaration { name, .. }
            | NodeData::GetAccessor { name, .. }
            | NodeData::SetAccessor { name, .. }
            | NodeData::PropertyDeclaration { name, .. }
            | NodeData::FunctionDeclaration { name, .. }
            | NodeData::FunctionExpression { name, .. }
            | NodeData::VariableDeclaration { name, .. }
            | NodeData::PropertyAccessExpression { name, .. }
            | NodeData::InterfaceDeclaration { name, .. }
            | NodeData::TypeAliasDeclaration { name, .. }
            | NodeData::EnumDeclaration { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Declarations that exist only for the type checker.
    pub fn is_type_only(&self) -> bool {
        match &self.data {
            NodeData::InterfaceDeclaration { is_type_only, .. }
            | NodeData::TypeAliasDeclaration { is_type_only, .. }
            | NodeData::ImportDeclaration { is_type_only, .. }
            | NodeData::ExportDeclaration { is_type_only, .. } => *is_type_only,
            _ => false,
        }
    }
}

/// `let`, `const` or `var`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Let,
    #[default]
    Const,
    Var,
}

impl DeclarationKind {
    /// Keyword as written in source; anything unrecognized is `const`.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "let" => DeclarationKind::Let,
            "var" => DeclarationKind::Var,
            _ => DeclarationKind::Const,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::Let => "let",
            DeclarationKind::Const => "const",
            DeclarationKind::Var => "var",
        }
    }
}

/// An `@Name(args?)` marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decorator {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<String>>,
    pub full_text: String,
}

/// A declaration modifier such as `static` or a decorator in modifier position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Modifier {
    pub kind: u16,
    #[serde(rename = "kindName")]
    pub kind_name: String,
    /// Source text, kept for decorator recovery.
    #[serde(skip)]
    pub text: String,
}

impl Modifier {
    pub fn new(kind: SyntaxKind, text: impl Into<String>) -> Self {
        Self {
            kind: kind as u16,
            kind_name: kind.name().to_string(),
            text: text.into(),
        }
    }

    pub fn is(&self, kind: SyntaxKind) -> bool {
        self.kind == kind as u16
    }
}

/// A function, method or constructor parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_annotation: String,
    pub has_dot_dot_dot: bool,
    pub question_token: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding_pattern: Option<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initializer_text: Option<String>,
}

/// `extends` or `implements` with the written type expressions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeritageClause {
    pub token: String,
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportClause {
    /// Default import binding.
    pub name: Option<String>,
    pub named_bindings: Vec<ImportBinding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingKind {
    Named,
    Namespace,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBinding {
    pub kind: BindingKind,
    pub name: String,
    pub property_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportClause {
    /// Set for `export * as ns from "..."`.
    pub namespace: Option<String>,
    pub elements: Vec<ExportSpecifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSpecifier {
    pub name: String,
    pub property_name: Option<String>,
}

/// Raw text between template substitutions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateText {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateSpan {
    pub expression: Node,
    pub literal: TemplateText,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumMember {
    pub name: String,
    pub initializer: Option<Node>,
}

/// A call argument: flattened source text or a structured node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Argument {
    Text(String),
    Node(Box<Node>),
}

impl Argument {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Argument::Node(node) => Some(node),
            Argument::Text(_) => None,
        }
    }
}

type Child = Box<Node>;
type OptChild = Option<Box<Node>>;

/// Kind-specific payload of a [`Node`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum NodeData {
    SourceFile {
        file_name: String,
        statements: Vec<Node>,
    },
    ClassDeclaration {
        name: String,
        is_export: bool,
        decorators: Vec<Decorator>,
        modifiers: Vec<Modifier>,
        heritage_clauses: Vec<HeritageClause>,
        members: Vec<Node>,
    },
    ClassExpression {
        name: String,
        decorators: Vec<Decorator>,
        heritage_clauses: Vec<HeritageClause>,
        members: Vec<Node>,
    },
    MethodDeclaration {
        name: String,
        decorators: Vec<Decorator>,
        modifiers: Vec<Modifier>,
        parameters: Vec<Parameter>,
        body: OptChild,
        asterisk_token: bool,
    },
    GetAccessor {
        name: String,
        modifiers: Vec<Modifier>,
        body: OptChild,
    },
    SetAccessor {
        name: String,
        modifiers: Vec<Modifier>,
        parameters: Vec<Parameter>,
        body: OptChild,
    },
    Constructor {
        modifiers: Vec<Modifier>,
        parameters: Vec<Parameter>,
        body: OptChild,
    },
    PropertyDeclaration {
        name: String,
        #[serde(rename = "type")]
        type_annotation: String,
        initializer: OptChild,
        #[serde(skip_serializing_if = "Option::is_none")]
        initializer_text: Option<String>,
        decorators: Vec<Decorator>,
        modifiers: Vec<Modifier>,
    },
    FunctionDeclaration {
        name: String,
        is_export: bool,
        modifiers: Vec<Modifier>,
        parameters: Vec<Parameter>,
        body: OptChild,
        asterisk_token: bool,
    },
    InterfaceDeclaration {
        name: String,
        is_type_only: bool,
    },
    TypeAliasDeclaration {
        name: String,
        is_type_only: bool,
    },
    EnumDeclaration {
        name: String,
        is_export: bool,
        members: Vec<EnumMember>,
    },
    ImportDeclaration {
        module_specifier: String,
        import_clause: Option<ImportClause>,
        is_type_only: bool,
    },
    ExportDeclaration {
        export_clause: Option<ExportClause>,
        module_specifier: Option<String>,
        is_type_only: bool,
    },
    ExportAssignment {
        expression: Child,
        is_export_equals: bool,
    },

    Block {
        statements: Vec<Node>,
    },
    VariableStatement {
        is_export: bool,
        declaration_list: Child,
    },
    VariableDeclarationList {
        declaration_kind: DeclarationKind,
        declarations: Vec<Node>,
    },
    VariableDeclaration {
        name: String,
        #[serde(rename = "type")]
        type_annotation: String,
        initializer: OptChild,
    },
    ExpressionStatement {
        expression: Child,
    },
    ReturnStatement {
        expression: OptChild,
    },
    ThrowStatement {
        expression: Child,
    },
    IfStatement {
        expression: Child,
        then_statement: Child,
        else_statement: OptChild,
    },
    ForStatement {
        initializer: OptChild,
        condition: OptChild,
        incrementor: OptChild,
        statement: OptChild,
    },
    ForInStatement {
        initializer: Child,
        expression: Child,
        statement: OptChild,
    },
    ForOfStatement {
        initializer: Child,
        expression: Child,
        statement: OptChild,
        await_modifier: bool,
    },
    WhileStatement {
        expression: Child,
        statement: OptChild,
    },
    DoStatement {
        expression: Child,
        statement: OptChild,
    },
    SwitchStatement {
        expression: Child,
        case_block: Child,
    },
    CaseBlock {
        clauses: Vec<Node>,
    },
    CaseClause {
        expression: Child,
        statements: Vec<Node>,
    },
    DefaultClause {
        statements: Vec<Node>,
    },
    TryStatement {
        try_block: Child,
        catch_clause: OptChild,
        finally_block: OptChild,
    },
    CatchClause {
        variable_declaration: OptChild,
        block: Child,
    },
    BreakStatement {
        label: Option<String>,
    },
    ContinueStatement {
        label: Option<String>,
    },
    LabeledStatement {
        label: String,
        statement: Child,
    },

    Identifier {
        name: String,
    },
    CallExpression {
        expression: Child,
        arguments: Vec<Argument>,
        question_dot_token: bool,
        is_chained_call: bool,
        is_special_component: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        component_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        method_name: Option<String>,
    },
    ResourceReferenceExpression {
        expression: Child,
        arguments: Vec<String>,
        resource_ref_type: ResourceRefType,
    },
    PropertyAccessExpression {
        expression: Child,
        name: String,
        question_dot_token: bool,
    },
    ElementAccessExpression {
        expression: Child,
        argument_expression: Child,
        question_dot_token: bool,
    },
    NewExpression {
        expression: Child,
        arguments: Vec<Node>,
    },
    ParenthesizedExpression {
        expression: Child,
    },
    TypeOfExpression {
        expression: Child,
    },
    VoidExpression {
        expression: Child,
    },
    DeleteExpression {
        expression: Child,
    },
    AwaitExpression {
        expression: Child,
    },
    YieldExpression {
        expression: OptChild,
        asterisk_token: bool,
    },
    PrefixUnaryExpression {
        operator: String,
        operand: Child,
    },
    PostfixUnaryExpression {
        operator: String,
        operand: Child,
    },
    BinaryExpression {
        left: Child,
        operator: String,
        right: Child,
    },
    ConditionalExpression {
        condition: Child,
        when_true: Child,
        when_false: Child,
    },
    NonNullExpression {
        expression: Child,
    },
    AsExpression {
        expression: Child,
        #[serde(rename = "type")]
        type_annotation: String,
    },
    SatisfiesExpression {
        expression: Child,
        #[serde(rename = "type")]
        type_annotation: String,
    },
    TypeAssertion {
        expression: Child,
        #[serde(rename = "type")]
        type_annotation: String,
    },
    ImportExpression {
        expression: Child,
    },
    ArrowFunction {
        parameters: Vec<Parameter>,
        body: Child,
        is_async: bool,
    },
    FunctionExpression {
        name: String,
        parameters: Vec<Parameter>,
        body: Child,
        is_async: bool,
        asterisk_token: bool,
    },
    TaggedTemplateExpression {
        tag: Child,
        template: Child,
    },
    TemplateExpression {
        head: TemplateText,
        template_spans: Vec<TemplateSpan>,
    },
    ArrayLiteralExpression {
        elements: Vec<Node>,
    },
    ObjectLiteralExpression {
        properties: Vec<Node>,
    },
    PropertyAssignment {
        name: String,
        value: Child,
    },
    ShorthandPropertyAssignment {
        name: String,
        value: Child,
    },
    SpreadAssignment {
        expression: Child,
    },
    SpreadElement {
        expression: Child,
    },
    ObjectBindingPattern {
        elements: Vec<Node>,
    },
    ArrayBindingPattern {
        elements: Vec<Node>,
    },
    BindingElement {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        property_name: Option<String>,
        initializer: OptChild,
        dot_dot_dot_token: bool,
    },

    StringLiteral {},
    NumericLiteral {},
    RegularExpressionLiteral {},
    NoSubstitutionTemplateLiteral {},
    TrueLiteral {},
    FalseLiteral {},
    NullLiteral {},
    ThisKeyword {},
    SuperKeyword {},
    EmptyStatement {},

    /// Syntax the IR does not model; kept so the tree stays complete.
    Opaque {},
}

impl NodeData {
    pub fn syntax_kind(&self) -> Option<SyntaxKind> {
        use NodeData as D;
        use SyntaxKind as K;
        Some(match self {
            D::SourceFile { .. } => K::SourceFile,
            D::ClassDeclaration { .. } => K::ClassDeclaration,
            D::ClassExpression { .. } => K::ClassExpression,
            D::MethodDeclaration { .. } => K::MethodDeclaration,
            D::GetAccessor { .. } => K::GetAccessor,
            D::SetAccessor { .. } => K::SetAccessor,
            D::Constructor { .. } => K::Constructor,
            D::PropertyDeclaration { .. } => K::PropertyDeclaration,
            D::FunctionDeclaration { .. } => K::FunctionDeclaration,
            D::InterfaceDeclaration { .. } => K::InterfaceDeclaration,
            D::TypeAliasDeclaration { .. } => K::TypeAliasDeclaration,
            D::EnumDeclaration { .. } => K::EnumDeclaration,
            D::ImportDeclaration { .. } => K::ImportDeclaration,
            D::ExportDeclaration { .. } => K::ExportDeclaration,
            D::ExportAssignment { .. } => K::ExportAssignment,
            D::Block { .. } => K::Block,
            D::VariableStatement { .. } => K::VariableStatement,
            D::VariableDeclarationList { .. } => K::VariableDeclarationList,
            D::VariableDeclaration { .. } => K::VariableDeclaration,
            D::ExpressionStatement { .. } => K::ExpressionStatement,
            D::ReturnStatement { .. } => K::ReturnStatement,
            D::ThrowStatement { .. } => K::ThrowStatement,
            D::IfStatement { .. } => K::IfStatement,
            D::ForStatement { .. } => K::ForStatement,
            D::ForInStatement { .. } => K::ForInStatement,
            D::ForOfStatement { .. } => K::ForOfStatement,
            D::WhileStatement { .. } => K::WhileStatement,
            D::DoStatement { .. } => K::DoStatement,
            D::SwitchStatement { .. } => K::SwitchStatement,
            D::CaseBlock { .. } => K::CaseBlock,
            D::CaseClause { .. } => K::CaseClause,
            D::DefaultClause { .. } => K::DefaultClause,
            D::TryStatement { .. } => K::TryStatement,
            D::CatchClause { .. } => K::CatchClause,
            D::BreakStatement { .. } => K::BreakStatement,
            D::ContinueStatement { .. } => K::ContinueStatement,
            D::LabeledStatement { .. } => K::LabeledStatement,
            D::Identifier { .. } => K::Identifier,
            D::CallExpression { .. } => K::CallExpression,
            D::ResourceReferenceExpression { .. } => K::ResourceReferenceExpression,
            D::PropertyAccessExpression { .. } => K::PropertyAccessExpression,
            D::ElementAccessExpression { .. } => K::ElementAccessExpression,
            D::NewExpression { .. } => K::NewExpression,
            D::ParenthesizedExpression { .. } => K::ParenthesizedExpression,
            D::TypeOfExpression { .. } => K::TypeOfExpression,
            D::VoidExpression { .. } => K::VoidExpression,
            D::DeleteExpression { .. } => K::DeleteExpression,
            D::AwaitExpression { .. } => K::AwaitExpression,
            D::YieldExpression { .. } => K::YieldExpression,
            D::PrefixUnaryExpression { .. } => K::PrefixUnaryExpression,
            D::PostfixUnaryExpression { .. } => K::PostfixUnaryExpression,
            D::BinaryExpression { .. } => K::BinaryExpression,
            D::ConditionalExpression { .. } => K::ConditionalExpression,
            D::NonNullExpression { .. } => K::NonNullExpression,
            D::AsExpression { .. } => K::AsExpression,
            D::SatisfiesExpression { .. } => K::SatisfiesExpression,
            D::TypeAssertion { .. } => K::TypeAssertion,
            D::ImportExpression { .. } => K::ImportExpression,
            D::ArrowFunction { .. } => K::ArrowFunction,
            D::FunctionExpression { .. } => K::FunctionExpression,
            D::TaggedTemplateExpression { .. } => K::TaggedTemplateExpression,
            D::TemplateExpression { .. } => K::TemplateExpression,
            D::ArrayLiteralExpression { .. } => K::ArrayLiteralExpression,
            D::ObjectLiteralExpression { .. } => K::ObjectLiteralExpression,
            D::PropertyAssignment { .. } => K::PropertyAssignment,
            D::ShorthandPropertyAssignment { .. } => K::ShorthandPropertyAssignment,
            D::SpreadAssignment { .. } => K::SpreadAssignment,
            D::SpreadElement { .. } => K::SpreadElement,
            D::ObjectBindingPattern { .. } => K::ObjectBindingPattern,
            D::ArrayBindingPattern { .. } => K::ArrayBindingPattern,
            D::BindingElement { .. } => K::BindingElement,
            D::StringLiteral {} => K::StringLiteral,
            D::NumericLiteral {} => K::NumericLiteral,
            D::RegularExpressionLiteral {} => K::RegularExpressionLiteral,
            D::NoSubstitutionTemplateLiteral {} => K::NoSubstitutionTemplateLiteral,
            D::TrueLiteral {} => K::TrueLiteral,
            D::FalseLiteral {} => K::FalseLiteral,
            D::NullLiteral {} => K::NullLiteral,
            D::ThisKeyword {} => K::ThisKeyword,
            D::SuperKeyword {} => K::SuperKeyword,
            D::EmptyStatement {} => K::EmptyStatement,
            D::Opaque {} => return None,
        })
    }
}
