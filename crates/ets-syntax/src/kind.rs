//! Syntax kind table for the IR.
//!
//! Every IR node carries a numeric `kind` and its `kindName`. Known kinds are
//! listed here; grammar kinds without a mapping are numbered from
//! [`OPAQUE_KIND_BASE`] upward and named after the grammar.

/// First kind number used for grammar kinds without an IR mapping.
pub const OPAQUE_KIND_BASE: u16 = 1000;

macro_rules! syntax_kinds {
    ($($name:ident = $value:literal,)*) => {
        /// Known IR node and modifier kinds.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u16)]
        pub enum SyntaxKind {
            $($name = $value,)*
        }

        impl SyntaxKind {
            /// All known kinds, in numeric order.
            pub const ALL: &'static [SyntaxKind] = &[$(SyntaxKind::$name,)*];

            /// The `kindName` for this kind.
            pub fn name(self) -> &'static str {
                match self {
                    $(SyntaxKind::$name => stringify!($name),)*
                }
            }

            pub fn from_u16(value: u16) -> Option<Self> {
                match value {
                    $($value => Some(SyntaxKind::$name),)*
                    _ => None,
                }
            }
        }
    };
}

syntax_kinds! {
    // Files and declarations
    SourceFile = 1,
    ClassDeclaration = 2,
    ClassExpression = 3,
    MethodDeclaration = 4,
    GetAccessor = 5,
    SetAccessor = 6,
    Constructor = 7,
    PropertyDeclaration = 8,
    FunctionDeclaration = 9,
    InterfaceDeclaration = 10,
    TypeAliasDeclaration = 11,
    EnumDeclaration = 12,
    ImportDeclaration = 13,
    ExportDeclaration = 14,
    ExportAssignment = 15,
    Decorator = 16,

    // Statements
    Block = 30,
    VariableStatement = 31,
    VariableDeclarationList = 32,
    VariableDeclaration = 33,
    ExpressionStatement = 34,
    ReturnStatement = 35,
    ThrowStatement = 36,
    IfStatement = 37,
    ForStatement = 38,
    ForInStatement = 39,
    ForOfStatement = 40,
    WhileStatement = 41,
    DoStatement = 42,
    SwitchStatement = 43,
    CaseBlock = 44,
    CaseClause = 45,
    DefaultClause = 46,
    TryStatement = 47,
    CatchClause = 48,
    BreakStatement = 49,
    ContinueStatement = 50,
    LabeledStatement = 51,
    EmptyStatement = 52,

    // Expressions
    Identifier = 70,
    CallExpression = 71,
    ResourceReferenceExpression = 72,
    PropertyAccessExpression = 73,
    ElementAccessExpression = 74,
    NewExpression = 75,
    ParenthesizedExpression = 76,
    TypeOfExpression = 77,
    VoidExpression = 78,
    DeleteExpression = 79,
    AwaitExpression = 80,
    YieldExpression = 81,
    PrefixUnaryExpression = 82,
    PostfixUnaryExpression = 83,
    BinaryExpression = 84,
    ConditionalExpression = 85,
    NonNullExpression = 86,
    AsExpression = 87,
    SatisfiesExpression = 88,
    TypeAssertion = 89,
    ImportExpression = 90,
    ArrowFunction = 91,
    FunctionExpression = 92,
    TaggedTemplateExpression = 93,
    TemplateExpression = 94,
    ArrayLiteralExpression = 95,
    ObjectLiteralExpression = 96,
    PropertyAssignment = 97,
    ShorthandPropertyAssignment = 98,
    SpreadAssignment = 99,
    SpreadElement = 100,
    ObjectBindingPattern = 101,
    ArrayBindingPattern = 102,
    BindingElement = 103,

    // Literals and keywords
    StringLiteral = 120,
    NumericLiteral = 121,
    RegularExpressionLiteral = 122,
    NoSubstitutionTemplateLiteral = 123,
    TrueLiteral = 124,
    FalseLiteral = 125,
    NullLiteral = 126,
    ThisKeyword = 127,
    SuperKeyword = 128,

    // Modifiers and heritage tokens
    ExportKeyword = 150,
    DefaultKeyword = 151,
    DeclareKeyword = 152,
    StaticKeyword = 153,
    PublicKeyword = 154,
    PrivateKeyword = 155,
    ProtectedKeyword = 156,
    ReadonlyKeyword = 157,
    AsyncKeyword = 158,
    AbstractKeyword = 159,
    OverrideKeyword = 160,
    AccessorKeyword = 161,
    ExtendsKeyword = 162,
    ImplementsKeyword = 163,
}

impl SyntaxKind {
    /// Modifier kind for a keyword as written in source.
    pub fn from_modifier_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "export" => SyntaxKind::ExportKeyword,
            "default" => SyntaxKind::DefaultKeyword,
            "declare" => SyntaxKind::DeclareKeyword,
            "static" => SyntaxKind::StaticKeyword,
            "public" => SyntaxKind::PublicKeyword,
            "private" => SyntaxKind::PrivateKeyword,
            "protected" => SyntaxKind::ProtectedKeyword,
            "readonly" => SyntaxKind::ReadonlyKeyword,
            "async" => SyntaxKind::AsyncKeyword,
            "abstract" => SyntaxKind::AbstractKeyword,
            "override" => SyntaxKind::OverrideKeyword,
            "accessor" => SyntaxKind::AccessorKeyword,
            _ => return None,
        })
    }

    /// Whether this modifier survives into plain JavaScript output.
    pub fn is_emitted_modifier(self) -> bool {
        matches!(
            self,
            SyntaxKind::ExportKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::StaticKeyword
                | SyntaxKind::AsyncKeyword
        )
    }
}

/// Resolve any kind number to its `kindName`.
///
/// Opaque kinds are looked up in the grammar, so the result depends only on
/// the number. Numbers outside both tables yield `None`.
pub fn kind_name(kind: u16) -> Option<String> {
    if let Some(known) = SyntaxKind::from_u16(kind) {
        return Some(known.name().to_string());
    }
    let grammar_id = kind.checked_sub(OPAQUE_KIND_BASE)?;
    let language: tree_sitter::Language = arborium_typescript::language().into();
    language.node_kind_for_id(grammar_id).map(pascal_case)
}

/// Kind number for a grammar kind id without an IR mapping.
pub fn opaque_kind(grammar_id: u16) -> u16 {
    OPAQUE_KIND_BASE.saturating_add(grammar_id)
}

/// Convert a grammar kind such as `type_alias_declaration` to `TypeAliasDeclaration`.
pub fn pascal_case(grammar_kind: &str) -> String {
    let mut out = String::with_capacity(grammar_kind.len());
    for part in grammar_kind.split('_').filter(|p| !p.is_empty()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars.flat_map(|c| c.to_lowercase()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_numbers() {
        for kind in SyntaxKind::ALL {
            assert_eq!(SyntaxKind::from_u16(*kind as u16), Some(*kind));
            assert!(!kind.name().is_empty());
            assert!((*kind as u16) < OPAQUE_KIND_BASE);
        }
    }

    #[test]
    fn pascal_case_grammar_kinds() {
        assert_eq!(pascal_case("type_alias_declaration"), "TypeAliasDeclaration");
        assert_eq!(pascal_case("ERROR"), "Error");
        assert_eq!(pascal_case("_private"), "Private");
    }

    #[test]
    fn opaque_names_come_from_the_grammar() {
        let language: tree_sitter::Language = arborium_typescript::language().into();
        let id = language.id_for_node_kind("type_alias_declaration", true);
        assert_eq!(
            kind_name(opaque_kind(id)).as_deref(),
            Some("TypeAliasDeclaration")
        );
        assert_eq!(kind_name(SyntaxKind::Block as u16).as_deref(), Some("Block"));
        assert_eq!(kind_name(999), None);
    }

    #[test]
    fn modifier_keywords() {
        assert_eq!(
            SyntaxKind::from_modifier_keyword("static"),
            Some(SyntaxKind::StaticKeyword)
        );
        assert_eq!(SyntaxKind::from_modifier_keyword("struct"), None);
        assert!(!SyntaxKind::PrivateKeyword.is_emitted_modifier());
    }
}
