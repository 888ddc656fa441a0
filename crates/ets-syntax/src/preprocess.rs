//! Textual rewriting that runs before the source reaches the parser.
//!
//! The TypeScript grammar has no `struct` keyword, so component structs are
//! rewritten to classes and the decorators written in front of them are
//! recorded here. Every scan is a pure function of its input.

use crate::ir::Decorator;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// One or more decorators, an optional `export`, then `struct Name`.
/// Decorator arguments may contain one level of nested parentheses.
static STRUCT_DECORATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((?:@\w+\s*(?:\((?:[^()]|\([^()]*\))*\))?\s*)+)\b(?:export\s+)?struct\s+(\w+)")
        .unwrap()
});

static DECORATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)(?:\s*\(((?:[^()]|\([^()]*\))*)\))?").unwrap());

static STRUCT_KEYWORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bstruct\s+").unwrap());

static ENTRY_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"@Entry(?:\s*\((?:[^()]|\([^()]*\))*\))?\s*(?:@Component(?:\s*\((?:[^()]|\([^()]*\))*\))?\s*)?(export\s+)?(class\s+)(\w+)",
    )
    .unwrap()
});

/// A decorated struct found in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: String,
    pub decorators: Vec<Decorator>,
}

/// Output of [`preprocess`].
#[derive(Debug, Clone, PartialEq)]
pub struct Preprocessed {
    /// Source with `struct` rewritten to `class`.
    pub code: String,
    /// Every extracted decorator, in source order.
    pub decorators: Vec<Decorator>,
    /// Extracted decorators grouped by the struct they precede.
    pub structs: Vec<StructDecl>,
}

impl Preprocessed {
    /// Decorators extracted for the struct with this name.
    pub fn decorators_for(&self, name: &str) -> Option<&[Decorator]> {
        self.structs
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.decorators.as_slice())
    }
}

/// Rewrite component structs to classes and collect their decorators.
pub fn preprocess(source: &str) -> Preprocessed {
    let structs = extract_struct_decorators(source);
    let decorators = structs
        .iter()
        .flat_map(|s| s.decorators.iter().cloned())
        .collect();

    let code = STRUCT_KEYWORD.replace_all(source, "class ");
    let code = export_entry_classes(&code);

    Preprocessed {
        code,
        decorators,
        structs,
    }
}

fn extract_struct_decorators(source: &str) -> Vec<StructDecl> {
    STRUCT_DECORATORS
        .captures_iter(source)
        .map(|caps| StructDecl {
            name: caps[2].to_string(),
            decorators: parse_decorators(&caps[1]),
        })
        .collect()
}

/// Parse every `@Name` or `@Name(args)` marker in a span of text.
pub fn parse_decorators(span: &str) -> Vec<Decorator> {
    DECORATOR
        .captures_iter(span)
        .map(|caps| Decorator {
            name: caps[1].to_string(),
            arguments: caps.get(2).map(|args| {
                let args = args.as_str().trim();
                if args.is_empty() {
                    Vec::new()
                } else {
                    vec![args.to_string()]
                }
            }),
            full_text: caps[0].to_string(),
        })
        .collect()
}

/// Make sure the `@Entry` class is exported.
fn export_entry_classes(code: &str) -> String {
    ENTRY_CLASS
        .replace_all(code, |caps: &Captures| {
            let whole = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
            match (caps.get(1), caps.get(0), caps.get(2)) {
                (None, Some(all), Some(class)) => {
                    let at = class.start() - all.start();
                    format!("{}export {}", &whole[..at], &whole[at..])
                }
                _ => whole.to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn struct_becomes_class() {
        let out = preprocess("@Component\nstruct Hello {\n}\n");
        assert_eq!(out.code, "@Component\nclass Hello {\n}\n");
    }

    #[test]
    fn state_decorator_is_extracted() {
        let out = preprocess("@State\nstruct Counter {\n  @State private x: number = 0;\n}\n");
        assert_eq!(
            out.decorators,
            vec![Decorator {
                name: "State".into(),
                arguments: None,
                full_text: "@State".into(),
            }]
        );
        assert!(out.code.contains("class Counter"));
        assert!(!out.code.contains("struct"));
    }

    #[test]
    fn all_markers_before_a_struct_are_kept_in_order() {
        let out = preprocess("@Entry\n@Component\nstruct Index {}\n");
        let names: Vec<_> = out.decorators.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Entry", "Component"]);
        assert_eq!(out.structs.len(), 1);
        assert_eq!(out.structs[0].name, "Index");
    }

    #[test]
    fn decorator_arguments_stay_raw() {
        let out = preprocess("@Component({ freezeWhenInactive: true })\nexport struct Page {}\n");
        assert_eq!(
            out.decorators[0].arguments,
            Some(vec!["{ freezeWhenInactive: true }".to_string()])
        );
        assert_eq!(out.decorators_for("Page").map(|d| d.len()), Some(1));
    }

    #[test]
    fn nested_call_in_decorator_arguments() {
        let out = preprocess("@Reusable\n@Component({ k: f(1) })\n@CustomDialog\nstruct X {}\n");
        let names: Vec<_> = out.decorators.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Reusable", "Component", "CustomDialog"]);
        assert_eq!(out.decorators[1].arguments, Some(vec!["{ k: f(1) }".to_string()]));
    }

    #[test]
    fn undecorated_struct_yields_nothing() {
        let out = preprocess("struct Plain {}\n");
        assert!(out.decorators.is_empty());
        assert!(out.structs.is_empty());
        assert_eq!(out.code, "class Plain {}\n");
    }

    #[test]
    fn entry_class_gets_exported() {
        let out = preprocess("@Entry\n@Component\nstruct Index {}\n");
        assert_eq!(out.code, "@Entry\n@Component\nexport class Index {}\n");
    }

    #[test]
    fn exported_entry_is_left_alone() {
        let out = preprocess("@Entry\n@Component\nexport struct Index {}\n");
        assert_eq!(out.code, "@Entry\n@Component\nexport class Index {}\n");
    }

    #[test]
    fn repeated_calls_do_not_share_state() {
        let source = "@Component\nstruct A {}\n@Component\nstruct B {}\n";
        let first = preprocess(source);
        let second = preprocess(source);
        assert_eq!(first, second);
        assert_eq!(first.structs.len(), 2);
    }
}
