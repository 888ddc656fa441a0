//! Resource references: `$r(...)` and `$rawfile(...)`.
//!
//! Both are pseudo-calls kept as raw argument text in the IR and rewritten
//! to runtime lookups when JavaScript is generated.

use serde::Serialize;

/// Resource categories and their runtime type ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Color,
    Float,
    String,
    Plural,
    Boolean,
    IntArray,
    Integer,
    Pattern,
    StrArray,
    Media,
    Font,
    Profile,
}

/// Type id used when the category segment is not recognized.
pub const DEFAULT_RESOURCE_TYPE_ID: u32 = 10003;

impl ResourceType {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "color" => ResourceType::Color,
            "float" => ResourceType::Float,
            "string" => ResourceType::String,
            "plural" => ResourceType::Plural,
            "boolean" => ResourceType::Boolean,
            "intarray" => ResourceType::IntArray,
            "integer" => ResourceType::Integer,
            "pattern" => ResourceType::Pattern,
            "strarray" => ResourceType::StrArray,
            "media" => ResourceType::Media,
            "font" => ResourceType::Font,
            "profile" => ResourceType::Profile,
            _ => return None,
        })
    }

    pub fn id(self) -> u32 {
        match self {
            ResourceType::Color => 10001,
            ResourceType::Float => 10002,
            ResourceType::String => 10003,
            ResourceType::Plural => 10004,
            ResourceType::Boolean => 10005,
            ResourceType::IntArray => 10006,
            ResourceType::Integer => 10007,
            ResourceType::Pattern => 10008,
            ResourceType::StrArray => 10009,
            ResourceType::Media => 10010,
            ResourceType::Font => 10011,
            ResourceType::Profile => 10012,
        }
    }
}

/// Which pseudo-call produced a resource reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceRefType {
    R,
    Rawfile,
}

impl ResourceRefType {
    /// Recognize `$r` and `$rawfile` callees.
    pub fn from_callee(name: &str) -> Option<Self> {
        match name {
            "$r" => Some(ResourceRefType::R),
            "$rawfile" => Some(ResourceRefType::Rawfile),
            _ => None,
        }
    }
}

/// Strip one leading and one trailing quote character.
fn strip_quotes(raw: &str) -> &str {
    let raw = raw.strip_prefix(['\'', '"']).unwrap_or(raw);
    raw.strip_suffix(['\'', '"']).unwrap_or(raw)
}

/// Render a resource reference as a runtime call.
///
/// `$r` paths shorter than `module.type.name` fall back to the default type
/// with empty module and name.
pub fn resolve(ref_type: ResourceRefType, arguments: &[String]) -> String {
    let first = arguments.first().map(|arg| strip_quotes(arg));
    match ref_type {
        ResourceRefType::R => {
            if let Some(path) = first {
                let parts: Vec<&str> = path.split('.').collect();
                if parts.len() >= 3 {
                    let module = parts[0];
                    let type_id = ResourceType::from_name(parts[parts.len() - 2])
                        .map(ResourceType::id)
                        .unwrap_or(DEFAULT_RESOURCE_TYPE_ID);
                    let name = parts[parts.len() - 1];
                    return format!(
                        "__getResourceId__({type_id}, undefined, \"{module}\", \"{name}\")"
                    );
                }
            }
            format!("__getResourceId__({DEFAULT_RESOURCE_TYPE_ID}, undefined, \"\", \"\")")
        }
        ResourceRefType::Rawfile => {
            format!("__getRawFileId__(\"{}\")", first.unwrap_or(""))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &str) -> Vec<String> {
        vec![raw.to_string()]
    }

    #[test]
    fn string_resource() {
        assert_eq!(
            resolve(ResourceRefType::R, &args("'app.string.hello'")),
            r#"__getResourceId__(10003, undefined, "app", "hello")"#
        );
    }

    #[test]
    fn color_resource() {
        assert_eq!(
            resolve(ResourceRefType::R, &args("'sys.color.red'")),
            r#"__getResourceId__(10001, undefined, "sys", "red")"#
        );
    }

    #[test]
    fn type_is_second_to_last_segment() {
        assert_eq!(
            resolve(ResourceRefType::R, &args("\"app.extra.media.icon\"")),
            r#"__getResourceId__(10010, undefined, "app", "icon")"#
        );
    }

    #[test]
    fn unknown_type_uses_default_id() {
        assert_eq!(
            resolve(ResourceRefType::R, &args("'app.widget.name'")),
            r#"__getResourceId__(10003, undefined, "app", "name")"#
        );
    }

    #[test]
    fn short_paths_degrade_to_defaults() {
        let expected = r#"__getResourceId__(10003, undefined, "", "")"#;
        assert_eq!(resolve(ResourceRefType::R, &args("'app.hello'")), expected);
        assert_eq!(resolve(ResourceRefType::R, &[]), expected);
    }

    #[test]
    fn rawfile() {
        assert_eq!(
            resolve(ResourceRefType::Rawfile, &args("'icon.png'")),
            r#"__getRawFileId__("icon.png")"#
        );
        assert_eq!(
            resolve(ResourceRefType::Rawfile, &[]),
            r#"__getRawFileId__("")"#
        );
    }

    #[test]
    fn every_category_has_a_distinct_id() {
        let names = [
            "color", "float", "string", "plural", "boolean", "intarray", "integer", "pattern",
            "strarray", "media", "font", "profile",
        ];
        let ids: Vec<u32> = names
            .iter()
            .filter_map(|n| ResourceType::from_name(n))
            .map(ResourceType::id)
            .collect();
        assert_eq!(ids, (10001..=10012).collect::<Vec<_>>());
    }
}
