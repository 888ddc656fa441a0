//! One-call entry points: source text in, IR or JavaScript out.
//!
//! Every call owns all of its state, so files can be converted independently
//! (and concurrently) without coordination.

use crate::input::ets::read_ets;
use crate::ir::Node;
use crate::output::JsWriter;
use crate::traits::{ReadError, Writer};

/// Options controlling conversion.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Fail on the first syntax error instead of converting best-effort.
    pub strict: bool,
}

/// Preprocess, parse and convert one source file with the ETS reader.
pub fn convert_source(
    source: &str,
    file_name: &str,
    options: &ParseOptions,
) -> Result<Node, ReadError> {
    tracing::debug!(file = file_name, bytes = source.len(), strict = options.strict, "converting");
    read_ets(source, file_name, options)
}

/// Serialize IR as JSON; `pretty` indents with two spaces.
pub fn to_json(node: &Node, pretty: bool) -> Result<String, ReadError> {
    let json = if pretty {
        serde_json::to_string_pretty(node)?
    } else {
        serde_json::to_string(node)?
    };
    Ok(json)
}

/// Regenerate JavaScript for a converted tree.
pub fn to_javascript(node: &Node) -> String {
    JsWriter.write(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_json_uses_two_spaces() {
        let root = convert_source("let a = 1;\n", "a.ets", &ParseOptions::default()).unwrap();
        let json = to_json(&root, true).unwrap();
        assert!(json.starts_with("{\n  \"kind\": 1,\n  \"kindName\": \"SourceFile\""));
        assert!(!to_json(&root, false).unwrap().contains('\n'));
    }

    #[test]
    fn javascript_ends_with_newline() {
        let root = convert_source("let a = 1;", "a.ets", &ParseOptions::default()).unwrap();
        assert_eq!(to_javascript(&root), "let a = 1;\n");
    }

    #[test]
    fn convert_source_is_the_ets_reader() {
        use crate::input::ETS_READER;
        use crate::traits::Reader;

        let code = "@Component\nstruct A {\n  build() {}\n}\n";
        let options = ParseOptions::default();
        let via_pipeline = convert_source(code, "a.ets", &options).unwrap();
        let via_reader = ETS_READER.read(code, "a.ets", &options).unwrap();
        assert_eq!(via_pipeline, via_reader);
    }

    #[test]
    fn empty_source_renders_nothing() {
        let root = convert_source("", "empty.ets", &ParseOptions::default()).unwrap();
        assert_eq!(to_javascript(&root), "");
    }
}
