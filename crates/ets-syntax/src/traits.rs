//! Traits for readers and writers.

use crate::ir::Node;
use crate::pipeline::ParseOptions;

/// Error that can occur when reading source code into IR.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("failed to load grammar: {0}")]
    Language(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("syntax error at {line}:{column}: {snippet}")]
    Syntax {
        line: usize,
        column: usize,
        snippet: String,
    },

    #[error("expected {expected}, got {got}")]
    UnexpectedNode { expected: String, got: String },

    #[error("failed to serialize IR: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A reader parses source code into the IR.
pub trait Reader: Send + Sync {
    /// Language identifier (e.g., "ets").
    fn language(&self) -> &'static str;

    /// File extensions this reader handles (e.g., &["ets"]).
    fn extensions(&self) -> &'static [&'static str];

    /// Parse source code into the IR.
    fn read(&self, source: &str, file_name: &str, options: &ParseOptions)
    -> Result<Node, ReadError>;
}

/// A writer renders IR nodes as source code in a target language.
pub trait Writer: Send + Sync {
    /// Language identifier (e.g., "javascript").
    fn language(&self) -> &'static str;

    /// File extension for output (e.g., "js").
    fn extension(&self) -> &'static str;

    /// Render a single node.
    fn render(&self, node: &Node) -> String;

    /// Render a whole tree.
    fn write(&self, root: &Node) -> String {
        self.render(root)
    }
}
