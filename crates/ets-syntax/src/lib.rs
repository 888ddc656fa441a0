//! Front end for the ETS (ArkTS) UI dialect.
//!
//! `ets-syntax` turns `.ets` sources into a JSON-serializable IR that a UI
//! compiler consumes, and can regenerate JavaScript from that IR.
//!
//! # Architecture
//!
//! ```text
//! .ets source ─> preprocess ─> tree-sitter ─> ReadContext ─> Node (IR)
//!                (struct→class,  (TypeScript)    │               │
//!                 decorators)                    └─ JsWriter <───┘
//!                                                  (eager text, JS output)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use ets_syntax::{ParseOptions, convert_source, to_javascript, to_json};
//!
//! let ir = convert_source("let x = $r('app.string.title');", "page.ets", &ParseOptions::default())?;
//! let json = to_json(&ir, true)?;
//! let js = to_javascript(&ir);
//! // => "let x = __getResourceId__(10003, undefined, \"app\", \"title\");\n"
//! ```

pub mod input;
pub mod ir;
pub mod kind;
pub mod output;
pub mod pipeline;
pub mod preprocess;
pub mod resource;
pub mod traits;

// Re-exports: IR types
pub use ir::{Argument, Decorator, Node, NodeData, StructureEq};
pub use kind::SyntaxKind;

// Re-exports: entry points
pub use pipeline::{ParseOptions, convert_source, to_javascript, to_json};

// Re-exports: Traits
pub use traits::{ReadError, Reader, Writer};
