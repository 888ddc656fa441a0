//! Writers that render IR as source code.

pub mod javascript;

pub use javascript::{JS_WRITER, JsWriter};
