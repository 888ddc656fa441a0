//! Readers that parse source code into IR.

pub mod ets;

pub use ets::{ETS_READER, EtsReader, read_ets, read_ets_with};
