//! Result types for normalized search results
//!
//! Every result handed to the downstream pipeline carries a non-empty snippet
//! and the URL it came from.

mod types;

pub use types::*;
