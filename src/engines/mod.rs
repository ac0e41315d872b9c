//! Search engine module
//!
//! Defines the Engine trait implemented by every search backend.

mod loader;
mod traits;

pub mod solr;

pub use loader::EngineLoader;
pub use traits::*;
