//! Search module
//!
//! The adapter turns one query into normalized results with bounded retry;
//! the executor runs a batch of queries and enforces the total cap.

mod adapter;
mod executor;
mod models;
mod retry;

pub use adapter::SearchAdapter;
pub use executor::Search;
pub use models::*;
pub use retry::RetryPolicy;
