//! HTTP networking module
//!
//! Provides HTTP client functionality for making requests to search backends.

mod client;

pub use client::HttpClient;
