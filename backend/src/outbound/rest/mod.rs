//! REST outbound adapter for the upstream folder API.
//!
//! One reqwest client backs all three retrieval ports.

mod dto;
mod http_source;

pub use http_source::{RestFolderSource, RestFolderSourceError};
