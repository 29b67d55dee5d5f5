//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **rest**: reqwest-backed client for the upstream folder API, serving the
//!   user list, the global folder view, and each user's own folders.
//!
//! Adapters are thin translators between wire payloads and domain types. They
//! contain no reconciliation logic.

pub mod rest;
