//! Folder consistency service.
//!
//! Reconciles each user's own folder listing against the global folder
//! listing and reports every discrepancy, classified by
//! [`domain::InconsistencyKind`].
//!
//! The crate follows a hexagonal layout: [`domain`] holds the data model,
//! reconciliation and orchestration behind [`domain::ports`]; [`outbound`]
//! talks to the upstream REST API; [`inbound`] exposes the report over HTTP.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
