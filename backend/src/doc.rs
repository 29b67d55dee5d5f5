//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the report and health endpoints together with the
//! schema wrappers from [`crate::inbound::http::schemas`], keeping domain
//! types free of utoipa derives.
//!
//! The generated specification is served by Swagger UI in debug builds and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::inconsistencies::{
    InconsistencyReportResponse, InconsistencyResponse, ReportSummaryResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, InconsistencyKindSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Folder consistency API",
        description = "Reports discrepancies between per-user and global folder listings."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::inconsistencies::get_inconsistencies,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        InconsistencyReportResponse,
        ReportSummaryResponse,
        InconsistencyResponse,
        InconsistencyKindSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "inconsistencies", description = "Folder reconciliation reports"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
