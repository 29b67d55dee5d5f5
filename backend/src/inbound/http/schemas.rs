//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module mirrors their wire shape for OpenAPI documentation.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// An upstream dependency failed or is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "service_unavailable")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "folder data is temporarily unavailable")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::InconsistencyKind`].
#[derive(ToSchema)]
#[schema(as = crate::domain::InconsistencyKind)]
pub enum InconsistencyKindSchema {
    /// Both views know the folder but disagree on its name.
    #[schema(rename = "NAME_MISMATCH")]
    NameMismatch,
    /// Only the user's own view lists the folder.
    #[schema(rename = "MISSING_IN_GLOBAL")]
    MissingInGlobal,
    /// Only the global view lists the folder.
    #[schema(rename = "MISSING_IN_USER_FOLDERS")]
    MissingInUserFolders,
}
