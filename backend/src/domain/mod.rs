//! Domain primitives, reconciliation logic and ports.
//!
//! Purpose: Model the per-user and global folder views, classify their
//! differences and orchestrate the retrieval that feeds the comparison. The
//! domain stays free of HTTP and transport types; adapters reach it through
//! [`ports`].
//!
//! Public surface:
//! - Email, FolderId, FolderName: validated value objects.
//! - GlobalFolder, UserFolder, UserFolders: retrieved snapshots.
//! - Inconsistency, InconsistencyKind: classified differences.
//! - InconsistencyReport: records plus counts by kind.
//! - reconcile: pure comparison of the two views.
//! - InconsistencyDetectionService: fan-out retrieval and reconciliation.
//! - Error, ErrorCode: transport-agnostic error payload.
//! - TraceId: task-local correlation identifier.

pub mod error;
pub mod folder;
pub mod inconsistency;
pub mod inconsistency_detection_service;
pub mod ports;
pub mod reconciliation;
pub mod report;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::folder::{
    Email, FolderId, FolderName, FolderValidationError, GlobalFolder, UserFolder, UserFolders,
};
pub use self::inconsistency::{Inconsistency, InconsistencyKind};
pub use self::inconsistency_detection_service::{
    DetectionConfig, DetectionSources, InconsistencyDetectionService, default_fetch_concurrency,
};
pub use self::reconciliation::reconcile;
pub use self::report::InconsistencyReport;
pub use self::trace_id::TraceId;

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
