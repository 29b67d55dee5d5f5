//! Driving port for running a detection pass.
//!
//! Inbound adapters depend on this trait rather than on the service so that
//! handlers can be exercised with fixtures.

use async_trait::async_trait;

use super::RetrievalError;
use crate::domain::{Email, InconsistencyReport};

/// Failure of a whole detection run. No partial report accompanies it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectionError {
    /// The global folder listing could not be retrieved.
    #[error("failed to retrieve global folders: {source}")]
    GlobalFolders { source: RetrievalError },
    /// The user list could not be retrieved.
    #[error("failed to retrieve users: {source}")]
    Users { source: RetrievalError },
    /// One user's folders could not be retrieved.
    #[error("failed to retrieve folders for {owner}: {source}")]
    UserFolders {
        owner: Email,
        source: RetrievalError,
    },
    /// A fan-out task was cancelled or panicked before reporting.
    #[error("folder retrieval worker interrupted: {message}")]
    WorkerInterrupted { message: String },
}

impl DetectionError {
    /// The retrieval failure behind this error, when there is one.
    pub fn retrieval_error(&self) -> Option<&RetrievalError> {
        match self {
            Self::GlobalFolders { source }
            | Self::Users { source }
            | Self::UserFolders { source, .. } => Some(source),
            Self::WorkerInterrupted { .. } => None,
        }
    }
}

/// Use-case port producing a fresh inconsistency report.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InconsistencyDetection: Send + Sync {
    /// Retrieve both folder views and reconcile them.
    async fn detect(&self) -> Result<InconsistencyReport, DetectionError>;
}

/// Fixture implementation that always reports a consistent system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureInconsistencyDetection;

#[async_trait]
impl InconsistencyDetection for FixtureInconsistencyDetection {
    async fn detect(&self) -> Result<InconsistencyReport, DetectionError> {
        Ok(InconsistencyReport::empty())
    }
}
