//! Driven port for the global folder view.
//!
//! The global view is a single listing of every folder across all owners. It
//! is fetched once per detection run; pagination, if the upstream has any, is
//! the adapter's concern.

use async_trait::async_trait;

use super::RetrievalError;
use crate::domain::GlobalFolder;

/// Port for retrieving every owner-qualified folder in one call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GlobalFoldersSource: Send + Sync {
    /// Return the full global folder listing in source order.
    async fn retrieve_all_global_folders(&self) -> Result<Vec<GlobalFolder>, RetrievalError>;
}

/// Fixture implementation returning an empty global view.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureGlobalFoldersSource;

#[async_trait]
impl GlobalFoldersSource for FixtureGlobalFoldersSource {
    async fn retrieve_all_global_folders(&self) -> Result<Vec<GlobalFolder>, RetrievalError> {
        Ok(Vec::new())
    }
}
