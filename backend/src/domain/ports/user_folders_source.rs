//! Driven port for one user's own folder view.

use async_trait::async_trait;

use super::RetrievalError;
use crate::domain::{Email, UserFolders};

/// Port for retrieving the folders a single user sees.
///
/// Called once per user and concurrently across users, so implementations
/// must not rely on call ordering.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserFoldersSource: Send + Sync {
    /// Return the user's folders in retrieval order.
    async fn retrieve_folders_for_user(&self, owner: &Email)
    -> Result<UserFolders, RetrievalError>;
}

/// Fixture implementation returning an empty folder list for every user.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureUserFoldersSource;

#[async_trait]
impl UserFoldersSource for FixtureUserFoldersSource {
    async fn retrieve_folders_for_user(
        &self,
        owner: &Email,
    ) -> Result<UserFolders, RetrievalError> {
        Ok(UserFolders::empty(owner.clone()))
    }
}
