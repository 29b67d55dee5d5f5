//! Driven port listing every user whose folders are reconciled.

use async_trait::async_trait;

use super::RetrievalError;
use crate::domain::Email;

/// Port for retrieving the complete user list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersSource: Send + Sync {
    /// Return every known user, in source order.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use folder_consistency::domain::ports::{FixtureUsersSource, UsersSource};
    ///
    /// let users = FixtureUsersSource.retrieve_all_users().await?;
    /// assert!(users.is_empty());
    /// # Ok::<(), folder_consistency::domain::ports::RetrievalError>(())
    /// ```
    async fn retrieve_all_users(&self) -> Result<Vec<Email>, RetrievalError>;
}

/// Fixture implementation reporting no users.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureUsersSource;

#[async_trait]
impl UsersSource for FixtureUsersSource {
    async fn retrieve_all_users(&self) -> Result<Vec<Email>, RetrievalError> {
        Ok(Vec::new())
    }
}
