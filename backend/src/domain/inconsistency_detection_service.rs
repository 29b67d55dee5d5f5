//! Detection service: fan-out retrieval followed by reconciliation.
//!
//! The global folder view and the user list are fetched sequentially, once
//! each. Every user's own folder view is then fetched on its own task, bounded
//! by a semaphore owned by the service. Results are slotted back by the
//! user's position in the list so completion order never leaks into the
//! report. The first failure to arrive aborts the remaining fetches.

use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

use crate::domain::ports::{
    DetectionError, GlobalFoldersSource, InconsistencyDetection, UserFoldersSource, UsersSource,
};
use crate::domain::{Email, InconsistencyReport, TraceId, UserFolders, reconcile};

/// Fallback parallelism when the platform cannot report it.
const FALLBACK_PARALLELISM: usize = 4;

/// Per-user fetch concurrency used when none is configured: twice the
/// available hardware parallelism.
pub fn default_fetch_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(FALLBACK_PARALLELISM)
        .saturating_mul(2)
}

/// Detection service configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionConfig {
    /// Upper bound on concurrently running per-user fetches. Zero is treated
    /// as one.
    pub max_concurrent_fetches: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_fetch_concurrency(),
        }
    }
}

/// Port bundle required by the detection service.
#[derive(Clone)]
pub struct DetectionSources {
    /// Source of the user list.
    pub users: Arc<dyn UsersSource>,
    /// Source of the global folder view.
    pub global_folders: Arc<dyn GlobalFoldersSource>,
    /// Source of each user's own folder view.
    pub user_folders: Arc<dyn UserFoldersSource>,
}

impl DetectionSources {
    /// Build a strongly-typed source bundle.
    pub fn new(
        users: Arc<dyn UsersSource>,
        global_folders: Arc<dyn GlobalFoldersSource>,
        user_folders: Arc<dyn UserFoldersSource>,
    ) -> Self {
        Self {
            users,
            global_folders,
            user_folders,
        }
    }
}

type FetchOutcome = Result<(usize, UserFolders), DetectionError>;

/// Domain service implementing [`InconsistencyDetection`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use folder_consistency::domain::ports::{
///     FixtureGlobalFoldersSource, FixtureUserFoldersSource, FixtureUsersSource,
///     InconsistencyDetection,
/// };
/// use folder_consistency::domain::{
///     DetectionConfig, DetectionSources, InconsistencyDetectionService,
/// };
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let service = InconsistencyDetectionService::new(
///     DetectionSources::new(
///         Arc::new(FixtureUsersSource),
///         Arc::new(FixtureGlobalFoldersSource),
///         Arc::new(FixtureUserFoldersSource),
///     ),
///     DetectionConfig::default(),
/// );
/// let report = service.detect().await.expect("fixtures never fail");
/// assert_eq!(report.total_count(), 0);
/// # });
/// ```
pub struct InconsistencyDetectionService {
    users: Arc<dyn UsersSource>,
    global_folders: Arc<dyn GlobalFoldersSource>,
    user_folders: Arc<dyn UserFoldersSource>,
    fetch_permits: Arc<Semaphore>,
    max_concurrent_fetches: usize,
}

impl InconsistencyDetectionService {
    /// Build the service and its fetch semaphore.
    pub fn new(sources: DetectionSources, config: DetectionConfig) -> Self {
        let max_concurrent_fetches = config.max_concurrent_fetches.max(1);
        Self {
            users: sources.users,
            global_folders: sources.global_folders,
            user_folders: sources.user_folders,
            fetch_permits: Arc::new(Semaphore::new(max_concurrent_fetches)),
            max_concurrent_fetches,
        }
    }

    /// Effective per-user fetch bound.
    pub fn max_concurrent_fetches(&self) -> usize {
        self.max_concurrent_fetches
    }

    async fn run(&self) -> Result<InconsistencyReport, DetectionError> {
        let global_folders = self
            .global_folders
            .retrieve_all_global_folders()
            .await
            .map_err(|source| DetectionError::GlobalFolders { source })?;
        let users = self
            .users
            .retrieve_all_users()
            .await
            .map_err(|source| DetectionError::Users { source })?;
        info!(
            users = users.len(),
            global_folders = global_folders.len(),
            "retrieved user list and global folders"
        );

        let all_user_folders = self.fetch_all_user_folders(users).await?;
        let inconsistencies = reconcile(&all_user_folders, &global_folders);
        Ok(InconsistencyReport::from_inconsistencies(inconsistencies))
    }

    /// Fetch every user's folders, returning them in user-list order.
    async fn fetch_all_user_folders(
        &self,
        users: Vec<Email>,
    ) -> Result<Vec<UserFolders>, DetectionError> {
        let user_count = users.len();
        let trace_id = TraceId::current();
        let mut tasks: JoinSet<FetchOutcome> = JoinSet::new();

        for (index, owner) in users.into_iter().enumerate() {
            let fetch = fetch_user_folders(
                index,
                owner,
                Arc::clone(&self.user_folders),
                Arc::clone(&self.fetch_permits),
            );
            // Task-locals do not cross `spawn`; re-enter the caller's scope.
            match trace_id {
                Some(id) => tasks.spawn(TraceId::scope(id, fetch)),
                None => tasks.spawn(fetch),
            };
        }

        let mut slots: Vec<Option<UserFolders>> = Vec::with_capacity(user_count);
        slots.resize_with(user_count, || None);

        while let Some(joined) = tasks.join_next().await {
            match joined.map_err(interrupted).and_then(|outcome| outcome) {
                Ok((index, folders)) => {
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Some(folders);
                    }
                }
                Err(error) => {
                    tasks.abort_all();
                    return Err(error);
                }
            }
        }

        slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| DetectionError::WorkerInterrupted {
                message: "a user folder fetch finished without a result".to_owned(),
            })
    }
}

async fn fetch_user_folders(
    index: usize,
    owner: Email,
    user_folders: Arc<dyn UserFoldersSource>,
    permits: Arc<Semaphore>,
) -> FetchOutcome {
    let _permit = permits
        .acquire_owned()
        .await
        .map_err(|_| DetectionError::WorkerInterrupted {
            message: "fetch semaphore closed".to_owned(),
        })?;
    debug!(owner = %owner, "retrieving user folders");
    let fetched = user_folders.retrieve_folders_for_user(&owner).await;
    match fetched {
        Ok(folders) => Ok((index, folders)),
        Err(source) => Err(DetectionError::UserFolders { owner, source }),
    }
}

fn interrupted(error: JoinError) -> DetectionError {
    DetectionError::WorkerInterrupted {
        message: error.to_string(),
    }
}

#[async_trait]
impl InconsistencyDetection for InconsistencyDetectionService {
    async fn detect(&self) -> Result<InconsistencyReport, DetectionError> {
        info!(
            max_concurrent_fetches = self.max_concurrent_fetches,
            "inconsistency detection started"
        );
        match self.run().await {
            Ok(report) => {
                info!(
                    inconsistencies = report.total_count(),
                    "inconsistency detection completed"
                );
                Ok(report)
            }
            Err(error) => {
                warn!(%error, "inconsistency detection failed");
                Err(error)
            }
        }
    }
}

#[cfg(test)]
#[path = "inconsistency_detection_service_tests.rs"]
mod tests;
