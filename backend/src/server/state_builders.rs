//! Builders turning settings into the detection use-case.

use std::io;
use std::sync::Arc;

use folder_consistency::config::ConsistencySettings;
use folder_consistency::domain::ports::InconsistencyDetection;
use folder_consistency::domain::{DetectionConfig, DetectionSources, InconsistencyDetectionService};
use folder_consistency::outbound::rest::RestFolderSource;
use tracing::info;

/// Build the REST-backed detection service described by `settings`.
///
/// # Errors
/// Returns [`io::Error`] when a setting is invalid or the HTTP client cannot
/// be constructed.
pub fn build_detection_service(
    settings: &ConsistencySettings,
) -> io::Result<Arc<dyn InconsistencyDetection>> {
    let base_url = settings.api_base_url().map_err(io::Error::other)?;
    let timeout = settings.timeout().map_err(io::Error::other)?;
    let max_concurrent_fetches = settings.fetch_concurrency().map_err(io::Error::other)?;

    let source = Arc::new(RestFolderSource::new(base_url, timeout).map_err(io::Error::other)?);
    info!(
        api_base_url = %source.base_url(),
        timeout_seconds = timeout.as_secs(),
        max_concurrent_fetches,
        "upstream folder API configured"
    );

    let service = InconsistencyDetectionService::new(
        DetectionSources::new(source.clone(), source.clone(), source),
        DetectionConfig {
            max_concurrent_fetches,
        },
    );
    Ok(Arc::new(service))
}
