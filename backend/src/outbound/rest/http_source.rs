//! Reqwest-backed adapter for the upstream folder API.
//!
//! This adapter owns transport details only: URL construction, the request
//! timeout, HTTP error mapping, and JSON decoding into domain folders.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{
    GlobalFolderDto, UserFolderDto, global_folders_into_domain, user_folders_into_domain,
    users_into_domain,
};
use crate::domain::ports::{GlobalFoldersSource, RetrievalError, UserFoldersSource, UsersSource};
use crate::domain::{Email, FolderValidationError, GlobalFolder, UserFolders};

/// Errors raised while building a [`RestFolderSource`].
#[derive(Debug, thiserror::Error)]
pub enum RestFolderSourceError {
    /// The base URL cannot carry path segments (for example `mailto:`).
    #[error("base URL cannot carry path segments: {url}")]
    UnsupportedBaseUrl { url: String },
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Folder source adapter issuing JSON `GET` requests against one base URL.
///
/// Endpoints, relative to the base URL:
/// - `users`: array of email strings.
/// - `users/{email}/folders`: array of `{ "id", "name" }`.
/// - `folders`: array of `{ "id", "user", "name" }`.
#[derive(Debug, Clone)]
pub struct RestFolderSource {
    client: Client,
    base_url: Url,
}

impl RestFolderSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL cannot hold a path or the reqwest
    /// client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, RestFolderSourceError> {
        if base_url.cannot_be_a_base() {
            return Err(RestFolderSourceError::UnsupportedBaseUrl {
                url: base_url.to_string(),
            });
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RetrievalError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                RetrievalError::transport(format!(
                    "base URL cannot carry path segments: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, RetrievalError> {
        debug!(%url, "requesting upstream resource");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        serde_json::from_slice(body.as_ref())
            .map_err(|error| RetrievalError::decode(format!("invalid JSON payload: {error}")))
    }
}

#[async_trait]
impl UsersSource for RestFolderSource {
    async fn retrieve_all_users(&self) -> Result<Vec<Email>, RetrievalError> {
        let raw: Vec<String> = self.get_json(self.endpoint(&["users"])?).await?;
        users_into_domain(raw).map_err(map_validation_error)
    }
}

#[async_trait]
impl GlobalFoldersSource for RestFolderSource {
    async fn retrieve_all_global_folders(&self) -> Result<Vec<GlobalFolder>, RetrievalError> {
        let rows: Vec<GlobalFolderDto> = self.get_json(self.endpoint(&["folders"])?).await?;
        global_folders_into_domain(rows).map_err(map_validation_error)
    }
}

#[async_trait]
impl UserFoldersSource for RestFolderSource {
    async fn retrieve_folders_for_user(
        &self,
        owner: &Email,
    ) -> Result<UserFolders, RetrievalError> {
        let url = self.endpoint(&["users", owner.as_ref(), "folders"])?;
        let rows: Vec<UserFolderDto> = self.get_json(url).await?;
        user_folders_into_domain(owner, rows).map_err(map_validation_error)
    }
}

fn map_transport_error(error: reqwest::Error) -> RetrievalError {
    if error.is_timeout() {
        RetrievalError::timeout(error.to_string())
    } else {
        RetrievalError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RetrievalError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_owned()
    } else {
        preview
    };
    RetrievalError::upstream_status(status.as_u16(), message)
}

fn map_validation_error(error: FolderValidationError) -> RetrievalError {
    RetrievalError::invalid_payload(error.to_string())
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    fn source(base: &str) -> RestFolderSource {
        RestFolderSource::new(
            Url::parse(base).expect("valid base URL"),
            Duration::from_secs(1),
        )
        .expect("client builds")
    }

    #[rstest]
    #[case::bare_host("http://localhost:8081", "http://localhost:8081/users")]
    #[case::trailing_slash("http://localhost:8081/", "http://localhost:8081/users")]
    #[case::prefix("http://upstream/api/v1", "http://upstream/api/v1/users")]
    #[case::prefix_with_slash("http://upstream/api/v1/", "http://upstream/api/v1/users")]
    fn endpoints_extend_the_base_path(#[case] base: &str, #[case] expected: &str) {
        let url = source(base).endpoint(&["users"]).expect("endpoint builds");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    fn owner_is_encoded_as_one_path_segment() {
        let url = source("http://localhost:8081")
            .endpoint(&["users", "odd/user@example.com", "folders"])
            .expect("endpoint builds");
        assert_eq!(
            url.as_str(),
            "http://localhost:8081/users/odd%2Fuser@example.com/folders"
        );
    }

    #[rstest]
    fn rejects_base_urls_without_a_path() {
        let result = RestFolderSource::new(
            Url::parse("mailto:ops@example.com").expect("valid URL"),
            Duration::from_secs(1),
        );
        assert!(matches!(
            result,
            Err(RestFolderSourceError::UnsupportedBaseUrl { .. })
        ));
    }

    #[rstest]
    #[case::server_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        br#"{"error": "boom"}"#.as_slice(),
        r#"{"error": "boom"}"#
    )]
    #[case::not_found_empty(StatusCode::NOT_FOUND, b"".as_slice(), "Not Found")]
    fn maps_non_success_statuses(
        #[case] status: StatusCode,
        #[case] body: &[u8],
        #[case] expected_message: &str,
    ) {
        assert_eq!(
            map_status_error(status, body),
            RetrievalError::upstream_status(status.as_u16(), expected_message)
        );
    }

    #[rstest]
    fn previews_are_compacted_and_truncated() {
        let body = format!("  lots\n\nof   {}", "x".repeat(300));
        let preview = body_preview(body.as_bytes());
        assert!(preview.starts_with("lots of xxx"));
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }

    #[rstest]
    fn validation_failures_become_invalid_payload() {
        let error = map_validation_error(FolderValidationError::EmptyFolderName);
        assert!(matches!(error, RetrievalError::InvalidPayload { .. }));
    }
}
