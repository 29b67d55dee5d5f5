//! Inconsistency report endpoint.
//!
//! ```text
//! GET /inconsistencies
//! ```
//!
//! Every call runs a full detection pass; nothing is cached between calls.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::ports::DetectionError;
use crate::domain::{Error, Inconsistency, InconsistencyReport, TraceId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Aggregate counts for one report.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummaryResponse {
    /// Number of records in `inconsistencies`.
    #[schema(example = 2)]
    pub total_inconsistencies: usize,
    /// Record count per kind. Kinds that did not occur are omitted.
    pub counts_by_type: BTreeMap<String, usize>,
}

/// One classified discrepancy.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InconsistencyResponse {
    /// `NAME_MISMATCH`, `MISSING_IN_GLOBAL` or `MISSING_IN_USER_FOLDERS`.
    #[serde(rename = "type")]
    #[schema(example = "NAME_MISMATCH")]
    pub kind: String,
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub folder_id: String,
    #[schema(example = "alice@example.com")]
    pub user_email: String,
    /// Name in the global view; `null` when the global view lacks the folder.
    #[schema(example = "INBOX_WRONG")]
    pub global_folder_name: Option<String>,
    /// Name in the user's view; `null` when the user's view lacks the folder.
    #[schema(example = "Inbox")]
    pub user_folder_name: Option<String>,
}

impl From<&Inconsistency> for InconsistencyResponse {
    fn from(record: &Inconsistency) -> Self {
        Self {
            kind: record.kind().as_str().to_owned(),
            folder_id: record.folder_id().to_string(),
            user_email: record.owner().to_string(),
            global_folder_name: record.global_name().map(ToString::to_string),
            user_folder_name: record.user_name().map(ToString::to_string),
        }
    }
}

/// Response payload for `GET /inconsistencies`.
#[derive(Debug, Serialize, ToSchema)]
pub struct InconsistencyReportResponse {
    pub summary: ReportSummaryResponse,
    pub inconsistencies: Vec<InconsistencyResponse>,
}

impl From<&InconsistencyReport> for InconsistencyReportResponse {
    fn from(report: &InconsistencyReport) -> Self {
        Self {
            summary: ReportSummaryResponse {
                total_inconsistencies: report.total_count(),
                counts_by_type: report
                    .counts_by_kind()
                    .iter()
                    .map(|(kind, count)| (kind.as_str().to_owned(), *count))
                    .collect(),
            },
            inconsistencies: report
                .inconsistencies()
                .iter()
                .map(InconsistencyResponse::from)
                .collect(),
        }
    }
}

/// Translate a failed run into a 503 payload naming the failed stage.
fn map_detection_error(error: &DetectionError) -> Error {
    let details = match error {
        DetectionError::GlobalFolders { source } => {
            json!({ "stage": "global_folders", "cause": source.to_string() })
        }
        DetectionError::Users { source } => {
            json!({ "stage": "users", "cause": source.to_string() })
        }
        DetectionError::UserFolders { owner, source } => json!({
            "stage": "user_folders",
            "owner": owner.as_ref(),
            "cause": source.to_string(),
        }),
        DetectionError::WorkerInterrupted { message } => {
            json!({ "stage": "user_folders", "cause": message })
        }
    };
    Error::service_unavailable("folder data is temporarily unavailable").with_details(details)
}

/// Run a detection pass and return the classified report.
#[utoipa::path(
    get,
    path = "/inconsistencies",
    description = "Retrieve both folder views, reconcile them and return every discrepancy. Example request: GET /inconsistencies",
    responses(
        (
            status = 200,
            description = "Inconsistency report",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = InconsistencyReportResponse
        ),
        (status = 503, description = "Upstream folder data unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["inconsistencies"],
    operation_id = "getInconsistencies"
)]
#[get("/inconsistencies")]
pub async fn get_inconsistencies(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let report = state.detection.detect().await.map_err(|failure| {
        let trace_id = TraceId::current().map(|id| id.to_string());
        error!(error = %failure, trace_id = ?trace_id, "inconsistency detection failed");
        map_detection_error(&failure)
    })?;
    Ok(HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(InconsistencyReportResponse::from(&report)))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::{MockInconsistencyDetection, RetrievalError};
    use crate::domain::{Email, FolderId, FolderName};

    const ID: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn sample_report() -> InconsistencyReport {
        let folder_id = FolderId::new(ID).expect("folder id");
        InconsistencyReport::from_inconsistencies(vec![
            Inconsistency::NameMismatch {
                folder_id: folder_id.clone(),
                owner: Email::new("alice@example.com").expect("email"),
                global_name: FolderName::new("INBOX_WRONG").expect("name"),
                user_name: FolderName::new("Inbox").expect("name"),
            },
            Inconsistency::MissingInUserFolders {
                folder_id,
                owner: Email::new("charlie@example.com").expect("email"),
                global_name: FolderName::new("Sent").expect("name"),
            },
        ])
    }

    async fn call(detection: MockInconsistencyDetection) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::new(Arc::new(detection))))
                .service(get_inconsistencies),
        )
        .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/inconsistencies").to_request(),
        )
        .await;
        let status = res.status();
        (status, actix_test::read_body_json(res).await)
    }

    #[rstest]
    #[actix_web::test]
    async fn report_is_serialised_with_summary_and_null_names() {
        let mut detection = MockInconsistencyDetection::new();
        detection
            .expect_detect()
            .times(1)
            .returning(|| Ok(sample_report()));

        let (status, body) = call(detection).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "summary": {
                    "totalInconsistencies": 2,
                    "countsByType": { "NAME_MISMATCH": 1, "MISSING_IN_USER_FOLDERS": 1 }
                },
                "inconsistencies": [
                    {
                        "type": "NAME_MISMATCH",
                        "folderId": ID,
                        "userEmail": "alice@example.com",
                        "globalFolderName": "INBOX_WRONG",
                        "userFolderName": "Inbox"
                    },
                    {
                        "type": "MISSING_IN_USER_FOLDERS",
                        "folderId": ID,
                        "userEmail": "charlie@example.com",
                        "globalFolderName": "Sent",
                        "userFolderName": null
                    }
                ]
            })
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn empty_report_has_empty_counts() {
        let mut detection = MockInconsistencyDetection::new();
        detection
            .expect_detect()
            .returning(|| Ok(InconsistencyReport::empty()));

        let (status, body) = call(detection).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "summary": { "totalInconsistencies": 0, "countsByType": {} },
                "inconsistencies": []
            })
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn failed_detection_is_service_unavailable() {
        let mut detection = MockInconsistencyDetection::new();
        detection.expect_detect().returning(|| {
            Err(DetectionError::UserFolders {
                owner: Email::new("bob@example.com").expect("email"),
                source: RetrievalError::timeout("10s elapsed"),
            })
        });

        let (status, body) = call(detection).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "service_unavailable");
        assert_eq!(body["details"]["stage"], "user_folders");
        assert_eq!(body["details"]["owner"], "bob@example.com");
    }

    #[rstest]
    #[case(
        DetectionError::GlobalFolders { source: RetrievalError::transport("refused") },
        "global_folders"
    )]
    #[case(
        DetectionError::Users { source: RetrievalError::decode("eof") },
        "users"
    )]
    #[case(
        DetectionError::WorkerInterrupted { message: "task 3 panicked".to_owned() },
        "user_folders"
    )]
    fn detection_errors_name_the_failed_stage(
        #[case] failure: DetectionError,
        #[case] stage: &str,
    ) {
        let error = map_detection_error(&failure);
        assert_eq!(error.code(), crate::domain::ErrorCode::ServiceUnavailable);
        assert_eq!(
            error.details().and_then(|details| details.get("stage")),
            Some(&Value::from(stage))
        );
    }
}
