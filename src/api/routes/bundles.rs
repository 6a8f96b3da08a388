//! Bundle handlers: ZIP download and JSON report.

use super::bundle_upload;
use crate::api::AppState;
use crate::types::BundleReport;
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::{HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
};

/// Response header carrying the number of archived records
pub const SUCCEEDED_HEADER: &str = "x-bundle-succeeded";

/// Response header carrying the number of failed records
pub const FAILED_HEADER: &str = "x-bundle-failed";

/// POST /bundles - Bundle a spreadsheet and return the ZIP
#[utoipa::path(
    post,
    path = "/api/v1/bundles",
    tag = "bundles",
    request_body(content = Vec<u8>, description = "Spreadsheet upload in the `file` field (multipart/form-data)", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "ZIP of every image fetched, in spreadsheet order", content_type = "application/zip", body = Vec<u8>,
            headers(
                ("X-Bundle-Succeeded" = usize, description = "Records written to the archive"),
                ("X-Bundle-Failed" = usize, description = "Records whose image could not be fetched")
            )
        ),
        (status = 400, description = "Missing or unreadable upload", body = crate::error::ApiError),
        (status = 413, description = "Upload exceeds the configured limit", body = crate::error::ApiError),
        (status = 422, description = "Required columns missing", body = crate::error::ApiError),
        (status = 500, description = "Internal server error", body = crate::error::ApiError)
    )
)]
pub async fn create_bundle(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let bundle = match bundle_upload(&state, multipart).await {
        Ok(bundle) => bundle,
        Err(e) => return e.into_response(),
    };

    let disposition = format!("attachment; filename=\"{}\"", bundle.file_name);
    let headers = [
        (header::CONTENT_TYPE, bundle.content_type.clone()),
        (header::CONTENT_DISPOSITION, disposition),
        (
            HeaderName::from_static(SUCCEEDED_HEADER),
            bundle.succeeded().to_string(),
        ),
        (
            HeaderName::from_static(FAILED_HEADER),
            bundle.failed().to_string(),
        ),
    ];

    (StatusCode::OK, headers, bundle.archive).into_response()
}

/// POST /bundles/report - Bundle a spreadsheet and return outcomes as JSON
#[utoipa::path(
    post,
    path = "/api/v1/bundles/report",
    tag = "bundles",
    request_body(content = Vec<u8>, description = "Spreadsheet upload in the `file` field (multipart/form-data)", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Per-record outcomes with the archive inlined as base64", body = BundleReport),
        (status = 400, description = "Missing or unreadable upload", body = crate::error::ApiError),
        (status = 413, description = "Upload exceeds the configured limit", body = crate::error::ApiError),
        (status = 422, description = "Required columns missing", body = crate::error::ApiError),
        (status = 500, description = "Internal server error", body = crate::error::ApiError)
    )
)]
pub async fn create_bundle_report(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    match bundle_upload(&state, multipart).await {
        Ok(bundle) => (StatusCode::OK, Json(BundleReport::from(bundle))).into_response(),
        Err(e) => e.into_response(),
    }
}
