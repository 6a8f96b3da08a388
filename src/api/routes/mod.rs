//! Route handlers
//!
//! Handlers are organized by surface:
//! - [`page`]: HTML upload form and result page
//! - [`bundles`]: ZIP and JSON report API
//! - [`system`]: Health and OpenAPI

use crate::api::AppState;
use crate::error::{Error, Result};
use crate::types::Bundle;
use axum::extract::Multipart;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;

mod bundles;
mod page;
mod system;

pub use bundles::*;
pub use page::*;
pub use system::*;

/// Multipart field carrying the spreadsheet
pub const UPLOAD_FIELD: &str = "file";

/// Read the spreadsheet bytes from the `file` field of a multipart body
///
/// Other fields are ignored. A `file` field with no filename and no content is
/// what browsers send when nothing was chosen, so it counts as missing.
pub(crate) async fn read_upload(mut multipart: Multipart, limit: usize) -> Result<Vec<u8>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let unnamed = field.file_name().is_none_or(str::is_empty);
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;

        if unnamed && bytes.is_empty() {
            return Err(Error::MissingUpload);
        }
        return Ok(bytes.to_vec());
    }

    Err(Error::MissingUpload)
}

fn multipart_error(e: MultipartError, limit: usize) -> Error {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::UploadTooLarge { limit }
    } else {
        Error::InvalidUpload(e.body_text())
    }
}

/// Run one upload through the bundler
///
/// Shared by the HTML page and the API; logs every outcome as it happens.
pub(crate) async fn bundle_upload(
    state: &AppState,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Bundle> {
    let multipart = multipart.map_err(|e| Error::InvalidUpload(e.body_text()))?;
    let upload = read_upload(multipart, state.config.server.api.max_upload_bytes).await?;

    tracing::info!(bytes = upload.len(), "spreadsheet received");

    state
        .bundler
        .bundle_spreadsheet(&upload, |outcome| {
            tracing::info!(position = outcome.position(), "{outcome}");
        })
        .await
}
