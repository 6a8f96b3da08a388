//! HTML handlers: upload form and result page.
//!
//! The result page carries the finished archive inline as base64 inside a
//! non-executing `<script>` block; a small script turns it into a `Blob` URL for
//! the download link. The server keeps nothing between the upload and the click,
//! and no `data:` URL length limit applies.

use super::{UPLOAD_FIELD, bundle_upload};
use crate::api::AppState;
use crate::error::{Error, ToHttpStatus};
use crate::types::Bundle;
use ammonia::clean_text;
use axum::{
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use base64::Engine as _;

/// Page heading and document title
pub const PAGE_TITLE: &str = "Product Image Downloader";

/// Banner shown once an upload has been accepted
pub const UPLOAD_ACCEPTED: &str =
    "File uploaded successfully. Downloading images in spreadsheet order...";

/// Label of the archive download link
pub const DOWNLOAD_LABEL: &str = "⬇ Download All Images (ZIP)";

/// Element id of the embedded base64 archive
pub const ARCHIVE_DATA_ID: &str = "bundle-archive";

// Decodes the embedded archive into a Blob and points the link at it
const DOWNLOAD_SCRIPT: &str = "(function(){\
var link=document.getElementById('bundle-download');\
var raw=atob(document.getElementById('bundle-archive').textContent.trim());\
var bytes=new Uint8Array(raw.length);\
for(var i=0;i<raw.length;i++){bytes[i]=raw.charCodeAt(i);}\
link.href=URL.createObjectURL(new Blob([bytes],{type:link.dataset.type}));\
})();";

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}\
.banner{padding:.75rem 1rem;border-radius:.25rem;margin:1rem 0}\
.ok{background:#e6f4ea;color:#1e4620}\
.err{background:#fdecea;color:#611a15}\
.log{max-height:24rem;overflow-y:auto;border:1px solid #ddd;padding:.5rem 1rem;font-family:monospace}\
.log p{margin:.25rem 0}\
.download{display:inline-block;margin-top:1rem;padding:.5rem 1rem;background:#1a73e8;color:#fff;text-decoration:none;border-radius:.25rem}";

/// GET / - Upload form
pub async fn upload_form() -> Html<String> {
    Html(layout(""))
}

/// POST / - Run the uploaded spreadsheet and render the outcome log
pub async fn submit_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    match bundle_upload(&state, multipart).await {
        Ok(bundle) => Html(layout(&result_section(&bundle))).into_response(),
        Err(e) => error_page(&e),
    }
}

fn error_page(error: &Error) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        tracing::error!(error = %error, "upload failed");
    }

    let banner = format!(
        r#"<div class="banner err">{}</div>"#,
        clean_text(&error.to_string())
    );
    (status, Html(layout(&banner))).into_response()
}

fn result_section(bundle: &Bundle) -> String {
    let lines: String = bundle
        .outcomes
        .iter()
        .map(|outcome| format!("<p>{}</p>", clean_text(&outcome.to_string())))
        .collect();

    let encoded = base64::engine::general_purpose::STANDARD.encode(&bundle.archive);

    format!(
        r##"<div class="banner ok">{UPLOAD_ACCEPTED}</div>
<div class="log">{lines}</div>
<script type="application/octet-stream" id="{ARCHIVE_DATA_ID}">{encoded}</script>
<a class="download" id="bundle-download" href="#" data-type="{content_type}" download="{file_name}">{DOWNLOAD_LABEL}</a>
<script>{DOWNLOAD_SCRIPT}</script>"##,
        content_type = clean_text(&bundle.content_type),
        file_name = clean_text(&bundle.file_name),
    )
}

fn layout(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{PAGE_TITLE}</title>
<style>{STYLE}</style>
</head>
<body>
<h1>{PAGE_TITLE}</h1>
<form method="post" action="/" enctype="multipart/form-data">
<label for="{UPLOAD_FIELD}">Upload Excel file with 'Product Name' and 'Image URL' columns</label>
<input type="file" id="{UPLOAD_FIELD}" name="{UPLOAD_FIELD}" accept=".xlsx" required>
<button type="submit">Upload</button>
</form>
{content}
</body>
</html>"#
    )
}
