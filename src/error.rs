//! Error types for product-image-bundler
//!
//! Two failure scopes exist:
//! - [`Error`] is fatal to a run (bad upload, missing columns, archive failure) and
//!   maps onto an HTTP status for the API surface.
//! - [`FetchError`] is scoped to a single record; the bundler records it as a failed
//!   outcome and moves on to the next row.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for product-image-bundler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for product-image-bundler
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "fetch.timeout")
        key: Option<String>,
    },

    /// Required spreadsheet columns are absent; no image is fetched
    #[error("spreadsheet must contain columns: {}", required.join(", "))]
    Schema {
        /// Columns the run requires, in display order
        required: Vec<String>,
        /// Required columns not present in the header row
        missing: Vec<String>,
    },

    /// Upload could not be read as a workbook
    #[error("invalid spreadsheet: {0}")]
    Spreadsheet(String),

    /// Multipart request did not contain a `file` field
    #[error("no spreadsheet provided in 'file' field")]
    MissingUpload,

    /// Multipart request was malformed
    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    /// Request body exceeded the configured upload limit
    #[error("upload exceeds the {limit} byte limit")]
    UploadTooLarge {
        /// Configured limit in bytes
        limit: usize,
    },

    /// Writing the in-memory archive failed
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client error outside of a single record fetch
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),
}

/// Failure to fetch the image of one record
///
/// The `Display` output is what ends up in the progress log next to the product name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The cell did not hold a usable absolute URL
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL as read from the spreadsheet (trimmed)
        url: String,
        /// Why the URL could not be parsed
        reason: String,
    },

    /// No complete response within the configured timeout
    #[error("timed out fetching '{url}' (exceeded {seconds} seconds)")]
    Timeout {
        /// The requested URL
        url: String,
        /// The configured timeout
        seconds: u64,
    },

    /// DNS resolution or TCP/TLS connection failed
    #[error("connection failed for '{url}': {reason}")]
    Connect {
        /// The requested URL
        url: String,
        /// Underlying client error text
        reason: String,
    },

    /// The server answered with a non-2xx status
    #[error("HTTP {status} {reason} for url: {url}")]
    Status {
        /// The requested URL
        url: String,
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status
        reason: String,
    },

    /// Any other request-level failure
    #[error("request to '{url}' failed: {reason}")]
    Transport {
        /// The requested URL
        url: String,
        /// Underlying client error text
        reason: String,
    },

    /// The response body could not be read to the end
    #[error("failed to read response body from '{url}': {reason}")]
    Body {
        /// The requested URL
        url: String,
        /// Underlying client error text
        reason: String,
    },
}

impl FetchError {
    /// The URL the failed request targeted
    pub fn url(&self) -> &str {
        match self {
            FetchError::InvalidUrl { url, .. }
            | FetchError::Timeout { url, .. }
            | FetchError::Connect { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Transport { url, .. }
            | FetchError::Body { url, .. } => url,
        }
    }
}

/// API error response format
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "schema_error",
///     "message": "spreadsheet must contain columns: Product Name, Image URL",
///     "details": {
///       "missing_columns": ["Image URL"],
///       "required_columns": ["Product Name", "Image URL"]
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "schema_error", "missing_file")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - the upload itself is unusable
            Error::Config { .. } => 400,
            Error::Spreadsheet(_) => 400,
            Error::MissingUpload => 400,
            Error::InvalidUpload(_) => 400,

            // 413 Payload Too Large
            Error::UploadTooLarge { .. } => 413,

            // 422 Unprocessable Entity - readable workbook, wrong shape
            Error::Schema { .. } => 422,

            // 500 Internal Server Error
            Error::Archive(_) => 500,
            Error::Io(_) => 500,
            Error::ApiServerError(_) => 500,

            // 502 Bad Gateway
            Error::Network(_) => 502,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Schema { .. } => "schema_error",
            Error::Spreadsheet(_) => "invalid_spreadsheet",
            Error::MissingUpload => "missing_file",
            Error::InvalidUpload(_) => "invalid_upload",
            Error::UploadTooLarge { .. } => "upload_too_large",
            Error::Archive(_) => "archive_error",
            Error::Io(_) => "io_error",
            Error::Network(_) => "network_error",
            Error::ApiServerError(_) => "api_server_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        let details = match &error {
            Error::Schema { required, missing } => Some(serde_json::json!({
                "missing_columns": missing,
                "required_columns": required,
            })),
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({
                "key": key,
            })),
            Error::UploadTooLarge { limit } => Some(serde_json::json!({
                "limit_bytes": limit,
            })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}
