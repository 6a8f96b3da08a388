//! Core types for product-image-bundler

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One data row of the uploaded spreadsheet
///
/// Values are kept exactly as read; trimming and sanitizing happen in the bundler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Record {
    /// 1-based position of the row among the data rows (header excluded)
    pub position: usize,
    /// Raw "Product Name" cell text
    pub product_name: String,
    /// Raw "Image URL" cell text
    pub image_url: String,
}

impl Record {
    /// Create a record
    pub fn new(
        position: usize,
        product_name: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            position,
            product_name: product_name.into(),
            image_url: image_url.into(),
        }
    }
}

/// Result of processing one record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Image fetched and written to the archive
    Success {
        /// Position of the source record
        position: usize,
        /// Archive entry name, e.g. `001_Shoe A.jpg`
        filename: String,
    },
    /// Fetch failed; nothing was written for this record
    Failure {
        /// Position of the source record
        position: usize,
        /// Trimmed product name as it appeared in the spreadsheet
        product_name: String,
        /// Human-readable reason
        error: String,
    },
}

impl Outcome {
    /// Position of the record this outcome belongs to
    pub fn position(&self) -> usize {
        match self {
            Outcome::Success { position, .. } | Outcome::Failure { position, .. } => *position,
        }
    }

    /// Whether the record made it into the archive
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Success { position, filename } => {
                write!(f, "✅ {position}. Downloaded: {filename}")
            }
            Outcome::Failure {
                product_name,
                error,
                ..
            } => write!(f, "❌ Failed for {product_name}: {error}"),
        }
    }
}

/// A finished run: per-record outcomes plus the finalized archive
#[derive(Clone, Debug)]
pub struct Bundle {
    /// One outcome per input record, in input order
    pub outcomes: Vec<Outcome>,
    /// Finalized ZIP bytes
    pub archive: Vec<u8>,
    /// File name to offer the archive under
    pub file_name: String,
    /// MIME type of the archive
    pub content_type: String,
}

impl Bundle {
    /// Number of records written to the archive
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of records that failed to fetch
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// JSON rendering of a [`Bundle`] for API clients
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BundleReport {
    /// One outcome per input record, in input order
    pub outcomes: Vec<Outcome>,
    /// Records written to the archive
    pub succeeded: usize,
    /// Records that failed
    pub failed: usize,
    /// Suggested download file name
    pub file_name: String,
    /// MIME type of the archive
    pub content_type: String,
    /// Archive size in bytes
    pub size_bytes: usize,
    /// Archive contents, standard base64
    pub archive_base64: String,
}

impl From<Bundle> for BundleReport {
    fn from(bundle: Bundle) -> Self {
        use base64::Engine as _;

        let succeeded = bundle.succeeded();
        let failed = bundle.failed();
        let size_bytes = bundle.archive.len();
        let archive_base64 = base64::engine::general_purpose::STANDARD.encode(&bundle.archive);

        Self {
            outcomes: bundle.outcomes,
            succeeded,
            failed,
            file_name: bundle.file_name,
            content_type: bundle.content_type,
            size_bytes,
            archive_base64,
        }
    }
}
