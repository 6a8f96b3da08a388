//! Configuration types for product-image-bundler

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, time::Duration};

/// How each image is fetched
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout covering connect, headers and body (default: 10s)
    #[serde(default = "default_fetch_timeout")]
    pub timeout: Duration,

    /// User-Agent header sent to image hosts
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: default_fetch_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Which spreadsheet columns hold the record fields
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputConfig {
    /// Header of the product name column (default: "Product Name")
    #[serde(default = "default_product_name_column")]
    pub product_name_column: String,

    /// Header of the image URL column (default: "Image URL")
    #[serde(default = "default_image_url_column")]
    pub image_url_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            product_name_column: default_product_name_column(),
            image_url_column: default_image_url_column(),
        }
    }
}

impl InputConfig {
    /// Required headers in the order they are reported when missing
    pub fn required_columns(&self) -> [&str; 2] {
        [
            self.product_name_column.as_str(),
            self.image_url_column.as_str(),
        ]
    }
}

/// Compression applied to archive entries
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveCompression {
    /// Store entries without compression
    Stored,
    /// Deflate entries (default)
    #[default]
    Deflated,
}

/// Shape of the produced archive
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Download file name offered to the client (default: "product_images.zip")
    #[serde(default = "default_archive_file_name")]
    pub file_name: String,

    /// MIME type of the download (default: "application/zip")
    #[serde(default = "default_content_type")]
    pub content_type: String,

    /// Extension appended to every entry regardless of fetched content (default: "jpg")
    #[serde(default = "default_entry_extension")]
    pub entry_extension: String,

    /// Minimum digits of the zero-padded position prefix (default: 3)
    #[serde(default = "default_position_width")]
    pub position_width: usize,

    /// Entry compression method
    #[serde(default)]
    pub compression: ArchiveCompression,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            file_name: default_archive_file_name(),
            content_type: default_content_type(),
            entry_extension: default_entry_extension(),
            position_width: default_position_width(),
            compression: ArchiveCompression::default(),
        }
    }
}

/// Server integration configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServerIntegrationConfig {
    /// HTTP surface configuration
    #[serde(default)]
    pub api: ApiConfig,
}

/// HTTP surface configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Address to bind to (default: 127.0.0.1:8501)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,

    /// Largest accepted request body in bytes (default: 16 MiB)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Main configuration for [`ImageBundler`](crate::ImageBundler) and its HTTP surface
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Image fetching
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Spreadsheet column names
    #[serde(default)]
    pub input: InputConfig,

    /// Archive naming and compression
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerIntegrationConfig,
}

impl Config {
    /// Reject settings that would break the naming or ordering guarantees
    pub fn validate(&self) -> Result<()> {
        if self.fetch.timeout.is_zero() {
            return Err(invalid("fetch.timeout", "timeout must be greater than zero"));
        }

        for (key, column) in [
            ("input.product_name_column", &self.input.product_name_column),
            ("input.image_url_column", &self.input.image_url_column),
        ] {
            if column.trim().is_empty() {
                return Err(invalid(key, "column name must not be blank"));
            }
        }

        let file_name = &self.archive.file_name;
        if file_name.is_empty() || !file_name.to_ascii_lowercase().ends_with(".zip") {
            return Err(invalid(
                "archive.file_name",
                format!("'{file_name}' must be a non-empty name ending in .zip"),
            ));
        }
        if file_name.contains(['/', '\\', '"']) {
            return Err(invalid(
                "archive.file_name",
                format!("'{file_name}' must not contain path separators or quotes"),
            ));
        }

        let ext = &self.archive.entry_extension;
        if ext.is_empty() || ext.contains(['.', '/', '\\']) {
            return Err(invalid(
                "archive.entry_extension",
                format!("'{ext}' must be a bare extension such as \"jpg\""),
            ));
        }

        if !(1..=9).contains(&self.archive.position_width) {
            return Err(invalid(
                "archive.position_width",
                "position width must be between 1 and 9",
            ));
        }

        if self.server.api.max_upload_bytes == 0 {
            return Err(invalid(
                "server.api.max_upload_bytes",
                "upload limit must be greater than zero",
            ));
        }

        Ok(())
    }
}

fn invalid(key: &str, message: impl Into<String>) -> Error {
    Error::Config {
        message: message.into(),
        key: Some(key.to_string()),
    }
}

// Default value functions
fn default_fetch_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    concat!("product-image-bundler/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_product_name_column() -> String {
    "Product Name".to_string()
}

fn default_image_url_column() -> String {
    "Image URL".to_string()
}

fn default_archive_file_name() -> String {
    "product_images.zip".to_string()
}

fn default_content_type() -> String {
    "application/zip".to_string()
}

fn default_entry_extension() -> String {
    "jpg".to_string()
}

fn default_position_width() -> usize {
    3
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8501))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_true() -> bool {
    true
}
