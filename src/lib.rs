//! # product-image-bundler
//!
//! Batch-downloads the product images listed in a spreadsheet and packs them into
//! a single ZIP, preserving row order in both the progress log and the file names.
//!
//! ## Pipeline
//!
//! 1. [`spreadsheet`] reads the first worksheet of an `.xlsx` upload into ordered
//!    [`Record`]s and checks that the `Product Name` and `Image URL` columns exist.
//! 2. [`ImageBundler`] fetches each record's image once, in order, isolating
//!    failures to the record that caused them.
//! 3. [`archive::ArchiveBuilder`] collects successes as `NNN_<name>.jpg` entries.
//! 4. [`api`] serves the upload form, the progress log and the finished download.
//!
//! ## Quick Start
//!
//! ```no_run
//! use product_image_bundler::{Config, ImageBundler};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bundler = ImageBundler::new(Config::default())?;
//!     let upload = std::fs::read("products.xlsx")?;
//!
//!     let bundle = bundler
//!         .bundle_spreadsheet(&upload, |outcome| println!("{outcome}"))
//!         .await?;
//!
//!     std::fs::write(&bundle.file_name, &bundle.archive)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// HTTP surface: upload form, result page and JSON/ZIP API
pub mod api;
/// In-memory ZIP assembly
pub mod archive;
/// The fetch-and-pack loop
pub mod bundler;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Single-attempt image fetching
pub mod fetcher;
/// Spreadsheet input parsing
pub mod spreadsheet;
/// Core types
pub mod types;
/// Entry naming helpers
pub mod utils;

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use bundler::ImageBundler;
pub use config::Config;
pub use error::{ApiError, Error, ErrorDetail, FetchError, Result, ToHttpStatus};
pub use types::{Bundle, BundleReport, Outcome, Record};

/// Serve the HTTP surface until SIGINT/SIGTERM (Ctrl+C on other platforms)
///
/// # Example
///
/// ```no_run
/// use product_image_bundler::{Config, ImageBundler, serve_with_shutdown};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let bundler = ImageBundler::new(Config::default())?;
///     serve_with_shutdown(bundler).await?;
///     Ok(())
/// }
/// ```
pub async fn serve_with_shutdown(bundler: ImageBundler) -> Result<()> {
    api::start_api_server_with_shutdown(std::sync::Arc::new(bundler), wait_for_signal()).await
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Signal registration can fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal");
                }
            }
        }
        (Ok(mut sigterm), Err(e)) => {
            tracing::warn!(error = %e, "Failed to register SIGINT handler, using SIGTERM only");
            sigterm.recv().await;
            tracing::info!("Received SIGTERM signal");
        }
        (Err(e), Ok(mut sigint)) => {
            tracing::warn!(error = %e, "Failed to register SIGTERM handler, using SIGINT only");
            sigint.recv().await;
            tracing::info!("Received SIGINT signal");
        }
        (Err(e1), Err(e2)) => {
            tracing::error!(
                sigterm_error = %e1,
                sigint_error = %e2,
                "Failed to register signal handlers, falling back to ctrl_c"
            );
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to wait for ctrl_c");
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to wait for ctrl_c");
        return;
    }
    tracing::info!("Received Ctrl+C signal");
}
