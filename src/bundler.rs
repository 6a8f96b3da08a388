//! The fetch-and-pack loop
//!
//! [`ImageBundler`] turns an uploaded spreadsheet into a [`Bundle`]: records are
//! processed strictly one after another in input order, each producing exactly
//! one [`Outcome`]. A failed fetch is recorded and skipped; it never aborts the
//! run. Only a fatal [`Error`](crate::Error) (schema, unreadable upload, archive
//! write) stops a run, and schema failures stop it before any request is made.

use crate::archive::ArchiveBuilder;
use crate::config::Config;
use crate::error::Result;
use crate::fetcher::ImageFetcher;
use crate::spreadsheet;
use crate::types::{Bundle, Outcome, Record};
use crate::utils::{entry_filename, sanitize_product_name};
use std::sync::Arc;
use tracing::{info, warn};

/// Builds image bundles from spreadsheets
///
/// Holds no per-run state; every call works on its own archive, so one
/// instance can serve any number of independent runs.
#[derive(Clone, Debug)]
pub struct ImageBundler {
    /// Active configuration
    pub config: Arc<Config>,
    fetcher: ImageFetcher,
}

impl ImageBundler {
    /// Create a bundler after validating the configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let fetcher = ImageFetcher::new(&config.fetch)?;

        Ok(Self {
            config: Arc::new(config),
            fetcher,
        })
    }

    /// Parse an uploaded workbook and bundle every record in it
    ///
    /// `on_outcome` is called for each record, in order, as soon as its outcome
    /// is known and before the next fetch starts.
    pub async fn bundle_spreadsheet<F>(&self, upload: &[u8], on_outcome: F) -> Result<Bundle>
    where
        F: FnMut(&Outcome),
    {
        let records = spreadsheet::parse_records(upload, &self.config.input)?;
        self.bundle_records(&records, on_outcome).await
    }

    /// Fetch every record sequentially and pack the successes
    pub async fn bundle_records<F>(&self, records: &[Record], mut on_outcome: F) -> Result<Bundle>
    where
        F: FnMut(&Outcome),
    {
        let archive_config = &self.config.archive;
        let mut archive = ArchiveBuilder::new(archive_config);
        let mut outcomes = Vec::with_capacity(records.len());

        info!(records = records.len(), "starting bundle run");

        for record in records {
            let outcome = self.process_record(record, &mut archive).await?;
            on_outcome(&outcome);
            outcomes.push(outcome);
        }

        let entries = archive.len();
        let bytes = archive.finish()?;

        info!(
            records = records.len(),
            succeeded = entries,
            failed = records.len() - entries,
            archive_bytes = bytes.len(),
            "bundle run finished"
        );

        Ok(Bundle {
            outcomes,
            archive: bytes,
            file_name: archive_config.file_name.clone(),
            content_type: archive_config.content_type.clone(),
        })
    }

    async fn process_record(
        &self,
        record: &Record,
        archive: &mut ArchiveBuilder,
    ) -> Result<Outcome> {
        let product_name = record.product_name.trim();
        let image_url = record.image_url.trim();
        let safe_name = sanitize_product_name(product_name);

        match self.fetcher.fetch(image_url).await {
            Ok(body) => {
                let archive_config = &self.config.archive;
                let filename = entry_filename(
                    record.position,
                    &safe_name,
                    &archive_config.entry_extension,
                    archive_config.position_width,
                );
                archive.add(&filename, &body)?;

                Ok(Outcome::Success {
                    position: record.position,
                    filename,
                })
            }
            Err(e) => {
                warn!(
                    position = record.position,
                    product = product_name,
                    url = image_url,
                    error = %e,
                    "image fetch failed"
                );

                Ok(Outcome::Failure {
                    position: record.position,
                    product_name: product_name.to_string(),
                    error: e.to_string(),
                })
            }
        }
    }
}
