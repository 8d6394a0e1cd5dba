//! Upload orchestration module
//!
//! Walks region -> template -> bucket sequentially, probing the destination
//! for each object and uploading according to the decision table in
//! [`plan::decide`]. A missing destination bucket is recoverable: with
//! `--createifnobucket` the bucket is created (versioning enabled) and the
//! put retried once, otherwise the loop logs a warning and moves on. Every
//! other provider error terminates the run.

use std::fs;
use std::path::PathBuf;

use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::s3::{ObjectAcl, ObjectStore, StoreError};
use crate::upload::plan::Decision;

pub mod plan;

/// Upload errors
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Failed to read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Counters reported at the end of a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UploadSummary {
    pub uploaded: usize,
    pub skipped: usize,
    pub buckets_created: usize,
}

impl UploadSummary {
    /// Fold another summary into this one.
    pub fn merge(&mut self, other: &UploadSummary) {
        self.uploaded += other.uploaded;
        self.skipped += other.skipped;
        self.buckets_created += other.buckets_created;
    }
}

/// Upload orchestrator
///
/// Holds the immutable invocation config; the per-region object store is
/// passed in by the caller, one per region.
pub struct Uploader<'a> {
    config: &'a Config,
}

impl<'a> Uploader<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Upload every configured template to every destination bucket in one
    /// region.
    pub async fn upload_region(
        &self,
        region: &str,
        store: &dyn ObjectStore,
    ) -> Result<UploadSummary, UploadError> {
        let buckets = plan::buckets_for(self.config, region);
        let mut summary = UploadSummary::default();

        for template in &self.config.templates {
            let path = plan::source_path(template);
            // Read once and hand the same bytes to every destination; Bytes
            // clones are refcounted.
            let body = fs::read(&path)
                .map(Bytes::from)
                .map_err(|source| UploadError::TemplateRead {
                    path: path.clone(),
                    source,
                })?;
            let key = plan::destination_key(template, &self.config.version);

            for bucket in &buckets {
                self.upload_object(region, bucket, &key, template, body.clone(), store, &mut summary)
                    .await?;
            }
        }

        Ok(summary)
    }

    #[allow(clippy::too_many_arguments)]
    async fn upload_object(
        &self,
        region: &str,
        bucket: &str,
        key: &str,
        template: &str,
        body: Bytes,
        store: &dyn ObjectStore,
        summary: &mut UploadSummary,
    ) -> Result<(), UploadError> {
        let exists = store.object_exists(bucket, key).await?;
        if exists {
            warn!(bucket, key, "object already exists in bucket");
        }

        match plan::decide(exists, self.config.override_existing, self.config.dryrun) {
            Decision::Skip(reason) => {
                info!(
                    template,
                    bucket,
                    exists,
                    override_existing = self.config.override_existing,
                    dryrun = self.config.dryrun,
                    "not uploading: {reason}"
                );
                summary.skipped += 1;
            }
            Decision::Upload => {
                match store.put_object(bucket, key, body.clone(), ObjectAcl::PublicRead).await {
                    Ok(()) => {
                        info!(template, "uploaded to s3://{bucket}/{key}");
                        summary.uploaded += 1;
                    }
                    Err(StoreError::NoSuchBucket { .. }) if self.config.create_if_no_bucket => {
                        info!(bucket, "bucket does not exist, creating it");
                        store.create_bucket(bucket, region).await?;
                        store.enable_versioning(bucket).await?;
                        info!(
                            bucket,
                            "created bucket with versioning enabled, please enable bucket logging manually"
                        );
                        summary.buckets_created += 1;

                        store.put_object(bucket, key, body, ObjectAcl::PublicRead).await?;
                        info!(template, "uploaded to s3://{bucket}/{key}");
                        summary.uploaded += 1;
                    }
                    Err(StoreError::NoSuchBucket { .. }) => {
                        // Recoverable: log and give control back to the loop.
                        warn!(
                            template,
                            bucket, key, "could not upload, bucket is not present"
                        );
                        summary.skipped += 1;
                    }
                    Err(err) => {
                        warn!(
                            template,
                            bucket,
                            key,
                            error = %err,
                            "could not upload"
                        );
                        return Err(err.into());
                    }
                }
            }
        }

        Ok(())
    }
}
