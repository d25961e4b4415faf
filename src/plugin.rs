//! Build-lifecycle entry point.
//!
//! One call per finished build. Problems never propagate past this
//! boundary: configuration errors and upload failures are routed into the
//! build tool's error/warning channels per the configured policy.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::assets::select_assets;
use crate::config::UploadConfig;
use crate::output::{BuildDiagnostics, BuildOutput};
use crate::reporter::Reporter;
use crate::upload::{Uploader, first_failure};

/// Uploads the source maps of a finished build to Elastic APM.
pub struct SourceMapUploader {
    uploader: Uploader,
}

impl SourceMapUploader {
    /// Creates the uploader for a resolved configuration.
    pub fn new(config: UploadConfig) -> Self {
        Self {
            uploader: Uploader::new(config),
        }
    }

    /// Creates the uploader with a custom console sink.
    pub fn with_reporter(config: UploadConfig, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            uploader: Uploader::with_reporter(config, reporter),
        }
    }

    /// Handles a finished build.
    ///
    /// Validates the configuration, selects eligible asset pairs, uploads
    /// them, and routes any failure into `diag`:
    ///
    /// - configuration errors always land on the error channel and no
    ///   upload is attempted;
    /// - a batch failure lands on the error channel, or on the warning
    ///   channel when `ignore_errors` is set, or nowhere when both
    ///   `ignore_errors` and `silent` are set.
    pub async fn on_build_finished(&self, build: &BuildOutput, diag: &mut BuildDiagnostics) {
        let config = self.uploader.config();

        if let Err(errors) = config.validate() {
            for e in &errors {
                error!(error = %e, "invalid configuration");
                diag.push_error(e.to_string());
            }
            return;
        }

        let pairs = select_assets(&build.chunks, config);
        debug!(count = pairs.len(), "selected source maps for upload");

        let outcomes = self.uploader.upload_all(build, &pairs).await;

        if let Some(failure) = first_failure(&outcomes) {
            if !config.ignore_errors {
                diag.push_error(failure.to_string());
            } else if !config.silent {
                warn!(error = %failure, "source map upload failed (ignored)");
                diag.push_warning(failure.to_string());
            } else {
                debug!(error = %failure, "source map upload failed (silenced)");
            }
        }
    }
}
