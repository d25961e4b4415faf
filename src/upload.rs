//! Upload coordinator: multipart POST of each source map to Elastic APM.
//!
//! Per-asset failures are classified into [`UploadError`] values rather
//! than propagated, so one bad upload never blocks its siblings. The batch
//! settles completely before any failure is reported.

use std::sync::Arc;

use futures_util::future::join_all;
use reqwest::StatusCode;
use reqwest::header;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::assets::AssetPair;
use crate::config::UploadConfig;
use crate::error::UploadError;
use crate::output::BuildOutput;
use crate::reporter::{ConsoleReporter, Reporter};

/// Result of one per-asset upload.
#[derive(Debug)]
pub struct UploadOutcome {
    /// Source-map file name this outcome concerns.
    pub source_map: String,
    pub result: Result<(), UploadError>,
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Returns the first failure in pair order, if any upload failed.
pub fn first_failure(outcomes: &[UploadOutcome]) -> Option<&UploadError> {
    outcomes.iter().find_map(|o| o.result.as_ref().err())
}

/// Error body the APM server may return on rejection.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Uploads source maps to the configured APM endpoint.
pub struct Uploader {
    config: UploadConfig,
    client: reqwest::Client,
    reporter: Arc<dyn Reporter>,
}

impl Uploader {
    /// Creates an uploader reporting to stdout.
    pub fn new(config: UploadConfig) -> Self {
        Self::with_reporter(config, Arc::new(ConsoleReporter))
    }

    /// Creates an uploader with a custom console sink.
    pub fn with_reporter(config: UploadConfig, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            reporter,
        }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Uploads every selected pair concurrently and waits for all to settle.
    ///
    /// Outcomes preserve pair order. A failing upload does not cancel its
    /// siblings; use [`first_failure`] to collapse the settled batch into a
    /// single failure signal.
    pub async fn upload_all(&self, build: &BuildOutput, pairs: &[AssetPair]) -> Vec<UploadOutcome> {
        if pairs.is_empty() {
            return Vec::new();
        }

        // Separates the build tool's own output from upload notices.
        self.reporter.blank_line();

        let uploads = pairs.iter().map(|pair| async move {
            let result = self.upload_one(build, pair).await;
            match &result {
                Ok(()) => info!(source_map = %pair.source_map, "source map uploaded"),
                Err(e) => error!(source_map = %pair.source_map, error = %e, "upload failed"),
            }
            UploadOutcome {
                source_map: pair.source_map.clone(),
                result,
            }
        });

        join_all(uploads).await
    }

    /// Uploads a single bundle/map pair.
    pub async fn upload_one(
        &self,
        build: &BuildOutput,
        pair: &AssetPair,
    ) -> Result<(), UploadError> {
        let map_path = build.asset_path(&pair.source_map);
        debug!(path = %map_path.display(), "reading source map");

        let map_bytes =
            tokio::fs::read(&map_path)
                .await
                .map_err(|source| UploadError::Read {
                    source_map: pair.source_map.clone(),
                    source,
                })?;

        let bundle_filepath = self.config.resolve_public_path(&pair.source_file);
        let form = Form::new()
            .part(
                "sourcemap",
                Part::bytes(map_bytes).file_name(pair.source_map.clone()),
            )
            .text("service_version", self.config.version.clone())
            .text("bundle_filepath", bundle_filepath)
            .text("service_name", self.config.service_name.clone());

        let mut request = self.client.post(&self.config.apm_endpoint).multipart(form);
        if let Some(auth) = self.config.authorization() {
            request = request.header(header::AUTHORIZATION, auth);
        }

        let response = request
            .send()
            .await
            .map_err(|source| UploadError::Transport {
                source_map: pair.source_map.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(UploadError::Rejected {
                source_map: pair.source_map.clone(),
                details: rejection_details(status, &body),
            });
        }

        if !self.config.silent {
            self.reporter
                .notice(&format!("Uploaded {} to Elastic APM", pair.source_map));
        }

        Ok(())
    }
}

/// Extracts failure details from a rejection response.
///
/// Best effort: a JSON body with a `message` field wins; anything else
/// falls back to the status line.
fn rejection_details(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| {
            format!(
                "{} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status")
            )
        })
}
