//! Error types for configuration validation and source-map upload.

/// A single invalid or missing configuration option.
///
/// Configuration errors are always surfaced on the build error channel,
/// regardless of the `ignore_errors` / `silent` flags (those govern upload
/// failures only).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("`service_name` is required and must be non-empty")]
    MissingServiceName,

    #[error("`version` is required and must be non-empty")]
    MissingVersion,

    #[error("`public_path` prefix must be non-empty")]
    EmptyPublicPath,

    #[error("`apm_endpoint` is not a valid URL: {0}")]
    InvalidEndpoint(String),
}

/// A classified per-asset upload failure.
///
/// Every variant carries the name of the source-map file it concerns, and
/// `Display` keeps the `failed to upload <map> to Elastic APM` tag so the
/// build log identifies the offending asset.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The local map file could not be read.
    #[error("failed to upload {source_map} to Elastic APM: {source}")]
    Read {
        source_map: String,
        #[source]
        source: std::io::Error,
    },

    /// The request never completed (connection refused, DNS, timeout).
    #[error("failed to upload {source_map} to Elastic APM: {source}")]
    Transport {
        source_map: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-2xx status.
    #[error("failed to upload {source_map} to Elastic APM: {details}")]
    Rejected { source_map: String, details: String },
}

impl UploadError {
    /// Name of the source-map file this failure concerns.
    pub fn source_map(&self) -> &str {
        match self {
            Self::Read { source_map, .. }
            | Self::Transport { source_map, .. }
            | Self::Rejected { source_map, .. } => source_map,
        }
    }
}
