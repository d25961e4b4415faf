//! Upload configuration.
//!
//! Resolved once at construction and immutable afterwards. Validation is
//! explicit and collects every problem instead of stopping at the first,
//! so the build log shows the full picture in one pass.

use std::fmt;

use crate::error::ConfigError;

/// Default Elastic APM server endpoint for source-map uploads.
pub const DEFAULT_APM_ENDPOINT: &str = "http://localhost:8200/assets/v1/sourcemaps";

/// How the public-facing path of a bundle is derived.
///
/// The runtime reports this path in stack traces, so it must match what the
/// browser actually loaded.
pub enum PublicPathResolver {
    /// A static URL prefix; the bundle file name is appended with exactly
    /// one `/` separator.
    Prefix(String),
    /// A caller-supplied function from bundle file name to full public URL,
    /// used verbatim.
    Resolver(Box<dyn Fn(&str) -> String + Send + Sync>),
}

impl PublicPathResolver {
    /// Resolves the public path for a bundle file name.
    pub fn resolve(&self, source_file: &str) -> String {
        match self {
            Self::Prefix(prefix) => {
                let sep = if prefix.ends_with('/') { "" } else { "/" };
                format!("{prefix}{sep}{source_file}")
            }
            Self::Resolver(f) => f(source_file),
        }
    }
}

impl fmt::Debug for PublicPathResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefix(prefix) => f.debug_tuple("Prefix").field(prefix).finish(),
            Self::Resolver(_) => f.debug_tuple("Resolver").field(&"<fn>").finish(),
        }
    }
}

impl From<String> for PublicPathResolver {
    fn from(prefix: String) -> Self {
        Self::Prefix(prefix)
    }
}

impl From<&str> for PublicPathResolver {
    fn from(prefix: &str) -> Self {
        Self::Prefix(prefix.to_string())
    }
}

/// Configuration for the source-map upload pipeline.
#[derive(Debug)]
pub struct UploadConfig {
    /// Elastic API key. Sent as `Authorization: ApiKey <key>`.
    pub api_key: Option<String>,
    /// APM secret token. Sent as `Authorization: Bearer <token>` and wins
    /// over `api_key` when both are set.
    pub apm_token: Option<String>,
    /// Service name registered with APM.
    pub service_name: String,
    /// Service version the uploaded maps belong to.
    pub version: String,
    /// Public-path resolution strategy.
    pub public_path: PublicPathResolver,
    /// Chunk allow-list. Empty means all chunks; comparison is name-exact
    /// and case-sensitive.
    pub include_chunks: Vec<String>,
    /// Suppress informational notices (and, with `ignore_errors`, upload
    /// failure warnings).
    pub silent: bool,
    /// Downgrade upload failures from build errors to warnings.
    pub ignore_errors: bool,
    /// APM server endpoint receiving the multipart upload.
    pub apm_endpoint: String,
    /// Percent-encode the bundle file name before building its public path.
    pub encode_filename: bool,
}

impl UploadConfig {
    /// Creates a configuration with the required options; everything else
    /// takes its default.
    pub fn new(
        service_name: impl Into<String>,
        version: impl Into<String>,
        public_path: impl Into<PublicPathResolver>,
    ) -> Self {
        Self {
            api_key: None,
            apm_token: None,
            service_name: service_name.into(),
            version: version.into(),
            public_path: public_path.into(),
            include_chunks: Vec::new(),
            silent: false,
            ignore_errors: false,
            apm_endpoint: DEFAULT_APM_ENDPOINT.to_string(),
            encode_filename: false,
        }
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn apm_token(mut self, token: impl Into<String>) -> Self {
        self.apm_token = Some(token.into());
        self
    }

    pub fn include_chunks(mut self, chunks: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include_chunks = chunks.into_iter().map(Into::into).collect();
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn ignore_errors(mut self, ignore: bool) -> Self {
        self.ignore_errors = ignore;
        self
    }

    pub fn apm_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.apm_endpoint = endpoint.into();
        self
    }

    pub fn encode_filename(mut self, encode: bool) -> Self {
        self.encode_filename = encode;
        self
    }

    /// Checks the configuration, collecting every problem found.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        if self.service_name.is_empty() {
            errors.push(ConfigError::MissingServiceName);
        }
        if self.version.is_empty() {
            errors.push(ConfigError::MissingVersion);
        }
        if let PublicPathResolver::Prefix(prefix) = &self.public_path {
            if prefix.is_empty() {
                errors.push(ConfigError::EmptyPublicPath);
            }
        }
        if let Err(e) = reqwest::Url::parse(&self.apm_endpoint) {
            errors.push(ConfigError::InvalidEndpoint(e.to_string()));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Resolves the public path the runtime will report for a bundle.
    pub fn resolve_public_path(&self, source_file: &str) -> String {
        self.public_path.resolve(source_file)
    }

    /// The `Authorization` header value, if any credential is configured.
    ///
    /// The APM secret token takes precedence over the API key when both are
    /// present.
    pub fn authorization(&self) -> Option<String> {
        if let Some(token) = &self.apm_token {
            Some(format!("Bearer {token}"))
        } else {
            self.api_key.as_ref().map(|key| format!("ApiKey {key}"))
        }
    }
}
