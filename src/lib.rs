//! Source-map upload for Elastic APM.
//!
//! Post-build pipeline step: once a bundler has finished emitting output,
//! this crate pairs each compiled JavaScript bundle with its source map and
//! uploads the pair to Elastic APM so stack traces can be de-minified.
//!
//! # Pipeline
//!
//! 1. **Select** — pair each chunk's `.js` bundle with its `.js.map`,
//!    honoring the chunk allow-list ([`assets::select_assets`])
//! 2. **Upload** — authenticated multipart POST per pair, all concurrent,
//!    settled before any failure is raised ([`upload::Uploader`])
//! 3. **Report** — the lifecycle entry routes the aggregate outcome into
//!    the build tool's error/warning channels ([`SourceMapUploader`])
//!
//! The crate never mutates the build output and never lets an error escape
//! the lifecycle boundary.

pub mod assets;
pub mod config;
pub mod error;
pub mod output;
pub mod plugin;
pub mod reporter;
pub mod upload;

// Re-export primary types for convenience.
pub use assets::{AssetPair, select_assets};
pub use config::{DEFAULT_APM_ENDPOINT, PublicPathResolver, UploadConfig};
pub use error::{ConfigError, UploadError};
pub use output::{BuildDiagnostics, BuildOutput, Chunk};
pub use plugin::SourceMapUploader;
pub use reporter::{ConsoleReporter, Reporter};
pub use upload::{UploadOutcome, Uploader, first_failure};
