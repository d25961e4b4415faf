//! Snapshot types for a finished build.
//!
//! The build tool hands us a read-only view of what it emitted: a list of
//! chunks (each an optional display name plus emitted file names) and the
//! output directory the files were written to. Nothing here is mutated.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A named group of related output files produced by one build unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Display name of the chunk, if the build tool assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// File names emitted for this chunk, relative to the output directory.
    pub files: Vec<String>,
}

impl Chunk {
    pub fn new(name: impl Into<String>, files: Vec<String>) -> Self {
        Self {
            name: Some(name.into()),
            files,
        }
    }
}

/// Read-only snapshot of a finished build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOutput {
    /// Directory the build tool wrote its files to.
    pub output_dir: PathBuf,
    /// Chunks emitted by the build, in build-tool iteration order.
    pub chunks: Vec<Chunk>,
}

impl BuildOutput {
    pub fn new(output_dir: impl Into<PathBuf>, chunks: Vec<Chunk>) -> Self {
        Self {
            output_dir: output_dir.into(),
            chunks,
        }
    }

    /// Resolves the on-disk path of an emitted file.
    ///
    /// Any `?query` suffix on the name is stripped first; bundlers append
    /// cache-busting queries that are not part of the file name on disk.
    pub fn asset_path(&self, name: &str) -> PathBuf {
        let name = name.split('?').next().unwrap_or(name);
        self.output_dir.join(name)
    }
}

/// The build tool's error and warning channels.
///
/// The lifecycle entry point reports into these instead of propagating:
/// entries in `errors` are expected to fail the build upstream, entries in
/// `warnings` are informational.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildDiagnostics {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl BuildDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn push_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}
