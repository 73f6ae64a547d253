//! Error types for the llmstxt-gen library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`GenerateError`] — **Fatal**: the run cannot proceed at all (missing
//!   input directory, unreadable sitemap, unwritable output destination).
//!   Returned as `Err(GenerateError)` from the top-level `generate*`
//!   functions.
//!
//! * [`DocumentError`] — **Non-fatal**: a single source file failed (read
//!   error, path outside the input root). The batch logs it and continues,
//!   degrading to "fewer documents in the output" rather than aborting.
//!
//! The transformer itself has no error path: any input string produces an
//! output string, so malformed MDX degrades to imperfect but non-crashing
//! Markdown.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the llmstxt-gen library.
///
/// Per-file failures use [`DocumentError`] and are logged and skipped
/// rather than propagated here.
#[derive(Debug, Error)]
pub enum GenerateError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The input directory was not found at the given path.
    #[error("input directory not found: '{path}'\nCheck the path exists and is readable.")]
    InputDirNotFound { path: PathBuf },

    /// The input path exists but is not a directory.
    #[error("input path is not a directory: '{path}'")]
    NotADirectory { path: PathBuf },

    /// Walking the input directory failed partway through.
    #[error("failed to scan '{path}': {source}")]
    ScanFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Sitemap errors ────────────────────────────────────────────────────
    /// Could not open or read the sitemap file.
    #[error("failed to read sitemap '{path}': {source}")]
    SitemapUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sitemap XML could not be parsed.
    #[error("invalid sitemap '{path}': {detail}")]
    SitemapInvalid { path: PathBuf, detail: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal error for a single source file.
///
/// Logged as a warning by the orchestration loop; the run continues with
/// the remaining files.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file could not be opened or read as UTF-8 text.
    #[error("failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file path does not sit under the input root, so no relative
    /// path (and therefore no section or URL) can be derived.
    #[error("'{path}' is outside the input directory '{root}'")]
    OutsideRoot { path: PathBuf, root: PathBuf },
}
