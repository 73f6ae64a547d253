//! Output types returned by the `generate*` entry points.
//!
//! [`GenerationOutput`] bundles the rendered llms.txt text with per-document
//! records and run statistics. All three are write-once: populated by
//! [`crate::generate::generate`] and never mutated afterwards. The types
//! derive `Serialize` so the CLI `--json` mode can print them directly.

use serde::Serialize;

/// The result of a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutput {
    /// The rendered llms.txt document.
    pub llms_txt: String,
    /// One record per document that made it into the output, in render order.
    pub documents: Vec<DocumentRecord>,
    /// Run statistics.
    pub stats: GenerationStats,
}

/// A summary record for one document included in the output.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRecord {
    /// Root-relative source path, e.g. `"guides/setup.mdx"`.
    pub relative_path: String,
    /// Extracted title (`"Untitled"` when the source had no H1).
    pub title: String,
    /// Section identifier the document was grouped under.
    pub section: String,
}

/// Statistics about a generation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationStats {
    /// Files found by discovery (directory walk or sitemap mapping).
    pub discovered_files: usize,
    /// Files successfully parsed and included in the output.
    pub parsed_documents: usize,
    /// Files skipped due to per-file errors.
    pub skipped_files: usize,
    /// Number of distinct sections in the output.
    pub sections: usize,
    /// Wall-clock duration of the whole run in milliseconds.
    pub duration_ms: u64,
}
