//! Generation entry points: run the whole pipeline over a directory tree.
//!
//! The run is synchronous and single-pass: discover, then per file extract
//! and transform, then render once. A per-file failure is logged and the
//! file is skipped — the batch degrades to "fewer documents in the output"
//! rather than aborting. Only environment problems (bad input directory,
//! unreadable sitemap, unwritable destination) are fatal.

use crate::config::GenerationConfig;
use crate::error::GenerateError;
use crate::output::{DocumentRecord, GenerationOutput, GenerationStats};
use crate::pipeline::extract::TransformedDocument;
use crate::pipeline::{discover, extract, format, transform};
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Generate the llms.txt document for a directory of documentation sources.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input_dir` — Root of the documentation tree
/// * `config` — Generation configuration
///
/// # Returns
/// `Ok(GenerationOutput)` on success, even if some files were skipped
/// (check `output.stats.skipped_files`).
///
/// # Errors
/// Returns `Err(GenerateError)` only for fatal errors: missing or
/// non-directory input path, unreadable or invalid sitemap.
pub fn generate(
    input_dir: impl AsRef<Path>,
    config: &GenerationConfig,
) -> Result<GenerationOutput, GenerateError> {
    let start = Instant::now();
    let input_dir = input_dir.as_ref();
    info!("starting generation from {}", input_dir.display());

    match std::fs::metadata(input_dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(GenerateError::NotADirectory {
                path: input_dir.to_path_buf(),
            })
        }
        Err(_) => {
            return Err(GenerateError::InputDirNotFound {
                path: input_dir.to_path_buf(),
            })
        }
    }

    let files = discover::discover_files(input_dir, config)?;
    info!("discovered {} candidate files", files.len());

    let mut documents: Vec<TransformedDocument> = Vec::with_capacity(files.len());
    let mut skipped = 0usize;
    for file in &files {
        debug!("processing {}", file.display());
        match extract::parse_file(file, input_dir) {
            Ok(parsed) => documents.push(transform::transform_document(parsed)),
            Err(e) => {
                warn!("skipping {}: {e}", file.display());
                skipped += 1;
            }
        }
    }

    if documents.is_empty() {
        warn!("no documents made it into the output");
    }

    let llms_txt = format::render_llms_txt(&documents, &config.header());

    let section_count = documents
        .iter()
        .map(|d| d.section.as_str())
        .collect::<BTreeSet<_>>()
        .len();

    let mut records: Vec<DocumentRecord> = documents
        .iter()
        .map(|d| DocumentRecord {
            relative_path: d.relative_path.clone(),
            title: d.title.clone(),
            section: d.section.clone(),
        })
        .collect();
    // Match the order the documents appear in the rendered text.
    records.sort_by(|a, b| a.section.cmp(&b.section).then_with(|| a.title.cmp(&b.title)));

    let stats = GenerationStats {
        discovered_files: files.len(),
        parsed_documents: documents.len(),
        skipped_files: skipped,
        sections: section_count,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "generation complete: {}/{} documents across {} sections in {}ms",
        stats.parsed_documents, stats.discovered_files, stats.sections, stats.duration_ms
    );

    Ok(GenerationOutput {
        llms_txt,
        documents: records,
        stats,
    })
}

/// Generate and write the result directly to a file.
///
/// Creates missing parent directories. Uses an atomic write (temp file +
/// rename) so a failed run never leaves a partial llms.txt behind.
pub fn generate_to_file(
    input_dir: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &GenerationConfig,
) -> Result<GenerationStats, GenerateError> {
    let output = generate(input_dir, config)?;
    let path = output_path.as_ref();
    write_atomic(path, &output.llms_txt)?;

    info!(
        "wrote {} ({} documents)",
        path.display(),
        output.stats.parsed_documents
    );
    Ok(output.stats)
}

/// Write `text` to `path` atomically: parents created, content staged in a
/// sibling temp file, then renamed into place. A failed run never leaves a
/// partial file at the destination.
pub fn write_atomic(path: &Path, text: &str) -> Result<(), GenerateError> {
    let write_err = |source: std::io::Error| GenerateError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let tmp_path = path.with_extension("txt.tmp");
    std::fs::write(&tmp_path, text).map_err(write_err)?;
    std::fs::rename(&tmp_path, path).map_err(write_err)?;
    Ok(())
}
