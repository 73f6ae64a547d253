//! Content extraction: derive title, summary, and section from raw source
//! text, independent of (and prior to) the MDX transformer.
//!
//! Extraction operates on the **untransformed** text so a title inside a
//! component wrapper is still found, and is infallible once the file has
//! been read — missing pieces yield sentinels (`"Untitled"`, empty summary,
//! `"general"` section), never errors.

use crate::error::DocumentError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Sentinel title for documents with no level-1 heading.
pub const UNTITLED: &str = "Untitled";

/// Sentinel section for documents sitting directly in the input root.
pub const ROOT_SECTION: &str = "general";

/// A source file as discovered: raw text plus derived path identity.
///
/// Created once per input file and immutable afterwards.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Absolute or as-discovered path on disk.
    pub path: PathBuf,
    /// Path relative to the input root, `/`-separated.
    pub relative_path: String,
    /// First path segment, or [`ROOT_SECTION`] for root-level files.
    pub section: String,
    /// Raw file content.
    pub content: String,
}

/// A [`SourceDocument`] with title and summary derived from its content.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub source: SourceDocument,
    /// First H1 text, or [`UNTITLED`].
    pub title: String,
    /// First plain paragraph after the title, else first blockquote, else
    /// empty (empty means "omit", not "error").
    pub summary: String,
}

/// A document whose body has been normalised to plain Markdown.
///
/// Title, summary, section, and path pass through from the parse stage
/// unchanged — transformation only touches the body.
#[derive(Debug, Clone)]
pub struct TransformedDocument {
    pub relative_path: String,
    pub section: String,
    pub title: String,
    pub summary: String,
    pub content: String,
}

/// Read one source file and derive its [`ParsedDocument`].
///
/// The only fallible steps are the read itself and relating the path to the
/// input root; extraction proper always produces a value.
pub fn parse_file(path: &Path, root: &Path) -> Result<ParsedDocument, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let relative = path
        .strip_prefix(root)
        .map_err(|_| DocumentError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;
    let relative_path = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let title = extract_title(&content);
    let summary = extract_summary(&content);
    let section = section_for(&relative_path);

    Ok(ParsedDocument {
        source: SourceDocument {
            path: path.to_path_buf(),
            relative_path,
            section,
            content,
        },
        title,
        summary,
    })
}

static RE_TITLE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\s+(.+)$").unwrap());

/// First level-1 heading anywhere in the document, or [`UNTITLED`].
pub fn extract_title(content: &str) -> String {
    content
        .lines()
        .find_map(|line| RE_TITLE_LINE.captures(line))
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Extract the document summary.
///
/// The first non-heading, non-blockquote paragraph immediately following the
/// title (lines joined with spaces, trimmed); a paragraph stops at a blank
/// line or the start of a new heading. When no such paragraph exists, falls
/// back to the first blockquote line stripped of its `>` marker. Empty
/// string when neither exists.
pub fn extract_summary(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();

    // Scan from just after the title line (or the top when there is none).
    let start = lines
        .iter()
        .position(|line| RE_TITLE_LINE.is_match(line))
        .map(|i| i + 1)
        .unwrap_or(0);

    let mut i = start;
    while i < lines.len() && lines[i].trim().is_empty() {
        i += 1;
    }

    if i < lines.len() {
        let first = lines[i].trim_start();
        if !first.starts_with('#') && !first.starts_with('>') {
            let mut paragraph: Vec<&str> = Vec::new();
            while i < lines.len() {
                let line = lines[i].trim();
                if line.is_empty() || line.starts_with('#') {
                    break;
                }
                paragraph.push(line);
                i += 1;
            }
            return paragraph.join(" ").trim().to_string();
        }
    }

    // Fallback: first blockquote line anywhere in the document.
    for line in &lines {
        if let Some(rest) = line.trim_start().strip_prefix('>') {
            return rest.trim().to_string();
        }
    }

    String::new()
}

/// Derive the section identifier from a `/`-separated relative path.
///
/// Files directly in the input root always map to [`ROOT_SECTION`] — never
/// to their bare filename.
pub fn section_for(relative_path: &str) -> String {
    let clean = relative_path.trim_start_matches('/');
    match clean.split_once('/') {
        Some((section, _)) if !section.is_empty() => section.to_string(),
        _ => ROOT_SECTION.to_string(),
    }
}
