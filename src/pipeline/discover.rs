//! File discovery: turn the input directory (or a sitemap) into an ordered
//! list of source file paths.
//!
//! Two modes share one contract — every returned path points at a readable
//! candidate file under the input root:
//!
//! * **Directory walk** (default): recursive scan filtered by the configured
//!   extensions, entries sorted per directory so discovery order is stable
//!   across filesystems.
//! * **Sitemap mode**: parse a local sitemap XML and map each URL's path
//!   onto the input directory. URLs that cannot be mapped, escape the root,
//!   or point at missing files are skipped with a warning — only an
//!   unreadable or unparsable sitemap is fatal.

use crate::config::GenerationConfig;
use crate::error::GenerateError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Discover the source files for a run, in deterministic order.
///
/// The extension list is re-checked here because the config fields are
/// public: a caller can bypass the builder, and an empty list must surface
/// as an error rather than a panic deeper in the sitemap path.
pub fn discover_files(
    input_dir: &Path,
    config: &GenerationConfig,
) -> Result<Vec<PathBuf>, GenerateError> {
    let default_ext = config.extensions.first().ok_or_else(|| {
        GenerateError::InvalidConfig("at least one file extension is required".into())
    })?;
    match config.sitemap {
        Some(ref sitemap) => discover_from_sitemap(sitemap, input_dir, default_ext, config),
        None => walk_input_dir(input_dir, config),
    }
}

// ── Directory walk ───────────────────────────────────────────────────────────

/// Build a glob set matching `*.<ext>` for each configured extension.
fn extension_globs(extensions: &[String]) -> Result<GlobSet, GenerateError> {
    let mut builder = GlobSetBuilder::new();
    for ext in extensions {
        let glob = Glob::new(&format!("*.{ext}")).map_err(|e| {
            GenerateError::InvalidConfig(format!("invalid extension '{ext}': {e}"))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| GenerateError::InvalidConfig(format!("invalid extension set: {e}")))
}

fn walk_input_dir(
    input_dir: &Path,
    config: &GenerationConfig,
) -> Result<Vec<PathBuf>, GenerateError> {
    let globs = extension_globs(&config.extensions)?;
    let mut files = Vec::new();
    walk_dir(input_dir, &globs, &mut files).map_err(|source| GenerateError::ScanFailed {
        path: input_dir.to_path_buf(),
        source,
    })?;
    debug!("discovered {} files under {}", files.len(), input_dir.display());
    Ok(files)
}

/// Recursive walk, entries sorted by name within each directory.
fn walk_dir(dir: &Path, globs: &GlobSet, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            walk_dir(&path, globs, out)?;
        } else if path.file_name().is_some_and(|name| globs.is_match(name)) {
            out.push(path);
        }
    }
    Ok(())
}

// ── Sitemap mode ─────────────────────────────────────────────────────────────

fn discover_from_sitemap(
    sitemap_path: &Path,
    input_dir: &Path,
    default_ext: &str,
    config: &GenerationConfig,
) -> Result<Vec<PathBuf>, GenerateError> {
    let xml = std::fs::read_to_string(sitemap_path).map_err(|source| {
        GenerateError::SitemapUnreadable {
            path: sitemap_path.to_path_buf(),
            source,
        }
    })?;

    let urls = parse_sitemap(&xml).map_err(|detail| GenerateError::SitemapInvalid {
        path: sitemap_path.to_path_buf(),
        detail,
    })?;
    debug!("sitemap lists {} URLs", urls.len());

    let mut files = Vec::new();
    for url in urls {
        match map_url_to_local(&url, input_dir, default_ext, &config.extensions) {
            Some(path) if path.is_file() => files.push(path),
            Some(path) => {
                warn!("sitemap URL {url} maps to missing file {}, skipping", path.display());
            }
            None => {
                warn!("could not map sitemap URL {url} to a local path, skipping");
            }
        }
    }
    Ok(files)
}

/// Extract the `<loc>` values from a sitemap `<urlset>`.
fn parse_sitemap(xml: &str) -> Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut urls = Vec::new();
    let mut in_loc = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                in_loc = e.name().as_ref() == b"loc";
            }
            Ok(Event::Text(text)) if in_loc => {
                let loc = text
                    .unescape()
                    .map_err(|e| format!("invalid XML text: {e}"))?
                    .trim()
                    .to_string();
                if !loc.is_empty() {
                    urls.push(loc);
                }
            }
            // Some sitemap generators wrap locations in CDATA.
            Ok(Event::CData(text)) if in_loc => {
                let loc = String::from_utf8_lossy(&text.into_inner())
                    .trim()
                    .to_string();
                if !loc.is_empty() {
                    urls.push(loc);
                }
            }
            Ok(Event::End(_)) => {
                in_loc = false;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(format!("XML parse error: {e}")),
        }
    }
    Ok(urls)
}

/// Map a sitemap URL onto a file under `input_dir`.
///
/// Directory-style URLs (trailing slash or empty path) resolve to an
/// `index.<ext>` file; bare paths get the default extension appended.
/// Returns `None` when the URL does not parse or the mapped path escapes
/// the input directory.
fn map_url_to_local(
    url_str: &str,
    input_dir: &Path,
    default_ext: &str,
    extensions: &[String],
) -> Option<PathBuf> {
    let parsed = url::Url::parse(url_str).ok()?;
    let mut rel = parsed.path().trim_start_matches('/').to_string();

    if rel.is_empty() || rel.ends_with('/') {
        rel.push_str(&format!("index.{default_ext}"));
    } else if !extensions
        .iter()
        .any(|ext| rel.to_ascii_lowercase().ends_with(&format!(".{ext}")))
    {
        rel.push_str(&format!(".{default_ext}"));
    }

    // Reject traversal before touching the filesystem.
    if Path::new(&rel)
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return None;
    }

    Some(input_dir.join(rel))
}
