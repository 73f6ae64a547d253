//! Pipeline stages for llms.txt generation.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap
//! implementations (e.g. sitemap-driven discovery vs. a directory walk)
//! without touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! discover ──▶ extract ──▶ transform ──▶ format
//! (paths)      (title/     (MDX → MD)    (group, sort,
//!               summary/                  render llms.txt)
//!               section)
//! ```
//!
//! 1. [`discover`]  — turn the input directory or a sitemap into an ordered
//!    list of source file paths
//! 2. [`extract`]   — read each file; derive title, summary, and section
//!    from the raw text
//! 3. [`transform`] — normalise the MDX body to plain Markdown (code-block
//!    protection, directive stripping, component catalog, expressions,
//!    cleanup)
//! 4. [`format`]    — group by section, sort, and render the final document

pub mod discover;
pub mod extract;
pub mod format;
pub mod transform;
