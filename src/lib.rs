//! # llmstxt-gen
//!
//! Concatenate a directory of MDX/Markdown documentation into a single
//! `llms.txt` document for language-model consumption.
//!
//! ## Why this crate?
//!
//! Documentation sites are written for browsers: MDX component tags, import
//! statements, and JSX expressions are noise to a language model, and a tree
//! of small pages is awkward to feed into a context window. This crate
//! flattens the tree into one deterministic text document following the
//! LLMsTXT convention — an H1 title, a blockquote summary, and per-section
//! listings followed by full page bodies — with the MDX dialect rewritten
//! to plain Markdown along the way.
//!
//! ## Pipeline Overview
//!
//! ```text
//! docs tree
//!  │
//!  ├─ 1. Discover   directory walk (or sitemap → local path mapping)
//!  ├─ 2. Extract    title, summary, section from the raw text
//!  ├─ 3. Transform  MDX → Markdown (code-fence protection, directive
//!  │                stripping, component catalog, expressions, cleanup)
//!  └─ 4. Format     group by section, sort, render llms.txt
//! ```
//!
//! The whole run is synchronous and single-threaded: each file is processed
//! independently, a bad file is logged and skipped, and only environment
//! problems (missing input directory, unwritable output) abort the run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use llmstxt_gen::{generate, GenerationConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GenerationConfig::builder()
//!         .project_name("Acme Docs")
//!         .build()?;
//!     let output = generate("./docs", &config)?;
//!     println!("{}", output.llms_txt);
//!     eprintln!(
//!         "{} documents across {} sections",
//!         output.stats.parsed_documents, output.stats.sections
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `llmstxt-gen` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! llmstxt-gen = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{GenerationConfig, GenerationConfigBuilder, HeaderText};
pub use error::{DocumentError, GenerateError};
pub use generate::{generate, generate_to_file, write_atomic};
pub use output::{DocumentRecord, GenerationOutput, GenerationStats};
pub use pipeline::extract::{ParsedDocument, SourceDocument, TransformedDocument};
pub use pipeline::transform::transform;
