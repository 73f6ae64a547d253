//! Configuration types for llms.txt generation.
//!
//! All generation behaviour is controlled through [`GenerationConfig`], built
//! via its [`GenerationConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to serialise a run's configuration for logging and to diff two
//! runs to understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only what they care about — typically just
//! the project name — and rely on documented defaults for the rest.

use crate::error::GenerateError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for an llms.txt generation run.
///
/// Built via [`GenerationConfig::builder()`] or
/// [`GenerationConfig::default()`].
///
/// # Example
/// ```rust
/// use llmstxt_gen::GenerationConfig;
///
/// let config = GenerationConfig::builder()
///     .project_name("Acme Docs")
///     .summary("Acme Docs is the reference manual for Acme.")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Project name rendered as the H1 title of the output. Default:
    /// `"Documentation"`.
    pub project_name: String,

    /// Override for the blockquote summary line under the H1. When `None`
    /// a sentence derived from `project_name` is used.
    pub summary: Option<String>,

    /// Override for the first informational paragraph. When `None` a
    /// sentence derived from `project_name` is used.
    pub general_info: Option<String>,

    /// Override for the second informational paragraph. When `None` a
    /// fixed default sentence is used.
    pub organization_info: Option<String>,

    /// File extensions (without the leading dot) picked up by the directory
    /// walk. Default: `["mdx", "md"]`.
    ///
    /// The first entry is also the extension appended to bare sitemap URL
    /// paths in sitemap mode.
    pub extensions: Vec<String>,

    /// Optional path to a local sitemap XML file. When set, discovery maps
    /// the sitemap's URLs onto the input directory instead of walking it.
    pub sitemap: Option<PathBuf>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            project_name: "Documentation".to_string(),
            summary: None,
            general_info: None,
            organization_info: None,
            extensions: vec!["mdx".to_string(), "md".to_string()],
            sitemap: None,
        }
    }
}

impl GenerationConfig {
    /// Create a new builder for `GenerationConfig`.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder {
            config: Self::default(),
        }
    }

    /// Resolve the four header strings, substituting project-name-derived
    /// defaults for any field the caller left unset.
    pub fn header(&self) -> HeaderText {
        let name = &self.project_name;
        HeaderText {
            project_name: name.clone(),
            summary: self.summary.clone().unwrap_or_else(|| {
                format!(
                    "{name} is a documentation site. This documentation provides \
                     comprehensive information about its features and how to use them."
                )
            }),
            general_info: self.general_info.clone().unwrap_or_else(|| {
                format!("This documentation is organized into sections covering different aspects of {name}.")
            }),
            organization_info: self
                .organization_info
                .clone()
                .unwrap_or_else(|| "The documentation is organized by topic.".to_string()),
        }
    }
}

/// Builder for [`GenerationConfig`].
#[derive(Debug)]
pub struct GenerationConfigBuilder {
    config: GenerationConfig,
}

impl GenerationConfigBuilder {
    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.config.project_name = name.into();
        self
    }

    pub fn summary(mut self, text: impl Into<String>) -> Self {
        self.config.summary = Some(text.into());
        self
    }

    pub fn general_info(mut self, text: impl Into<String>) -> Self {
        self.config.general_info = Some(text.into());
        self
    }

    pub fn organization_info(mut self, text: impl Into<String>) -> Self {
        self.config.organization_info = Some(text.into());
        self
    }

    /// Replace the extension filter. Leading dots are stripped so both
    /// `"mdx"` and `".mdx"` are accepted.
    pub fn extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extensions = exts
            .into_iter()
            .map(|e| e.into().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    pub fn sitemap(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.sitemap = Some(path.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<GenerationConfig, GenerateError> {
        let c = &self.config;
        if c.project_name.trim().is_empty() {
            return Err(GenerateError::InvalidConfig(
                "project name must not be empty".into(),
            ));
        }
        if c.extensions.is_empty() {
            return Err(GenerateError::InvalidConfig(
                "at least one file extension is required".into(),
            ));
        }
        if c.extensions.iter().any(|e| e.is_empty()) {
            return Err(GenerateError::InvalidConfig(
                "file extensions must not be empty strings".into(),
            ));
        }
        Ok(self.config)
    }
}

/// The four resolved header strings prepended to the rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderText {
    /// H1 title line.
    pub project_name: String,
    /// Blockquote summary line.
    pub summary: String,
    /// First informational paragraph.
    pub general_info: String,
    /// Second informational paragraph.
    pub organization_info: String,
}
