//! CLI binary for llmstxt-gen.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `GenerationConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use llmstxt_gen::{generate, generate_to_file, write_atomic, GenerationConfig};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic generation (stdout)
  llmstxt-gen ./docs

  # Write to a file
  llmstxt-gen ./docs -o ./public/llms.txt

  # Set the project name and override the summary line
  llmstxt-gen ./docs --project-name "Acme Docs" \
      --summary "Acme Docs is the reference manual for Acme."

  # Drive discovery from a sitemap instead of a directory walk
  llmstxt-gen ./docs --sitemap ./public/sitemap.xml -o llms.txt

  # Only pick up .md files
  llmstxt-gen ./docs --extensions md

  # Machine-readable run report
  llmstxt-gen ./docs -o llms.txt --json

OUTPUT FORMAT (LLMsTXT):
  # <project name>
  > <summary sentence>
  <two informational paragraphs>
  ## <section>           one per top-level directory, sorted
  - [<title>](<url>): <summary>
  ### <title>            full transformed page body, ended by ---

ENVIRONMENT VARIABLES:
  LLMSTXT_OUTPUT        Default for --output
  LLMSTXT_PROJECT_NAME  Default for --project-name
  LLMSTXT_EXTENSIONS    Default for --extensions (comma-separated)
  LLMSTXT_SITEMAP       Default for --sitemap
"#;

/// Generate an llms.txt document from an MDX/Markdown documentation tree.
#[derive(Parser, Debug)]
#[command(
    name = "llmstxt-gen",
    version,
    about = "Generate an llms.txt document from an MDX/Markdown documentation tree",
    long_about = "Flatten a directory of MDX or Markdown documentation into a single llms.txt \
document: an H1 title, a blockquote summary, and per-section listings followed by the full, \
Markdown-normalised page bodies. Intended for language-model consumption.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Root directory of the documentation sources.
    input_dir: PathBuf,

    /// Write the result to this file instead of stdout.
    #[arg(short, long, env = "LLMSTXT_OUTPUT")]
    output: Option<PathBuf>,

    /// Project name rendered as the H1 title.
    #[arg(long, env = "LLMSTXT_PROJECT_NAME", default_value = "Documentation")]
    project_name: String,

    /// Override the blockquote summary line (default derives from the project name).
    #[arg(long)]
    summary: Option<String>,

    /// Override the first informational paragraph.
    #[arg(long)]
    general_info: Option<String>,

    /// Override the second informational paragraph.
    #[arg(long)]
    organization_info: Option<String>,

    /// Source file extensions to pick up.
    #[arg(long, env = "LLMSTXT_EXTENSIONS", value_delimiter = ',',
          default_values_t = ["mdx".to_string(), "md".to_string()])]
    extensions: Vec<String>,

    /// Map URLs from this local sitemap XML onto the input directory
    /// instead of walking it.
    #[arg(long, env = "LLMSTXT_SITEMAP")]
    sitemap: Option<PathBuf>,

    /// Print the run report as JSON (stats and document records) instead of
    /// the llms.txt text.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "LLMSTXT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "LLMSTXT_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = GenerationConfig::builder()
        .project_name(&cli.project_name)
        .extensions(cli.extensions.iter().cloned());
    if let Some(ref summary) = cli.summary {
        builder = builder.summary(summary);
    }
    if let Some(ref general) = cli.general_info {
        builder = builder.general_info(general);
    }
    if let Some(ref organization) = cli.organization_info {
        builder = builder.organization_info(organization);
    }
    if let Some(ref sitemap) = cli.sitemap {
        builder = builder.sitemap(sitemap);
    }
    let config = builder.build().context("invalid configuration")?;

    // ── Run generation ───────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        if cli.json {
            // The report needs the full output, so generate in memory and
            // write the text with the same atomic helper the plain path uses.
            let output = generate(&cli.input_dir, &config).context("generation failed")?;
            write_atomic(output_path, &output.llms_txt)
                .with_context(|| format!("failed to write {}", output_path.display()))?;
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("failed to serialise report")?
            );
        } else {
            let stats = generate_to_file(&cli.input_dir, output_path, &config)
                .context("generation failed")?;
            if !cli.quiet {
                eprintln!(
                    "{}/{} documents across {} sections in {}ms  →  {}",
                    stats.parsed_documents,
                    stats.discovered_files,
                    stats.sections,
                    stats.duration_ms,
                    output_path.display(),
                );
                if stats.skipped_files > 0 {
                    eprintln!("  {} files skipped", stats.skipped_files);
                }
            }
        }
    } else {
        let output = generate(&cli.input_dir, &config).context("generation failed")?;
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("failed to serialise report")?
            );
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(output.llms_txt.as_bytes())
                .context("failed to write to stdout")?;
            if !output.llms_txt.ends_with('\n') {
                handle.write_all(b"\n").ok();
            }
            if !cli.quiet {
                eprintln!(
                    "{}/{} documents across {} sections in {}ms",
                    output.stats.parsed_documents,
                    output.stats.discovered_files,
                    output.stats.sections,
                    output.stats.duration_ms,
                );
            }
        }
    }

    Ok(())
}
