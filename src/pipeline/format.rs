//! Section grouping and final LLMsTXT rendering.
//!
//! Takes the transformed documents, groups them by section, sorts sections
//! and documents deterministically, and renders the single output text:
//! header block, then per section a link listing followed by the full
//! document bodies.
//!
//! Ordering rules: sections sort lexicographically on their raw identifier
//! (not the display label), documents within a section sort by title in
//! plain codepoint order. Two runs over the same tree produce byte-identical
//! output.

use crate::config::HeaderText;
use crate::pipeline::extract::TransformedDocument;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Known section identifiers with hand-picked display labels.
const SECTION_TITLES: &[(&str, &str)] = &[
    ("action", "Actions"),
    ("admin", "Administration"),
    ("faq", "FAQ"),
    ("tips", "Tips and Tricks"),
    ("view", "Views"),
];

/// Resolve the display title for a section identifier.
///
/// Falls back to underscore-splitting with per-word capitalisation for
/// identifiers outside the fixed table.
pub fn display_title(section: &str) -> String {
    if let Some((_, title)) = SECTION_TITLES.iter().find(|(id, _)| *id == section) {
        return (*title).to_string();
    }
    section
        .split('_')
        .map(capitalise)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Shape a root-relative source path into a site URL: final extension
/// removed, single leading slash enforced.
pub fn url_path(relative_path: &str) -> String {
    let trimmed = relative_path.trim_start_matches('/');
    let stem = match (trimmed.rfind('.'), trimmed.rfind('/')) {
        (Some(dot), Some(slash)) if dot > slash => &trimmed[..dot],
        (Some(dot), None) => &trimmed[..dot],
        _ => trimmed,
    };
    format!("/{stem}")
}

/// Render the complete llms.txt document.
pub fn render_llms_txt(documents: &[TransformedDocument], header: &HeaderText) -> String {
    let mut out = String::new();

    // Header block: H1 title, blockquote summary, two info paragraphs.
    let _ = writeln!(out, "# {}\n", header.project_name);
    let _ = writeln!(out, "> {}\n", header.summary);
    let _ = writeln!(out, "{}\n", header.general_info);
    let _ = writeln!(out, "{}\n", header.organization_info);

    // BTreeMap keys give the lexicographic section order for free.
    let mut sections: BTreeMap<&str, Vec<&TransformedDocument>> = BTreeMap::new();
    for doc in documents {
        sections.entry(doc.section.as_str()).or_default().push(doc);
    }

    for (section, mut docs) in sections {
        docs.sort_by(|a, b| a.title.cmp(&b.title));

        let _ = writeln!(out, "## {}\n", display_title(section));

        for doc in &docs {
            let url = url_path(&doc.relative_path);
            if doc.summary.is_empty() {
                let _ = writeln!(out, "- [{}]({url})", doc.title);
            } else {
                let _ = writeln!(out, "- [{}]({url}): {}", doc.title, doc.summary);
            }
        }
        out.push('\n');

        for doc in &docs {
            let _ = writeln!(out, "### {}\n", doc.title);
            out.push_str(&doc.content);
            out.push_str("\n\n---\n\n");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(section: &str, title: &str, path: &str, summary: &str) -> TransformedDocument {
        TransformedDocument {
            relative_path: path.to_string(),
            section: section.to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            content: format!("Body of {title}."),
        }
    }

    fn header() -> HeaderText {
        HeaderText {
            project_name: "Test Project".into(),
            summary: "A test corpus.".into(),
            general_info: "General info.".into(),
            organization_info: "Organization info.".into(),
        }
    }

    // ── Display titles ───────────────────────────────────────────────────

    #[test]
    fn known_sections_use_lookup_table() {
        assert_eq!(display_title("action"), "Actions");
        assert_eq!(display_title("view"), "Views");
        assert_eq!(display_title("faq"), "FAQ");
        assert_eq!(display_title("tips"), "Tips and Tricks");
    }

    #[test]
    fn unknown_sections_are_humanised() {
        assert_eq!(display_title("getting_started"), "Getting Started");
        assert_eq!(display_title("general"), "General");
    }

    // ── URL shaping ──────────────────────────────────────────────────────

    #[test]
    fn url_strips_extension_and_leads_with_slash() {
        assert_eq!(url_path("guides/setup.mdx"), "/guides/setup");
        assert_eq!(url_path("/guides/setup.md"), "/guides/setup");
        assert_eq!(url_path("no_extension"), "/no_extension");
    }

    #[test]
    fn url_keeps_dots_in_directories() {
        assert_eq!(url_path("v1.2/notes.mdx"), "/v1.2/notes");
        assert_eq!(url_path("v1.2/readme"), "/v1.2/readme");
    }

    // ── Rendering ────────────────────────────────────────────────────────

    #[test]
    fn sections_sort_on_raw_identifier() {
        let docs = vec![
            doc("view", "V", "view/v.mdx", "s"),
            doc("action", "A", "action/a.mdx", "s"),
        ];
        let out = render_llms_txt(&docs, &header());
        let actions = out.find("## Actions").unwrap();
        let views = out.find("## Views").unwrap();
        assert!(actions < views);
    }

    #[test]
    fn documents_sort_by_title_within_section() {
        let docs = vec![
            doc("s1", "Beta", "s1/b.mdx", "s"),
            doc("s1", "Alpha", "s1/a.mdx", "s"),
        ];
        let out = render_llms_txt(&docs, &header());
        let alpha = out.find("- [Alpha]").unwrap();
        let beta = out.find("- [Beta]").unwrap();
        assert!(alpha < beta);
        let alpha_detail = out.find("### Alpha").unwrap();
        let beta_detail = out.find("### Beta").unwrap();
        assert!(alpha_detail < beta_detail);
    }

    #[test]
    fn header_block_comes_first() {
        let out = render_llms_txt(&[], &header());
        assert!(out.starts_with("# Test Project\n\n> A test corpus.\n\n"));
        assert!(out.contains("General info.\n\n"));
        assert!(out.contains("Organization info.\n\n"));
    }

    #[test]
    fn list_entry_includes_summary_and_url() {
        let docs = vec![doc("guides", "Setup", "guides/setup.mdx", "How to set up.")];
        let out = render_llms_txt(&docs, &header());
        assert!(out.contains("- [Setup](/guides/setup): How to set up."));
    }

    #[test]
    fn empty_summary_is_omitted_from_listing() {
        let docs = vec![doc("guides", "Setup", "guides/setup.mdx", "")];
        let out = render_llms_txt(&docs, &header());
        assert!(out.contains("- [Setup](/guides/setup)\n"));
        assert!(!out.contains("(/guides/setup):"));
    }

    #[test]
    fn detail_block_has_body_and_rule() {
        let docs = vec![doc("guides", "Setup", "guides/setup.mdx", "s")];
        let out = render_llms_txt(&docs, &header());
        assert!(out.contains("### Setup\n\nBody of Setup.\n\n---\n"));
    }
}
