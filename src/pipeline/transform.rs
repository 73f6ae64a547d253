//! MDX → Markdown transformation: deterministic rewriting of component
//! syntax into plain Markdown.
//!
//! ## Why regex passes instead of a JSX parser?
//!
//! Documentation MDX in the wild uses a small, fixed vocabulary of components
//! with shallow nesting. A handful of ordered regex passes covers that
//! vocabulary completely, stays total over arbitrary input (malformed markup
//! degrades to imperfect output, never an error), and keeps each rule
//! independently testable. A full MDX/JSX AST would buy generality this
//! pipeline does not need.
//!
//! ## Pass Order
//!
//! Order is load-bearing: code fences are masked first so samples containing
//! `import`, components, or braces survive untouched; component rules consume
//! attribute braces before the expression pass sees them; cleanup runs before
//! restoration so fence interiors are never re-collapsed or trimmed.
//!
//! 1. Protect fenced code blocks behind unique placeholders
//! 2. Strip `import … from …` and `export default` directive lines
//! 3. Rewrite the component catalog (callouts, images, links, unwraps,
//!    attribute-derived headings and labels), then generically unwrap any
//!    remaining catalog tag pair, then drop leftover self-closing components
//! 4. Rewrite `{…}` expressions to inert `[Expression: …]` annotations
//! 5. Clean up residual blank-line runs and trim the document
//! 6. Restore the protected code blocks verbatim

use crate::pipeline::extract::{ParsedDocument, TransformedDocument};
use once_cell::sync::Lazy;
use regex::Regex;

/// Normalise a parsed document's body; every other field passes through.
pub fn transform_document(parsed: ParsedDocument) -> TransformedDocument {
    let content = transform(&parsed.source.content);
    TransformedDocument {
        relative_path: parsed.source.relative_path,
        section: parsed.source.section,
        title: parsed.title,
        summary: parsed.summary,
        content,
    }
}

/// Apply the full MDX → Markdown pipeline to a document body.
///
/// Total over its input domain: any string in, a string out.
pub fn transform(content: &str) -> String {
    let (masked, code_blocks) = protect_code_blocks(content);
    let s = strip_directives(&masked);
    let s = rewrite_components(&s);
    let s = rewrite_expressions(&s);
    let s = cleanup(&s);
    code_blocks.restore(&s)
}

// ── Pass 1/6: code-block protection ──────────────────────────────────────────

/// Placeholder prefix. Deliberately not valid Markdown or JSX so no other
/// pass can match inside it.
const PLACEHOLDER_PREFIX: &str = "@@CODE-BLOCK-";

/// Transient placeholder → original fenced-text mapping for one transform
/// call.
///
/// Returned by value from [`protect_code_blocks`] together with the masked
/// text, and consumed by [`CodeBlockTable::restore`] — no shared mutable
/// state between the protect/restore pair.
#[derive(Debug, Default)]
pub struct CodeBlockTable {
    entries: Vec<(String, String)>,
}

impl CodeBlockTable {
    /// Number of protected code blocks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Substitute every placeholder back with its original fenced text.
    ///
    /// Replaces the *first* occurrence only, in insertion order, so a
    /// placeholder string coincidentally produced elsewhere in the document
    /// cannot trigger a double expansion.
    pub fn restore(self, content: &str) -> String {
        let mut result = content.to_string();
        for (placeholder, original) in self.entries {
            result = result.replacen(&placeholder, &original, 1);
        }
        result
    }
}

static RE_FENCED_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[A-Za-z0-9]*\n.*?```").unwrap());

/// Replace every fenced code block with a unique placeholder token.
///
/// Placeholder indices are zero-based and strictly increasing in order of
/// appearance, so restoration order matches protection order.
pub fn protect_code_blocks(content: &str) -> (String, CodeBlockTable) {
    let mut entries: Vec<(String, String)> = Vec::new();
    let masked = RE_FENCED_CODE
        .replace_all(content, |caps: &regex::Captures<'_>| {
            let placeholder = format!("{}{}@@", PLACEHOLDER_PREFIX, entries.len());
            entries.push((placeholder.clone(), caps[0].to_string()));
            placeholder
        })
        .to_string();
    (masked, CodeBlockTable { entries })
}

// ── Pass 2/6: directive stripping ────────────────────────────────────────────

static RE_IMPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^import\b.*\bfrom\b.*$").unwrap());
static RE_EXPORT_DEFAULT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^export default.*$").unwrap());
static RE_BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Remove `import … from …` and `export default` lines.
///
/// Line-oriented and textual — anything resembling the pattern is removed.
/// Safe only because code blocks are already masked at this point.
fn strip_directives(input: &str) -> String {
    let s = RE_IMPORT.replace_all(input, "");
    let s = RE_EXPORT_DEFAULT.replace_all(&s, "");
    RE_BLANK_RUNS.replace_all(&s, "\n\n").to_string()
}

// ── Pass 3/6: component rewriting ────────────────────────────────────────────

/// How a catalog component is rewritten to Markdown.
#[derive(Debug, Clone, Copy)]
pub enum RewriteKind {
    /// `<Tag>text</Tag>` → `> **label:** text`
    Callout { label: &'static str },
    /// `<Tag alt="a" src="s" />` → `![Image: a](s)`
    Image,
    /// `<tag … src="u" …></tag>` → `> **label:** [u](u)`
    Link { label: &'static str },
    /// Opening and closing tags deleted, inner content kept in place.
    Unwrap,
    /// `<Tag … attr="t" …>` → `### t`; closing tag deleted.
    HeadingFromAttr { attr: &'static str },
    /// `<Tag … attr="t" …>` → `[t]`; closing tag deleted.
    LabelFromAttr { attr: &'static str },
}

/// One entry of the component catalog.
pub struct ComponentRule {
    pub tag: &'static str,
    pub kind: RewriteKind,
}

/// The fixed catalog of recognised components, in rule-application order.
///
/// Components not listed here fall through to the generic self-closing drop.
pub const COMPONENT_CATALOG: &[ComponentRule] = &[
    ComponentRule {
        tag: "Information",
        kind: RewriteKind::Callout {
            label: "Information",
        },
    },
    ComponentRule {
        tag: "DocImage",
        kind: RewriteKind::Image,
    },
    ComponentRule {
        tag: "iframe",
        kind: RewriteKind::Link { label: "Video" },
    },
    ComponentRule {
        tag: "Flexbox",
        kind: RewriteKind::Unwrap,
    },
    ComponentRule {
        tag: "Box",
        kind: RewriteKind::Unwrap,
    },
    ComponentRule {
        tag: "Card",
        kind: RewriteKind::Unwrap,
    },
    ComponentRule {
        tag: "Grid",
        kind: RewriteKind::Unwrap,
    },
    ComponentRule {
        tag: "Heading",
        kind: RewriteKind::HeadingFromAttr { attr: "text" },
    },
    ComponentRule {
        tag: "Button",
        kind: RewriteKind::LabelFromAttr { attr: "title" },
    },
];

/// Pattern for an attribute whose value is a quoted literal, optionally
/// wrapped in a brace expression: `attr="v"`, `attr='v'`, or `attr={"v"}`.
/// The capture group holds only the literal text.
fn attr_pattern(attr: &str) -> String {
    format!(r#"{attr}=\{{?["']([^"']*)["']\}}?"#)
}

struct Substitution {
    pattern: Regex,
    replacement: String,
}

impl Substitution {
    fn new(pattern: &str, replacement: impl Into<String>) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("catalog pattern must compile"),
            replacement: replacement.into(),
        }
    }
}

/// Specific per-kind substitutions, compiled once from the catalog.
static SPECIFIC_RULES: Lazy<Vec<Substitution>> = Lazy::new(|| {
    let mut subs = Vec::new();
    for rule in COMPONENT_CATALOG {
        let tag = rule.tag;
        match rule.kind {
            RewriteKind::Callout { label } => {
                subs.push(Substitution::new(
                    &format!(r"<{tag}>([^<]*)</{tag}>"),
                    format!("> **{label}:** $1"),
                ));
            }
            RewriteKind::Image => {
                subs.push(Substitution::new(
                    &format!(
                        r"<{tag}\s+{alt}\s+{src}\s*/>",
                        alt = attr_pattern("alt"),
                        src = attr_pattern("src"),
                    ),
                    "![Image: $1]($2)",
                ));
            }
            RewriteKind::Link { label } => {
                subs.push(Substitution::new(
                    &format!(r#"<{tag}[^>]*src=["']([^"']*)["'][^>]*></{tag}>"#),
                    format!("> **{label}:** [$1]($1)"),
                ));
            }
            RewriteKind::Unwrap => {
                subs.push(Substitution::new(&format!(r"<{tag}[^>]*>"), ""));
                subs.push(Substitution::new(&format!(r"</{tag}>"), ""));
            }
            RewriteKind::HeadingFromAttr { attr } => {
                subs.push(Substitution::new(
                    &format!(r"<{tag}[^>]*{}[^>]*>", attr_pattern(attr)),
                    "### $1\n",
                ));
                subs.push(Substitution::new(&format!(r"</{tag}>"), ""));
            }
            RewriteKind::LabelFromAttr { attr } => {
                subs.push(Substitution::new(
                    &format!(r"<{tag}[^>]*{}[^>]*>", attr_pattern(attr)),
                    "[$1]",
                ));
                subs.push(Substitution::new(&format!(r"</{tag}>"), ""));
            }
        }
    }
    subs
});

/// Generic open/close pair unwraps for the uppercase catalog tags.
///
/// Catches pairs the specific rules missed (multi-line content, unexpected
/// attribute formatting). Resolves one nesting level per tag; a tag nested
/// inside a *different* catalog tag unwraps fully, the same tag nested in
/// itself may leave residue.
static PAIR_UNWRAPS: Lazy<Vec<Regex>> = Lazy::new(|| {
    COMPONENT_CATALOG
        .iter()
        .filter(|rule| rule.tag.starts_with(|c: char| c.is_ascii_uppercase()))
        .map(|rule| {
            Regex::new(&format!(r"(?s)<{tag}[^>]*>(.*?)</{tag}>", tag = rule.tag))
                .expect("catalog pattern must compile")
        })
        .collect()
});

/// Any remaining self-closing capitalised tag: an unrecognised (or
/// unmatched-by-attribute-format) custom component. Dropped entirely.
static RE_SELF_CLOSING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[A-Z][a-zA-Z]*[^>/]*/>").unwrap());

/// Rewrite the component catalog to Markdown equivalents.
fn rewrite_components(input: &str) -> String {
    let mut result = input.to_string();

    for sub in SPECIFIC_RULES.iter() {
        result = sub
            .pattern
            .replace_all(&result, sub.replacement.as_str())
            .to_string();
    }

    for pair in PAIR_UNWRAPS.iter() {
        result = pair.replace_all(&result, "$1").to_string();
    }

    RE_SELF_CLOSING.replace_all(&result, "").to_string()
}

// ── Pass 4/6: expression rewriting ───────────────────────────────────────────

static RE_EXPRESSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^{}]*)\}").unwrap());

/// Replace every brace expression (no nested braces) with an inert
/// `[Expression: …]` annotation, inner text copied verbatim.
///
/// Must run after component rewriting so attribute braces already consumed
/// by catalog rules are not double-processed.
fn rewrite_expressions(input: &str) -> String {
    RE_EXPRESSION.replace_all(input, "[Expression: $1]").to_string()
}

// ── Pass 5/6: cleanup ────────────────────────────────────────────────────────

/// Final tidy: drop any `export default` line that survived (second pass),
/// collapse 3+ consecutive newlines to 2, trim the whole document.
///
/// Idempotent: applying it twice equals applying it once.
fn cleanup(input: &str) -> String {
    let s = RE_EXPORT_DEFAULT.replace_all(input, "");
    let s = RE_BLANK_RUNS.replace_all(&s, "\n\n");
    s.trim().to_string()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Code-block protection ────────────────────────────────────────────

    #[test]
    fn protect_masks_fences_and_records_mapping() {
        let input = "before\n```rust\nlet x = 1;\n```\nafter";
        let (masked, table) = protect_code_blocks(input);
        assert_eq!(table.len(), 1);
        assert!(!masked.contains("let x = 1;"));
        assert!(masked.contains("@@CODE-BLOCK-0@@"));
    }

    #[test]
    fn round_trip_reproduces_input_exactly() {
        let inputs = [
            "no code here",
            "```\nplain fence\n```",
            "a\n```js\none();\n```\nb\n```python\ntwo()\n```\nc",
            "```rust\nfn main() { println!(\"hi\"); }\n```",
            "",
        ];
        for input in inputs {
            let (masked, table) = protect_code_blocks(input);
            assert_eq!(table.restore(&masked), input, "input: {input:?}");
        }
    }

    #[test]
    fn restore_replaces_first_occurrence_only() {
        let table = CodeBlockTable {
            entries: vec![("@@CODE-BLOCK-0@@".into(), "```\nx\n```".into())],
        };
        let restored = table.restore("@@CODE-BLOCK-0@@ and @@CODE-BLOCK-0@@");
        assert_eq!(restored, "```\nx\n``` and @@CODE-BLOCK-0@@");
    }

    #[test]
    fn placeholders_increase_in_order_of_appearance() {
        let input = "```\na\n``` mid ```\nb\n```";
        let (masked, _) = protect_code_blocks(input);
        let first = masked.find("@@CODE-BLOCK-0@@").unwrap();
        let second = masked.find("@@CODE-BLOCK-1@@").unwrap();
        assert!(first < second);
    }

    // ── Directive stripping ──────────────────────────────────────────────

    #[test]
    fn import_lines_removed() {
        let input = "import { Box } from '@ui/components'\n\n# Title\n\nBody";
        let result = strip_directives(input);
        assert!(!result.contains("import"));
        assert!(result.contains("# Title"));
    }

    #[test]
    fn import_without_from_kept() {
        // Not the embedding dialect's import syntax; leave it alone.
        let input = "import duties are described below.";
        assert_eq!(strip_directives(input), input);
    }

    #[test]
    fn export_default_removed() {
        let input = "export default function Layout() :\ntext";
        let result = strip_directives(input);
        assert!(!result.contains("export default"));
        assert!(result.contains("text"));
    }

    #[test]
    fn blank_runs_collapsed_after_removal() {
        let input = "a\nimport X from 'x'\nimport Y from 'y'\n\n\nb";
        let result = strip_directives(input);
        assert!(!result.contains("\n\n\n"));
    }

    #[test]
    fn import_inside_protected_code_survives() {
        let input = "```js\nimport x from 'y'\n```";
        let result = transform(input);
        assert!(result.contains("import x from 'y'"));
    }

    // ── Component rewriting ──────────────────────────────────────────────

    #[test]
    fn information_becomes_callout() {
        let result = rewrite_components("<Information>Hi</Information>");
        assert_eq!(result, "> **Information:** Hi");
    }

    #[test]
    fn doc_image_becomes_markdown_image() {
        let result = rewrite_components(r#"<DocImage alt="A" src="/a.png" />"#);
        assert_eq!(result, "![Image: A](/a.png)");
    }

    #[test]
    fn doc_image_accepts_single_quotes_and_braces() {
        let result = rewrite_components(r#"<DocImage alt={'A'} src='/a.png'/>"#);
        assert_eq!(result, "![Image: A](/a.png)");
    }

    #[test]
    fn iframe_becomes_video_callout() {
        let input = r#"<iframe width="560" src="https://youtu.be/x" allowfullscreen></iframe>"#;
        let result = rewrite_components(input);
        assert_eq!(
            result,
            "> **Video:** [https://youtu.be/x](https://youtu.be/x)"
        );
    }

    #[test]
    fn containers_unwrap_in_place() {
        let input = "<Card>\ninner text\n</Card>";
        let result = rewrite_components(input);
        assert_eq!(result, "\ninner text\n");
    }

    #[test]
    fn heading_attr_becomes_h3() {
        let result = rewrite_components(r#"<Heading text={"T"}>"#);
        assert_eq!(result, "### T\n");
    }

    #[test]
    fn heading_attr_double_quoted() {
        let result = rewrite_components(r#"<Heading level={2} text="Setup">content</Heading>"#);
        assert!(result.contains("### Setup"), "got: {result:?}");
        assert!(!result.contains("</Heading>"));
    }

    #[test]
    fn button_title_becomes_bracketed_label() {
        let result = rewrite_components(r#"<Button title="Run">Go</Button>"#);
        assert!(result.contains("[Run]"), "got: {result:?}");
        assert!(!result.contains("</Button>"));
    }

    #[test]
    fn unknown_self_closing_component_dropped() {
        let result = rewrite_components(r#"before <Tweet id="42" /> after"#);
        assert_eq!(result, "before  after");
    }

    #[test]
    fn unmatched_doc_image_falls_through_to_drop() {
        // Unquoted attribute values miss the specific rule; the generic
        // self-closing drop deletes the whole tag.
        let result = rewrite_components("<DocImage alt=x src=y />");
        assert_eq!(result, "");
    }

    #[test]
    fn cross_tag_nesting_unwraps() {
        let input = "<Card><Box>\ndeep\n</Box></Card>";
        let result = rewrite_components(input);
        assert_eq!(result, "\ndeep\n");
    }

    // ── Expression rewriting ─────────────────────────────────────────────

    #[test]
    fn expression_becomes_annotation() {
        assert_eq!(
            rewrite_expressions("value is {props.count} today"),
            "value is [Expression: props.count] today"
        );
    }

    #[test]
    fn heading_braces_consumed_before_expression_pass() {
        let result = transform(r#"<Heading text={"T"}>"#);
        assert!(result.contains("### T"));
        assert!(!result.contains("[Expression:"), "got: {result:?}");
    }

    #[test]
    fn braces_in_code_untouched() {
        let input = "```rust\nfn f() -> i32 { 42 }\n```";
        let result = transform(input);
        assert!(result.contains("{ 42 }"));
        assert!(!result.contains("[Expression:"));
    }

    // ── Cleanup ──────────────────────────────────────────────────────────

    #[test]
    fn cleanup_collapses_and_trims() {
        let input = "\n\nexport default Layout\na\n\n\n\nb\n\n";
        let result = cleanup(input);
        assert_eq!(result, "a\n\nb");
    }

    #[test]
    fn cleanup_is_idempotent() {
        let inputs = ["a\n\n\n\nb\n", "  x  ", "export default y\nz", ""];
        for input in inputs {
            let once = cleanup(input);
            assert_eq!(cleanup(&once), once, "input: {input:?}");
        }
    }

    // ── Full pipeline ────────────────────────────────────────────────────

    #[test]
    fn full_pipeline() {
        let input = "import { Card } from '@ui'\n\n# Title\n\n<Card>\nSome {expr} text\n</Card>\n\n```js\nimport x from 'y';\nconst a = {b: 1};\n```\n\nexport default Title\n";
        let result = transform(input);
        assert!(result.starts_with("# Title"), "got: {result:?}");
        assert!(result.contains("[Expression: expr]"));
        assert!(result.contains("import x from 'y';"));
        assert!(result.contains("const a = {b: 1};"));
        assert!(!result.contains("export default"));
        assert!(!result.contains("<Card>"));
        assert!(!result.contains("\n\n\n"));
    }

    #[test]
    fn transform_is_total_on_malformed_markup() {
        // Unbalanced tags, stray braces, half a fence: must not panic and
        // must still return something.
        let inputs = ["<Card>", "}{", "```rust\nunclosed", "</Information>"];
        for input in inputs {
            let _ = transform(input);
        }
    }
}
