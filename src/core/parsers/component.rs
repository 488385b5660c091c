//! Splitting a `.svelte` file into script blocks and markup.
//!
//! Script blocks are parsed with swc; the markup keeps the exact byte layout
//! of the original file with `<script>` and `<style>` blocks blanked out, so
//! offsets found in it are offsets in the original file.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::script::{ParsedScript, ScriptContext, ScriptLang, parse_script_source};
use super::source::{ByteRange, CommentStyle, SourceComment};
use crate::error::Result;

static SCRIPT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<script(\s[^>]*)?>(.*?)</script\s*>").unwrap());
static STYLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<style(\s[^>]*)?>.*?</style\s*>").unwrap());
static HTML_COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--(.*?)-->").unwrap());
static CONTEXT_MODULE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"context\s*=\s*["']?module\b"#).unwrap());
static LANG_TS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"lang\s*=\s*["']?(ts|typescript)\b"#).unwrap());

/// A component file split into its parts.
#[derive(Debug, Clone)]
pub struct ParsedComponent {
    /// File stem, e.g. `Button` for `src/Button.svelte`.
    pub name: Option<String>,
    /// The full original file text.
    pub source: String,
    /// The original text with script and style blocks replaced by spaces.
    pub markup: String,
    /// Parsed script blocks in source order.
    pub scripts: Vec<ParsedScript>,
    /// HTML comments found in the markup.
    pub markup_comments: Vec<SourceComment>,
}

impl ParsedComponent {
    /// Every comment in the component, sorted by position.
    pub fn comments(&self) -> Vec<SourceComment> {
        let mut all: Vec<SourceComment> = self
            .scripts
            .iter()
            .flat_map(|s| s.comments.iter().cloned())
            .chain(self.markup_comments.iter().cloned())
            .collect();
        all.sort_by_key(|c| c.range.start);
        all
    }
}

/// Split and parse a component.
///
/// `file_path` names the component (its stem becomes the document name) and
/// is used in parser diagnostics; it is never read.
pub fn parse_component(source: impl Into<String>, file_path: Option<&str>) -> Result<ParsedComponent> {
    let source = source.into();
    let path_label = file_path.unwrap_or("component.svelte");

    let html_comments: Vec<ByteRange> = HTML_COMMENT_REGEX
        .find_iter(&source)
        .map(|m| ByteRange::new(m.start(), m.end()))
        .collect();
    let in_html_comment =
        |pos: usize| html_comments.iter().any(|c| c.start <= pos && pos < c.end);

    let mut blanked: Vec<ByteRange> = Vec::new();
    let mut scripts = Vec::new();

    for caps in SCRIPT_REGEX.captures_iter(&source) {
        let Some(whole) = caps.get(0) else { continue };
        if in_html_comment(whole.start()) {
            continue;
        }
        let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let Some(content) = caps.get(2) else { continue };

        let context = if CONTEXT_MODULE_REGEX.is_match(attrs) {
            ScriptContext::Module
        } else {
            ScriptContext::Instance
        };
        let lang = if LANG_TS_REGEX.is_match(attrs) {
            ScriptLang::TypeScript
        } else {
            ScriptLang::JavaScript
        };

        scripts.push(parse_script_source(
            content.as_str(),
            path_label,
            content.start(),
            context,
            lang,
        )?);
        blanked.push(ByteRange::new(whole.start(), whole.end()));
    }

    for m in STYLE_REGEX.find_iter(&source) {
        if !in_html_comment(m.start()) {
            blanked.push(ByteRange::new(m.start(), m.end()));
        }
    }

    let markup = blank_ranges(&source, &blanked);

    let markup_comments = HTML_COMMENT_REGEX
        .captures_iter(&markup)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let text = caps.get(1)?;
            Some(SourceComment {
                style: CommentStyle::Html,
                range: ByteRange::new(whole.start(), whole.end()),
                text: text.as_str().to_string(),
            })
        })
        .collect();

    let name = file_path.and_then(|p| {
        Path::new(p)
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
    });

    Ok(ParsedComponent {
        name,
        source,
        markup,
        scripts,
        markup_comments,
    })
}

/// Replace every byte inside `ranges` with a space, keeping newlines.
fn blank_ranges(source: &str, ranges: &[ByteRange]) -> String {
    let mut bytes = source.as_bytes().to_vec();
    for range in ranges {
        for byte in &mut bytes[range.start..range.end] {
            if *byte != b'\n' {
                *byte = b' ';
            }
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}
