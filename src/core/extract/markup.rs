//! Slots and events declared in the component markup.
//!
//! The markup is scanned tag by tag, skipping over `{...}` expressions. Tags inside
//! HTML comments are skipped; the comment directly before a tag documents it.

use std::sync::LazyLock;

use regex::Regex;

use super::candidate::{BindingCandidate, CanonicalId};
use crate::core::data::{EntityKind, Visibility};
use crate::core::parsers::{ByteRange, ParsedComponent};

static FIRE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bfire\(\s*["']([^"']+)["']"#).unwrap());

pub const DEFAULT_SLOT: &str = "default";

/// One attribute of a markup tag, with absolute positions.
#[derive(Debug, Clone)]
struct Attribute<'m> {
    name: &'m str,
    name_start: usize,
    /// Value with quotes removed, and the absolute start of that text.
    value: Option<(&'m str, usize)>,
}

/// One opening tag in the markup.
#[derive(Debug, Clone)]
struct Tag<'m> {
    name: &'m str,
    start: usize,
    name_range: ByteRange,
    attributes: Vec<Attribute<'m>>,
}

fn tags(component: &ParsedComponent) -> Vec<Tag<'_>> {
    let markup = component.markup.as_str();
    let in_comment = |pos: usize| {
        component
            .markup_comments
            .iter()
            .any(|c| c.range.start <= pos && pos < c.range.end)
    };

    let mut tags = Vec::new();
    let mut pos = 0;
    while let Some(offset) = markup[pos..].find('<') {
        let start = pos + offset;
        pos = start + 1;
        if in_comment(start) {
            continue;
        }
        if let Some((tag, end)) = scan_tag(markup, start) {
            tags.push(tag);
            pos = end;
        }
    }
    tags
}

fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b':' | b'.' | b'-')
}

/// Scan the opening tag at `start`, returning it and the offset past its `>`.
fn scan_tag(markup: &str, start: usize) -> Option<(Tag<'_>, usize)> {
    let bytes = markup.as_bytes();
    if !bytes.get(start + 1)?.is_ascii_alphabetic() {
        return None;
    }
    let mut pos = start + 1;
    while bytes.get(pos).copied().is_some_and(is_name_byte) {
        pos += 1;
    }
    let name_range = ByteRange::new(start + 1, pos);

    let mut attributes = Vec::new();
    loop {
        while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
            pos += 1;
        }
        match *bytes.get(pos)? {
            b'>' => break,
            b'/' => pos += 1,
            // Spread or shorthand attribute: `{...props}`, `{value}`.
            b'{' => pos = skip_expression(bytes, pos),
            _ => {
                let name_start = pos;
                while bytes.get(pos).is_some_and(|b| {
                    !b.is_ascii_whitespace() && !matches!(*b, b'=' | b'>' | b'/')
                }) {
                    pos += 1;
                }
                if pos == name_start {
                    // Stray `=`: not an attribute.
                    pos += 1;
                    continue;
                }
                let name = &markup[name_start..pos];

                let mut after = pos;
                while bytes.get(after).is_some_and(u8::is_ascii_whitespace) {
                    after += 1;
                }
                let value = if bytes.get(after) == Some(&b'=') {
                    after += 1;
                    while bytes.get(after).is_some_and(u8::is_ascii_whitespace) {
                        after += 1;
                    }
                    let (value, end) = scan_value(markup, after)?;
                    pos = end;
                    Some(value)
                } else {
                    None
                };
                attributes.push(Attribute {
                    name,
                    name_start,
                    value,
                });
            }
        }
    }

    Some((
        Tag {
            name: &markup[name_range.start..name_range.end],
            start,
            name_range,
            attributes,
        },
        pos + 1,
    ))
}

/// An attribute value starting at `start`: quoted, `{expression}` or bare.
///
/// Returns the value without quotes, its start, and the offset past it.
fn scan_value(markup: &str, start: usize) -> Option<((&str, usize), usize)> {
    let bytes = markup.as_bytes();
    match *bytes.get(start)? {
        quote @ (b'"' | b'\'') => {
            let close = start + 1 + markup[start + 1..].find(quote as char)?;
            Some(((&markup[start + 1..close], start + 1), close + 1))
        }
        b'{' => {
            let end = skip_expression(bytes, start);
            Some(((&markup[start..end], start), end))
        }
        _ => {
            let mut end = start;
            while bytes
                .get(end)
                .is_some_and(|b| !b.is_ascii_whitespace() && *b != b'>')
            {
                end += 1;
            }
            Some(((&markup[start..end], start), end))
        }
    }
}

/// Offset past the `}` closing the expression opened at `start`.
///
/// Nested braces and braces inside string literals are skipped.
fn skip_expression(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut pos = start;
    while let Some(&byte) = bytes.get(pos) {
        match quote {
            Some(_) if byte == b'\\' => pos += 1,
            Some(q) if byte == q => quote = None,
            Some(_) => {}
            None => match byte {
                b'"' | b'\'' | b'`' => quote = Some(byte),
                b'{' => depth += 1,
                b'}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return pos + 1;
                    }
                }
                _ => {}
            },
        }
        pos += 1;
    }
    bytes.len()
}

fn markup_candidate<'a>(
    name: &str,
    kind: EntityKind,
    ident: ByteRange,
    tag_start: usize,
) -> BindingCandidate<'a> {
    BindingCandidate::new(
        CanonicalId::Named(name.to_string()),
        name,
        kind,
        Visibility::Public,
        ident,
    )
    .anchored_at(&[tag_start])
}

/// Every `<slot>` element; unnamed slots are the default slot.
pub fn collect_slots<'a>(component: &ParsedComponent) -> Vec<BindingCandidate<'a>> {
    tags(component)
        .into_iter()
        .filter(|tag| tag.name == "slot")
        .map(|tag| {
            let named = tag
                .attributes
                .iter()
                .find(|attr| attr.name == "name")
                .and_then(|attr| attr.value)
                .filter(|(value, _)| !value.is_empty());
            match named {
                Some((value, start)) => markup_candidate(
                    value,
                    EntityKind::Slot,
                    ByteRange::new(start, start + value.len()),
                    tag.start,
                ),
                None => markup_candidate(DEFAULT_SLOT, EntityKind::Slot, tag.name_range, tag.start),
            }
        })
        .collect()
}

/// v3 event forwarding: an `on:name` directive without a handler.
pub fn collect_forwarded_events<'a>(component: &ParsedComponent) -> Vec<BindingCandidate<'a>> {
    let mut events = Vec::new();
    for tag in tags(component) {
        for attr in &tag.attributes {
            if attr.value.is_some() {
                continue;
            }
            let Some(directive) = attr.name.strip_prefix("on:") else {
                continue;
            };
            let name = directive.split('|').next().unwrap_or(directive);
            if name.is_empty() {
                continue;
            }
            let start = attr.name_start + "on:".len();
            events.push(markup_candidate(
                name,
                EntityKind::Event,
                ByteRange::new(start, start + name.len()),
                tag.start,
            ));
        }
    }
    events
}

/// v2 events fired from handlers: `on:click="fire('name', ...)"`.
pub fn collect_fired_events<'a>(component: &ParsedComponent) -> Vec<BindingCandidate<'a>> {
    let mut events = Vec::new();
    for tag in tags(component) {
        for attr in &tag.attributes {
            if !attr.name.starts_with("on:") {
                continue;
            }
            let Some((value, value_start)) = attr.value else {
                continue;
            };
            for caps in FIRE_REGEX.captures_iter(value) {
                let Some(name) = caps.get(1) else { continue };
                let start = value_start + name.start();
                events.push(markup_candidate(
                    name.as_str(),
                    EntityKind::Event,
                    ByteRange::new(start, start + name.len()),
                    tag.start,
                ));
            }
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use crate::core::extract::markup::*;
    use crate::core::parsers::parse_component;

    fn names(candidates: Vec<BindingCandidate<'_>>) -> Vec<String> {
        candidates.into_iter().map(|c| c.name).collect()
    }

    #[test]
    fn test_default_and_named_slots() {
        let source = r#"<div><slot></slot><slot name="footer" /></div>"#;
        let component = parse_component(source, None).unwrap();
        assert_eq!(names(collect_slots(&component)), vec!["default", "footer"]);
    }

    #[test]
    fn test_slot_range_points_at_name() {
        let source = r#"<slot name="footer"></slot>"#;
        let component = parse_component(source, None).unwrap();
        let slots = collect_slots(&component);
        let range = slots[0].ident;
        assert_eq!(&source[range.start..range.end], "footer");
    }

    #[test]
    fn test_commented_out_slot_is_ignored() {
        let source = "<!-- <slot name=\"old\"></slot> -->\n<slot></slot>";
        let component = parse_component(source, None).unwrap();
        assert_eq!(names(collect_slots(&component)), vec!["default"]);
    }

    #[test]
    fn test_forwarded_events() {
        let source = r#"<button on:click on:focus|once on:blur={() => value > 1}>Go</button>"#;
        let component = parse_component(source, None).unwrap();
        assert_eq!(
            names(collect_forwarded_events(&component)),
            vec!["click", "focus"]
        );
    }

    #[test]
    fn test_block_handler_keeps_other_directives() {
        let source = "<button on:click={() => { go(); }} on:focus>Go</button>";
        let component = parse_component(source, None).unwrap();
        assert_eq!(names(collect_forwarded_events(&component)), vec!["focus"]);
    }

    #[test]
    fn test_braces_in_strings_and_spread() {
        let source = r#"<div {...rest} title={"}"} on:keydown={(e) => { if (e) { run('}'); } }} on:mouseenter><slot name="body" /></div>"#;
        let component = parse_component(source, None).unwrap();
        assert_eq!(
            names(collect_forwarded_events(&component)),
            vec!["mouseenter"]
        );
        let slots = collect_slots(&component);
        let range = slots[0].ident;
        assert_eq!(&source[range.start..range.end], "body");
    }

    #[test]
    fn test_fired_events_in_handlers() {
        let source = r#"<button on:click="fire('select', item)">Pick</button>"#;
        let component = parse_component(source, None).unwrap();
        let events = collect_fired_events(&component);
        assert_eq!(events.len(), 1);
        let range = events[0].ident;
        assert_eq!(&source[range.start..range.end], "select");
    }

    #[test]
    fn test_scripts_are_not_scanned() {
        let source = "<script>const html = '<slot></slot>';</script>\n<slot name=\"body\"></slot>";
        let component = parse_component(source, None).unwrap();
        assert_eq!(names(collect_slots(&component)), vec!["body"]);
    }
}
