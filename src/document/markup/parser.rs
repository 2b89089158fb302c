//! Block-level markup tokenizer
//!
//! Turns the rich-text editor's serialized HTML into a `Document`: heading
//! and paragraph elements become `Block`s, while container tags (tables,
//! lists, blockquotes) and anything unrecognized pass through as verbatim
//! `Raw` segments. Structural containment is tracked so downstream passes
//! can apply the exclusion policy without re-walking the markup.
//!
//! Parsing never fails: unbalanced or malformed tags are simply left in the
//! raw stream. Page-marker artifacts from a previous annotation run are
//! dropped so that re-annotating a document's own output is a fixed point.

use once_cell::sync::Lazy;
use regex::Regex;

use super::super::models::{Block, BlockTag, Containment, Document, Segment};

/// Any open or close tag, with its raw attribute text
static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<(/?)([a-z][a-z0-9]*)((?:"[^"]*"|'[^']*'|[^>"'])*)>"#).unwrap()
});

/// One attribute inside a tag: `name`, `name=value`, `name="value"`
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([a-zA-Z_][-a-zA-Z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .unwrap()
});

static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Depth counters for the structural containers the exclusion policy
/// cares about
#[derive(Debug, Default)]
struct ContainerDepth {
    table: u32,
    list: u32,
    blockquote: u32,
}

impl ContainerDepth {
    fn containment(&self) -> Containment {
        Containment {
            in_table: self.table > 0,
            in_list: self.list > 0,
            in_blockquote: self.blockquote > 0,
        }
    }

    fn shift(depth: &mut u32, closing: bool) {
        if closing {
            *depth = depth.saturating_sub(1);
        } else {
            *depth += 1;
        }
    }
}

/// Parse serialized markup into a document of blocks and raw segments
pub fn parse_markup(input: &str) -> Document {
    let mut segments = Vec::new();
    let mut depth = ContainerDepth::default();
    let mut raw_start = 0;
    let mut pos = 0;
    let mut order = 0;

    while pos < input.len() {
        let Some(caps) = TAG.captures_at(input, pos) else {
            break;
        };
        let whole = caps.get(0).unwrap();
        let closing = !caps[1].is_empty();
        let name = caps[2].to_ascii_lowercase();

        match name.as_str() {
            "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" if !closing => {
                match find_closing_tag(input, whole.end(), &name) {
                    Some((inner_end, tag_end)) => {
                        push_raw(&mut segments, &input[raw_start..whole.start()]);
                        let (attributes, classes) = parse_attributes(&caps[3]);
                        let raw = input[whole.end()..inner_end].to_string();
                        let tag = match name.strip_prefix('h') {
                            Some(level) => BlockTag::Heading(level.parse().unwrap_or(1)),
                            None => BlockTag::Paragraph,
                        };
                        segments.push(Segment::Block(Block {
                            tag,
                            text: plain_text(&raw),
                            raw,
                            attributes,
                            classes,
                            containment: depth.containment(),
                            order,
                        }));
                        order += 1;
                        raw_start = tag_end;
                        pos = tag_end;
                    }
                    // Unbalanced block tag: leave it in the raw stream
                    None => pos = whole.end(),
                }
            }
            "table" => {
                ContainerDepth::shift(&mut depth.table, closing);
                pos = whole.end();
            }
            "ul" | "ol" | "li" => {
                ContainerDepth::shift(&mut depth.list, closing);
                pos = whole.end();
            }
            "blockquote" => {
                ContainerDepth::shift(&mut depth.blockquote, closing);
                pos = whole.end();
            }
            "div" if !closing => {
                let (_, classes) = parse_attributes(&caps[3]);
                if classes.iter().any(|c| c == "page-marker") {
                    // Artifact from a previous annotation pass; drop it
                    push_raw(&mut segments, &input[raw_start..whole.start()]);
                    let after = match find_closing_tag(input, whole.end(), "div") {
                        Some((_, tag_end)) => tag_end,
                        None => whole.end(),
                    };
                    raw_start = after;
                    pos = after;
                } else {
                    pos = whole.end();
                }
            }
            _ => pos = whole.end(),
        }
    }

    push_raw(&mut segments, &input[raw_start..]);
    Document { segments }
}

fn push_raw(segments: &mut Vec<Segment>, raw: &str) {
    if !raw.is_empty() {
        segments.push(Segment::Raw(raw.to_string()));
    }
}

/// Find the close tag matching an already-consumed open tag, counting
/// nested same-name opens. Returns (inner end, position after close tag).
fn find_closing_tag(input: &str, from: usize, name: &str) -> Option<(usize, usize)> {
    let mut nesting = 0u32;
    let mut pos = from;

    while pos < input.len() {
        let caps = TAG.captures_at(input, pos)?;
        let whole = caps.get(0).unwrap();
        let closing = !caps[1].is_empty();
        if caps[2].eq_ignore_ascii_case(name) {
            if closing {
                if nesting == 0 {
                    return Some((whole.start(), whole.end()));
                }
                nesting -= 1;
            } else {
                nesting += 1;
            }
        }
        pos = whole.end();
    }

    None
}

/// Parse a tag's attribute text into (attributes, classes); `class` is
/// split out so callers can merge computed classes on re-serialization
fn parse_attributes(attr_text: &str) -> (Vec<(String, String)>, Vec<String>) {
    let mut attributes = Vec::new();
    let mut classes = Vec::new();

    for caps in ATTRIBUTE.captures_iter(attr_text) {
        let name = caps[1].to_ascii_lowercase();
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        if name == "class" {
            classes.extend(value.split_whitespace().map(|c| c.to_string()));
        } else {
            attributes.push((name, value));
        }
    }

    (attributes, classes)
}

/// Extract plain text from inner markup: strip tags, decode the common
/// entities, collapse whitespace
fn plain_text(raw: &str) -> String {
    let stripped = ANY_TAG.replace_all(raw, "");
    let decoded = decode_entities(&stripped);
    WHITESPACE_RUN.replace_all(decoded.trim(), " ").into_owned()
}

fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail.find(';') {
            // Entities are short; anything longer is literal text
            Some(end) if end <= 8 => {
                let entity = &tail[1..end];
                match entity {
                    "amp" => out.push('&'),
                    "lt" => out.push('<'),
                    "gt" => out.push('>'),
                    "quot" => out.push('"'),
                    "apos" => out.push('\''),
                    "nbsp" => out.push(' '),
                    _ => {
                        let decoded = entity
                            .strip_prefix('#')
                            .and_then(|digits| digits.parse::<u32>().ok())
                            .and_then(char::from_u32);
                        match decoded {
                            Some(c) => out.push(c),
                            None => out.push_str(&tail[..=end]),
                        }
                    }
                }
                rest = &tail[end + 1..];
            }
            _ => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
