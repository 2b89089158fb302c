//! Annotated markup serialization
//!
//! Re-emits a parsed document with the numbering pipeline's metadata
//! injected: `data-*` attributes on block open tags, numbering classes,
//! reconciled heading prefixes, and page-marker nodes before page breaks.
//! Raw segments are reproduced byte-for-byte, and previously injected
//! metadata is stripped before re-injection so annotation is repeatable.

use once_cell::sync::Lazy;
use regex::Regex;

use super::super::models::{AnnotatedDocument, Annotations, Block, Segment};

/// Marker node inserted before a block that starts a new page
pub const PAGE_MARKER: &str = "<div class=\"page-marker\"><hr /></div>";

/// Attributes owned by the pipeline; stale copies are dropped on re-emit
const COMPUTED_ATTRIBUTES: &[&str] = &[
    "data-section",
    "data-level",
    "data-paragraph",
    "data-line-start",
    "data-line-end",
    "data-page",
];

/// Classes owned by the pipeline
const COMPUTED_CLASSES: &[&str] = &[
    "numbered-paragraph",
    "numbered-line",
    "section-heading",
    "subsection-heading",
    "subsubsection-heading",
    "deep-heading",
];

/// Leading numeric prefix inside heading markup, allowing inline tags and
/// whitespace before the number
static RAW_HEADING_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^((?:<[^>]*>|\s)*)(\d+(?:\.\d+){0,2})(\.?)(\s+)").unwrap());

/// Serialize an annotated document back to markup
pub fn write_markup(annotated: &AnnotatedDocument) -> String {
    let mut out = String::new();

    for segment in &annotated.document.segments {
        match segment {
            Segment::Raw(raw) => out.push_str(raw),
            Segment::Block(block) => {
                let annotations = &annotated.annotations[block.order];
                if annotations.page_break_before {
                    out.push_str(PAGE_MARKER);
                }
                write_block(&mut out, block, annotations);
            }
        }
    }

    out
}

fn write_block(out: &mut String, block: &Block, annotations: &Annotations) {
    let tag_name = block.tag.tag_name();
    out.push('<');
    out.push_str(&tag_name);

    for (name, value) in &block.attributes {
        if COMPUTED_ATTRIBUTES.contains(&name.as_str()) {
            continue;
        }
        push_attribute(out, name, value);
    }

    let classes = merged_classes(block, annotations);
    if !classes.is_empty() {
        push_attribute(out, "class", &classes.join(" "));
    }

    if let Some(section) = &annotations.section {
        push_attribute(out, "data-section", section);
    }
    if let Some(level) = annotations.level {
        push_attribute(out, "data-level", &level.to_string());
    }
    if let Some(paragraph) = &annotations.paragraph {
        push_attribute(out, "data-paragraph", &paragraph.to_string());
    }
    if let Some(lines) = annotations.lines {
        push_attribute(out, "data-line-start", &lines.start.to_string());
        push_attribute(out, "data-line-end", &lines.end.to_string());
    }
    if let Some(page) = annotations.page {
        push_attribute(out, "data-page", &page.to_string());
    }

    out.push('>');
    out.push_str(&block_inner(block, annotations));
    out.push_str("</");
    out.push_str(&tag_name);
    out.push('>');
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&value.replace('"', "&quot;"));
    out.push('"');
}

/// Author classes with pipeline classes stripped, then the classes this
/// run earned re-added
fn merged_classes(block: &Block, annotations: &Annotations) -> Vec<String> {
    let mut classes: Vec<String> = block
        .classes
        .iter()
        .filter(|class| !COMPUTED_CLASSES.contains(&class.as_str()))
        .cloned()
        .collect();

    if let Some(level) = annotations.level {
        let class = match level {
            1 => "section-heading",
            2 => "subsection-heading",
            3 => "subsubsection-heading",
            _ => "deep-heading",
        };
        classes.push(class.to_string());
    }
    if annotations.paragraph.is_some() {
        classes.push("numbered-paragraph".to_string());
    }
    if annotations.lines.is_some() {
        classes.push("numbered-line".to_string());
    }

    classes
}

/// Inner markup, with the heading's numeric prefix rewritten when the
/// classifier changed the displayed text
fn block_inner(block: &Block, annotations: &Annotations) -> String {
    let Some(label) = &annotations.section else {
        return block.raw.clone();
    };
    if annotations.display_text.is_none() {
        return block.raw.clone();
    }

    if let Some(caps) = RAW_HEADING_PREFIX.captures(&block.raw) {
        // Replace the stale number, keeping the author's punctuation
        format!(
            "{}{}{}{}{}",
            &caps[1],
            label,
            &caps[3],
            &caps[4],
            &block.raw[caps.get(0).unwrap().end()..]
        )
    } else {
        // No prefix in the markup: synthesize one in front
        let punctuation = if label.contains('.') { " " } else { ". " };
        format!("{label}{punctuation}{}", block.raw)
    }
}
