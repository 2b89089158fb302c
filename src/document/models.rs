//! Core data structures for document representation
//!
//! This module defines the public types used to represent a parsed document:
//! block-level elements, the metadata attached to them by the numbering
//! pipeline, and the query/result types consumed by feedback tooling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag classification for a block-level element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockTag {
    /// Heading with its markup level (1-6; levels above 3 share the
    /// deepest section-counter depth)
    Heading(u8),
    Paragraph,
}

impl BlockTag {
    pub fn is_heading(&self) -> bool {
        matches!(self, BlockTag::Heading(_))
    }

    /// Markup level: 1-6 for headings, 0 for paragraphs
    pub fn level(&self) -> u8 {
        match self {
            BlockTag::Heading(level) => *level,
            BlockTag::Paragraph => 0,
        }
    }

    /// The element name used when serializing back to markup
    pub fn tag_name(&self) -> String {
        match self {
            BlockTag::Heading(level) => format!("h{level}"),
            BlockTag::Paragraph => "p".to_string(),
        }
    }
}

/// Structural context a block was found in, tracked while tokenizing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Containment {
    pub in_table: bool,
    pub in_list: bool,
    pub in_blockquote: bool,
}

/// A single heading or paragraph element in document order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub tag: BlockTag,
    /// Plain text content: inline tags stripped, entities decoded, trimmed
    pub text: String,
    /// Inner markup, verbatim
    pub raw: String,
    /// Open-tag attributes in source order (class excluded, see `classes`)
    pub attributes: Vec<(String, String)>,
    pub classes: Vec<String>,
    pub containment: Containment,
    /// Position in document-order traversal of blocks
    pub order: usize,
}

impl Block {
    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }
}

/// One parsed unit of the document: either markup passed through verbatim
/// (container tags, unrecognized elements) or an annotatable block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    Raw(String),
    Block(Block),
}

/// A parsed document: blocks interleaved with verbatim markup segments.
/// Re-serializing the segments unchanged reproduces the input (minus any
/// previously inserted page-marker artifacts, which are dropped on parse).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub segments: Vec<Segment>,
}

impl Document {
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Block(block) => Some(block),
            Segment::Raw(_) => None,
        })
    }

    pub fn block_count(&self) -> usize {
        self.blocks().count()
    }
}

/// Dotted numeric label identifying a paragraph's position within the
/// heading hierarchy, e.g. `2.3.1`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionAddress {
    components: Vec<u32>,
}

impl SectionAddress {
    pub fn new(components: Vec<u32>) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &[u32] {
        &self.components
    }
}

impl fmt::Display for SectionAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .components
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{rendered}")
    }
}

/// Estimated inclusive global line numbers for a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn contains(&self, line: u32) -> bool {
        line >= self.start && line <= self.end
    }
}

/// Metadata attached to a block by the numbering pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotations {
    /// Section label for headings (`data-section`)
    pub section: Option<String>,
    /// Heading level (`data-level`)
    pub level: Option<u8>,
    /// Plain heading text including the reconciled numeric prefix, set only
    /// when classification changed the displayed text
    pub display_text: Option<String>,
    /// Paragraph address (`data-paragraph`)
    pub paragraph: Option<SectionAddress>,
    /// Estimated line range (`data-line-start` / `data-line-end`)
    pub lines: Option<LineRange>,
    /// Estimated page number (`data-page`)
    pub page: Option<u32>,
    /// A page-break marker is inserted immediately before this block
    pub page_break_before: bool,
}

/// A parsed document plus the per-block metadata computed by `annotate()`.
/// `annotations` parallels the blocks in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    pub document: Document,
    pub annotations: Vec<Annotations>,
    /// Total estimated page count (1 for an empty document)
    pub page_count: u32,
}

impl AnnotatedDocument {
    /// Blocks paired with their annotations, in document order
    pub fn annotated_blocks(&self) -> impl Iterator<Item = (&Block, &Annotations)> {
        self.document
            .blocks()
            .map(|block| (block, &self.annotations[block.order]))
    }
}

/// An address used to look a block back up: a paragraph label, a line
/// number (`"45"`), or a line range (`"45-47"`, first number wins)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationQuery {
    pub paragraph_number: Option<String>,
    pub line_number: Option<String>,
}

impl LocationQuery {
    pub fn paragraph(number: impl Into<String>) -> Self {
        Self {
            paragraph_number: Some(number.into()),
            line_number: None,
        }
    }

    pub fn line(number: impl Into<String>) -> Self {
        Self {
            paragraph_number: None,
            line_number: Some(number.into()),
        }
    }
}

/// Text located by the resolver, with immediate neighbor context for
/// feedback-merge tooling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResult {
    pub target_text: String,
    /// The matched block's inner markup
    pub block_markup: String,
    /// Previous sibling's text, empty when there is none or it carries no
    /// paragraph address
    pub before_text: String,
    /// Next sibling's text, same rule as `before_text`
    pub after_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineItem {
    pub title: String,
    pub level: u8,
    pub block_order: usize,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub block_order: usize,
    pub text: String,
    pub start_pos: usize,
    pub end_pos: usize,
}
