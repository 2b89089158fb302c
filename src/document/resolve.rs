//! Location resolution
//!
//! Maps a paragraph or line address back to the text it refers to, plus
//! immediate neighbor context, so feedback tooling can splice suggested
//! replacements into the right block. A miss is a normal outcome: callers
//! fall back to substring search (see `query`) or a fixed excerpt.

use super::markup::parse_markup;
use super::models::{AnnotatedDocument, Annotations, Block, LocationQuery, LocationResult};
use super::numbering::annotate;
use crate::config::NumberingOptions;

/// Resolve an address against raw markup. Numbering is recomputed from
/// scratch, so the markup does not need to be pre-annotated.
pub fn resolve_location(markup: &str, query: &LocationQuery) -> Option<LocationResult> {
    let annotated = annotate(parse_markup(markup), &NumberingOptions::default());
    resolve_in_document(&annotated, query)
}

/// Resolve an address against an already annotated document
pub fn resolve_in_document(
    annotated: &AnnotatedDocument,
    query: &LocationQuery,
) -> Option<LocationResult> {
    let blocks: Vec<(&Block, &Annotations)> = annotated.annotated_blocks().collect();

    if let Some(paragraph_number) = &query.paragraph_number {
        if let Some(result) = find_by_paragraph(&blocks, paragraph_number) {
            return Some(result);
        }
    }
    if let Some(line_number) = &query.line_number {
        if let Some(result) = find_by_line(&blocks, line_number) {
            return Some(result);
        }
    }
    None
}

fn find_by_paragraph(
    blocks: &[(&Block, &Annotations)],
    paragraph_number: &str,
) -> Option<LocationResult> {
    let index = blocks.iter().position(|(_, annotations)| {
        annotations
            .paragraph
            .as_ref()
            .is_some_and(|address| address.to_string() == paragraph_number)
    })?;

    let (block, _) = blocks[index];
    Some(LocationResult {
        target_text: block.text.clone(),
        block_markup: block.raw.clone(),
        before_text: neighbor_text(blocks, index.checked_sub(1)),
        after_text: neighbor_text(blocks, Some(index + 1)),
    })
}

/// Text of an adjacent block, but only when that block carries a paragraph
/// address of its own; headings and excluded content yield an empty string
fn neighbor_text(blocks: &[(&Block, &Annotations)], index: Option<usize>) -> String {
    index
        .and_then(|i| blocks.get(i))
        .filter(|(_, annotations)| annotations.paragraph.is_some())
        .map(|(block, _)| block.text.clone())
        .unwrap_or_default()
}

fn find_by_line(blocks: &[(&Block, &Annotations)], line_number: &str) -> Option<LocationResult> {
    let target = parse_target_line(line_number)?;

    let (block, _) = blocks.iter().find(|(_, annotations)| {
        annotations
            .lines
            .is_some_and(|range| range.contains(target))
    })?;

    Some(LocationResult {
        target_text: block.text.clone(),
        block_markup: block.raw.clone(),
        before_text: String::new(),
        after_text: String::new(),
    })
}

/// Line queries come as `"45"` or a range like `"45-47"`; the first number
/// is the target. Unparseable input resolves to nothing rather than erroring.
fn parse_target_line(line_number: &str) -> Option<u32> {
    line_number.split('-').next()?.trim().parse().ok()
}
