//! The numbering pipeline
//!
//! One full pass per concern, in a fixed order: heading classification and
//! paragraph addressing share the section counter state machine, then line
//! estimation, then pagination. Each invocation recomputes everything from
//! scratch over the whole document, so annotation is stateless between
//! calls and re-running it on its own output changes nothing.

pub(crate) mod heading;
pub(crate) mod lines;
pub(crate) mod pages;
pub(crate) mod paragraph;
pub(crate) mod section;

use crate::config::NumberingOptions;
use crate::document::exclusion;
use crate::document::models::{AnnotatedDocument, Annotations, Block, Document};

use heading::HeadingClassifier;
use lines::LineEstimator;
use pages::Paginator;
use section::SectionCounters;

/// Run the numbering pipeline over a parsed document
pub fn annotate(document: Document, options: &NumberingOptions) -> AnnotatedDocument {
    let blocks: Vec<Block> = document.blocks().cloned().collect();
    let mut annotations = vec![Annotations::default(); blocks.len()];

    if options.enable_paragraph_numbers {
        assign_addresses(&blocks, &mut annotations);
    }
    if options.enable_line_numbers {
        assign_lines(&blocks, &mut annotations, options.lines_per_page);
    }

    let mut page_count = 1;
    if options.enable_page_numbers {
        page_count = assign_pages(&blocks, &mut annotations, options.lines_per_page);
    }

    AnnotatedDocument {
        document,
        annotations,
        page_count,
    }
}

fn assign_addresses(blocks: &[Block], annotations: &mut [Annotations]) {
    let mut counters = SectionCounters::new();
    let mut classifier = HeadingClassifier::new();

    for (block, slot) in blocks.iter().zip(annotations.iter_mut()) {
        match block.tag.level() {
            0 => {
                if !exclusion::excluded_from_numbering(block) {
                    slot.paragraph = Some(paragraph::next_address(&mut counters));
                }
            }
            level => {
                let classified = classifier.classify(&mut counters, level, &block.text);
                slot.section = Some(classified.label);
                slot.level = Some(level);
                slot.display_text = classified.display_text;
            }
        }
    }
}

fn assign_lines(blocks: &[Block], annotations: &mut [Annotations], lines_per_page: u32) {
    let mut estimator = LineEstimator::new(lines_per_page);

    for (block, slot) in blocks.iter().zip(annotations.iter_mut()) {
        if !block.tag.is_heading() && !exclusion::excluded_from_numbering(block) {
            slot.lines = Some(estimator.assign(&block.text));
        }
    }
}

fn assign_pages(blocks: &[Block], annotations: &mut [Annotations], lines_per_page: u32) -> u32 {
    let mut paginator = Paginator::new(lines_per_page);

    for (block, slot) in blocks.iter().zip(annotations.iter_mut()) {
        if exclusion::excluded_from_pagination(block) {
            continue;
        }
        let placement = paginator.place(block);
        slot.page = Some(placement.page);
        slot.page_break_before = placement.break_before;
    }

    paginator.page_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::markup::parse_markup;

    fn annotate_default(markup: &str) -> AnnotatedDocument {
        annotate(parse_markup(markup), &NumberingOptions::default())
    }

    fn paragraph_addresses(annotated: &AnnotatedDocument) -> Vec<String> {
        annotated
            .annotations
            .iter()
            .filter_map(|a| a.paragraph.as_ref().map(|p| p.to_string()))
            .collect()
    }

    #[test]
    fn heading_and_paragraphs_share_section_context() {
        let annotated = annotate_default("<h1>Introduction</h1><p>Alpha.</p><p>Beta.</p>");
        assert_eq!(paragraph_addresses(&annotated), vec!["1.1", "1.2"]);
        assert_eq!(annotated.annotations[0].section.as_deref(), Some("1"));
        assert_eq!(
            annotated.annotations[0].display_text.as_deref(),
            Some("1. Introduction")
        );
    }

    #[test]
    fn content_before_any_heading_is_section_zero() {
        let annotated = annotate_default("<p>Before any heading.</p>");
        assert_eq!(paragraph_addresses(&annotated), vec!["0.1"]);
    }

    #[test]
    fn disabled_passes_leave_no_annotations() {
        let options = NumberingOptions {
            enable_paragraph_numbers: false,
            enable_line_numbers: false,
            enable_page_numbers: false,
            ..Default::default()
        };
        let annotated = annotate(parse_markup("<h1>T</h1><p>x</p>"), &options);
        assert!(annotated.annotations.iter().all(|a| *a == Annotations::default()));
        assert_eq!(annotated.page_count, 1);
    }

    #[test]
    fn empty_document_annotates_to_nothing() {
        let annotated = annotate_default("");
        assert!(annotated.annotations.is_empty());
        assert_eq!(annotated.page_count, 1);
    }
}
