//! Document search and navigation operations
//!
//! Read-only querying over the block model: case-insensitive substring
//! search (the resolver's documented fallback) and numbered outline
//! generation for navigation.

use super::models::{AnnotatedDocument, Document, OutlineItem, SearchResult};

/// Case-insensitive substring search over all blocks, including excluded
/// content such as table cells
pub fn search_blocks(document: &Document, query: &str) -> Vec<SearchResult> {
    let mut results = Vec::new();
    if query.trim().is_empty() {
        return results;
    }
    let query_lower = query.to_lowercase();

    for block in document.blocks() {
        let text_lower = block.text.to_lowercase();
        if let Some(start_pos) = text_lower.find(&query_lower) {
            results.push(SearchResult {
                block_order: block.order,
                text: block.text.clone(),
                start_pos,
                end_pos: start_pos + query.len(),
            });
        }
    }

    results
}

/// Numbered heading outline in document order
pub fn generate_outline(annotated: &AnnotatedDocument) -> Vec<OutlineItem> {
    let mut outline = Vec::new();

    for (block, annotations) in annotated.annotated_blocks() {
        if let Some(level) = annotations.level {
            let title = annotations
                .display_text
                .clone()
                .unwrap_or_else(|| block.text.clone());
            outline.push(OutlineItem {
                title,
                level,
                block_order: block.order,
            });
        }
    }

    outline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NumberingOptions;
    use crate::document::markup::parse_markup;
    use crate::document::numbering::annotate;

    const MARKUP: &str = "<h1>Overview</h1><p>Revenue grew.</p>\
                          <h2>Details</h2><p>More revenue notes.</p>\
                          <table><tr><td><p>Revenue cell</p></td></tr></table>";

    #[test]
    fn empty_query_returns_no_results() {
        let document = parse_markup(MARKUP);
        assert!(search_blocks(&document, "").is_empty());
        assert!(search_blocks(&document, "   ").is_empty());
    }

    #[test]
    fn search_is_case_insensitive_and_reports_positions() {
        let document = parse_markup(MARKUP);
        let results = search_blocks(&document, "REVENUE");
        assert_eq!(results.len(), 3, "matches include table-internal text");
        assert_eq!(results[0].text, "Revenue grew.");
        assert_eq!(results[0].start_pos, 0);
        assert_eq!(results[0].end_pos, 7);
    }

    #[test]
    fn outline_lists_numbered_headings_in_order() {
        let annotated = annotate(parse_markup(MARKUP), &NumberingOptions::default());
        let outline = generate_outline(&annotated);
        assert_eq!(outline.len(), 2);
        assert_eq!(outline[0].title, "1. Overview");
        assert_eq!(outline[0].level, 1);
        assert_eq!(outline[1].title, "1.1 Details");
        assert_eq!(outline[1].level, 2);
    }
}
