//! Line estimation
//!
//! Line counts are a layout heuristic for feedback anchoring, not rendered
//! metrics: a paragraph occupies `ceil(graphemes / 80)` lines, minimum one.
//! Eligible paragraphs consume a gapless global line range in document
//! order; excluded blocks consume nothing.

use unicode_segmentation::UnicodeSegmentation;

use crate::document::models::LineRange;

/// Characters per estimated line
pub(crate) const LINE_WIDTH: usize = 80;

#[derive(Debug)]
pub(crate) struct LineEstimator {
    next_line: u32,
    /// Line position within the current page; a hint only, page breaks are
    /// decided independently by the paginator
    page_line: u32,
    lines_per_page: u32,
}

impl LineEstimator {
    pub(crate) fn new(lines_per_page: u32) -> Self {
        Self {
            next_line: 1,
            page_line: 1,
            lines_per_page: lines_per_page.max(1),
        }
    }

    /// Assign the next global line range to a paragraph's text
    pub(crate) fn assign(&mut self, text: &str) -> LineRange {
        let lines = estimated_lines(text);
        let range = LineRange {
            start: self.next_line,
            end: self.next_line + lines - 1,
        };
        self.next_line = range.end + 1;

        self.page_line += lines;
        if self.page_line > self.lines_per_page {
            self.page_line = 1;
        }

        range
    }
}

/// Estimated line count for a run of text
pub(crate) fn estimated_lines(text: &str) -> u32 {
    let length = text.graphemes(true).count();
    (length.div_ceil(LINE_WIDTH) as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_paragraph_occupies_one_line() {
        assert_eq!(estimated_lines("Alpha."), 1);
        assert_eq!(estimated_lines(""), 1);
    }

    #[test]
    fn four_thousand_characters_make_fifty_lines() {
        let text = "x".repeat(4000);
        assert_eq!(estimated_lines(&text), 50);
    }

    #[test]
    fn ranges_are_contiguous_and_inclusive() {
        let mut estimator = LineEstimator::new(50);
        let first = estimator.assign(&"a".repeat(200));
        assert_eq!((first.start, first.end), (1, 3));
        let second = estimator.assign("short");
        assert_eq!((second.start, second.end), (4, 4));
        assert!(second.contains(4));
        assert!(!second.contains(3));
    }
}
