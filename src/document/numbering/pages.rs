//! Page estimation
//!
//! Accumulates estimated line counts against a lines-per-page budget and
//! decides where page breaks fall. Headings cost a flat two lines. Every
//! paginated block gets a page tag; a block that would overflow a
//! non-empty page starts a new one with a marker inserted before it.

use super::lines::estimated_lines;
use crate::document::models::Block;

pub(crate) const DEFAULT_LINES_PER_PAGE: u32 = 50;

const HEADING_LINES: u32 = 2;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Placement {
    pub(crate) page: u32,
    pub(crate) break_before: bool,
}

#[derive(Debug)]
pub(crate) struct Paginator {
    current_page: u32,
    lines_on_page: u32,
    lines_per_page: u32,
}

impl Paginator {
    pub(crate) fn new(lines_per_page: u32) -> Self {
        Self {
            current_page: 1,
            lines_on_page: 0,
            lines_per_page: lines_per_page.max(1),
        }
    }

    /// Place a block on the current or next page and consume its budget
    pub(crate) fn place(&mut self, block: &Block) -> Placement {
        let lines = block_lines(block);

        let break_before =
            self.lines_on_page + lines > self.lines_per_page && self.lines_on_page > 0;
        if break_before {
            self.current_page += 1;
            self.lines_on_page = 0;
        }
        self.lines_on_page += lines;

        Placement {
            page: self.current_page,
            break_before,
        }
    }

    pub(crate) fn page_count(&self) -> u32 {
        self.current_page
    }
}

fn block_lines(block: &Block) -> u32 {
    if block.tag.is_heading() {
        HEADING_LINES
    } else {
        estimated_lines(&block.text)
    }
}
