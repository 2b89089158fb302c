//! Paragraph address assignment
//!
//! Every eligible paragraph gets a dotted address built from the active
//! section context plus an incrementing paragraph-in-section counter.
//! Content before any heading is addressed `0.N`.

use super::section::SectionCounters;
use crate::document::models::SectionAddress;

/// Address the next eligible paragraph under the current section context
pub(crate) fn next_address(counters: &mut SectionCounters) -> SectionAddress {
    let paragraph = counters.bump_paragraph();

    let components = if counters.current_level() == 3 && counters.subsubsection() > 0 {
        vec![
            counters.section(),
            counters.subsection(),
            counters.subsubsection(),
            paragraph,
        ]
    } else if counters.current_level() >= 2 && counters.subsection() > 0 {
        vec![counters.section(), counters.subsection(), paragraph]
    } else if counters.current_level() >= 1 && counters.section() > 0 {
        vec![counters.section(), paragraph]
    } else {
        vec![0, paragraph]
    };

    SectionAddress::new(components)
}
