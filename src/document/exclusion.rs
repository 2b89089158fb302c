//! Exclusion policy for structurally special content
//!
//! Numbering, line estimation, and pagination must agree on which blocks
//! are exempt, so all three consult these predicates. Pagination is the
//! deliberate asymmetry: it skips only table-internal content, so list and
//! blockquote blocks still receive a page tag and still consume page
//! budget even though they are never numbered.

use super::models::Block;

/// Class markers that opt a block out of numbering explicitly
const NO_NUMBER_CLASSES: &[&str] = &[
    "no-number",
    "no-paragraph-number",
    "page-number",
    "page-marker",
];

/// True when a block must not receive a paragraph address or line range
/// and must not consume line numbers
pub fn excluded_from_numbering(block: &Block) -> bool {
    block.containment.in_table
        || block.containment.in_list
        || block.containment.in_blockquote
        || NO_NUMBER_CLASSES.iter().any(|class| block.has_class(class))
}

/// True when a block is invisible to the paginator: it receives no page
/// tag and contributes nothing to the page budget
pub fn excluded_from_pagination(block: &Block) -> bool {
    block.containment.in_table
}
