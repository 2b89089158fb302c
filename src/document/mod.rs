//! Document model, markup ingestion, and the numbering pipeline
//!
//! A document is parsed into block-level elements, annotated with section,
//! paragraph, line, and page metadata, and serialized back to markup.
//! Addresses can then be resolved back to text for feedback anchoring.

pub mod exclusion;
pub mod markup;
pub mod models;
pub mod numbering;
pub mod query;
pub mod resolve;

pub use markup::{parse_markup, write_markup, PAGE_MARKER};
pub use models::*;
pub use numbering::annotate;
pub use query::{generate_outline, search_blocks};
pub use resolve::{resolve_in_document, resolve_location};

use crate::config::NumberingOptions;

/// Parse, annotate, and re-serialize markup in one call. This is the
/// whole-pipeline entrypoint consumed by editor and feedback tooling.
pub fn annotate_markup(markup: &str, options: &NumberingOptions) -> String {
    write_markup(&annotate(parse_markup(markup), options))
}
