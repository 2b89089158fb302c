//! Markup ingestion and serialization
//!
//! The tokenizer turns serialized rich-text markup into the block model;
//! the writer re-emits it with the numbering pipeline's annotations.

mod parser;
mod writer;

pub use parser::parse_markup;
pub use writer::{write_markup, PAGE_MARKER};
