//! docmark: paragraph, line, and page numbering for review markup
//!
//! This library assigns stable, re-derivable addresses (section labels,
//! paragraph numbers, line ranges, page numbers) to the blocks of a
//! rich-text document, and resolves those addresses back to text so
//! reviewer feedback can be anchored to specific locations.

pub mod config;
pub mod document;

/// Export format options for the annotate command
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum ExportFormat {
    /// Annotated markup with data attributes and page markers
    Markup,
    /// The annotated block model as JSON
    Json,
    /// Plain text with address prefixes
    Text,
}

// Re-export commonly used types
pub use config::NumberingOptions;
pub use document::{
    annotate, annotate_markup, parse_markup, resolve_location, write_markup, AnnotatedDocument,
    Document, LocationQuery, LocationResult,
};
