use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use docmark::config::NumberingOptions;
use docmark::document::{
    annotate, generate_outline, parse_markup, resolve_in_document, search_blocks, write_markup,
    LocationQuery,
};
use docmark::ExportFormat;

#[derive(Parser)]
#[command(
    name = "docmark",
    version,
    about = "Paragraph, line, and page numbering for publication review markup"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Annotate a markup file with paragraph, line, and page numbers
    Annotate {
        /// Markup file to annotate
        input: PathBuf,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value = "markup")]
        export: ExportFormat,
        /// Skip paragraph addressing
        #[arg(long)]
        no_paragraph_numbers: bool,
        /// Skip line estimation
        #[arg(long)]
        no_line_numbers: bool,
        /// Skip pagination
        #[arg(long)]
        no_page_numbers: bool,
        /// Override the lines-per-page budget
        #[arg(long)]
        lines_per_page: Option<u32>,
        /// Read options from this TOML file instead of the user config
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Resolve a paragraph or line address back to its text
    Resolve {
        /// Markup file to resolve against
        input: PathBuf,
        /// Paragraph address, e.g. 2.1
        #[arg(short, long)]
        paragraph: Option<String>,
        /// Line number or range, e.g. 45 or 45-47
        #[arg(short, long)]
        line: Option<String>,
    },
    /// Print the numbered heading outline
    Outline {
        /// Markup file to outline
        input: PathBuf,
    },
    /// Case-insensitive substring search over the document text
    Search {
        /// Markup file to search
        input: PathBuf,
        /// Text to look for
        query: String,
    },
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Annotate {
            input,
            output,
            export,
            no_paragraph_numbers,
            no_line_numbers,
            no_page_numbers,
            lines_per_page,
            config,
        } => {
            let mut options = load_options(config.as_deref())?;
            options.enable_paragraph_numbers &= !no_paragraph_numbers;
            options.enable_line_numbers &= !no_line_numbers;
            options.enable_page_numbers &= !no_page_numbers;
            if let Some(budget) = lines_per_page {
                options.lines_per_page = budget;
            }

            let markup = read_input(&input)?;
            let annotated = annotate(parse_markup(&markup), &options);

            let rendered = match export {
                ExportFormat::Markup => write_markup(&annotated),
                ExportFormat::Json => serde_json::to_string_pretty(&annotated)?,
                ExportFormat::Text => render_text(&annotated),
            };

            match output {
                Some(path) => std::fs::write(&path, rendered)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{rendered}"),
            }
        }
        Command::Resolve {
            input,
            paragraph,
            line,
        } => {
            let markup = read_input(&input)?;
            let annotated = annotate(parse_markup(&markup), &NumberingOptions::default());
            let query = LocationQuery {
                paragraph_number: paragraph,
                line_number: line,
            };
            match resolve_in_document(&annotated, &query) {
                Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                None => {
                    eprintln!("no block matches the given address");
                    std::process::exit(1);
                }
            }
        }
        Command::Outline { input } => {
            let markup = read_input(&input)?;
            let annotated = annotate(parse_markup(&markup), &NumberingOptions::default());
            for item in generate_outline(&annotated) {
                let indent = "  ".repeat(item.level.saturating_sub(1) as usize);
                println!("{indent}{}", item.title);
            }
        }
        Command::Search { input, query } => {
            let markup = read_input(&input)?;
            let document = parse_markup(&markup);
            for result in search_blocks(&document, &query) {
                println!("[block {}] {}", result.block_order, result.text);
            }
        }
    }

    Ok(())
}

fn load_options(config: Option<&Path>) -> Result<NumberingOptions> {
    match config {
        Some(path) => NumberingOptions::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => NumberingOptions::load_default().context("failed to load user config"),
    }
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Plain-text rendering with address prefixes, one block per line
fn render_text(annotated: &docmark::AnnotatedDocument) -> String {
    let mut out = String::new();
    for (block, annotations) in annotated.annotated_blocks() {
        let text = annotations.display_text.as_deref().unwrap_or(&block.text);
        match &annotations.paragraph {
            Some(address) => out.push_str(&format!("{address}  {text}\n")),
            None => out.push_str(&format!("{text}\n")),
        }
    }
    out
}
