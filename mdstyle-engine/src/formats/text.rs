//! Plain text format
//!
//! Each `\n`-terminated line loads as one paragraph. A `\r` or `\u{b}` inside a
//! line is kept as a line-wrap marker for the normalizer; a `\r\n` pair is an
//! ordinary line ending. Saving writes the characters of every block, one block
//! per line, with no styling.

use crate::document::{Block, RichDocument};
use crate::error::FormatError;
use crate::format::Format;

/// Split source text into one paragraph per line.
pub(crate) fn parse_lines(source: &str) -> RichDocument {
    let source = source.replace("\r\n", "\n");
    let source = source.strip_suffix('\n').unwrap_or(&source);
    RichDocument::from_paragraphs(source.split('\n'))
}

/// Lines of a table in reading order: cells left to right, rows top to bottom.
pub(crate) fn table_lines(block: &Block) -> Vec<String> {
    match block {
        Block::Table(table) => table
            .rows
            .iter()
            .flatten()
            .flat_map(|cell| cell.text.as_str().lines().map(str::to_string).collect::<Vec<_>>())
            .collect(),
        _ => Vec::new(),
    }
}

pub struct TextFormat;

impl Format for TextFormat {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Plain text, one paragraph per line"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<RichDocument, FormatError> {
        Ok(parse_lines(source))
    }

    fn serialize(&self, doc: &RichDocument) -> Result<String, FormatError> {
        let mut output = String::new();
        for block in &doc.blocks {
            match block.text() {
                Some(text) => {
                    output.push_str(text.as_str());
                    output.push('\n');
                }
                None => {
                    for line in table_lines(block) {
                        output.push_str(&line);
                        output.push('\n');
                    }
                }
            }
        }
        Ok(output)
    }
}
