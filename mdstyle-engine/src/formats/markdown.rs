//! Markdown format
//!
//! Loading is line based, exactly like [`TextFormat`](super::TextFormat): the
//! Markdown syntax stays in the text so the formatting passes can rewrite it.
//! Saving goes the other way and writes native styling back out as Markdown
//! markup, which lets a formatted document be inspected as source.

use super::text::{parse_lines, table_lines};
use crate::document::{Block, GlyphType, RichDocument, StyledText, TextStyle};
use crate::error::FormatError;
use crate::format::Format;

pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown source, one paragraph per line"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
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
        let mut number = 0;

        for block in &doc.blocks {
            match block {
                Block::ListItem(item) if item.glyph == GlyphType::Number => number += 1,
                _ => number = 0,
            }

            match block {
                Block::Paragraph(p) => {
                    if let Some(level) = p.heading {
                        output.push_str(&"#".repeat(level.rank()));
                        output.push(' ');
                    }
                    output.push_str(&inline_markup(&p.text));
                }
                Block::ListItem(item) => {
                    match item.glyph {
                        GlyphType::Bullet => output.push_str("* "),
                        GlyphType::Number => output.push_str(&format!("{number}. ")),
                    }
                    output.push_str(&inline_markup(&item.text));
                }
                Block::Table(_) => {
                    output.push_str("```\n");
                    for line in table_lines(block) {
                        output.push_str(&line);
                        output.push('\n');
                    }
                    output.push_str("```");
                }
            }
            output.push('\n');
        }

        Ok(output)
    }
}

fn inline_markup(text: &StyledText) -> String {
    text.runs()
        .into_iter()
        .map(|run| wrap_run(&run.text, &run.style))
        .collect()
}

fn wrap_run(text: &str, style: &TextStyle) -> String {
    // Inline code is the only styling that carries both a font and a background.
    if style.font_family.is_some() && style.background.is_some() {
        return format!("`{text}`");
    }

    let mut out = text.to_string();
    if style.italic {
        out = format!("_{out}_");
    }
    if style.bold {
        out = format!("**{out}**");
    }
    if let Some(url) = &style.link {
        out = format!("[{out}]({url})");
    }
    out
}
