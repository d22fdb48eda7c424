//! XML-like structural dump
//!
//! One tag per block, styled runs as nested `<run>` tags. Meant for inspecting
//! a formatted document and for snapshot tests, so attributes are written in a
//! fixed order and unstyled text is written bare.
//!
//! ```text
//! <document>
//!   <heading level="1">Title</heading>
//!   <paragraph>Some <run bold>strong</run> words</paragraph>
//!   <list-item glyph="number">First</list-item>
//!   <table border="0">
//!     <cell background="#f8f8f8"><run font="Courier New">let x = 1;</run></cell>
//!   </table>
//! </document>
//! ```

use crate::document::{Block, GlyphType, RichDocument, StyledText, TextStyle};
use crate::error::FormatError;
use crate::format::Format;

/// Serialize a document to the tag format
pub fn serialize_document(doc: &RichDocument) -> String {
    let mut output = String::from("<document>\n");

    for block in &doc.blocks {
        match block {
            Block::Paragraph(p) => {
                let open = match p.heading {
                    Some(level) => format!("heading level=\"{}\"", level.rank()),
                    None => "paragraph".to_string(),
                };
                let close = if p.heading.is_some() { "heading" } else { "paragraph" };
                output.push_str(&format!("  <{open}>{}</{close}>\n", runs(&p.text)));
            }
            Block::ListItem(item) => {
                let glyph = match item.glyph {
                    GlyphType::Bullet => "bullet",
                    GlyphType::Number => "number",
                };
                output.push_str(&format!(
                    "  <list-item glyph=\"{glyph}\">{}</list-item>\n",
                    runs(&item.text)
                ));
            }
            Block::Table(table) => {
                output.push_str(&format!("  <table border=\"{}\">\n", table.border_width));
                for cell in table.rows.iter().flatten() {
                    let background = cell
                        .background
                        .map(|c| format!(" background=\"{c}\""))
                        .unwrap_or_default();
                    output.push_str(&format!(
                        "    <cell{background}>{}</cell>\n",
                        runs(&cell.text)
                    ));
                }
                output.push_str("  </table>\n");
            }
        }
    }

    output.push_str("</document>\n");
    output
}

fn runs(text: &StyledText) -> String {
    text.runs()
        .iter()
        .map(|run| {
            let body = escape_xml(&run.text);
            if run.style.is_plain() {
                body
            } else {
                format!("<run{}>{body}</run>", run_attributes(&run.style))
            }
        })
        .collect()
}

fn run_attributes(style: &TextStyle) -> String {
    let mut attrs = String::new();
    if style.bold {
        attrs.push_str(" bold");
    }
    if style.italic {
        attrs.push_str(" italic");
    }
    if let Some(font) = &style.font_family {
        attrs.push_str(&format!(" font=\"{}\"", escape_xml(font)));
    }
    if let Some(color) = style.foreground {
        attrs.push_str(&format!(" fg=\"{color}\""));
    }
    if let Some(color) = style.background {
        attrs.push_str(&format!(" bg=\"{color}\""));
    }
    if let Some(url) = &style.link {
        attrs.push_str(&format!(" link=\"{}\"", escape_xml(url)));
    }
    attrs
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\"', "&quot;")
        .replace('\'', "&apos;")
        .replace('\r', "&#13;")
        .replace('\u{b}', "&#11;")
        .replace('\n', "&#10;")
}

/// Format implementation for XML-like tag format
pub struct TagFormat;

impl Format for TagFormat {
    fn name(&self) -> &str {
        "tag"
    }

    fn description(&self) -> &str {
        "XML-like dump of blocks and styled runs"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tag", "xml"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &RichDocument) -> Result<String, FormatError> {
        Ok(serialize_document(doc))
    }
}
