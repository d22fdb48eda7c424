use super::blocks::{delete_block, StyleSnapshot};
use super::{Pass, PassContext};
use crate::document::{Attribute, BlockKind, DocumentTree, ElementId, GlyphType};
use crate::error::EngineError;
use once_cell::sync::Lazy;
use regex::Regex;

/// `(pattern, glyph)` in priority order: unordered markers before ordered ones.
static MARKERS: Lazy<[(Regex, GlyphType); 2]> = Lazy::new(|| {
    [
        (Regex::new(r"^[*+\-]\s+").expect("bullet marker"), GlyphType::Bullet),
        (Regex::new(r"^\d+\.\s+").expect("number marker"), GlyphType::Number),
    ]
});

/// Same markers, allowing indentation before them.
static INDENTED_MARKERS: Lazy<[(Regex, GlyphType); 2]> = Lazy::new(|| {
    [
        (Regex::new(r"^\s*[*+\-]\s+").expect("bullet marker"), GlyphType::Bullet),
        (Regex::new(r"^\s*\d+\.\s+").expect("number marker"), GlyphType::Number),
    ]
});

/// Turns paragraphs that start with a list marker into list items.
///
/// The paragraph is deleted and a list item with the marker stripped takes its place,
/// keeping line spacing and character styles. Each block is visited once. Headings and
/// markers written as inline code are left alone.
pub struct ClassifyLists;

impl Pass for ClassifyLists {
    fn name(&self) -> &str {
        "lists"
    }

    fn run(&self, doc: &mut dyn DocumentTree, ctx: &PassContext<'_>) -> Result<usize, EngineError> {
        let markers = if ctx.options.list_allow_leading_whitespace {
            &*INDENTED_MARKERS
        } else {
            &*MARKERS
        };
        let code_font = Attribute::FontFamily(ctx.options.inline_code_font.clone());
        let mut changed = 0;
        let mut index = 0;
        while index < doc.block_count() {
            if doc.block_kind(index) == Some(BlockKind::Paragraph)
                && doc.heading_level(index)?.is_none()
            {
                let element = ElementId::Block(index);
                let text = doc.text(element)?;
                let hit = markers
                    .iter()
                    .find_map(|(pattern, glyph)| pattern.find(&text).map(|m| (m.end(), *glyph)));
                let marker_in_code = match hit {
                    Some((marker_end, _)) => {
                        let last = text[..marker_end].chars().count() - 1;
                        doc.has_attribute(element, 0, last, &code_font)?
                    }
                    None => false,
                };
                if let Some((marker_end, glyph)) = hit.filter(|_| !marker_in_code) {
                    let stripped = &text[marker_end..];
                    let marker_chars = text[..marker_end].chars().count();
                    let styles =
                        StyleSnapshot::capture(&*doc, element, marker_chars, stripped.chars().count())?;
                    let spacing = delete_block(doc, index)?;
                    let item = doc.insert_list_item(index, stripped, glyph)?;
                    doc.set_line_spacing(index, spacing)?;
                    styles.restore(doc, item, 0)?;
                    tracing::debug!(index, ?glyph, "converted list item");
                    changed += 1;
                }
            }
            index += 1;
        }
        Ok(changed)
    }
}
