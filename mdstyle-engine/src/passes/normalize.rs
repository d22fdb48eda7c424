use super::blocks::{delete_block, StyleSnapshot};
use super::{Pass, PassContext};
use crate::document::{BlockKind, DocumentTree, ElementId};
use crate::error::EngineError;

/// Characters a host uses for a soft line break inside a paragraph.
pub const LINE_WRAP_MARKERS: [char; 2] = ['\r', '\u{000b}'];

/// Splits paragraphs at their line-wrap markers.
///
/// A paragraph with N markers is replaced, in place, by N + 1 paragraphs that keep its
/// line spacing and character styles. Every later pass relies on one logical line per
/// paragraph.
pub struct NormalizeParagraphs;

impl Pass for NormalizeParagraphs {
    fn name(&self) -> &str {
        "normalize"
    }

    fn run(&self, doc: &mut dyn DocumentTree, _ctx: &PassContext<'_>) -> Result<usize, EngineError> {
        let mut changed = 0;
        let mut index = 0;
        while index < doc.block_count() {
            if doc.block_kind(index) != Some(BlockKind::Paragraph) {
                index += 1;
                continue;
            }
            let original = ElementId::Block(index);
            let text = doc.text(original)?;
            if !text.contains(&LINE_WRAP_MARKERS[..]) {
                index += 1;
                continue;
            }

            let spacing = doc.line_spacing(index)?;
            let lines: Vec<&str> = text.split(&LINE_WRAP_MARKERS[..]).collect();
            let mut consumed = 0;
            for (offset, line) in lines.iter().enumerate() {
                let len = line.chars().count();
                let styles = StyleSnapshot::capture(&*doc, original_after(original, offset), consumed, len)?;
                let inserted = doc.insert_paragraph(index + offset, line)?;
                doc.set_line_spacing(index + offset, spacing)?;
                styles.restore(doc, inserted, 0)?;
                consumed += len + 1;
            }
            // The original now sits after the inserted lines.
            delete_block(doc, index + lines.len())?;

            tracing::debug!(index, lines = lines.len(), "split paragraph");
            changed += 1;
            index += lines.len();
        }
        Ok(changed)
    }
}

/// Position of the original paragraph once `inserted` paragraphs precede it.
fn original_after(original: ElementId, inserted: usize) -> ElementId {
    ElementId::Block(original.block() + inserted)
}
