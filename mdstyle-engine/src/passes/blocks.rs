//! Offset and block helpers shared by the passes.

use crate::document::{Attribute, BlockKind, DocumentTree, ElementId, Match};
use crate::error::EngineError;

/// Removes the block at `index` and returns its line spacing.
///
/// Hosts refuse to delete a document's only block, so in that case an empty placeholder
/// paragraph is inserted after it first. The placeholder stays behind.
pub fn delete_block(doc: &mut dyn DocumentTree, index: usize) -> Result<f32, EngineError> {
    let spacing = doc.line_spacing(index)?;
    if doc.block_count() == 1 {
        tracing::debug!(index, "inserting placeholder before deleting the last block");
        doc.insert_paragraph(index + 1, "")?;
    }
    doc.remove_block(index)?;
    Ok(spacing)
}

/// Text of a paragraph or list item; empty for tables and missing blocks.
pub fn block_text(doc: &dyn DocumentTree, index: usize) -> Result<String, EngineError> {
    match doc.block_kind(index) {
        Some(BlockKind::Paragraph | BlockKind::ListItem) => doc.text(ElementId::Block(index)),
        _ => Ok(String::new()),
    }
}

/// Characters `start..=end` of `text`.
pub fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end + 1 - start).collect()
}

/// Payload range of `m` once `lead` and `trail` delimiter characters are removed.
///
/// Fails instead of underflowing when nothing would be left between the delimiters.
pub fn payload_range(m: &Match, lead: usize, trail: usize) -> Result<(usize, usize), EngineError> {
    if m.end + 1 - m.start <= lead + trail {
        return Err(EngineError::DelimiterMismatch {
            element: m.element,
            start: m.start,
            end: m.end,
        });
    }
    Ok((m.start + lead, m.end - trail))
}

/// Deletes the delimiters around a match, trailing first, and returns the payload's new
/// inclusive range.
pub fn strip_delimiters(
    doc: &mut dyn DocumentTree,
    m: &Match,
    lead: usize,
    trail: usize,
) -> Result<(usize, usize), EngineError> {
    payload_range(m, lead, trail)?;
    if trail > 0 {
        doc.delete_range(m.element, m.end + 1 - trail, m.end)?;
    }
    if lead > 0 {
        doc.delete_range(m.element, m.start, m.start + lead - 1)?;
    }
    Ok((m.start, m.end - lead - trail))
}

/// Character styles of a stretch of text, kept so they can be re-applied after the text
/// has been moved into a new block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSnapshot {
    /// (start, end inclusive, attributes) relative to the captured stretch
    runs: Vec<(usize, usize, Vec<Attribute>)>,
}

impl StyleSnapshot {
    /// Captures characters `start..start + len` of `element`.
    pub fn capture(
        doc: &dyn DocumentTree,
        element: ElementId,
        start: usize,
        len: usize,
    ) -> Result<Self, EngineError> {
        let mut runs: Vec<(usize, usize, Vec<Attribute>)> = Vec::new();
        for i in 0..len {
            let attributes = doc.attributes(element, start + i)?;
            match runs.last_mut() {
                Some((_, end, previous)) if *previous == attributes => *end = i,
                _ => runs.push((i, i, attributes)),
            }
        }
        runs.retain(|(_, _, attributes)| !attributes.is_empty());
        Ok(StyleSnapshot { runs })
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Re-applies the captured styles with the stretch starting at `offset` of `element`.
    pub fn restore(
        &self,
        doc: &mut dyn DocumentTree,
        element: ElementId,
        offset: usize,
    ) -> Result<(), EngineError> {
        for (start, end, attributes) in &self.runs {
            for attribute in attributes {
                doc.set_attribute(element, offset + start, offset + end, attribute.clone())?;
            }
        }
        Ok(())
    }
}
