use super::blocks::{block_text, char_slice, delete_block};
use super::{Pass, PassContext};
use crate::document::{Attribute, DocumentTree, ElementId, Match};
use crate::error::EngineError;
use crate::highlight::{parse_markup, ColorRange};
use once_cell::sync::Lazy;
use regex::Regex;

static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new("```").expect("fence pattern"));

/// Replaces fenced code blocks with a single-cell, syntax-highlighted table.
///
/// The code between the fence lines is highlighted before the document is touched, so
/// a failing highlighter leaves the document exactly as it was. Only once the markup has
/// been parsed are the fence and code blocks removed and the table inserted in their
/// place. An opening fence without a closing one is left alone.
pub struct HighlightCodeBlocks;

/// A fence pair: the blocks holding the opening and closing fences.
struct Fence {
    open: usize,
    close: usize,
    language: String,
}

impl HighlightCodeBlocks {
    fn next_fence(&self, doc: &dyn DocumentTree) -> Result<Option<Fence>, EngineError> {
        let Some(open) = doc.search(&FENCE, None) else {
            return Ok(None);
        };
        let mut cursor = open;
        let close = loop {
            match doc.search(&FENCE, Some(&cursor)) {
                None => {
                    tracing::warn!(block = open.element.block(), "unterminated code fence");
                    return Ok(None);
                }
                Some(m) if m.element.block() == open.element.block() => cursor = m,
                Some(m) => break m,
            }
        };
        Ok(Some(Fence {
            open: open.element.block(),
            close: close.element.block(),
            language: fence_language(doc, &open)?,
        }))
    }

    fn render(
        &self,
        doc: &mut dyn DocumentTree,
        ctx: &PassContext<'_>,
        fence: Fence,
    ) -> Result<(), EngineError> {
        let code = (fence.open + 1..fence.close)
            .map(|index| block_text(&*doc, index))
            .collect::<Result<Vec<_>, _>>()?
            .join("\n");
        let code = code.trim();

        tracing::debug!(language = %fence.language, chars = code.chars().count(), "highlighting code block");
        let markup = ctx.highlighter.highlight(code, &fence.language)?;
        let highlighted = parse_markup(&markup)?;
        let (text, ranges) = highlighted.trimmed();

        for index in (fence.open..=fence.close).rev() {
            delete_block(doc, index)?;
        }

        let table = doc.insert_table(fence.open)?;
        doc.set_border_width(table, ctx.options.code_block_border_width)?;
        let cell = doc.append_cell(table)?;
        fill_cell(doc, cell, &text, &ranges)?;
        doc.set_cell_background(cell, highlighted.background)?;
        if !text.is_empty() {
            let last = text.chars().count() - 1;
            doc.set_attribute(
                cell,
                0,
                last,
                Attribute::FontFamily(ctx.options.code_block_font.clone()),
            )?;
        }
        Ok(())
    }
}

impl Pass for HighlightCodeBlocks {
    fn name(&self) -> &str {
        "code-blocks"
    }

    fn run(&self, doc: &mut dyn DocumentTree, ctx: &PassContext<'_>) -> Result<usize, EngineError> {
        let mut changed = 0;
        while let Some(fence) = self.next_fence(&*doc)? {
            self.render(doc, ctx, fence)?;
            changed += 1;
        }
        Ok(changed)
    }
}

/// Language tag: whatever follows the opening backticks on the fence line.
fn fence_language(doc: &dyn DocumentTree, open: &Match) -> Result<String, EngineError> {
    let line = doc.text(open.element)?;
    let len = line.chars().count();
    if open.end + 1 >= len {
        return Ok(String::new());
    }
    Ok(char_slice(&line, open.end + 1, len - 1).trim().to_string())
}

fn fill_cell(
    doc: &mut dyn DocumentTree,
    cell: ElementId,
    text: &str,
    ranges: &[ColorRange],
) -> Result<(), EngineError> {
    if text.is_empty() {
        return Ok(());
    }
    doc.insert_text(cell, 0, text)?;
    for range in ranges {
        doc.set_attribute(cell, range.start, range.end, Attribute::Foreground(range.color))?;
    }
    Ok(())
}
