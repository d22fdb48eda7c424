use super::{Pass, PassContext};
use crate::document::{Attribute, BlockKind, DocumentTree, HeadingLevel};
use crate::error::EngineError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Heading markers by rank: `# `, `## `, `### `.
static MARKERS: Lazy<[(Regex, HeadingLevel); 3]> = Lazy::new(|| {
    [
        (Regex::new("# ").expect("h1 marker"), HeadingLevel::H1),
        (Regex::new("## ").expect("h2 marker"), HeadingLevel::H2),
        (Regex::new("### ").expect("h3 marker"), HeadingLevel::H3),
    ]
});

/// Promotes paragraphs starting with `#` markers to headings.
///
/// Only a marker at offset 0 counts; the same characters further into a line (including
/// the tail of a longer marker, as `# ` inside `## `) are stepped over. A paragraph is
/// promoted at most once, so `# # x` becomes the heading `# x`. A marker written as inline
/// code is not a heading.
pub struct ClassifyHeadings;

impl Pass for ClassifyHeadings {
    fn name(&self) -> &str {
        "headings"
    }

    fn run(&self, doc: &mut dyn DocumentTree, ctx: &PassContext<'_>) -> Result<usize, EngineError> {
        let code_font = Attribute::FontFamily(ctx.options.inline_code_font.clone());
        let mut changed = 0;
        for (pattern, level) in MARKERS.iter() {
            let mut cursor = None;
            while let Some(m) = doc.search(pattern, cursor.as_ref()) {
                let index = m.element.block();
                if m.start == 0
                    && doc.block_kind(index) == Some(BlockKind::Paragraph)
                    && doc.heading_level(index)?.is_none()
                    && !doc.has_attribute(m.element, m.start, m.end, &code_font)?
                {
                    doc.delete_range(m.element, m.start, m.end)?;
                    doc.set_heading_level(index, *level)?;
                    tracing::debug!(index, rank = level.rank(), "promoted heading");
                    changed += 1;
                }
                cursor = Some(m);
            }
        }
        Ok(changed)
    }
}
