//! The host interface consumed by every pass.

use super::{Attribute, BlockKind, Color, ElementId, GlyphType, HeadingLevel, Match};
use crate::error::EngineError;
use regex::Regex;

/// Operations a document host exposes to the rewriting engine.
///
/// The engine is the only writer and runs on a single call stack, so every method takes
/// the document by plain (`&` / `&mut`) reference. Mutations are visible to the very next
/// call; there is no transaction or rollback.
///
/// Text-addressing methods take an [`ElementId`], which may be a top-level block or a
/// table cell. Block-addressing methods take the top-level index.
pub trait DocumentTree {
    /// Number of top-level blocks.
    fn block_count(&self) -> usize;

    /// Type tag of the block at `index`, or `None` past the end.
    fn block_kind(&self, index: usize) -> Option<BlockKind>;

    /// Line spacing of the block at `index`.
    fn line_spacing(&self, index: usize) -> Result<f32, EngineError>;

    fn set_line_spacing(&mut self, index: usize, spacing: f32) -> Result<(), EngineError>;

    /// Finds the next occurrence of `pattern` in paragraph and list item text.
    ///
    /// Without `from` the scan starts at the first block. With `from` it resumes in the
    /// same element right after `from.end`, then continues with the following blocks, so
    /// repeatedly passing the previous match always makes progress. Tables are not
    /// searched.
    fn search(&self, pattern: &Regex, from: Option<&Match>) -> Option<Match>;

    /// Full text of an element.
    fn text(&self, element: ElementId) -> Result<String, EngineError>;

    /// Deletes the characters `start..=end`.
    fn delete_range(&mut self, element: ElementId, start: usize, end: usize)
        -> Result<(), EngineError>;

    /// Inserts `text` before the character at `offset` (`offset` may equal the length).
    fn insert_text(&mut self, element: ElementId, offset: usize, text: &str)
        -> Result<(), EngineError>;

    /// Applies `attribute` to the characters `start..=end`.
    fn set_attribute(
        &mut self,
        element: ElementId,
        start: usize,
        end: usize,
        attribute: Attribute,
    ) -> Result<(), EngineError>;

    /// Whether any character in `start..=end` carries `attribute`.
    fn has_attribute(
        &self,
        element: ElementId,
        start: usize,
        end: usize,
        attribute: &Attribute,
    ) -> Result<bool, EngineError>;

    /// Every attribute carried by the character at `offset`.
    fn attributes(&self, element: ElementId, offset: usize) -> Result<Vec<Attribute>, EngineError>;

    /// Inserts a plain paragraph at `index`.
    fn insert_paragraph(&mut self, index: usize, text: &str) -> Result<ElementId, EngineError>;

    /// Removes the block at `index`.
    ///
    /// Fails with [`EngineError::LastBlock`] when it is the only block left; callers go
    /// through [`crate::passes::blocks::delete_block`], which works around that.
    fn remove_block(&mut self, index: usize) -> Result<(), EngineError>;

    fn heading_level(&self, index: usize) -> Result<Option<HeadingLevel>, EngineError>;

    fn set_heading_level(&mut self, index: usize, level: HeadingLevel)
        -> Result<(), EngineError>;

    /// Inserts a list item at `index`.
    fn insert_list_item(
        &mut self,
        index: usize,
        text: &str,
        glyph: GlyphType,
    ) -> Result<ElementId, EngineError>;

    /// Inserts an empty table at `index` and returns its handle.
    fn insert_table(&mut self, index: usize) -> Result<ElementId, EngineError>;

    /// Appends a row holding one empty cell to `table` and returns the cell.
    fn append_cell(&mut self, table: ElementId) -> Result<ElementId, EngineError>;

    fn set_border_width(&mut self, table: ElementId, width: f32) -> Result<(), EngineError>;

    fn set_cell_background(&mut self, cell: ElementId, color: Color) -> Result<(), EngineError>;
}
