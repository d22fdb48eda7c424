//! In-memory document host.

use super::{
    Attribute, BlockKind, Color, DocumentTree, ElementId, GlyphType, HeadingLevel, Match,
    DEFAULT_LINE_SPACING,
};
use crate::error::EngineError;
use regex::Regex;
use serde::{Deserialize, Serialize};

fn default_line_spacing() -> f32 {
    DEFAULT_LINE_SPACING
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Attributes carried by a single character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl TextStyle {
    pub fn apply(&mut self, attribute: &Attribute) {
        match attribute {
            Attribute::Bold => self.bold = true,
            Attribute::Italic => self.italic = true,
            Attribute::FontFamily(family) => self.font_family = Some(family.clone()),
            Attribute::Foreground(color) => self.foreground = Some(*color),
            Attribute::Background(color) => self.background = Some(*color),
            Attribute::Link(url) => self.link = Some(url.clone()),
        }
    }

    pub fn has(&self, attribute: &Attribute) -> bool {
        match attribute {
            Attribute::Bold => self.bold,
            Attribute::Italic => self.italic,
            Attribute::FontFamily(family) => self.font_family.as_deref() == Some(family.as_str()),
            Attribute::Foreground(color) => self.foreground == Some(*color),
            Attribute::Background(color) => self.background == Some(*color),
            Attribute::Link(url) => self.link.as_deref() == Some(url.as_str()),
        }
    }

    /// The style expressed as the attributes that would recreate it.
    pub fn to_attributes(&self) -> Vec<Attribute> {
        let mut attributes = Vec::new();
        if self.bold {
            attributes.push(Attribute::Bold);
        }
        if self.italic {
            attributes.push(Attribute::Italic);
        }
        if let Some(family) = &self.font_family {
            attributes.push(Attribute::FontFamily(family.clone()));
        }
        if let Some(color) = self.foreground {
            attributes.push(Attribute::Foreground(color));
        }
        if let Some(color) = self.background {
            attributes.push(Attribute::Background(color));
        }
        if let Some(url) = &self.link {
            attributes.push(Attribute::Link(url.clone()));
        }
        attributes
    }

    pub fn is_plain(&self) -> bool {
        *self == TextStyle::default()
    }
}

/// A maximal stretch of characters sharing one style; the serialized form of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledRun {
    pub text: String,
    #[serde(flatten)]
    pub style: TextStyle,
}

/// Text with one [`TextStyle`] per character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<StyledRun>", into = "Vec<StyledRun>")]
pub struct StyledText {
    text: String,
    styles: Vec<TextStyle>,
}

impl StyledText {
    pub fn new(text: &str) -> Self {
        StyledText {
            text: text.to_string(),
            styles: vec![TextStyle::default(); text.chars().count()],
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn style_at(&self, offset: usize) -> Option<&TextStyle> {
        self.styles.get(offset)
    }

    /// Splits the text into runs of identically styled characters.
    pub fn runs(&self) -> Vec<StyledRun> {
        let mut runs: Vec<StyledRun> = Vec::new();
        for (ch, style) in self.text.chars().zip(&self.styles) {
            match runs.last_mut() {
                Some(run) if run.style == *style => run.text.push(ch),
                _ => runs.push(StyledRun {
                    text: ch.to_string(),
                    style: style.clone(),
                }),
            }
        }
        runs
    }

    fn byte_offset(&self, offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(offset)
            .map(|(byte, _)| byte)
            .unwrap_or(self.text.len())
    }

    fn check_range(&self, element: ElementId, start: usize, end: usize) -> Result<(), EngineError> {
        if start > end || end >= self.len() {
            return Err(EngineError::OffsetOutOfRange {
                element,
                start,
                end,
                len: self.len(),
            });
        }
        Ok(())
    }

    fn delete(&mut self, element: ElementId, start: usize, end: usize) -> Result<(), EngineError> {
        self.check_range(element, start, end)?;
        let from = self.byte_offset(start);
        let to = self.byte_offset(end + 1);
        self.text.replace_range(from..to, "");
        self.styles.drain(start..=end);
        Ok(())
    }

    fn insert(&mut self, element: ElementId, offset: usize, text: &str) -> Result<(), EngineError> {
        if offset > self.len() {
            return Err(EngineError::OffsetOutOfRange {
                element,
                start: offset,
                end: offset,
                len: self.len(),
            });
        }
        // Inserted characters continue the style of the character before them.
        let inherited = offset
            .checked_sub(1)
            .and_then(|prev| self.styles.get(prev))
            .or_else(|| self.styles.get(offset))
            .cloned()
            .unwrap_or_default();
        let at = self.byte_offset(offset);
        self.text.insert_str(at, text);
        let count = text.chars().count();
        let tail = self.styles.split_off(offset);
        self.styles
            .extend(std::iter::repeat(inherited).take(count));
        self.styles.extend(tail);
        Ok(())
    }

    fn apply(
        &mut self,
        element: ElementId,
        start: usize,
        end: usize,
        attribute: &Attribute,
    ) -> Result<(), EngineError> {
        self.check_range(element, start, end)?;
        for style in &mut self.styles[start..=end] {
            style.apply(attribute);
        }
        Ok(())
    }

    fn any_has(
        &self,
        element: ElementId,
        start: usize,
        end: usize,
        attribute: &Attribute,
    ) -> Result<bool, EngineError> {
        self.check_range(element, start, end)?;
        Ok(self.styles[start..=end].iter().any(|s| s.has(attribute)))
    }
}

impl From<Vec<StyledRun>> for StyledText {
    fn from(runs: Vec<StyledRun>) -> Self {
        let mut text = StyledText::default();
        for run in runs {
            text.styles
                .extend(std::iter::repeat(run.style).take(run.text.chars().count()));
            text.text.push_str(&run.text);
        }
        text
    }
}

impl From<StyledText> for Vec<StyledRun> {
    fn from(text: StyledText) -> Self {
        text.runs()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: StyledText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<HeadingLevel>,
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f32,
}

impl Paragraph {
    pub fn new(text: &str) -> Self {
        Paragraph {
            text: StyledText::new(text),
            heading: None,
            line_spacing: DEFAULT_LINE_SPACING,
        }
    }

    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub text: StyledText,
    pub glyph: GlyphType,
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub text: StyledText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<Cell>>,
    #[serde(default)]
    pub border_width: f32,
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph(Paragraph),
    ListItem(ListItem),
    Table(Table),
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Paragraph(_) => BlockKind::Paragraph,
            Block::ListItem(_) => BlockKind::ListItem,
            Block::Table(_) => BlockKind::Table,
        }
    }

    /// Text of a paragraph or list item.
    pub fn text(&self) -> Option<&StyledText> {
        match self {
            Block::Paragraph(p) => Some(&p.text),
            Block::ListItem(item) => Some(&item.text),
            Block::Table(_) => None,
        }
    }

    fn line_spacing_mut(&mut self) -> &mut f32 {
        match self {
            Block::Paragraph(p) => &mut p.line_spacing,
            Block::ListItem(item) => &mut item.line_spacing,
            Block::Table(table) => &mut table.line_spacing,
        }
    }
}

/// A document held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichDocument {
    pub blocks: Vec<Block>,
}

impl RichDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document with one plain paragraph per entry.
    pub fn from_paragraphs<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        RichDocument {
            blocks: lines
                .into_iter()
                .map(|line| Block::Paragraph(Paragraph::new(line)))
                .collect(),
        }
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    fn block_mut(&mut self, index: usize) -> Result<&mut Block, EngineError> {
        self.blocks
            .get_mut(index)
            .ok_or(EngineError::UnknownElement(ElementId::Block(index)))
    }

    fn styled(&self, element: ElementId) -> Result<&StyledText, EngineError> {
        let found = match element {
            ElementId::Block(index) => self.blocks.get(index).and_then(Block::text),
            ElementId::Cell { table, row, column } => match self.blocks.get(table) {
                Some(Block::Table(t)) => t
                    .rows
                    .get(row)
                    .and_then(|cells| cells.get(column))
                    .map(|cell| &cell.text),
                _ => None,
            },
        };
        found.ok_or(EngineError::UnknownElement(element))
    }

    fn styled_mut(&mut self, element: ElementId) -> Result<&mut StyledText, EngineError> {
        let found = match element {
            ElementId::Block(index) => match self.blocks.get_mut(index) {
                Some(Block::Paragraph(p)) => Some(&mut p.text),
                Some(Block::ListItem(item)) => Some(&mut item.text),
                _ => None,
            },
            ElementId::Cell { table, row, column } => match self.blocks.get_mut(table) {
                Some(Block::Table(t)) => t
                    .rows
                    .get_mut(row)
                    .and_then(|cells| cells.get_mut(column))
                    .map(|cell| &mut cell.text),
                _ => None,
            },
        };
        found.ok_or(EngineError::UnknownElement(element))
    }

    fn table_mut(&mut self, table: ElementId) -> Result<&mut Table, EngineError> {
        let index = match table {
            ElementId::Block(index) => index,
            ElementId::Cell { .. } => return Err(EngineError::UnknownElement(table)),
        };
        match self.block_mut(index)? {
            Block::Table(t) => Ok(t),
            _ => Err(EngineError::WrongBlockKind {
                index,
                expected: "table",
            }),
        }
    }

    fn check_insert_index(&self, index: usize) -> Result<(), EngineError> {
        if index > self.blocks.len() {
            return Err(EngineError::UnknownElement(ElementId::Block(index)));
        }
        Ok(())
    }
}

/// First non-empty match of `pattern` in `text` at or after character `from`,
/// as inclusive character offsets.
fn find_in(pattern: &Regex, text: &str, from: usize) -> Option<(usize, usize)> {
    let mut byte = text
        .char_indices()
        .nth(from)
        .map(|(b, _)| b)
        .unwrap_or(text.len());
    while byte <= text.len() {
        let found = pattern.find_at(text, byte)?;
        if found.as_str().is_empty() {
            match text[found.start()..].chars().next() {
                Some(ch) => byte = found.start() + ch.len_utf8(),
                None => return None,
            }
            continue;
        }
        let start = text[..found.start()].chars().count();
        let end = start + found.as_str().chars().count() - 1;
        return Some((start, end));
    }
    None
}

impl DocumentTree for RichDocument {
    fn block_count(&self) -> usize {
        self.blocks.len()
    }

    fn block_kind(&self, index: usize) -> Option<BlockKind> {
        self.blocks.get(index).map(Block::kind)
    }

    fn line_spacing(&self, index: usize) -> Result<f32, EngineError> {
        match self.blocks.get(index) {
            Some(Block::Paragraph(p)) => Ok(p.line_spacing),
            Some(Block::ListItem(item)) => Ok(item.line_spacing),
            Some(Block::Table(table)) => Ok(table.line_spacing),
            None => Err(EngineError::UnknownElement(ElementId::Block(index))),
        }
    }

    fn set_line_spacing(&mut self, index: usize, spacing: f32) -> Result<(), EngineError> {
        *self.block_mut(index)?.line_spacing_mut() = spacing;
        Ok(())
    }

    fn search(&self, pattern: &Regex, from: Option<&Match>) -> Option<Match> {
        let (first_block, mut offset) = match from {
            None => (0, 0),
            Some(Match {
                element: ElementId::Block(index),
                end,
                ..
            }) => (*index, end + 1),
            Some(Match { element, .. }) => (element.block() + 1, 0),
        };
        for index in first_block..self.blocks.len() {
            if let Some(text) = self.blocks[index].text() {
                if let Some((start, end)) = find_in(pattern, text.as_str(), offset) {
                    return Some(Match {
                        element: ElementId::Block(index),
                        start,
                        end,
                    });
                }
            }
            offset = 0;
        }
        None
    }

    fn text(&self, element: ElementId) -> Result<String, EngineError> {
        Ok(self.styled(element)?.as_str().to_string())
    }

    fn delete_range(
        &mut self,
        element: ElementId,
        start: usize,
        end: usize,
    ) -> Result<(), EngineError> {
        self.styled_mut(element)?.delete(element, start, end)
    }

    fn insert_text(
        &mut self,
        element: ElementId,
        offset: usize,
        text: &str,
    ) -> Result<(), EngineError> {
        self.styled_mut(element)?.insert(element, offset, text)
    }

    fn set_attribute(
        &mut self,
        element: ElementId,
        start: usize,
        end: usize,
        attribute: Attribute,
    ) -> Result<(), EngineError> {
        self.styled_mut(element)?
            .apply(element, start, end, &attribute)
    }

    fn has_attribute(
        &self,
        element: ElementId,
        start: usize,
        end: usize,
        attribute: &Attribute,
    ) -> Result<bool, EngineError> {
        self.styled(element)?.any_has(element, start, end, attribute)
    }

    fn attributes(&self, element: ElementId, offset: usize) -> Result<Vec<Attribute>, EngineError> {
        let text = self.styled(element)?;
        text.style_at(offset)
            .map(TextStyle::to_attributes)
            .ok_or(EngineError::OffsetOutOfRange {
                element,
                start: offset,
                end: offset,
                len: text.len(),
            })
    }

    fn insert_paragraph(&mut self, index: usize, text: &str) -> Result<ElementId, EngineError> {
        self.check_insert_index(index)?;
        self.blocks
            .insert(index, Block::Paragraph(Paragraph::new(text)));
        Ok(ElementId::Block(index))
    }

    fn remove_block(&mut self, index: usize) -> Result<(), EngineError> {
        if index >= self.blocks.len() {
            return Err(EngineError::UnknownElement(ElementId::Block(index)));
        }
        if self.blocks.len() == 1 {
            return Err(EngineError::LastBlock);
        }
        self.blocks.remove(index);
        Ok(())
    }

    fn heading_level(&self, index: usize) -> Result<Option<HeadingLevel>, EngineError> {
        match self.blocks.get(index) {
            Some(Block::Paragraph(p)) => Ok(p.heading),
            Some(_) => Ok(None),
            None => Err(EngineError::UnknownElement(ElementId::Block(index))),
        }
    }

    fn set_heading_level(&mut self, index: usize, level: HeadingLevel) -> Result<(), EngineError> {
        match self.block_mut(index)? {
            Block::Paragraph(p) => {
                p.heading = Some(level);
                Ok(())
            }
            _ => Err(EngineError::WrongBlockKind {
                index,
                expected: "paragraph",
            }),
        }
    }

    fn insert_list_item(
        &mut self,
        index: usize,
        text: &str,
        glyph: GlyphType,
    ) -> Result<ElementId, EngineError> {
        self.check_insert_index(index)?;
        self.blocks.insert(
            index,
            Block::ListItem(ListItem {
                text: StyledText::new(text),
                glyph,
                line_spacing: DEFAULT_LINE_SPACING,
            }),
        );
        Ok(ElementId::Block(index))
    }

    fn insert_table(&mut self, index: usize) -> Result<ElementId, EngineError> {
        self.check_insert_index(index)?;
        self.blocks.insert(
            index,
            Block::Table(Table {
                rows: Vec::new(),
                border_width: 1.0,
                line_spacing: DEFAULT_LINE_SPACING,
            }),
        );
        Ok(ElementId::Block(index))
    }

    fn append_cell(&mut self, table: ElementId) -> Result<ElementId, EngineError> {
        let t = self.table_mut(table)?;
        t.rows.push(vec![Cell::default()]);
        Ok(ElementId::Cell {
            table: table.block(),
            row: t.rows.len() - 1,
            column: 0,
        })
    }

    fn set_border_width(&mut self, table: ElementId, width: f32) -> Result<(), EngineError> {
        self.table_mut(table)?.border_width = width;
        Ok(())
    }

    fn set_cell_background(&mut self, cell: ElementId, color: Color) -> Result<(), EngineError> {
        let (table, row, column) = match cell {
            ElementId::Cell { table, row, column } => (table, row, column),
            ElementId::Block(_) => return Err(EngineError::UnknownElement(cell)),
        };
        let t = self.table_mut(ElementId::Block(table))?;
        let target = t
            .rows
            .get_mut(row)
            .and_then(|cells| cells.get_mut(column))
            .ok_or(EngineError::UnknownElement(cell))?;
        target.background = Some(color);
        Ok(())
    }
}
