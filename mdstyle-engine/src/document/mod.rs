//! The rich-text document model the passes operate on.
//!
//!     Passes never touch a concrete document type. They are written against the
//!     [`DocumentTree`] trait, which captures exactly the host operations the rewriting
//!     engine needs: searching, reading and splicing text by character offset, styling
//!     character ranges, and inserting or removing whole blocks.
//!
//!     [`RichDocument`] is the in-memory implementation used by the CLI and the tests.
//!     Other hosts (an editor, a remote document API) implement the trait themselves.
//!
//! Offsets
//!
//!     All offsets are zero-based character (not byte) offsets. Ranges are given as a
//!     start and an inclusive end, matching what [`DocumentTree::search`] reports. Any
//!     mutation of a range invalidates the offsets after it in the same element.

mod color;
mod memory;
mod tree;

pub use color::Color;
pub use memory::{Block, Cell, ListItem, Paragraph, RichDocument, StyledText, Table, TextStyle};
pub use tree::DocumentTree;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Line spacing given to blocks created without an explicit value.
pub const DEFAULT_LINE_SPACING: f32 = 1.15;

/// Handle to a text-bearing element of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementId {
    /// A top-level paragraph or list item
    Block(usize),
    /// A cell of the table stored at top-level index `table`
    Cell {
        table: usize,
        row: usize,
        column: usize,
    },
}

impl ElementId {
    /// The top-level block that owns this element.
    pub fn block(&self) -> usize {
        match self {
            ElementId::Block(index) => *index,
            ElementId::Cell { table, .. } => *table,
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Block(index) => write!(f, "block #{index}"),
            ElementId::Cell { table, row, column } => {
                write!(f, "cell ({row}, {column}) of table #{table}")
            }
        }
    }
}

/// A located occurrence of a search pattern.
///
/// `end` is inclusive. A match is consumed by exactly one rewrite step and must be
/// re-queried after any mutation of its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub element: ElementId,
    pub start: usize,
    pub end: usize,
}

/// Type tag of a top-level block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Paragraph,
    ListItem,
    Table,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::ListItem => "list item",
            BlockKind::Table => "table",
        }
    }
}

/// Heading rank of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Heading for a marker of `rank` `#` characters.
    pub fn from_rank(rank: usize) -> Option<Self> {
        match rank {
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            3 => Some(HeadingLevel::H3),
            _ => None,
        }
    }

    pub fn rank(&self) -> usize {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

/// Glyph drawn in front of a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphType {
    Bullet,
    Number,
}

/// A style applied to a character range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    Bold,
    Italic,
    FontFamily(String),
    Foreground(Color),
    Background(Color),
    Link(String),
}
