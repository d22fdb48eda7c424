//! The scan-and-transform passes.
//!
//!     Each pass walks the whole document, locates one kind of Markdown token, strips its
//!     delimiters and applies the matching native style. Passes run in a fixed order, each
//!     over the document the previous one produced (see [`crate::pipeline`]):
//!
//!     | Pass                    | Token                            | Result                         |
//!     |-------------------------|----------------------------------|--------------------------------|
//!     | [`NormalizeParagraphs`] | line-wrap markers in a paragraph | one paragraph per line         |
//!     | [`HighlightCodeBlocks`] | ```` ```lang ```` ... ```` ``` ```` | single-cell highlighted table |
//!     | [`InlineMarkup`] code   | `` `code` ``                     | monospace, colored             |
//!     | [`InlineMarkup`] bold   | `**bold**`                       | bold                           |
//!     | [`InlineMarkup`] links  | `[name](scheme://url)`           | `name` linked to the url       |
//!     | [`InlineMarkup`] italic | `_it_` or `*it*`                 | italic                         |
//!     | [`ClassifyHeadings`]    | `#`, `##`, `###` + space         | heading rank 1 to 3            |
//!     | [`ClassifyLists`]       | `- `, `* `, `+ `, `1. `          | bullet or numbered list item   |
//!
//!     The order is load-bearing. Inline code goes first so its content is not read as
//!     emphasis, and bold precedes italic so `**x**` is never consumed as `*` + `*x*` + `*`.
//!
//! Offsets
//!
//!     Every pass follows the same discipline: search, mutate, search again. A match is
//!     used for one rewrite and then dropped, and delimiters are removed trailing first so
//!     the leading offset stays valid.

pub mod blocks;
mod code_block;
mod heading;
mod inline;
mod list;
mod normalize;

pub use code_block::HighlightCodeBlocks;
pub use heading::ClassifyHeadings;
pub use inline::{InlineKind, InlineMarkup};
pub use list::ClassifyLists;
pub use normalize::{NormalizeParagraphs, LINE_WRAP_MARKERS};

use crate::document::{Color, DocumentTree};
use crate::error::EngineError;
use crate::highlight::Highlighter;

/// Presentation settings shared by the passes.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleOptions {
    /// Font family of highlighted code block cells
    pub code_block_font: String,
    /// Border width of the code block table
    pub code_block_border_width: f32,
    /// Font family of inline code spans
    pub inline_code_font: String,
    pub inline_code_background: Color,
    pub inline_code_foreground: Color,
    /// Accept list markers preceded by whitespace
    pub list_allow_leading_whitespace: bool,
}

impl Default for StyleOptions {
    fn default() -> Self {
        StyleOptions {
            code_block_font: "Courier New".to_string(),
            code_block_border_width: 0.0,
            inline_code_font: "Courier New".to_string(),
            inline_code_background: Color::rgb(0xf3, 0xf3, 0xf3),
            inline_code_foreground: Color::rgb(0xc7, 0x25, 0x4e),
            list_allow_leading_whitespace: false,
        }
    }
}

/// Everything a pass needs besides the document itself.
pub struct PassContext<'a> {
    pub options: &'a StyleOptions,
    pub highlighter: &'a dyn Highlighter,
}

impl<'a> PassContext<'a> {
    pub fn new(options: &'a StyleOptions, highlighter: &'a dyn Highlighter) -> Self {
        PassContext {
            options,
            highlighter,
        }
    }
}

/// One scan-and-transform pass.
pub trait Pass {
    /// Short identifier used in reports and logs (e.g. "bold")
    fn name(&self) -> &str;

    /// Rewrites every occurrence of the pass's token and returns how many elements changed.
    fn run(&self, doc: &mut dyn DocumentTree, ctx: &PassContext<'_>) -> Result<usize, EngineError>;
}
