//! Syntax highlighting for fenced code blocks.
//!
//!     The code block pass does not highlight anything itself. It hands the code and its
//!     language tag to a [`Highlighter`], which answers with HTML-like markup of a fixed
//!     shape:
//!
//!         <div style="background: #f8f8f8">          wrapper, carries the background
//!           <pre>                                    single child
//!             plain text                             no color
//!             <span style="color: #008000">def</span> styled span, carries a foreground
//!             ...
//!           </pre>
//!         </div>
//!
//!     [`parse_markup`] turns that markup back into a [`HighlightedCode`]: the flat text
//!     plus character ranges with their colors. [`HighlightedCode::trimmed`] then moves
//!     those ranges onto the trimmed text that ends up in the table cell.
//!
//! Backends
//!
//!     - [`SyntectHighlighter`]: offline, renders with `syntect` themes (default).
//!     - `RemoteHighlighter` (feature `remote-highlight`): posts to a hilite-style web
//!       service with a blocking `reqwest` client. No retries, no timeout at this layer.

mod markup;
mod local;
#[cfg(feature = "remote-highlight")]
mod remote;

pub use markup::parse_markup;
#[cfg(feature = "remote-highlight")]
pub use remote::RemoteHighlighter;
pub use local::SyntectHighlighter;

use crate::document::Color;
use crate::error::EngineError;

/// Turns source code into highlight markup.
pub trait Highlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<String, EngineError>;
}

impl<F> Highlighter for F
where
    F: Fn(&str, &str) -> Result<String, EngineError>,
{
    fn highlight(&self, code: &str, language: &str) -> Result<String, EngineError> {
        self(code, language)
    }
}

/// A colored stretch of highlighted code: characters `start..end` (end exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSpan {
    pub start: usize,
    pub end: usize,
    pub color: Color,
}

/// Highlighted code reconstructed from markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedCode {
    /// Concatenated text of every node, untrimmed
    pub text: String,
    pub background: Color,
    /// Styled spans in document order, offsets into `text`
    pub spans: Vec<ColorSpan>,
}

/// A color range against trimmed text, `end` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    pub start: usize,
    pub end: usize,
    pub color: Color,
}

impl HighlightedCode {
    /// The trimmed text and every span clipped and shifted onto it.
    ///
    /// Spans that fall entirely inside trimmed whitespace are dropped.
    pub fn trimmed(&self) -> (String, Vec<ColorRange>) {
        let lead = self.text.chars().take_while(|c| c.is_whitespace()).count();
        let trimmed = self.text.trim().to_string();
        let len = trimmed.chars().count();

        let ranges = self
            .spans
            .iter()
            .filter_map(|span| {
                let start = span.start.max(lead) - lead;
                let end = span.end.min(lead + len).saturating_sub(lead);
                (end > start).then(|| ColorRange {
                    start,
                    end: end - 1,
                    color: span.color,
                })
            })
            .collect();
        (trimmed, ranges)
    }
}
