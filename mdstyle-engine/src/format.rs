//! Format trait definition
//!
//! A format converts between a textual representation and a [`RichDocument`].
//! Formats can support loading, saving, or both.

use crate::document::RichDocument;
use crate::error::FormatError;

/// Trait for document formats
///
/// # Examples
///
/// ```ignore
/// struct Lines;
///
/// impl Format for Lines {
///     fn name(&self) -> &str {
///         "lines"
///     }
///
///     fn supports_parsing(&self) -> bool {
///         true
///     }
///
///     fn parse(&self, source: &str) -> Result<RichDocument, FormatError> {
///         Ok(RichDocument::from_paragraphs(source.lines()))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "json", "html")
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// File extensions without the leading dot, used for detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    fn supports_parsing(&self) -> bool {
        false
    }

    fn supports_serialization(&self) -> bool {
        false
    }

    /// Load source text into a document.
    fn parse(&self, _source: &str) -> Result<RichDocument, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Render a document to text.
    fn serialize(&self, _doc: &RichDocument) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
