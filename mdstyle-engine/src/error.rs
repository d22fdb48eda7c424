//! Error types for engine and format operations

use crate::document::ElementId;
use thiserror::Error;

/// Errors raised while rewriting a document.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The element handle does not resolve to a text-bearing element
    #[error("element {0} does not exist or holds no text")]
    UnknownElement(ElementId),

    /// A character offset or range falls outside the element's text
    #[error("offset range {start}..={end} is out of bounds for {element} (length {len})")]
    OffsetOutOfRange {
        element: ElementId,
        start: usize,
        end: usize,
        len: usize,
    },

    /// The operation expected a different kind of block
    #[error("block {index} is not a {expected}")]
    WrongBlockKind { index: usize, expected: &'static str },

    /// The host refuses to delete the only remaining block
    #[error("cannot remove the last remaining block of a document")]
    LastBlock,

    /// A delimited match has no payload left once its delimiters are removed
    #[error("match {start}..={end} in {element} is too short for its delimiters")]
    DelimiterMismatch {
        element: ElementId,
        start: usize,
        end: usize,
    },

    /// The highlight backend failed (network, HTTP status, rendering)
    #[error("highlight service failed: {0}")]
    Highlight(String),

    /// The highlight markup does not have the wrapper/pre/span shape
    #[error("malformed highlight markup: {0}")]
    Markup(String),

    /// A markup node that must carry a color has none
    #[error("highlight markup node has no {0} color")]
    MissingColor(&'static str),

    /// A color string is not a `#rgb` or `#rrggbb` hex value
    #[error("invalid color '{0}'")]
    InvalidColor(String),
}

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}
