//! JSON format
//!
//! Lossless storage of a [`RichDocument`], including per-character styling.
//! This is the format the automation entry point reads and writes.

use crate::document::RichDocument;
use crate::error::FormatError;
use crate::format::Format;

pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Structured document with styled runs"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<RichDocument, FormatError> {
        let doc: RichDocument =
            serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))?;
        if doc.blocks.is_empty() {
            return Err(FormatError::ParseError(
                "document has no blocks".to_string(),
            ));
        }
        Ok(doc)
    }

    fn serialize(&self, doc: &RichDocument) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}
