//! Highlighting through a hilite-style web service.

use super::Highlighter;
use crate::error::EngineError;
use reqwest::blocking::Client;

/// Language sent when a fence carries no tag.
const PLAIN_LEXER: &str = "text";

/// Posts code to a remote highlighter and returns its markup verbatim.
///
/// The service receives form fields `code`, `lexer` and `style` and answers with
/// wrapper/pre/span HTML. Failures are not retried.
pub struct RemoteHighlighter {
    client: Client,
    url: String,
    style: String,
}

impl RemoteHighlighter {
    pub fn new(url: impl Into<String>, style: impl Into<String>) -> Self {
        RemoteHighlighter {
            client: Client::new(),
            url: url.into(),
            style: style.into(),
        }
    }
}

impl Highlighter for RemoteHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<String, EngineError> {
        let lexer = if language.is_empty() {
            PLAIN_LEXER
        } else {
            language
        };
        tracing::debug!(url = %self.url, lexer, "requesting remote highlight");
        let response = self
            .client
            .post(&self.url)
            .form(&[("code", code), ("lexer", lexer), ("style", self.style.as_str())])
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| EngineError::Highlight(e.to_string()))?;
        response
            .text()
            .map_err(|e| EngineError::Highlight(e.to_string()))
    }
}
