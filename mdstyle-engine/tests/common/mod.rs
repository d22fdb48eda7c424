//! Shared fixtures: a deterministic highlighter and document helpers.

use mdstyle_engine::document::{Block, Color, DocumentTree, ElementId};
use mdstyle_engine::{format_document, EngineError, FormatReport, Highlighter, RichDocument, StyleOptions};
use std::cell::RefCell;

pub const CODE_BACKGROUND: Color = Color { r: 0xf8, g: 0xf8, b: 0xf8 };
pub const KEYWORD: Color = Color { r: 0, g: 0, b: 0xff };

/// Colors the first word of the code and records every request.
#[derive(Default)]
pub struct FakeHighlighter {
    pub calls: RefCell<Vec<(String, String)>>,
}

impl Highlighter for FakeHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<String, EngineError> {
        self.calls
            .borrow_mut()
            .push((code.to_string(), language.to_string()));

        let split = code.find(char::is_whitespace).unwrap_or(code.len());
        let (word, rest) = code.split_at(split);
        Ok(format!(
            "<div class=\"highlight\" style=\"background: {CODE_BACKGROUND}\"><pre style=\"line-height: 125%;\"><span style=\"color: {KEYWORD}\">{}</span>{}</pre></div>",
            escape(word),
            escape(rest)
        ))
    }
}

pub fn failing_highlighter(_code: &str, _language: &str) -> Result<String, EngineError> {
    Err(EngineError::Highlight("service unavailable".to_string()))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn doc(lines: &[&str]) -> RichDocument {
    RichDocument::from_paragraphs(lines.iter().copied())
}

/// Runs the standard pipeline with default options.
pub fn format(doc: &mut RichDocument) -> FormatReport {
    format_with(doc, &StyleOptions::default())
}

pub fn format_with(doc: &mut RichDocument, options: &StyleOptions) -> FormatReport {
    format_document(doc, &FakeHighlighter::default(), options).expect("pipeline runs")
}

/// Text of every block; tables contribute their first cell.
pub fn texts(doc: &RichDocument) -> Vec<String> {
    doc.blocks
        .iter()
        .map(|block| match block {
            Block::Table(table) => table.rows[0][0].text.as_str().to_string(),
            other => other.text().map(|t| t.as_str().to_string()).unwrap_or_default(),
        })
        .collect()
}

pub fn block(index: usize) -> ElementId {
    ElementId::Block(index)
}

pub fn cell(table: usize) -> ElementId {
    ElementId::Cell {
        table,
        row: 0,
        column: 0,
    }
}

/// Whether every character `start..=end` of `element` carries `attribute`.
pub fn all_have(
    doc: &RichDocument,
    element: ElementId,
    start: usize,
    end: usize,
    attribute: &mdstyle_engine::document::Attribute,
) -> bool {
    (start..=end).all(|i| {
        doc.attributes(element, i)
            .map(|attrs| attrs.contains(attribute))
            .unwrap_or(false)
    })
}
