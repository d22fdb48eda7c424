//! Reconstruction of colored ranges from highlight markup.

use super::{ColorSpan, HighlightedCode};
use crate::document::Color;
use crate::error::EngineError;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use once_cell::sync::Lazy;
use regex::Regex;

static FOREGROUND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[;\s])color\s*:\s*(#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b)")
        .expect("foreground pattern")
});

static BACKGROUND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"background(?:-color)?\s*:\s*(#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b)")
        .expect("background pattern")
});

/// Parses wrapper/pre/span highlight markup.
///
/// Children of the inner node are walked left to right with a running character
/// offset: text nodes only advance it, every element child is a styled span whose
/// foreground color is required.
pub fn parse_markup(markup: &str) -> Result<HighlightedCode, EngineError> {
    let dom = parse_document(RcDom::default(), Default::default()).one(markup);
    let body = find_element(&dom.document, "body")
        .ok_or_else(|| EngineError::Markup("no document body".to_string()))?;
    let wrapper = first_element_child(&body)
        .ok_or_else(|| EngineError::Markup("no wrapper element".to_string()))?;
    let background = style_color(&wrapper, &BACKGROUND).ok_or(EngineError::MissingColor("background"))?;
    let inner = first_element_child(&wrapper)
        .ok_or_else(|| EngineError::Markup("wrapper has no child element".to_string()))?;

    let mut text = String::new();
    let mut offset = 0;
    let mut spans = Vec::new();
    for child in inner.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => {
                let contents = contents.borrow();
                offset += contents.chars().count();
                text.push_str(&contents);
            }
            NodeData::Element { .. } => {
                let content = text_content(child);
                let length = content.chars().count();
                let color =
                    style_color(child, &FOREGROUND).ok_or(EngineError::MissingColor("foreground"))?;
                spans.push(ColorSpan {
                    start: offset,
                    end: offset + length,
                    color,
                });
                offset += length;
                text.push_str(&content);
            }
            _ => {}
        }
    }

    Ok(HighlightedCode {
        text,
        background,
        spans,
    })
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &handle.data {
        if &*name.local == tag {
            return Some(handle.clone());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

fn first_element_child(handle: &Handle) -> Option<Handle> {
    handle
        .children
        .borrow()
        .iter()
        .find(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()
}

fn text_content(handle: &Handle) -> String {
    let mut out = String::new();
    collect_text(handle, &mut out);
    out
}

fn collect_text(handle: &Handle, out: &mut String) {
    match &handle.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        _ => {
            for child in handle.children.borrow().iter() {
                collect_text(child, out);
            }
        }
    }
}

fn style_color(handle: &Handle, pattern: &Regex) -> Option<Color> {
    let NodeData::Element { attrs, .. } = &handle.data else {
        return None;
    };
    let attrs = attrs.borrow();
    let style = attrs.iter().find(|attr| &*attr.name.local == "style")?;
    let captures = pattern.captures(&style.value)?;
    captures.get(1)?.as_str().parse().ok()
}
