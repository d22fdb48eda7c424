//! HTML export
//!
//! Builds a node tree of `markup5ever_rcdom` handles and serializes it with
//! html5ever. Block mapping:
//!
//! - paragraph: `<p>`, or `<h1>`..`<h3>` when it carries a heading level
//! - consecutive list items with the same glyph: one `<ul>` or `<ol>`
//! - table: `<table>` with one `<td>` per cell, cell colours inline
//!
//! Inline runs nest as `<a href>` > `<strong>` > `<em>` > `<span style>`.

use crate::document::{Block, GlyphType, RichDocument, StyledText, TextStyle};
use crate::error::FormatError;
use crate::format::Format;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const BASE_CSS: &str = "body { font-family: sans-serif; } \
table { border-collapse: collapse; } \
td { padding: 0.5em; white-space: pre; }";

pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Standalone HTML page"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &RichDocument) -> Result<String, FormatError> {
        let body = serialize_to_html(doc)?;
        Ok(wrap_in_document(&body))
    }
}

/// Serialize the document body, without the surrounding page.
pub fn serialize_to_html(doc: &RichDocument) -> Result<String, FormatError> {
    let container = create_element("div", &[("class", "mdstyle-document")]);
    let mut open_list: Option<(GlyphType, Handle)> = None;

    for block in &doc.blocks {
        let node = match block {
            Block::ListItem(item) => {
                let li = create_element("li", &[("style", line_height(item.line_spacing).as_str())]);
                append_runs(&li, &item.text);

                if let Some((glyph, list)) = &open_list {
                    if *glyph == item.glyph {
                        append(list, li);
                        continue;
                    }
                }
                let tag = match item.glyph {
                    GlyphType::Bullet => "ul",
                    GlyphType::Number => "ol",
                };
                let list = create_element(tag, &[]);
                append(&list, li);
                open_list = Some((item.glyph, list.clone()));
                list
            }
            Block::Paragraph(p) => {
                open_list = None;
                let tag = match p.heading {
                    Some(level) => format!("h{}", level.rank()),
                    None => "p".to_string(),
                };
                let element = create_element(&tag, &[("style", line_height(p.line_spacing).as_str())]);
                append_runs(&element, &p.text);
                element
            }
            Block::Table(table) => {
                open_list = None;
                let border = format!("border: {}px solid", table.border_width);
                let element = create_element("table", &[("style", border.as_str())]);
                for row in &table.rows {
                    let tr = create_element("tr", &[]);
                    for cell in row {
                        let style = cell
                            .background
                            .map(|c| format!("background: {c}"))
                            .unwrap_or_default();
                        let td = if style.is_empty() {
                            create_element("td", &[])
                        } else {
                            create_element("td", &[("style", style.as_str())])
                        };
                        append_runs(&td, &cell.text);
                        append(&tr, td);
                    }
                    append(&element, tr);
                }
                element
            }
        };
        append(&container, node);
    }

    serialize_node(&container)
}

fn line_height(spacing: f32) -> String {
    format!("line-height: {spacing}")
}

fn append_runs(parent: &Handle, text: &StyledText) {
    for run in text.runs() {
        append(parent, styled_run(&run.text, &run.style));
    }
}

fn styled_run(text: &str, style: &TextStyle) -> Handle {
    let mut node = create_text(text);

    let mut css = Vec::new();
    if let Some(font) = &style.font_family {
        css.push(format!("font-family: '{font}'"));
    }
    if let Some(color) = style.foreground {
        css.push(format!("color: {color}"));
    }
    if let Some(color) = style.background {
        css.push(format!("background: {color}"));
    }
    if !css.is_empty() {
        node = wrap("span", &[("style", css.join("; ").as_str())], node);
    }
    if style.italic {
        node = wrap("em", &[], node);
    }
    if style.bold {
        node = wrap("strong", &[], node);
    }
    if let Some(url) = &style.link {
        node = wrap("a", &[("href", url.as_str())], node);
    }
    node
}

fn wrap(tag: &str, attrs: &[(&str, &str)], child: Handle) -> Handle {
    let element = create_element(tag, attrs);
    append(&element, child);
    element
}

fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: &[(&str, &str)]) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(*name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

fn serialize_node(node: &Handle) -> Result<String, FormatError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| FormatError::SerializationError(format!("HTML serialization failed: {e}")))?;

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

fn wrap_in_document(body_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="generator" content="mdstyle">
  <style>{BASE_CSS}</style>
</head>
<body>
{body_html}
</body>
</html>"#
    )
}
