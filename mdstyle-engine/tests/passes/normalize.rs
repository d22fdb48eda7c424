use crate::common::{block, doc, format};
use mdstyle_engine::document::{Attribute, DocumentTree};
use mdstyle_engine::passes::{NormalizeParagraphs, Pass};
use mdstyle_engine::{PassContext, StyleOptions};

fn normalize(d: &mut mdstyle_engine::RichDocument) -> usize {
    let options = StyleOptions::default();
    let highlighter = crate::common::FakeHighlighter::default();
    let ctx = PassContext::new(&options, &highlighter);
    NormalizeParagraphs.run(d, &ctx).unwrap()
}

fn lines(d: &mdstyle_engine::RichDocument) -> Vec<String> {
    (0..d.block_count())
        .map(|i| d.text(block(i)).unwrap())
        .collect()
}

#[test]
fn test_two_markers_make_three_paragraphs() {
    let mut d = doc(&["A\rB\u{b}C"]);
    d.set_line_spacing(0, 1.5).unwrap();

    assert_eq!(normalize(&mut d), 1);
    assert_eq!(lines(&d), vec!["A", "B", "C"]);
    for i in 0..3 {
        assert_eq!(d.line_spacing(i).unwrap(), 1.5);
    }
}

#[test]
fn test_neighbours_stay_in_place() {
    let mut d = doc(&["top", "a\rb", "bottom"]);
    normalize(&mut d);

    assert_eq!(lines(&d), vec!["top", "a", "b", "bottom"]);
}

#[test]
fn test_styles_follow_their_line() {
    let mut d = doc(&["ab\rcd"]);
    d.set_attribute(block(0), 3, 4, Attribute::Bold).unwrap();
    normalize(&mut d);

    assert_eq!(lines(&d), vec!["ab", "cd"]);
    assert!(!d.has_attribute(block(0), 0, 1, &Attribute::Bold).unwrap());
    assert!(d.has_attribute(block(1), 0, 1, &Attribute::Bold).unwrap());
}

#[test]
fn test_trailing_marker_leaves_an_empty_line() {
    let mut d = doc(&["end\r"]);
    normalize(&mut d);

    assert_eq!(lines(&d), vec!["end", ""]);
}

#[test]
fn test_split_lines_are_formatted_individually() {
    let mut d = doc(&["# Title\r- item"]);
    format(&mut d);

    assert_eq!(d.heading_level(0).unwrap(), Some(mdstyle_engine::document::HeadingLevel::H1));
    assert_eq!(
        d.block_kind(1),
        Some(mdstyle_engine::document::BlockKind::ListItem)
    );
    assert_eq!(lines(&d), vec!["Title", "item"]);
}
