use crate::common::{block, doc, format, format_with, texts};
use mdstyle_engine::document::{Attribute, Block, BlockKind, DocumentTree, GlyphType};
use mdstyle_engine::StyleOptions;

fn glyph(d: &mdstyle_engine::RichDocument, index: usize) -> Option<GlyphType> {
    match &d.blocks[index] {
        Block::ListItem(item) => Some(item.glyph),
        _ => None,
    }
}

#[test]
fn test_bullet_and_number_markers() {
    let mut d = doc(&["- dash", "* star", "+ plus", "1. one", "10.\tten", "tail"]);
    format(&mut d);

    assert_eq!(texts(&d), vec!["dash", "star", "plus", "one", "ten", "tail"]);
    for index in 0..3 {
        assert_eq!(glyph(&d, index), Some(GlyphType::Bullet));
    }
    assert_eq!(glyph(&d, 3), Some(GlyphType::Number));
    assert_eq!(glyph(&d, 4), Some(GlyphType::Number));
    assert_eq!(d.block_kind(5), Some(BlockKind::Paragraph));
}

#[test]
fn test_marker_needs_whitespace() {
    let mut d = doc(&["-dash", "1.5 apples", "x"]);
    let before = d.clone();
    format(&mut d);

    assert_eq!(d, before);
}

#[test]
fn test_leading_whitespace_is_opt_in() {
    let mut strict = doc(&["  - indented", "x"]);
    format(&mut strict);
    assert_eq!(strict.block_kind(0), Some(BlockKind::Paragraph));

    let options = StyleOptions {
        list_allow_leading_whitespace: true,
        ..StyleOptions::default()
    };
    let mut relaxed = doc(&["  - indented", "x"]);
    format_with(&mut relaxed, &options);
    assert_eq!(relaxed.block_kind(0), Some(BlockKind::ListItem));
    assert_eq!(texts(&relaxed), vec!["indented", "x"]);
}

#[test]
fn test_line_spacing_and_styles_survive() {
    let mut d = doc(&["1. _first_ step", "x"]);
    d.set_line_spacing(0, 2.0).unwrap();
    format(&mut d);

    assert_eq!(texts(&d), vec!["first step", "x"]);
    assert_eq!(d.line_spacing(0).unwrap(), 2.0);
    assert!(d.has_attribute(block(0), 0, 4, &Attribute::Italic).unwrap());
    assert!(!d.has_attribute(block(0), 5, 9, &Attribute::Italic).unwrap());
}

#[test]
fn test_only_block_keeps_a_placeholder() {
    let mut d = doc(&["- lonely"]);
    format(&mut d);

    assert_eq!(d.block_count(), 2);
    assert_eq!(glyph(&d, 0), Some(GlyphType::Bullet));
    assert_eq!(texts(&d), vec!["lonely", ""]);
}

#[test]
fn test_headings_are_not_list_items() {
    let mut d = doc(&["# - not a list"]);
    format(&mut d);

    assert_eq!(d.block_kind(0), Some(BlockKind::Paragraph));
    assert_eq!(texts(&d), vec!["- not a list"]);
}

#[test]
fn test_marker_written_as_inline_code_is_not_a_list() {
    let mut d = doc(&["`- not a list`", "- `real` item"]);
    format(&mut d);

    assert_eq!(d.block_kind(0), Some(BlockKind::Paragraph));
    assert_eq!(texts(&d), vec!["- not a list", "real item"]);
    assert_eq!(glyph(&d, 1), Some(GlyphType::Bullet));
}
