//! Backquotes, bold, links and italics, run through the full pipeline.

use crate::common::{all_have, block, doc, format, texts};
use mdstyle_engine::document::{Attribute, Color, DocumentTree};
use mdstyle_engine::StyleOptions;

fn code_font() -> Attribute {
    Attribute::FontFamily(StyleOptions::default().inline_code_font)
}

#[test]
fn test_backquotes_become_inline_code() {
    let mut d = doc(&["Use `cargo` here"]);
    format(&mut d);

    assert_eq!(texts(&d), vec!["Use cargo here"]);
    assert!(all_have(&d, block(0), 4, 8, &code_font()));
    assert!(all_have(
        &d,
        block(0),
        4,
        8,
        &Attribute::Background(Color::rgb(0xf3, 0xf3, 0xf3))
    ));
    assert!(all_have(
        &d,
        block(0),
        4,
        8,
        &Attribute::Foreground(Color::rgb(0xc7, 0x25, 0x4e))
    ));
    assert!(d.attributes(block(0), 3).unwrap().is_empty());
    assert!(d.attributes(block(0), 9).unwrap().is_empty());
}

#[test]
fn test_bold_then_italic() {
    let mut d = doc(&["**Hi** and *there*"]);
    format(&mut d);

    assert_eq!(texts(&d), vec!["Hi and there"]);
    assert!(all_have(&d, block(0), 0, 1, &Attribute::Bold));
    assert!(!d.has_attribute(block(0), 0, 1, &Attribute::Italic).unwrap());
    assert!(all_have(&d, block(0), 7, 11, &Attribute::Italic));
    assert!(!d.has_attribute(block(0), 2, 6, &Attribute::Bold).unwrap());
}

#[test]
fn test_double_asterisks_are_never_italic() {
    let mut d = doc(&["**x**"]);
    format(&mut d);

    assert_eq!(texts(&d), vec!["x"]);
    assert_eq!(d.attributes(block(0), 0).unwrap(), vec![Attribute::Bold]);
}

#[test]
fn test_underscore_italic() {
    let mut d = doc(&["an _aside_ here"]);
    format(&mut d);

    assert_eq!(texts(&d), vec!["an aside here"]);
    assert!(all_have(&d, block(0), 3, 7, &Attribute::Italic));
}

#[test]
fn test_link_replaced_by_its_name() {
    let mut d = doc(&["see [the docs](https://example.com/a) now"]);
    format(&mut d);

    assert_eq!(texts(&d), vec!["see the docs now"]);
    let link = Attribute::Link("https://example.com/a".to_string());
    assert!(all_have(&d, block(0), 4, 11, &link));
    assert!(!d.has_attribute(block(0), 3, 3, &link).unwrap());
    assert!(!d.has_attribute(block(0), 12, 12, &link).unwrap());
}

#[test]
fn test_link_name_keeps_its_own_bold() {
    let mut d = doc(&["[**b**](https://e.com)"]);
    format(&mut d);

    assert_eq!(texts(&d), vec!["b"]);
    assert_eq!(
        d.attributes(block(0), 0).unwrap(),
        vec![Attribute::Bold, Attribute::Link("https://e.com".to_string())]
    );
}

#[test]
fn test_link_name_does_not_inherit_bold_neighbour() {
    let mut d = doc(&["**a**[x](https://e.com)"]);
    format(&mut d);

    assert_eq!(texts(&d), vec!["ax"]);
    assert_eq!(d.attributes(block(0), 0).unwrap(), vec![Attribute::Bold]);
    assert_eq!(
        d.attributes(block(0), 1).unwrap(),
        vec![Attribute::Link("https://e.com".to_string())]
    );
}

#[test]
fn test_link_name_does_not_inherit_inline_code() {
    let mut d = doc(&["`c`[x](https://e.com)"]);
    format(&mut d);

    assert_eq!(texts(&d), vec!["cx"]);
    assert!(all_have(&d, block(0), 0, 0, &code_font()));
    assert_eq!(
        d.attributes(block(0), 1).unwrap(),
        vec![Attribute::Link("https://e.com".to_string())]
    );

    let markdown = mdstyle_engine::FormatRegistry::default()
        .serialize(&d, "markdown")
        .unwrap();
    assert_eq!(markdown, "`c`[x](https://e.com)\n");
}

#[test]
fn test_link_without_scheme_is_left_alone() {
    let mut d = doc(&["[name](relative/path)"]);
    format(&mut d);

    assert_eq!(texts(&d), vec!["[name](relative/path)"]);
}

#[test]
fn test_code_span_protects_emphasis() {
    let mut d = doc(&["`*x*` and *y*"]);
    format(&mut d);

    assert_eq!(texts(&d), vec!["*x* and y"]);
    assert!(all_have(&d, block(0), 0, 2, &code_font()));
    assert!(!d.has_attribute(block(0), 0, 2, &Attribute::Italic).unwrap());
    assert!(all_have(&d, block(0), 8, 8, &Attribute::Italic));
}

#[test]
fn test_code_span_protects_bold_and_links() {
    let mut d = doc(&["`**a** [b](https://x.io)` **c**"]);
    format(&mut d);

    assert_eq!(texts(&d), vec!["**a** [b](https://x.io) c"]);
    assert!(!d.has_attribute(block(0), 0, 22, &Attribute::Bold).unwrap());
    assert!(all_have(&d, block(0), 24, 24, &Attribute::Bold));
}

#[test]
fn test_offsets_are_characters() {
    let mut d = doc(&["héllo wörld **ünïcode** ok"]);
    format(&mut d);

    assert_eq!(texts(&d), vec!["héllo wörld ünïcode ok"]);
    assert!(all_have(&d, block(0), 12, 18, &Attribute::Bold));
    assert!(!d.has_attribute(block(0), 19, 21, &Attribute::Bold).unwrap());
}

#[test]
fn test_list_items_are_rewritten_too() {
    let mut d = doc(&["- a **b**"]);
    format(&mut d);

    assert_eq!(texts(&d), vec!["a b", ""]);
    assert!(all_have(&d, block(0), 2, 2, &Attribute::Bold));
}

#[test]
fn test_skipped_hit_does_not_hide_later_spans() {
    // `* ab *` overlaps the code span; `*cd*` behind it is still italic.
    let mut d = doc(&["* `ab` *cd*", "x"]);
    format(&mut d);

    assert_eq!(texts(&d), vec!["ab cd", "x"]);
    assert!(all_have(&d, block(0), 0, 1, &code_font()));
    assert!(all_have(&d, block(0), 3, 4, &Attribute::Italic));
    assert_eq!(format(&mut d).changed, 0);
}
