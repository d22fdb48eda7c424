//! A second run over formatted output finds nothing left to rewrite.

use crate::common::{doc, format};
use mdstyle_engine::RichDocument;
use proptest::prelude::*;

const KITCHEN_SINK: &[&str] = &[
    "# Release notes",
    "Some **bold**, _soft_ and *slanted* words\rwith `code` and [a link](https://example.com)",
    "## Steps",
    "1. Install",
    "2. Run `mdstyle`",
    "- remember **this**",
    "```sh",
    "cargo install mdstyle",
    "```",
    "Done.",
];

fn assert_stable(mut d: RichDocument) {
    format(&mut d);
    let formatted = d.clone();

    let report = format(&mut d);

    assert_eq!(report.changed, 0, "second run changed: {report}");
    assert_eq!(d, formatted);
}

#[test]
fn test_kitchen_sink_is_stable() {
    assert_stable(doc(KITCHEN_SINK));
}

#[test]
fn test_plain_text_is_untouched() {
    let mut d = doc(&["Nothing to see", "here at all."]);
    let before = d.clone();

    assert_eq!(format(&mut d).changed, 0);
    assert_eq!(d, before);
}

fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,6}",
        "[a-z]{1,4}".prop_map(|w| format!("**{w}**")),
        "[a-z]{1,4}".prop_map(|w| format!("_{w}_")),
        "[a-z]{1,4}".prop_map(|w| format!("*{w}*")),
        "[a-z]{1,4}".prop_map(|w| format!("`{w}`")),
        "[a-z]{1,4}".prop_map(|w| format!("[{w}](https://{w}.org)")),
    ]
}

fn line() -> impl Strategy<Value = String> {
    let prefix = prop::sample::select(vec!["", "", "# ", "## ", "### ", "- ", "* ", "1. "]);
    (prefix, prop::collection::vec(token(), 1..5))
        .prop_map(|(prefix, words)| format!("{prefix}{}", words.join(" ")))
}

fn document() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            4 => line(),
            1 => (line(), line()).prop_map(|(a, b)| format!("{a}\r{b}")),
        ],
        1..6,
    )
}

proptest! {
    #[test]
    fn formatting_twice_changes_nothing(lines in document()) {
        let mut d = RichDocument::from_paragraphs(lines.iter().map(String::as_str));
        format(&mut d);
        let formatted = d.clone();

        let report = format(&mut d);

        prop_assert_eq!(report.changed, 0);
        prop_assert_eq!(d, formatted);
    }

    #[test]
    fn formatting_never_adds_characters(lines in document()) {
        let mut d = RichDocument::from_paragraphs(lines.iter().map(String::as_str));
        let before: usize = lines.iter().map(|l| l.chars().count()).sum();
        format(&mut d);

        let after: usize = crate::common::texts(&d).iter().map(|t| t.chars().count()).sum();
        prop_assert!(after <= before);
    }
}
