use crate::common::{doc, format, FakeHighlighter};
use mdstyle_engine::{format_document, EngineError, StyleOptions};

#[test]
fn test_report_counts_per_pass() {
    let mut d = doc(&["# T", "**a** **b**", "x\ry", "- i", "```", "c", "```"]);
    let report = format(&mut d);

    let changed: Vec<(&str, usize)> = report
        .passes
        .iter()
        .map(|p| (p.pass.as_str(), p.changed))
        .collect();
    assert_eq!(
        changed,
        vec![
            ("normalize", 1),
            ("code-blocks", 1),
            ("backquotes", 0),
            ("bold", 2),
            ("links", 0),
            ("italics", 0),
            ("headings", 1),
            ("lists", 1),
        ]
    );
    assert_eq!(report.changed, 6);
}

#[test]
fn test_report_serializes() {
    let mut d = doc(&["**a**"]);
    let report = format(&mut d);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["changed"], 1);
    assert_eq!(json["passes"][3]["pass"], "bold");
}

#[test]
fn test_error_stops_the_pipeline() {
    let mut d = doc(&["**kept**", "```", "code", "```", "**untouched**"]);
    let failing =
        |_: &str, _: &str| -> Result<String, EngineError> { Err(EngineError::Highlight("down".into())) };

    let result = format_document(&mut d, &failing, &StyleOptions::default());

    assert!(result.is_err());
    assert_eq!(d.blocks.len(), 5);
    assert_eq!(
        d.blocks[0].text().unwrap().as_str(),
        "**kept**",
        "passes after the failure never ran"
    );
}

#[test]
fn test_highlighter_sees_each_block_once() {
    let mut d = doc(&["```py", "a", "```", "```py", "b", "```"]);
    let highlighter = FakeHighlighter::default();
    format_document(&mut d, &highlighter, &StyleOptions::default()).unwrap();

    let calls = highlighter.calls.borrow();
    let codes: Vec<&str> = calls.iter().map(|(code, _)| code.as_str()).collect();
    assert_eq!(codes, vec!["a", "b"]);
}
