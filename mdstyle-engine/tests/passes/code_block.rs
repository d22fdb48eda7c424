//! Fenced code blocks.

use crate::common::{
    all_have, cell, doc, failing_highlighter, format, texts, FakeHighlighter, CODE_BACKGROUND,
    KEYWORD,
};
use mdstyle_engine::document::{Attribute, Block, BlockKind, DocumentTree};
use mdstyle_engine::passes::{HighlightCodeBlocks, Pass};
use mdstyle_engine::{EngineError, PassContext, StyleOptions};

fn run_pass(d: &mut mdstyle_engine::RichDocument, highlighter: &FakeHighlighter) -> usize {
    let options = StyleOptions::default();
    let ctx = PassContext::new(&options, highlighter);
    HighlightCodeBlocks.run(d, &ctx).unwrap()
}

#[test]
fn test_fence_becomes_single_cell_table() {
    let mut d = doc(&["before", "```python", "def f():", "    return 1", "```", "after"]);
    let highlighter = FakeHighlighter::default();

    assert_eq!(run_pass(&mut d, &highlighter), 1);

    assert_eq!(d.block_count(), 3);
    assert_eq!(d.block_kind(1), Some(BlockKind::Table));
    assert_eq!(texts(&d), vec!["before", "def f():\n    return 1", "after"]);
    assert_eq!(
        highlighter.calls.borrow().as_slice(),
        &[("def f():\n    return 1".to_string(), "python".to_string())]
    );
}

#[test]
fn test_cell_styling() {
    let mut d = doc(&["```rust", "let x = 1;", "```"]);
    run_pass(&mut d, &FakeHighlighter::default());

    let Block::Table(table) = &d.blocks[0] else {
        panic!("expected a table, got {:?}", d.blocks[0]);
    };
    assert_eq!(table.border_width, 0.0);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0][0].background, Some(CODE_BACKGROUND));

    let code = cell(0);
    let font = Attribute::FontFamily("Courier New".to_string());
    assert!(all_have(&d, code, 0, 9, &font));
    // "let" is colored, the space after it is not
    assert!(all_have(&d, code, 0, 2, &Attribute::Foreground(KEYWORD)));
    assert!(!d
        .has_attribute(code, 3, 9, &Attribute::Foreground(KEYWORD))
        .unwrap());
}

#[test]
fn test_colored_range_reaches_the_last_character() {
    let mut d = doc(&["```py", "a bc", "```"]);
    let options = StyleOptions::default();
    let trailing_span = |_: &str, _: &str| {
        Ok::<_, EngineError>(
            "<div style=\"background: #ffffff\"><pre>a <span style=\"color: #0000ff\">bc</span>\n</pre></div>"
                .to_string(),
        )
    };
    let ctx = PassContext::new(&options, &trailing_span);

    assert_eq!(HighlightCodeBlocks.run(&mut d, &ctx).unwrap(), 1);

    assert_eq!(texts(&d), vec!["a bc"]);
    let code = cell(0);
    assert!(all_have(&d, code, 2, 3, &Attribute::Foreground(KEYWORD)));
    assert!(!d
        .has_attribute(code, 0, 1, &Attribute::Foreground(KEYWORD))
        .unwrap());
}

#[test]
fn test_language_tag_is_trimmed() {
    let mut d = doc(&["```  js  ", "x", "```"]);
    let highlighter = FakeHighlighter::default();
    run_pass(&mut d, &highlighter);

    assert_eq!(highlighter.calls.borrow()[0].1, "js");
}

#[test]
fn test_missing_language_tag_is_empty() {
    let mut d = doc(&["```", "plain", "```"]);
    let highlighter = FakeHighlighter::default();
    run_pass(&mut d, &highlighter);

    assert_eq!(highlighter.calls.borrow()[0].1, "");
}

#[test]
fn test_code_is_trimmed() {
    let mut d = doc(&["```", "", "  body  ", "", "```"]);
    let highlighter = FakeHighlighter::default();
    run_pass(&mut d, &highlighter);

    assert_eq!(highlighter.calls.borrow()[0].0, "body");
    assert_eq!(texts(&d), vec!["body", ""]);
}

#[test]
fn test_every_fence_pair_is_replaced() {
    let mut d = doc(&["```a", "one", "```", "between", "```b", "two", "```"]);
    let highlighter = FakeHighlighter::default();

    assert_eq!(run_pass(&mut d, &highlighter), 2);
    assert_eq!(texts(&d), vec!["one", "between", "two"]);
    assert_eq!(d.block_kind(0), Some(BlockKind::Table));
    assert_eq!(d.block_kind(2), Some(BlockKind::Table));
}

#[test]
fn test_unterminated_fence_is_left_alone() {
    let mut d = doc(&["```rust", "let x = 1;"]);
    let before = d.clone();

    assert_eq!(run_pass(&mut d, &FakeHighlighter::default()), 0);
    assert_eq!(d, before);
}

#[test]
fn test_highlight_failure_leaves_document_unchanged() {
    let mut d = doc(&["intro", "```go", "func main() {}", "```"]);
    let before = d.clone();
    let options = StyleOptions::default();
    let ctx = PassContext::new(&options, &failing_highlighter);

    let result = HighlightCodeBlocks.run(&mut d, &ctx);

    assert!(matches!(result, Err(EngineError::Highlight(_))));
    assert_eq!(d, before);
}

#[test]
fn test_bad_markup_leaves_document_unchanged() {
    let mut d = doc(&["```", "x", "```"]);
    let before = d.clone();
    let options = StyleOptions::default();
    let no_background = |_: &str, _: &str| Ok::<_, EngineError>("<div><pre>x</pre></div>".to_string());
    let ctx = PassContext::new(&options, &no_background);

    let result = HighlightCodeBlocks.run(&mut d, &ctx);

    assert!(matches!(result, Err(EngineError::MissingColor("background"))));
    assert_eq!(d, before);
}

#[test]
fn test_code_contents_are_not_reformatted() {
    let mut d = doc(&["```md", "# **not** a `heading`", "- nor a list", "```"]);
    format(&mut d);

    assert_eq!(texts(&d)[0], "# **not** a `heading`\n- nor a list");
    assert_eq!(d.block_kind(0), Some(BlockKind::Table));
    assert!(!d
        .has_attribute(cell(0), 0, 20, &Attribute::Bold)
        .unwrap());
}
