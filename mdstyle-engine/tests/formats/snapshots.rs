use crate::common::format;
use insta::assert_snapshot;
use mdstyle_engine::FormatRegistry;

const SOURCE: &str = "# Notes
Some **bold** and _soft_ words\rwith `code` and [a link](https://example.com)
- first
2. second
```rust
fn main() {}
```
";

#[test]
fn test_formatted_document_tags() {
    let registry = FormatRegistry::default();
    let mut doc = registry.parse(SOURCE, "markdown").unwrap();
    format(&mut doc);

    let tags = registry.serialize(&doc, "tag").unwrap();
    assert_snapshot!(tags.trim_end(), @r###"
    <document>
      <heading level="1">Notes</heading>
      <paragraph>Some <run bold>bold</run> and <run italic>soft</run> words</paragraph>
      <paragraph>with <run font="Courier New" fg="#c7254e" bg="#f3f3f3">code</run> and <run link="https://example.com">a link</run></paragraph>
      <list-item glyph="bullet">first</list-item>
      <list-item glyph="number">second</list-item>
      <table border="0">
        <cell background="#f8f8f8"><run font="Courier New" fg="#0000ff">fn</run><run font="Courier New"> main() {}</run></cell>
      </table>
    </document>
    "###);
}

#[test]
fn test_formatted_document_markdown() {
    let registry = FormatRegistry::default();
    let mut doc = registry.parse(SOURCE, "markdown").unwrap();
    format(&mut doc);

    let markdown = registry.serialize(&doc, "markdown").unwrap();
    assert_snapshot!(markdown.trim_end(), @r###"
    # Notes
    Some **bold** and _soft_ words
    with `code` and [a link](https://example.com)
    * first
    1. second
    ```
    fn main() {}
    ```
    "###);
}
