//! Markdown to rich text rewriting
//!
//!     This crate takes a rich-text document whose paragraphs still contain Markdown syntax
//!     (pasted notes, chat exports, hand-typed drafts) and rewrites that syntax in place into the
//!     document's own styling: headings, list items, bold, italic, links, inline code and
//!     syntax-highlighted code blocks.
//!
//!     This is a pure lib, that is, it powers the mdstyle cli but is shell agnostic: no code here
//!     should suppose a shell environment, be it std print, env vars etc.
//!
//! Architecture
//!
//!     Every pass talks to the document through the DocumentTree trait (./document/tree.rs), a
//!     small offset based interface: find a pattern, read text, delete or insert characters, set
//!     attributes on a character range, insert and remove blocks. RichDocument is the in-memory
//!     host; any other host (an editor, a remote document service) can implement the trait and
//!     run the same pipeline.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── document                # Model, DocumentTree trait, in-memory host
//!     ├── highlight               # Highlighter trait, markup parsing, backends
//!     ├── passes
//!     │   ├── blocks.rs           # Block deletion and delimiter stripping shared by passes
//!     │   ├── normalize.rs        # Split paragraphs on line-wrap markers
//!     │   ├── code_block.rs       # Fenced code blocks to highlighted tables
//!     │   ├── inline.rs           # Backquotes, bold, links, italics
//!     │   ├── heading.rs
//!     │   └── list.rs
//!     ├── pipeline.rs             # Ordered passes and the change report
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     └── formats                 # text, markdown, json, html, tag
//!
//! Core Algorithms
//!
//!     Each pass is a find-and-rewrite loop: search for the next match, rewrite it, search again.
//!     Matches are located as (element, start, end) with an inclusive end and go stale after any
//!     mutation of their element, so a loop always re-queries instead of reusing offsets. Every
//!     rewrite removes delimiter characters, which is what makes the loops terminate and the
//!     whole pipeline idempotent.
//!
//!     Order matters and is fixed by Pipeline::standard: paragraphs are normalized first, code
//!     blocks are lifted out before any inline pass can touch their contents, backquotes run
//!     before bold and italics so code spans are protected, and bold runs before italics so `**`
//!     is never read as two single asterisks.
//!
//! Highlighting
//!
//!     Code blocks are highlighted through the Highlighter trait, which returns markup in the
//!     `<div style="background:..."><pre>..<span style="color:..">` shape. SyntectHighlighter
//!     does this offline; RemoteHighlighter (feature `remote-highlight`) posts to a hilite-style
//!     web service. The markup is parsed with html5ever into plain text plus colour spans before
//!     the document is touched, so a highlighting failure leaves the document as it was.
//!
pub mod document;
pub mod error;
pub mod format;
pub mod formats;
pub mod highlight;
pub mod passes;
pub mod pipeline;
pub mod registry;

pub use document::{DocumentTree, RichDocument};
pub use error::{EngineError, FormatError};
pub use format::Format;
pub use highlight::{Highlighter, SyntectHighlighter};
pub use passes::{PassContext, StyleOptions};
pub use pipeline::{FormatReport, Pipeline};
pub use registry::FormatRegistry;

/// Runs the standard pipeline over `doc`.
///
/// This is the single entry point behind both the manual trigger and automation: the caller
/// supplies the document host and a highlighter, and gets back a report of what changed.
pub fn format_document(
    doc: &mut dyn DocumentTree,
    highlighter: &dyn Highlighter,
    options: &StyleOptions,
) -> Result<FormatReport, EngineError> {
    let ctx = PassContext::new(options, highlighter);
    Pipeline::standard().run(doc, &ctx)
}
