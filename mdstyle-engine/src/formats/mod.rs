//! Format implementations
//!
//! Load and save [`RichDocument`](crate::document::RichDocument)s in the
//! formats the command line accepts.

pub mod html;
pub mod json;
pub mod markdown;
pub mod tag;
pub mod text;

pub use html::HtmlFormat;
pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use tag::TagFormat;
pub use text::TextFormat;
