//! The ordered pass pipeline and its change report.

use crate::document::DocumentTree;
use crate::error::EngineError;
use crate::passes::{
    ClassifyHeadings, ClassifyLists, HighlightCodeBlocks, InlineMarkup, NormalizeParagraphs, Pass,
    PassContext,
};
use serde::Serialize;
use std::fmt;

/// Number of elements one pass changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassReport {
    pub pass: String,
    pub changed: usize,
}

/// Outcome of a full formatting run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormatReport {
    /// Total elements changed over all passes
    pub changed: usize,
    pub passes: Vec<PassReport>,
}

impl FormatReport {
    fn record(&mut self, pass: &str, changed: usize) {
        self.changed += changed;
        self.passes.push(PassReport {
            pass: pass.to_string(),
            changed,
        });
    }
}

impl fmt::Display for FormatReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.changed == 1 { "element" } else { "elements" };
        writeln!(f, "{} {noun} changed", self.changed)?;
        for pass in &self.passes {
            writeln!(f, "  {:<12} {}", pass.pass, pass.changed)?;
        }
        Ok(())
    }
}

/// An ordered list of passes, each run over the whole document.
pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>,
}

impl Pipeline {
    pub fn new(passes: Vec<Box<dyn Pass>>) -> Self {
        Pipeline { passes }
    }

    /// Normalize, code blocks, backquotes, bold, links, italics, headings, lists.
    pub fn standard() -> Self {
        Pipeline::new(vec![
            Box::new(NormalizeParagraphs),
            Box::new(HighlightCodeBlocks),
            Box::new(InlineMarkup::backquotes()),
            Box::new(InlineMarkup::bold()),
            Box::new(InlineMarkup::links()),
            Box::new(InlineMarkup::italics()),
            Box::new(ClassifyHeadings),
            Box::new(ClassifyLists),
        ])
    }

    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    /// Runs every pass in order.
    ///
    /// The first error aborts the run; passes that already completed keep their changes.
    pub fn run(
        &self,
        doc: &mut dyn DocumentTree,
        ctx: &PassContext<'_>,
    ) -> Result<FormatReport, EngineError> {
        let mut report = FormatReport::default();
        for pass in &self.passes {
            let changed = pass.run(doc, ctx)?;
            tracing::info!(pass = pass.name(), changed, "pass complete");
            report.record(pass.name(), changed);
        }
        Ok(report)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}
