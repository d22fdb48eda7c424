use super::blocks::{char_slice, payload_range, strip_delimiters};
use super::{Pass, PassContext};
use crate::document::{Attribute, DocumentTree, Match};
use crate::error::EngineError;
use once_cell::sync::Lazy;
use regex::Regex;

static BACKQUOTE: Lazy<Regex> = Lazy::new(|| Regex::new("`[^`]+`").expect("backquote pattern"));

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*[^*]+\*\*").expect("bold pattern"));

static LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\[\]]+)\]\(([A-Za-z][A-Za-z0-9+.\-]*://[^()\s]+)\)").expect("link pattern")
});

static ITALIC_UNDERSCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new("_[^_]+_").expect("underscore italic pattern"));

static ITALIC_ASTERISK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*[^*]+\*").expect("asterisk italic pattern"));

/// Which inline token a pass rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineKind {
    Code,
    Bold,
    Link,
    Italic,
}

/// A delimiter pattern with the number of delimiter characters on each side.
struct Rule {
    pattern: &'static Lazy<Regex>,
    lead: usize,
    trail: usize,
}

static CODE_RULES: &[Rule] = &[Rule {
    pattern: &BACKQUOTE,
    lead: 1,
    trail: 1,
}];

static BOLD_RULES: &[Rule] = &[Rule {
    pattern: &BOLD,
    lead: 2,
    trail: 2,
}];

static LINK_RULES: &[Rule] = &[Rule {
    pattern: &LINK,
    lead: 0,
    trail: 0,
}];

// Underscores are tried before asterisks.
static ITALIC_RULES: &[Rule] = &[
    Rule {
        pattern: &ITALIC_UNDERSCORE,
        lead: 1,
        trail: 1,
    },
    Rule {
        pattern: &ITALIC_ASTERISK,
        lead: 1,
        trail: 1,
    },
];

/// Rewrites one kind of delimited inline span.
///
/// Every round searches from the top of the document, trying the kind's patterns in
/// priority order, and rewrites the first hit. The pass ends when no pattern matches.
/// Except for the code pass itself, hits overlapping text already styled as inline
/// code are stepped over rather than rewritten.
pub struct InlineMarkup {
    kind: InlineKind,
}

impl InlineMarkup {
    pub fn new(kind: InlineKind) -> Self {
        InlineMarkup { kind }
    }

    pub fn backquotes() -> Self {
        Self::new(InlineKind::Code)
    }

    pub fn bold() -> Self {
        Self::new(InlineKind::Bold)
    }

    pub fn links() -> Self {
        Self::new(InlineKind::Link)
    }

    pub fn italics() -> Self {
        Self::new(InlineKind::Italic)
    }

    pub fn kind(&self) -> InlineKind {
        self.kind
    }

    fn rules(&self) -> &'static [Rule] {
        match self.kind {
            InlineKind::Code => CODE_RULES,
            InlineKind::Bold => BOLD_RULES,
            InlineKind::Link => LINK_RULES,
            InlineKind::Italic => ITALIC_RULES,
        }
    }

    fn rewrite(
        &self,
        doc: &mut dyn DocumentTree,
        ctx: &PassContext<'_>,
        rule: &Rule,
        m: &Match,
    ) -> Result<(), EngineError> {
        if self.kind == InlineKind::Link {
            return rewrite_link(doc, rule, m);
        }
        let attributes = match self.kind {
            InlineKind::Code => vec![
                Attribute::FontFamily(ctx.options.inline_code_font.clone()),
                Attribute::Background(ctx.options.inline_code_background),
                Attribute::Foreground(ctx.options.inline_code_foreground),
            ],
            InlineKind::Bold => vec![Attribute::Bold],
            _ => vec![Attribute::Italic],
        };
        let (start, end) = payload_range(m, rule.lead, rule.trail)?;
        for attribute in attributes {
            doc.set_attribute(m.element, start, end, attribute)?;
        }
        strip_delimiters(doc, m, rule.lead, rule.trail)?;
        Ok(())
    }
}

/// Replaces `[name](url)` with `name` linked to `url`.
///
/// The `[` and `](url)` delimiters are deleted around the name, so the name keeps its
/// own character styles and takes none from its neighbours.
fn rewrite_link(doc: &mut dyn DocumentTree, rule: &Rule, m: &Match) -> Result<(), EngineError> {
    let matched = char_slice(&doc.text(m.element)?, m.start, m.end);
    let captures = rule
        .pattern
        .captures(&matched)
        .ok_or(EngineError::DelimiterMismatch {
            element: m.element,
            start: m.start,
            end: m.end,
        })?;
    let url = captures[2].to_string();

    // `](` + url + `)`
    let trail = url.chars().count() + 3;
    let (start, end) = strip_delimiters(doc, m, 1, trail)?;
    doc.set_attribute(m.element, start, end, Attribute::Link(url))?;
    Ok(())
}

impl Pass for InlineMarkup {
    fn name(&self) -> &str {
        match self.kind {
            InlineKind::Code => "backquotes",
            InlineKind::Bold => "bold",
            InlineKind::Link => "links",
            InlineKind::Italic => "italics",
        }
    }

    fn run(&self, doc: &mut dyn DocumentTree, ctx: &PassContext<'_>) -> Result<usize, EngineError> {
        let rules = self.rules();
        let code_font = Attribute::FontFamily(ctx.options.inline_code_font.clone());
        // Per-rule resume points; only advanced past skipped hits.
        let mut cursors: Vec<Option<Match>> = vec![None; rules.len()];
        let mut changed = 0;

        loop {
            let hit = rules.iter().enumerate().find_map(|(i, rule)| {
                doc.search(rule.pattern, cursors[i].as_ref())
                    .map(|m| (i, m))
            });
            let Some((i, m)) = hit else {
                break;
            };

            if self.kind != InlineKind::Code
                && doc.has_attribute(m.element, m.start, m.end, &code_font)?
            {
                // Resume one character in, so a delimiter inside the skipped hit can
                // still open a later match.
                cursors[i] = Some(Match { end: m.start, ..m });
                continue;
            }

            self.rewrite(doc, ctx, &rules[i], &m)?;
            tracing::debug!(pass = self.name(), element = %m.element, start = m.start, "rewrote span");
            cursors.iter_mut().for_each(|cursor| *cursor = None);
            changed += 1;
        }
        Ok(changed)
    }
}
