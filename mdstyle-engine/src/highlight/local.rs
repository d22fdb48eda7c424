//! Offline highlighting with syntect.

use super::Highlighter;
use crate::error::EngineError;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Color as SyntectColor, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Themes tried, in order, when the requested one is not bundled.
const FALLBACK_THEMES: &[&str] = &["InspiredGitHub", "Solarized (light)", "base16-ocean.light"];

const WHITE: SyntectColor = SyntectColor {
    r: 0xff,
    g: 0xff,
    b: 0xff,
    a: 0xff,
};

const BLACK: SyntectColor = SyntectColor {
    r: 0,
    g: 0,
    b: 0,
    a: 0xff,
};

/// Renders code with the syntaxes and themes bundled into syntect.
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    /// Uses the named bundled theme, falling back to a light default.
    pub fn new(theme_name: &str) -> Self {
        let theme_set = ThemeSet::load_defaults();
        let theme = pick_theme(theme_name, &theme_set);
        SyntectHighlighter {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    /// Names of the bundled themes.
    pub fn theme_names() -> Vec<String> {
        ThemeSet::load_defaults().themes.into_keys().collect()
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new(FALLBACK_THEMES[0])
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<String, EngineError> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(language)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let background = self.theme.settings.background.unwrap_or(WHITE);
        let default_foreground = self.theme.settings.foreground.unwrap_or(BLACK);
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        let mut out = format!(
            "<div style=\"background: {}\"><pre style=\"margin: 0\">",
            hex(background)
        );
        for line in LinesWithEndings::from(code) {
            let ranges = highlighter
                .highlight_line(line, &self.syntax_set)
                .map_err(|e| EngineError::Highlight(e.to_string()))?;
            for (style, text) in ranges {
                if style.foreground == default_foreground || text.trim().is_empty() {
                    out.push_str(&escape(text));
                } else {
                    out.push_str(&format!(
                        "<span style=\"color: {}\">{}</span>",
                        hex(style.foreground),
                        escape(text)
                    ));
                }
            }
        }
        out.push_str("</pre></div>");
        Ok(out)
    }
}

fn pick_theme(name: &str, theme_set: &ThemeSet) -> Theme {
    if let Some(theme) = theme_set.themes.get(name) {
        return theme.clone();
    }
    tracing::warn!(theme = name, "unknown highlight theme, using a bundled default");
    FALLBACK_THEMES
        .iter()
        .find_map(|candidate| theme_set.themes.get(*candidate))
        .or_else(|| theme_set.themes.values().next())
        .cloned()
        .unwrap_or_default()
}

fn hex(color: SyntectColor) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
