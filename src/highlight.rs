//! Syntax highlighting collaborators
//!
//! The diff engine never looks at markup. Callers pick a highlighter by
//! language tag and the presentation layer runs it over each rendered unit.

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::Arc;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use thiserror::Error;
use tracing::debug;

pub const PLAINTEXT: &str = "plaintext";

/// Light theme to match the app visuals
const THEME: &str = "InspiredGitHub";

/// Language tags registered by [`HighlighterRegistry::with_defaults`]
pub const DEFAULT_LANGUAGES: &[&str] = &[
    "bash",
    "c",
    "cpp",
    "css",
    "go",
    "html",
    "java",
    "javascript",
    "json",
    "markdown",
    "python",
    "ruby",
    "rust",
    "sql",
    "xml",
    "yaml",
];

#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("Highlighter '{language}' failed: {reason}")]
    Failed { language: String, reason: String },
}

/// Presentation of one highlighted span. `None` keeps the default text color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub foreground: Option<[u8; 3]>,
    pub bold: bool,
    pub italic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub range: Range<usize>,
    pub style: SpanStyle,
}

/// Turns a unit of text into styled spans
pub trait Highlight: Send + Sync {
    /// Byte ranges covering `text` from start to end, in order
    fn highlight(&self, text: &str) -> Result<Vec<StyledSpan>, HighlightError>;

    /// Highlighted text as inline-styled HTML
    fn markup(&self, text: &str) -> Result<String, HighlightError> {
        let spans = self.highlight(text)?;
        Ok(spans_to_html(text, &spans))
    }
}

/// Escape text so it can be embedded in HTML
pub fn escape_html(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// A single unstyled span over the whole text
pub fn plain_spans(text: &str) -> Vec<StyledSpan> {
    if text.is_empty() {
        return Vec::new();
    }
    vec![StyledSpan {
        range: 0..text.len(),
        style: SpanStyle::default(),
    }]
}

pub fn spans_to_html(text: &str, spans: &[StyledSpan]) -> String {
    let mut html = String::with_capacity(text.len() * 2);
    for span in spans {
        if let Some(part) = text.get(span.range.clone()) {
            push_styled(&mut html, part, span.style);
        }
    }
    html
}

/// Append escaped text, wrapped in a `style` span when it carries any styling
pub fn push_styled(html: &mut String, text: &str, style: SpanStyle) {
    let mut css = String::new();
    if let Some([r, g, b]) = style.foreground {
        css.push_str(&format!("color:#{:02x}{:02x}{:02x};", r, g, b));
    }
    if style.bold {
        css.push_str("font-weight:bold;");
    }
    if style.italic {
        css.push_str("font-style:italic;");
    }

    let escaped = html_escape::encode_text(text);
    if css.is_empty() {
        html.push_str(&escaped);
    } else {
        html.push_str(&format!("<span style=\"{}\">{}</span>", css, escaped));
    }
}

pub struct PlainText;

impl Highlight for PlainText {
    fn highlight(&self, text: &str) -> Result<Vec<StyledSpan>, HighlightError> {
        Ok(plain_spans(text))
    }
}

/// Highlighter backed by one of syntect's bundled syntaxes.
///
/// Each unit is highlighted on its own, so constructs spanning several lines
/// (block comments, multi-line strings) only color the line that opens them.
pub struct SyntectHighlighter {
    language: String,
    syntax_set: Arc<SyntaxSet>,
    theme: Arc<Theme>,
}

impl SyntectHighlighter {
    pub fn new(language: &str, syntax_set: Arc<SyntaxSet>, theme: Arc<Theme>) -> Self {
        Self {
            language: language.to_string(),
            syntax_set,
            theme,
        }
    }
}

impl Highlight for SyntectHighlighter {
    fn highlight(&self, text: &str) -> Result<Vec<StyledSpan>, HighlightError> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(&self.language)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let mut lines = HighlightLines::new(syntax, &self.theme);

        // newline syntaxes expect every line to be terminated
        let line = format!("{}\n", text);
        let regions = lines
            .highlight_line(&line, &self.syntax_set)
            .map_err(|e| HighlightError::Failed {
                language: self.language.clone(),
                reason: e.to_string(),
            })?;

        let mut spans = Vec::with_capacity(regions.len());
        let mut offset = 0usize;
        for (style, piece) in regions {
            let end = (offset + piece.len()).min(text.len());
            if end > offset {
                let fg = style.foreground;
                spans.push(StyledSpan {
                    range: offset..end,
                    style: SpanStyle {
                        foreground: Some([fg.r, fg.g, fg.b]),
                        bold: style.font_style.contains(FontStyle::BOLD),
                        italic: style.font_style.contains(FontStyle::ITALIC),
                    },
                });
            }
            offset += piece.len();
        }

        Ok(spans)
    }
}

/// Language tag → highlighter, falling back to plain text
#[derive(Clone)]
pub struct HighlighterRegistry {
    highlighters: BTreeMap<String, Arc<dyn Highlight>>,
}

impl Default for HighlighterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl HighlighterRegistry {
    /// Registry holding only the plain text highlighter
    pub fn new() -> Self {
        let mut highlighters: BTreeMap<String, Arc<dyn Highlight>> = BTreeMap::new();
        highlighters.insert(PLAINTEXT.to_string(), Arc::new(PlainText));
        Self { highlighters }
    }

    /// Plain text plus every bundled syntax named in [`DEFAULT_LANGUAGES`]
    pub fn with_defaults() -> Self {
        let syntax_set = Arc::new(SyntaxSet::load_defaults_newlines());
        let theme = Arc::new(
            ThemeSet::load_defaults()
                .themes
                .remove(THEME)
                .unwrap_or_default(),
        );

        let mut registry = Self::new();
        for &language in DEFAULT_LANGUAGES {
            if syntax_set.find_syntax_by_token(language).is_none() {
                debug!(language, "No bundled syntax");
                continue;
            }
            registry.register(
                language,
                Arc::new(SyntectHighlighter::new(
                    language,
                    Arc::clone(&syntax_set),
                    Arc::clone(&theme),
                )),
            );
        }
        registry
    }

    pub fn register(&mut self, language: &str, highlighter: Arc<dyn Highlight>) {
        self.highlighters.insert(language.to_lowercase(), highlighter);
    }

    /// Look up a highlighter; unknown tags get plain text
    pub fn get(&self, language: &str) -> Arc<dyn Highlight> {
        match self
            .highlighters
            .get(&language.to_lowercase())
            .or_else(|| self.highlighters.get(PLAINTEXT))
        {
            Some(highlighter) => Arc::clone(highlighter),
            None => Arc::new(PlainText),
        }
    }

    /// Registered language tags, sorted
    pub fn languages(&self) -> Vec<&str> {
        self.highlighters.keys().map(String::as_str).collect()
    }
}
