//! HTML presentation of a diff result
//!
//! Every rendered unit is passed through the caller's highlighter. A failing
//! highlighter never aborts rendering; the unit falls back to escaped text.

use crate::diff::{ClassifiedLine, DiffResult, DiffStats, LineType, Side, TokenKind};
use crate::highlight::{Highlight, SpanStyle, StyledSpan, escape_html, plain_spans, push_styled};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    SideBySide,
    Unified,
}

/// A piece of a line with one syntax style and one diff emphasis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: SpanStyle,
    pub kind: TokenKind,
}

/// A classified line split into highlighted segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub line_number: Option<usize>,
    pub line_type: LineType,
    pub segments: Vec<Segment>,
}

impl RenderedLine {
    pub fn is_placeholder(&self) -> bool {
        self.line_number.is_none()
    }

    /// Inline HTML, with changed tokens wrapped in `diff-addition` / `diff-deletion`
    pub fn markup(&self) -> String {
        let mut html = String::new();
        for group in self.segments.chunk_by(|a, b| a.kind == b.kind) {
            let mut inner = String::new();
            for segment in group {
                push_styled(&mut inner, &segment.text, segment.style);
            }
            match group[0].kind {
                TokenKind::Context => html.push_str(&inner),
                TokenKind::Addition => {
                    html.push_str(&format!("<span class=\"diff-addition\">{}</span>", inner))
                }
                TokenKind::Deletion => {
                    html.push_str(&format!("<span class=\"diff-deletion\">{}</span>", inner))
                }
            }
        }
        html
    }
}

/// Highlight text, falling back to one unstyled span when the highlighter fails
pub fn highlight_or_plain(highlighter: &dyn Highlight, text: &str) -> Vec<StyledSpan> {
    match highlighter.highlight(text) {
        Ok(spans) => spans,
        Err(e) => {
            warn!("Falling back to plain text: {}", e);
            plain_spans(text)
        }
    }
}

// Byte ranges of the sub-line tokens, or the whole line as context
fn token_ranges(line: &ClassifiedLine) -> Vec<(Range<usize>, TokenKind)> {
    match &line.tokens {
        Some(tokens) => {
            let mut offset = 0usize;
            tokens
                .iter()
                .map(|token| {
                    let range = offset..offset + token.text.len();
                    offset = range.end;
                    (range, token.kind)
                })
                .collect()
        }
        None => vec![(0..line.content.len(), TokenKind::Context)],
    }
}

/// Highlight the whole line once, then cut the styled spans at token boundaries
pub fn render_line(line: &ClassifiedLine, highlighter: &dyn Highlight) -> RenderedLine {
    let mut segments = Vec::new();

    if !line.is_placeholder() {
        let content = &line.content;
        let spans = highlight_or_plain(highlighter, content);
        for (range, kind) in token_ranges(line) {
            for span in &spans {
                let start = range.start.max(span.range.start);
                let end = range.end.min(span.range.end);
                if start < end
                    && let Some(text) = content.get(start..end)
                {
                    segments.push(Segment {
                        text: text.to_string(),
                        style: span.style,
                        kind,
                    });
                }
            }
        }
    }

    RenderedLine {
        line_number: line.line_number,
        line_type: line.line_type,
        segments,
    }
}

pub fn render_side(lines: &[ClassifiedLine], highlighter: &dyn Highlight) -> Vec<RenderedLine> {
    lines
        .iter()
        .map(|line| render_line(line, highlighter))
        .collect()
}

/// Both sides of a result, highlighted, plus the unified row order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDiff {
    pub original: Vec<RenderedLine>,
    pub modified: Vec<RenderedLine>,
    pub unified: Vec<(Side, usize)>,
    pub stats: DiffStats,
}

impl RenderedDiff {
    pub fn new(result: &DiffResult, highlighter: &dyn Highlight) -> Self {
        Self {
            original: render_side(&result.original, highlighter),
            modified: render_side(&result.modified, highlighter),
            unified: unified_order(&result.original, &result.modified),
            stats: result.stats,
        }
    }

    pub fn line(&self, side: Side, index: usize) -> &RenderedLine {
        match side {
            Side::Original => &self.original[index],
            Side::Modified => &self.modified[index],
        }
    }

    /// Standalone HTML document in the given view
    pub fn to_html(&self, view: ViewMode) -> String {
        let stats = self.stats;

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">");
        html.push_str(&format!("<style>{}</style></head><body>\n", STYLE));
        html.push_str(&format!(
            "<p class=\"stats\">+{} -{} ~{}</p>\n",
            stats.additions, stats.deletions, stats.modifications
        ));

        match view {
            ViewMode::SideBySide => {
                html.push_str("<div class=\"panes\">\n");
                push_pane(&mut html, "Original", &self.original, Side::Original);
                push_pane(&mut html, "Modified", &self.modified, Side::Modified);
                html.push_str("</div>\n");
            }
            ViewMode::Unified => {
                html.push_str("<div class=\"pane\"><table>\n");
                for &(side, index) in &self.unified {
                    push_row(&mut html, self.line(side, index), side);
                }
                html.push_str("</table></div>\n");
            }
        }

        html.push_str("</body></html>\n");
        html
    }
}

fn line_class(line_type: LineType) -> &'static str {
    match line_type {
        LineType::Unchanged => "unchanged",
        LineType::Added => "added",
        LineType::Removed => "removed",
        LineType::Modified => "modified",
    }
}

fn push_row(html: &mut String, line: &RenderedLine, side: Side) {
    let class = if line.is_placeholder() {
        "placeholder"
    } else {
        line_class(line.line_type)
    };
    let number = line
        .line_number
        .map(|n| n.to_string())
        .unwrap_or_default();
    html.push_str(&format!(
        "<tr class=\"{}\"><td class=\"ln\">{}</td><td class=\"sign\">{}</td><td class=\"code\">{}</td></tr>\n",
        class,
        number,
        sign(line, side),
        line.markup()
    ));
}

/// Gutter sign of a row
pub fn sign(line: &RenderedLine, side: Side) -> &'static str {
    if line.is_placeholder() {
        return " ";
    }
    match (line.line_type, side) {
        (LineType::Unchanged, _) => " ",
        (LineType::Added, _) => "+",
        (LineType::Removed, _) => "-",
        (LineType::Modified, Side::Original) => "-",
        (LineType::Modified, Side::Modified) => "+",
    }
}

fn push_pane(html: &mut String, title: &str, lines: &[RenderedLine], side: Side) {
    html.push_str(&format!(
        "<div class=\"pane\"><h2>{}</h2><table>\n",
        escape_html(title)
    ));
    for line in lines {
        push_row(html, line, side);
    }
    html.push_str("</table></div>\n");
}

/// Row order of the unified view as `(side, index)` pairs.
///
/// Unchanged rows appear once (from the original side), each modified row
/// is followed by its counterpart, and placeholders are skipped.
pub fn unified_order(original: &[ClassifiedLine], modified: &[ClassifiedLine]) -> Vec<(Side, usize)> {
    let mut order = Vec::with_capacity(original.len().max(modified.len()));
    let mut i = 0usize;
    let mut j = 0usize;

    while i < original.len() || j < modified.len() {
        let left = original.get(i);
        let right = modified.get(j);

        match (left, right) {
            (Some(l), Some(r))
                if l.line_type == LineType::Unchanged && r.line_type == LineType::Unchanged =>
            {
                order.push((Side::Original, i));
                i += 1;
                j += 1;
            }
            (Some(l), _) if l.line_type != LineType::Unchanged => {
                if !l.is_placeholder() {
                    order.push((Side::Original, i));
                }
                i += 1;
                if l.line_type == LineType::Modified
                    && let Some(r) = modified.get(j)
                    && r.line_type == LineType::Modified
                {
                    order.push((Side::Modified, j));
                    j += 1;
                }
            }
            (_, Some(r)) if r.line_type != LineType::Unchanged => {
                if !r.is_placeholder() {
                    order.push((Side::Modified, j));
                }
                j += 1;
            }
            // one side ran out while the other still has unchanged rows
            (Some(_), _) => {
                order.push((Side::Original, i));
                i += 1;
            }
            (None, Some(_)) => {
                order.push((Side::Modified, j));
                j += 1;
            }
            (None, None) => break,
        }
    }

    order
}

const STYLE: &str = "body{font-family:monospace;margin:0}\
.panes{display:flex}.pane{flex:1;overflow-x:auto}\
table{border-collapse:collapse;width:100%}td{padding:0 6px;white-space:pre}\
.ln{color:#888;text-align:right;user-select:none}\
.added{background:#e6ffe6}.removed{background:#ffe6e6}.modified{background:#fff8dc}\
.placeholder{background:#f4f4f4}\
.diff-addition{background:#aaffaa}.diff-deletion{background:#ffaaaa}";

/// Render a standalone HTML document for a diff result
pub fn render_html(result: &DiffResult, highlighter: &dyn Highlight, view: ViewMode) -> String {
    RenderedDiff::new(result, highlighter).to_html(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{DiffOptions, LayoutMode, compute_diff};
    use crate::highlight::{HighlightError, HighlighterRegistry, PlainText};

    struct Broken;

    impl Highlight for Broken {
        fn highlight(&self, _text: &str) -> Result<Vec<StyledSpan>, HighlightError> {
            Err(HighlightError::Failed {
                language: "broken".to_string(),
                reason: "always fails".to_string(),
            })
        }
    }

    #[test]
    fn failing_highlighter_falls_back_to_escaped_text() {
        assert_eq!(highlight_or_plain(&Broken, "a < b"), plain_spans("a < b"));

        let result = compute_diff("a < b\n", "a < b\n", &DiffOptions::default());
        let rendered = render_side(&result.original, &Broken);
        assert_eq!(rendered[0].markup(), "a &lt; b");
    }

    #[test]
    fn modified_tokens_are_wrapped() {
        let result = compute_diff("foo\nbar baz\n", "foo\nbar qux\n", &DiffOptions::default());
        let original = render_side(&result.original, &PlainText);
        let modified = render_side(&result.modified, &PlainText);
        assert_eq!(original[1].markup(), "bar <span class=\"diff-deletion\">baz</span>");
        assert_eq!(modified[1].markup(), "bar <span class=\"diff-addition\">qux</span>");
    }

    #[test]
    fn placeholders_render_empty() {
        let result = compute_diff("", "x\n", &DiffOptions::default());
        let original = render_side(&result.original, &PlainText);
        assert_eq!(original.len(), 1);
        assert!(original[0].segments.is_empty());
        assert_eq!(original[0].markup(), "");
        assert!(original[0].is_placeholder());
    }

    #[test]
    fn syntax_spans_are_cut_at_token_boundaries() {
        let registry = HighlighterRegistry::with_defaults();
        let rust = registry.get("rust");
        let result = compute_diff("let a = 1;\n", "let b = 1;\n", &DiffOptions::default());
        let modified = render_line(&result.modified[0], rust.as_ref());

        let text: String = modified.segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(text, "let b = 1;");
        assert_eq!(modified.segments[0].text, "let");
        assert!(modified.segments[0].style.foreground.is_some());
        assert_eq!(modified.segments[0].kind, TokenKind::Context);
        assert!(
            modified
                .segments
                .iter()
                .any(|s| s.text == "b" && s.kind == TokenKind::Addition)
        );

        let markup = modified.markup();
        assert!(markup.starts_with("<span style=\"color:#"));
        assert!(markup.contains("<span class=\"diff-addition\"><span style="));
    }

    #[test]
    fn lines_without_tokens_are_context() {
        let options = DiffOptions {
            sub_line_detail: false,
            ..DiffOptions::default()
        };
        let result = compute_diff("old\n", "new\n", &options);
        let modified = render_side(&result.modified, &PlainText);
        assert_eq!(modified[0].markup(), "new");
        assert!(modified[0].segments.iter().all(|s| s.kind == TokenKind::Context));
    }

    #[test]
    fn html_document_contains_both_panes() {
        let result = compute_diff("a\nb\n", "a\nc\n", &DiffOptions::default());
        let html = render_html(&result, &PlainText, ViewMode::SideBySide);
        assert!(html.contains("<h2>Original</h2>"));
        assert!(html.contains("<h2>Modified</h2>"));
        assert!(html.contains("+0 -0 ~1"));
    }

    #[test]
    fn unified_order_skips_placeholders() {
        let result = compute_diff("a\nb\n", "a\nx\ny\nb\n", &DiffOptions::default());
        let order = unified_order(&result.original, &result.modified);
        assert_eq!(
            order,
            vec![
                (Side::Original, 0),
                (Side::Modified, 1),
                (Side::Modified, 2),
                (Side::Original, 3),
            ]
        );
    }

    #[test]
    fn unified_view_lists_pairs_together() {
        for layout in [LayoutMode::Aligned, LayoutMode::Compact] {
            let options = DiffOptions {
                layout,
                sub_line_detail: false,
                ..DiffOptions::default()
            };
            let result = compute_diff("keep\nold\ngone\n", "keep\nnew\n", &options);
            let html = render_html(&result, &PlainText, ViewMode::Unified);
            let keep = html.find(">keep<").unwrap();
            let old = html.find(">old<").unwrap();
            let new = html.find(">new<").unwrap();
            let gone = html.find(">gone<").unwrap();
            assert!(keep < old && old < new && new < gone);
            assert_eq!(html.matches(">keep<").count(), 1);
        }
    }
}
