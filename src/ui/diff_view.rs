use crate::diff::{LayoutMode, LineType, Side, TokenKind};
use crate::highlight::SpanStyle;
use crate::render::{RenderedDiff, RenderedLine, Segment, ViewMode};
use egui::{Color32, FontId, TextFormat, Ui, Vec2, text::LayoutJob};

const REMOVED_LINE_BG: Color32 = Color32::from_rgb(255, 236, 236);
const ADDED_LINE_BG: Color32 = Color32::from_rgb(230, 255, 237);
const MODIFIED_LINE_BG: Color32 = Color32::from_rgb(255, 248, 220);
const PLACEHOLDER_BG: Color32 = Color32::from_gray(244);
const REMOVED_WORD_BG: Color32 = Color32::from_rgb(253, 184, 192);
const ADDED_WORD_BG: Color32 = Color32::from_rgb(172, 242, 189);

const LINE_HEIGHT: f32 = 20.0;

/// Render a highlighted diff in the chosen view
pub fn render_diff_view(
    ui: &mut Ui,
    rendered: &RenderedDiff,
    view: ViewMode,
    layout: LayoutMode,
    font_size: f32,
) {
    ui.style_mut().spacing.item_spacing.y = 0.0;
    let font_id = FontId::monospace(font_size);

    match view {
        ViewMode::SideBySide if layout == LayoutMode::Aligned => {
            render_aligned(ui, rendered, &font_id)
        }
        ViewMode::SideBySide => {
            ui.columns(2, |columns| {
                for line in &rendered.original {
                    render_line(&mut columns[0], line, Side::Original, &font_id);
                }
                for line in &rendered.modified {
                    render_line(&mut columns[1], line, Side::Modified, &font_id);
                }
            });
        }
        ViewMode::Unified => {
            for &(side, index) in &rendered.unified {
                render_line(ui, rendered.line(side, index), side, &font_id);
            }
        }
    }
}

// Both sides have the same number of rows, so one grid keeps them level
fn render_aligned(ui: &mut Ui, rendered: &RenderedDiff, font_id: &FontId) {
    let col_w = (ui.available_width() / 2.0 - 8.0).max(100.0);

    egui::Grid::new("diff_aligned_grid")
        .num_columns(2)
        .min_col_width(col_w)
        .max_col_width(col_w)
        .spacing(Vec2::new(4.0, 0.0))
        .show(ui, |ui| {
            for (left, right) in rendered.original.iter().zip(rendered.modified.iter()) {
                render_line(ui, left, Side::Original, font_id);
                render_line(ui, right, Side::Modified, font_id);
                ui.end_row();
            }
        });
}

fn line_prefix(line: &RenderedLine, side: Side) -> &'static str {
    match (line.line_type, side) {
        _ if line.is_placeholder() => "  ",
        (LineType::Unchanged, _) => "  ",
        (LineType::Added, _) => "+ ",
        (LineType::Removed, _) => "- ",
        (LineType::Modified, Side::Original) => "- ",
        (LineType::Modified, Side::Modified) => "+ ",
    }
}

fn line_background(line: &RenderedLine) -> Color32 {
    if line.is_placeholder() {
        return PLACEHOLDER_BG;
    }
    match line.line_type {
        LineType::Unchanged => Color32::TRANSPARENT,
        LineType::Added => ADDED_LINE_BG,
        LineType::Removed => REMOVED_LINE_BG,
        LineType::Modified => MODIFIED_LINE_BG,
    }
}

/// Syntax color and italics first, then the changed-token background on top
fn segment_format(segment: &Segment, plain: &TextFormat) -> TextFormat {
    let SpanStyle {
        foreground, italic, ..
    } = segment.style;

    let mut format = plain.clone();
    if let Some([r, g, b]) = foreground {
        format.color = Color32::from_rgb(r, g, b);
    }
    format.italics = italic;
    format.background = match segment.kind {
        TokenKind::Context => Color32::TRANSPARENT,
        TokenKind::Addition => ADDED_WORD_BG,
        TokenKind::Deletion => REMOVED_WORD_BG,
    };
    format
}

/// Render a single row with its line number and highlighted segments
fn render_line(ui: &mut Ui, line: &RenderedLine, side: Side, font_id: &FontId) {
    egui::Frame::default()
        .fill(line_background(line))
        .inner_margin(2.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());

            let base_text_color = ui.visuals().text_color();
            let plain = TextFormat {
                font_id: font_id.clone(),
                color: base_text_color,
                line_height: Some(LINE_HEIGHT),
                ..Default::default()
            };

            let mut job = LayoutJob::default();
            let number = line
                .line_number
                .map(|n| format!("{:>4} ", n))
                .unwrap_or_else(|| "     ".to_string());
            job.append(
                &number,
                0.0,
                TextFormat {
                    color: base_text_color.gamma_multiply(0.4),
                    ..plain.clone()
                },
            );
            job.append(
                line_prefix(line, side),
                0.0,
                TextFormat {
                    color: base_text_color.gamma_multiply(0.5),
                    ..plain.clone()
                },
            );

            for segment in &line.segments {
                job.append(&segment.text, 0.0, segment_format(segment, &plain));
            }

            ui.add(egui::Label::new(job).wrap());
        });
}
