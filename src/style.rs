use egui::{Color32, Context, FontFamily, FontId, Stroke, Style, TextStyle, Visuals};

/// Proportional UI text sits a little under the code size
const UI_TEXT_SCALE: f32 = 0.9;

pub fn configure_style(ctx: &Context, font_size: f32) {
    let mut style = Style::default();

    // Dense rows, the diff panes get most of the window
    style.spacing.item_spacing = egui::vec2(6.0, 4.0);
    style.spacing.button_padding = egui::vec2(6.0, 2.0);
    style.spacing.window_margin = egui::Margin::same(8);
    style.spacing.scroll.bar_width = 8.0;

    let ui_size = (font_size * UI_TEXT_SCALE).round();
    style.text_styles = [
        (
            TextStyle::Heading,
            FontId::new(ui_size + 4.0, FontFamily::Proportional),
        ),
        (TextStyle::Body, FontId::new(ui_size, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(ui_size, FontFamily::Proportional)),
        (
            TextStyle::Small,
            FontId::new(ui_size - 2.0, FontFamily::Proportional),
        ),
        (TextStyle::Monospace, FontId::monospace(font_size)),
    ]
    .into();

    ctx.set_style(style);

    let mut visuals = Visuals::light();
    visuals.window_shadow = egui::epaint::Shadow::NONE;
    visuals.popup_shadow = egui::epaint::Shadow::NONE;

    // White code canvas inside grey chrome
    visuals.panel_fill = Color32::from_gray(248);
    visuals.extreme_bg_color = Color32::WHITE;
    visuals.code_bg_color = Color32::from_gray(250);
    visuals.faint_bg_color = Color32::from_gray(244);

    // Visible separators between the input and diff panels
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, Color32::from_gray(222));
    visuals.widgets.hovered.bg_fill = Color32::from_gray(236);
    visuals.widgets.active.bg_fill = Color32::from_gray(226);

    visuals.selection.bg_fill = Color32::from_rgb(180, 213, 255);
    visuals.selection.stroke = Stroke::new(1.0, Color32::from_rgb(30, 30, 30));

    ctx.set_visuals(visuals);
}
