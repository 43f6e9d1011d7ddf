use crate::diff::{CompareMode, DiffStats, LayoutMode, TokenGranularity};
use crate::render::ViewMode;
use egui::{Align, Color32, Layout, RichText, Ui};

pub enum TitleBarAction {
    SetCompareMode(CompareMode),
    SetLayout(LayoutMode),
    SetViewMode(ViewMode),
    SetGranularity(TokenGranularity),
    ToggleSubLineDetail,
    SetLanguage(String),
    Swap,
    Clear,
    ExportHtml,
}

pub struct TitleBar;

pub struct TitleBarState<'a> {
    pub stats: DiffStats,
    pub compare_mode: CompareMode,
    pub layout: LayoutMode,
    pub view_mode: ViewMode,
    pub granularity: TokenGranularity,
    pub sub_line_detail: bool,
    pub language: &'a str,
    pub languages: &'a [&'a str],
}

const ADDED_COLOR: Color32 = Color32::from_rgb(0, 100, 0);
const REMOVED_COLOR: Color32 = Color32::from_rgb(150, 0, 0);
const MODIFIED_COLOR: Color32 = Color32::from_rgb(150, 110, 0);

impl TitleBar {
    pub fn show(ui: &mut Ui, state: TitleBarState<'_>) -> Option<TitleBarAction> {
        let TitleBarState {
            stats,
            compare_mode,
            layout,
            view_mode,
            granularity,
            sub_line_detail,
            language,
            languages,
        } = state;

        let mut action = None;

        ui.horizontal(|ui| {
            ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                if ui
                    .selectable_label(compare_mode == CompareMode::Line, "Lines")
                    .clicked()
                {
                    action = Some(TitleBarAction::SetCompareMode(CompareMode::Line));
                }
                if ui
                    .selectable_label(compare_mode == CompareMode::Word, "Words")
                    .clicked()
                {
                    action = Some(TitleBarAction::SetCompareMode(CompareMode::Word));
                }
                ui.separator();

                if ui
                    .selectable_label(view_mode == ViewMode::SideBySide, "Side by side")
                    .clicked()
                {
                    action = Some(TitleBarAction::SetViewMode(ViewMode::SideBySide));
                }
                if ui
                    .selectable_label(view_mode == ViewMode::Unified, "Unified")
                    .clicked()
                {
                    action = Some(TitleBarAction::SetViewMode(ViewMode::Unified));
                }
                ui.separator();

                let aligned = layout == LayoutMode::Aligned;
                if ui
                    .selectable_label(aligned, "Align rows")
                    .on_hover_text("Show blank rows opposite added and removed lines")
                    .clicked()
                {
                    let next = if aligned {
                        LayoutMode::Compact
                    } else {
                        LayoutMode::Aligned
                    };
                    action = Some(TitleBarAction::SetLayout(next));
                }

                if ui
                    .selectable_label(sub_line_detail, "Inline")
                    .on_hover_text("Highlight changed words inside modified lines")
                    .clicked()
                {
                    action = Some(TitleBarAction::ToggleSubLineDetail);
                }

                ui.menu_button("Granularity", |ui| {
                    for (value, label) in [
                        (TokenGranularity::Word, "Words"),
                        (TokenGranularity::Char, "Characters"),
                    ] {
                        if ui.selectable_label(granularity == value, label).clicked() {
                            action = Some(TitleBarAction::SetGranularity(value));
                            ui.close();
                        }
                    }
                });

                egui::ComboBox::from_id_salt("language")
                    .selected_text(language)
                    .show_ui(ui, |ui| {
                        for lang in languages {
                            if ui.selectable_label(*lang == language, *lang).clicked() {
                                action = Some(TitleBarAction::SetLanguage(lang.to_string()));
                            }
                        }
                    });
            });

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Export").on_hover_text("Save as HTML").clicked() {
                    action = Some(TitleBarAction::ExportHtml);
                }
                if ui.button("Clear").clicked() {
                    action = Some(TitleBarAction::Clear);
                }
                if ui.button("⇄").on_hover_text("Swap sides").clicked() {
                    action = Some(TitleBarAction::Swap);
                }

                ui.add_space(16.0);
                ui.label(RichText::new(format!("~{}", stats.modifications)).color(MODIFIED_COLOR));
                ui.label(RichText::new(format!("-{}", stats.deletions)).color(REMOVED_COLOR));
                ui.label(RichText::new(format!("+{}", stats.additions)).color(ADDED_COLOR));
            });
        });

        action
    }
}
