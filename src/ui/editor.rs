use crate::constant::INPUT_ROWS;
use crate::diff::Side;
use egui::{RichText, Ui};

pub enum EditorAction {
    Open(Side),
}

/// The two text inputs being compared
#[derive(Default)]
pub struct Editor {
    pub original: String,
    pub modified: String,
}

impl Editor {
    pub fn new(original: String, modified: String) -> Self {
        Self { original, modified }
    }

    pub fn buffer_mut(&mut self, side: Side) -> &mut String {
        match side {
            Side::Original => &mut self.original,
            Side::Modified => &mut self.modified,
        }
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.original, &mut self.modified);
    }

    pub fn clear(&mut self) {
        self.original.clear();
        self.modified.clear();
    }

    pub fn show(&mut self, ui: &mut Ui) -> Option<EditorAction> {
        let mut action = None;

        ui.columns(2, |columns| {
            if Self::show_pane(&mut columns[0], "Original", &mut self.original) {
                action = Some(EditorAction::Open(Side::Original));
            }
            if Self::show_pane(&mut columns[1], "Modified", &mut self.modified) {
                action = Some(EditorAction::Open(Side::Modified));
            }
        });

        action
    }

    // Returns true when the pane's open button was clicked
    fn show_pane(ui: &mut Ui, label: &str, buffer: &mut String) -> bool {
        let mut open_clicked = false;

        ui.horizontal(|ui| {
            ui.label(RichText::new(label).strong());
            if ui.small_button("📂").on_hover_text("Load from file").clicked() {
                open_clicked = true;
            }
        });

        egui::ScrollArea::vertical()
            .id_salt(label)
            .max_height(INPUT_ROWS as f32 * 18.0)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(buffer)
                        .code_editor()
                        .hint_text("Paste or type text here")
                        .desired_width(f32::INFINITY)
                        .desired_rows(INPUT_ROWS),
                );
            });

        open_clicked
    }
}
