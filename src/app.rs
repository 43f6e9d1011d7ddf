use crate::config::Config;
use crate::diff::{DiffOptions, Side, compute_diff};
use crate::file;
use crate::highlight::HighlighterRegistry;
use crate::messages::ResponseMessage;
use crate::render::RenderedDiff;
use crate::style::configure_style;
use crate::ui::diff_view::render_diff_view;
use crate::ui::editor::{Editor, EditorAction};
use crate::ui::title_bar::{TitleBar, TitleBarAction, TitleBarState};
use std::sync::mpsc::{Receiver, Sender, channel};
use xxhash_rust::xxh64::xxh64;

/// Identity of one comparison. Lengths sit next to the hashes so that a
/// hash collision alone cannot return a stale result.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MemoKey {
    original_hash: u64,
    original_len: usize,
    modified_hash: u64,
    modified_len: usize,
    options: DiffOptions,
    language: String,
}

impl MemoKey {
    fn new(original: &str, modified: &str, options: &DiffOptions, language: &str) -> Self {
        Self {
            original_hash: xxh64(original.as_bytes(), 0),
            original_len: original.len(),
            modified_hash: xxh64(modified.as_bytes(), 0),
            modified_len: modified.len(),
            options: *options,
            language: language.to_lowercase(),
        }
    }
}

struct Memo {
    key: MemoKey,
    rendered: RenderedDiff,
}

/// Recomputes and re-highlights the diff only when an input, an option or
/// the language changed
#[derive(Default)]
pub struct DiffCache {
    memo: Option<Memo>,
}

impl DiffCache {
    pub fn get(
        &mut self,
        original: &str,
        modified: &str,
        options: &DiffOptions,
        language: &str,
        highlighters: &HighlighterRegistry,
    ) -> &RenderedDiff {
        let key = MemoKey::new(original, modified, options, language);

        if self.memo.as_ref().is_some_and(|memo| memo.key != key) {
            tracing::trace!("Recomputing diff");
            self.memo = None;
        }

        let memo = self.memo.get_or_insert_with(|| {
            let result = compute_diff(original, modified, options);
            let highlighter = highlighters.get(language);
            Memo {
                key,
                rendered: RenderedDiff::new(&result, highlighter.as_ref()),
            }
        });
        &memo.rendered
    }
}

pub struct CompareApp {
    editor: Editor,
    config: Config,
    highlighters: HighlighterRegistry,
    cache: DiffCache,
    response_sender: Sender<ResponseMessage>,
    response_receiver: Receiver<ResponseMessage>,
    status: Option<String>,
}

impl CompareApp {
    pub fn new(cc: &eframe::CreationContext<'_>, original: String, modified: String) -> Self {
        let config = Config::default();
        configure_style(&cc.egui_ctx, config.settings.font_size);

        let (response_sender, response_receiver) = channel();
        Self {
            editor: Editor::new(original, modified),
            config,
            highlighters: HighlighterRegistry::with_defaults(),
            cache: DiffCache::default(),
            response_sender,
            response_receiver,
            status: None,
        }
    }

    fn save_settings(&self) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save settings: {}", e);
        }
    }

    fn handle_title_bar_action(&mut self, ctx: &egui::Context, action: TitleBarAction) {
        let settings = &mut self.config.settings;
        match action {
            TitleBarAction::SetCompareMode(mode) => settings.compare_mode = mode,
            TitleBarAction::SetLayout(layout) => settings.layout = layout,
            TitleBarAction::SetViewMode(view) => settings.view_mode = view,
            TitleBarAction::SetGranularity(granularity) => settings.granularity = granularity,
            TitleBarAction::ToggleSubLineDetail => {
                settings.sub_line_detail = !settings.sub_line_detail
            }
            TitleBarAction::SetLanguage(language) => settings.language = language,
            TitleBarAction::Swap => {
                self.editor.swap();
                return;
            }
            TitleBarAction::Clear => {
                self.editor.clear();
                return;
            }
            TitleBarAction::ExportHtml => {
                self.export_html(ctx);
                return;
            }
        }
        self.save_settings();
    }

    fn open_file(&self, ctx: &egui::Context, side: Side) {
        let sender = self.response_sender.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new().pick_file() {
                let loaded = file::load_text(&path).map_err(|e| e.to_string());
                if let Err(e) = sender.send(ResponseMessage::FileLoaded(side, loaded)) {
                    tracing::error!("Failed to send loaded file: {}", e);
                }
                ctx.request_repaint();
            }
        });
    }

    fn export_html(&mut self, ctx: &egui::Context) {
        let settings = &self.config.settings;
        let options = settings.diff_options();
        let html = self
            .cache
            .get(
                &self.editor.original,
                &self.editor.modified,
                &options,
                &settings.language,
                &self.highlighters,
            )
            .to_html(settings.view_mode);

        let sender = self.response_sender.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("HTML", &["html"])
                .set_file_name("diff.html")
                .save_file()
            {
                let written = file::write_text(&path, &html)
                    .map(|_| path)
                    .map_err(|e| e.to_string());
                if let Err(e) = sender.send(ResponseMessage::HtmlExported(written)) {
                    tracing::error!("Failed to send export result: {}", e);
                }
                ctx.request_repaint();
            }
        });
    }

    fn handle_response(&mut self, response: ResponseMessage) {
        match response {
            ResponseMessage::FileLoaded(side, Ok(content)) => {
                *self.editor.buffer_mut(side) = content;
                self.status = None;
            }
            ResponseMessage::FileLoaded(_, Err(e)) => {
                tracing::error!("Failed to load file: {}", e);
                self.status = Some(e);
            }
            ResponseMessage::HtmlExported(Ok(path)) => {
                tracing::info!("Exported diff to {:?}", path);
                self.status = Some(format!("Exported to {}", path.display()));
            }
            ResponseMessage::HtmlExported(Err(e)) => {
                tracing::error!("Failed to export diff: {}", e);
                self.status = Some(e);
            }
        }
    }
}

impl eframe::App for CompareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(response) = self.response_receiver.try_recv() {
            self.handle_response(response);
        }

        let settings = &self.config.settings;
        let stats = self
            .cache
            .get(
                &self.editor.original,
                &self.editor.modified,
                &settings.diff_options(),
                &settings.language,
                &self.highlighters,
            )
            .stats;

        // Title Bar
        let title_action = egui::TopBottomPanel::top("title_bar_panel")
            .show(ctx, |ui| {
                let settings = &self.config.settings;
                let languages = self.highlighters.languages();
                TitleBar::show(
                    ui,
                    TitleBarState {
                        stats,
                        compare_mode: settings.compare_mode,
                        layout: settings.layout,
                        view_mode: settings.view_mode,
                        granularity: settings.granularity,
                        sub_line_detail: settings.sub_line_detail,
                        language: &settings.language,
                        languages: &languages,
                    },
                )
            })
            .inner;
        if let Some(action) = title_action {
            self.handle_title_bar_action(ctx, action);
        }

        if let Some(status) = &self.status {
            egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
                ui.label(egui::RichText::new(status).small());
            });
        }

        // Inputs
        let editor_action = egui::TopBottomPanel::top("input_panel")
            .resizable(true)
            .show(ctx, |ui| self.editor.show(ui))
            .inner;
        if let Some(EditorAction::Open(side)) = editor_action {
            self.open_file(ctx, side);
        }

        // Diff panes
        let settings = &self.config.settings;
        let options = settings.diff_options();
        let (view, layout, font_size) = (settings.view_mode, settings.layout, settings.font_size);
        let rendered = self.cache.get(
            &self.editor.original,
            &self.editor.modified,
            &options,
            &settings.language,
            &self.highlighters,
        );
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    render_diff_view(ui, rendered, view, layout, font_size);
                });
        });
    }
}
