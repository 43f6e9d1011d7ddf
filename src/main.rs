use std::path::PathBuf;
use text_compare::app::CompareApp;
use text_compare::constant;
use text_compare::file::load_text;
use text_compare::ui;
use tracing_subscriber::EnvFilter;

// Missing or unreadable files start as an empty pane
fn initial_text(arg: Option<String>) -> String {
    let Some(path) = arg.map(PathBuf::from) else {
        return String::new();
    };
    load_text(&path).unwrap_or_else(|e| {
        tracing::error!("Failed to load {:?}: {}", path, e);
        String::new()
    })
}

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let original = initial_text(args.next());
    let modified = initial_text(args.next());
    let options = ui::viewport::build_viewport();

    eframe::run_native(
        constant::DEFAULT_WINDOW_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(CompareApp::new(cc, original, modified)))),
    )
}
