// Window size constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;
// Two panes of line numbers plus code stay readable down to this size
pub const MIN_WINDOW_WIDTH: f32 = 720.0;
pub const MIN_WINDOW_HEIGHT: f32 = 420.0;
pub const DEFAULT_WINDOW_TITLE: &str = "Text Compare";

/// Window class on Linux, also the icon lookup key
pub const APP_ID: &str = "text-compare";

/// Application name used for the config file
pub const APP_NAME: &str = "Text Compare";

/// Rows shown by each input pane before it scrolls
pub const INPUT_ROWS: usize = 12;
