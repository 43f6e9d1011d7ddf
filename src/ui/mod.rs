pub mod diff_view;
pub mod editor;
pub mod title_bar;
pub mod viewport;
