//! Text Compare library
//!
//! The `diff` engine is a pure function of two strings; everything else
//! (highlighting, rendering, settings, the egui shell) is built on top of it.

pub mod app;
pub mod config;
pub mod constant;
pub mod diff;
pub mod file;
pub mod highlight;
pub mod messages;
pub mod render;
pub mod style;
pub mod ui;
