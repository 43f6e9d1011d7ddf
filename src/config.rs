//! Application configuration module
//!
//! Comparison preferences are persisted with `confy`, which takes care of
//! serialization and the OS-specific config directory.

use crate::constant::APP_NAME;
use crate::diff::{CompareMode, DiffOptions, LayoutMode, TokenGranularity};
use crate::highlight::PLAINTEXT;
use crate::render::ViewMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Confy(#[from] confy::ConfyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct Config {
    pub settings: Settings,
}

impl Config {
    /// Load configuration from disk, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Settings = confy::load(APP_NAME, None)?;
        info!("Load config from {:?}", Self::config_path()?);
        Ok(Self { settings })
    }

    /// Save current configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, &self.settings)?;
        info!("Save config to {:?}", Self::config_path()?);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Using default settings: {}", e);
            Self {
                settings: Settings::default(),
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Compare line by line or word by word
    #[serde(default)]
    pub compare_mode: CompareMode,

    /// Keep both panes row-aligned with placeholder rows
    #[serde(default)]
    pub layout: LayoutMode,

    #[serde(default)]
    pub view_mode: ViewMode,

    /// Highlight changed words inside modified lines
    #[serde(default = "default_true")]
    pub sub_line_detail: bool,

    #[serde(default)]
    pub granularity: TokenGranularity,

    /// Language tag used to pick the syntax highlighter
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    PLAINTEXT.to_string()
}

fn default_font_size() -> f32 {
    14.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            compare_mode: CompareMode::default(),
            layout: LayoutMode::default(),
            view_mode: ViewMode::default(),
            sub_line_detail: true,
            granularity: TokenGranularity::default(),
            language: default_language(),
            font_size: default_font_size(),
        }
    }
}

impl Settings {
    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            mode: self.compare_mode,
            layout: self.layout,
            sub_line_detail: self.sub_line_detail,
            granularity: self.granularity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use uuid::Uuid;

    fn setup_test_dir() -> PathBuf {
        let test_dir = std::env::temp_dir().join(format!("test_config_{}", Uuid::new_v4()));
        fs::create_dir_all(&test_dir).unwrap();
        test_dir
    }

    fn cleanup_test_dir(test_dir: &Path) {
        let _ = fs::remove_dir_all(test_dir);
    }

    #[test]
    fn test_settings_round_trip() {
        let test_dir = setup_test_dir();
        let path = test_dir.join("settings.toml");

        let settings = Settings {
            compare_mode: CompareMode::Word,
            layout: LayoutMode::Compact,
            view_mode: ViewMode::Unified,
            sub_line_detail: false,
            granularity: TokenGranularity::Char,
            language: "rust".to_string(),
            font_size: 16.0,
        };
        confy::store_path(&path, &settings).unwrap();
        let loaded: Settings = confy::load_path(&path).unwrap();
        assert_eq!(loaded, settings);

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let test_dir = setup_test_dir();
        let path = test_dir.join("partial.toml");
        fs::write(&path, "language = \"python\"\n").unwrap();

        let loaded: Settings = confy::load_path(&path).unwrap();
        assert_eq!(loaded.language, "python");
        assert!(loaded.sub_line_detail);
        assert_eq!(loaded.layout, LayoutMode::Aligned);
        assert_eq!(loaded.font_size, 14.0);

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_diff_options_follow_settings() {
        let settings = Settings {
            compare_mode: CompareMode::Word,
            ..Settings::default()
        };
        let options = settings.diff_options();
        assert_eq!(options.mode, CompareMode::Word);
        assert_eq!(options.layout, LayoutMode::Aligned);
        assert!(options.sub_line_detail);
    }
}
