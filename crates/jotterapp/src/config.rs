//! # Configuration
//!
//! Jotter configuration is managed by [`confique`], layered in priority order:
//!
//! 1. **Environment variables**: `JOTTER_DEFAULT_FOLDER`, `JOTTER_SEED`,
//!    `JOTTER_THEME`, `JOTTER_SANITIZE_HTML`.
//! 2. **Config file**: the path given with `--config`, otherwise
//!    `jotter.toml` in the OS config directory (via `directories`).
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `default_folder` | `1` | Folder for notes created without one |
//! | `seed_file` | none | JSON seed; the sample data is used when unset |
//! | `render.theme` | `base16-ocean.dark` | Highlight theme |
//! | `render.sanitize_html` | `true` | Sanitize HTML notes as well as Markdown |
//! | `render.allow_inline_styles` | `true` | Keep rich-text `style` attributes |
//! | `render.detect_language` | `true` | Guess undeclared code languages |

use crate::error::{JotterError, Result};
use crate::model::DEFAULT_FOLDER_ID;
use crate::render::{highlight, RenderOptions};
use crate::seed::Seed;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "jotter.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JotterConfig {
    /// Folder id given to notes created without one.
    #[config(default = "1", env = "JOTTER_DEFAULT_FOLDER")]
    pub default_folder: String,

    /// JSON file holding the initial folders, tags and notes.
    #[config(env = "JOTTER_SEED")]
    pub seed_file: Option<PathBuf>,

    #[config(nested)]
    pub render: RenderConfig,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// syntect theme for highlighted code.
    #[config(default = "base16-ocean.dark", env = "JOTTER_THEME")]
    pub theme: String,

    /// When false, HTML notes are injected without sanitization.
    #[config(default = true, env = "JOTTER_SANITIZE_HTML")]
    pub sanitize_html: bool,

    #[config(default = true)]
    pub allow_inline_styles: bool,

    #[config(default = true)]
    pub detect_language: bool,
}

impl Default for JotterConfig {
    fn default() -> Self {
        Self {
            default_folder: DEFAULT_FOLDER_ID.to_string(),
            seed_file: None,
            render: RenderConfig::default(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            theme: highlight::DEFAULT_THEME.to_string(),
            sanitize_html: true,
            allow_inline_styles: true,
            detect_language: true,
        }
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        RenderOptions {
            theme: config.theme.clone(),
            sanitize_html: config.sanitize_html,
            allow_inline_styles: config.allow_inline_styles,
            detect_language: config.detect_language,
        }
    }
}

impl JotterConfig {
    /// Loads the layered configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used when present and skipped otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(JotterError::ConfigNotFound(path.to_path_buf()));
                }
                debug!(path = %path.display(), "Loading config file");
                builder = builder.file(path);
            }
            None => {
                if let Some(default) = Self::default_path().filter(|p| p.exists()) {
                    debug!(path = %default.display(), "Loading config file");
                    builder = builder.file(default);
                }
            }
        }
        Ok(builder.load()?)
    }

    /// `jotter.toml` in the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "jotter").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// The seed to start a store from.
    pub fn seed(&self) -> Result<Seed> {
        match &self.seed_file {
            Some(path) => Seed::load(path),
            None => Ok(Seed::sample()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = JotterConfig::default();
        assert_eq!(config.default_folder, "1");
        assert!(config.seed_file.is_none());
        assert_eq!(config.render.theme, "base16-ocean.dark");
        assert!(config.render.sanitize_html);
        assert!(config.render.allow_inline_styles);
        assert!(config.render.detect_language);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            "default_folder = \"inbox\"\n\n[render]\ntheme = \"InspiredGitHub\"\nallow_inline_styles = false\n"
        )
        .unwrap();

        let config = JotterConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.default_folder, "inbox");
        assert_eq!(config.render.theme, "InspiredGitHub");
        assert!(!config.render.allow_inline_styles);
        assert!(config.render.detect_language);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let missing = Path::new("/no/such/jotter.toml");
        match JotterConfig::load(Some(missing)) {
            Err(JotterError::ConfigNotFound(path)) => assert_eq!(path, missing),
            other => panic!("expected missing config error, got {:?}", other),
        }
    }

    #[test]
    fn render_options_follow_config() {
        let config = RenderConfig {
            sanitize_html: false,
            ..Default::default()
        };
        let options = RenderOptions::from(&config);
        assert!(!options.sanitize_html);
        assert_eq!(options.theme, config.theme);
    }

    #[test]
    fn seed_defaults_to_sample() {
        let seed = JotterConfig::default().seed().unwrap();
        assert_eq!(seed.notes.len(), 2);
    }
}
