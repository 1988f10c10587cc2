//! Configuration file support
//!
//! Preferences live in ~/.latex-editor.toml (or %USERPROFILE%\.latex-editor.toml
//! on Windows). Values are kept as strings, the way the settings screen
//! edits them, and parsed into an [`EditorConfig`] when applied.
//!
//! Example:
//! ```text
//! # latex-editor preferences
//! font_size = "14"
//! tab_size = "4"
//! exe = "pdflatex"
//! images_folder = "/sdcard/LaTeX/images"
//! output_folder = "/sdcard/LaTeX/out/"
//! server_address = "http://192.168.1.10:8080"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EditorError, Result};

const CONFIG_FILE: &str = ".latex-editor.toml";

/// The preference store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Folder where images are looked up
    pub images_folder: String,
    /// Folder where compiled output is written
    pub output_folder: String,
    /// Address of the compilation server
    pub server_address: String,
    /// Editor font size in points
    pub font_size: String,
    /// Tab width in columns
    pub tab_size: String,
    /// LaTeX executable used for compilation
    pub exe: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            images_folder: String::new(),
            output_folder: String::new(),
            server_address: String::new(),
            font_size: "14".to_string(),
            tab_size: "4".to_string(),
            exe: "pdflatex".to_string(),
        }
    }
}

impl Preferences {
    /// Get the preferences file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }
    }

    /// Parse preferences from TOML; missing keys keep their defaults
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Serialize preferences to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Load preferences from `path`, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!(path = %path.display(), "loading preferences");
                Self::parse(&contents)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load preferences from the default location
    pub fn load_default() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Save preferences to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = format!(
            "# latex-editor preferences\n# Generated automatically\n\n{}",
            self.to_toml_string()?
        );
        fs::write(path, contents)?;
        Ok(())
    }
}

/// Settings the editor view needs, parsed from [`Preferences`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Font size in points
    pub font_size: f32,
    /// Pixels per point on the target display
    pub scaled_density: f32,
    /// Tab width in columns
    pub tab_size: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            scaled_density: 1.0,
            tab_size: 4,
        }
    }
}

impl EditorConfig {
    /// Parse the editor settings out of the preference store
    ///
    /// The font size must be a finite number above 3 since line numbers are
    /// drawn three points smaller. An unparsable tab size keeps the default.
    pub fn from_preferences(prefs: &Preferences, scaled_density: f32) -> Result<Self> {
        let font_size = parse_font_size(&prefs.font_size)?;
        let mut config = Self {
            font_size,
            scaled_density,
            ..Self::default()
        };
        if let Ok(n) = prefs.tab_size.trim().parse::<usize>() {
            config.tab_size = n.clamp(1, 16); // Between 1 and 16
        }
        Ok(config)
    }
}

/// Parse a font size preference value
pub fn parse_font_size(value: &str) -> Result<f32> {
    match value.trim().parse::<f32>() {
        Ok(size) if size.is_finite() && size > 3.0 => Ok(size),
        _ => Err(EditorError::InvalidFontSize(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preferences() {
        let contents = r#"
# Comment
font_size = "18"
exe = "xelatex"
output_folder = "/tmp/out"
        "#;

        let prefs = Preferences::parse(contents).unwrap();
        assert_eq!(prefs.font_size, "18");
        assert_eq!(prefs.exe, "xelatex");
        assert_eq!(prefs.output_folder, "/tmp/out");
        // Missing keys keep defaults
        assert_eq!(prefs.tab_size, "4");
        assert_eq!(prefs.server_address, "");
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(matches!(
            Preferences::parse("font_size = 12"),
            Err(EditorError::ParseSettings(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");

        let prefs = Preferences {
            images_folder: "/img".to_string(),
            font_size: "16".to_string(),
            ..Preferences::default()
        };
        prefs.save(&path).unwrap();

        let loaded = Preferences::load(&path).unwrap();
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_load_missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Preferences::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Preferences::default());
    }

    #[test]
    fn test_editor_config_from_preferences() {
        let prefs = Preferences {
            font_size: " 12.5 ".to_string(),
            tab_size: "40".to_string(),
            ..Preferences::default()
        };
        let config = EditorConfig::from_preferences(&prefs, 2.0).unwrap();
        assert_eq!(config.font_size, 12.5);
        assert_eq!(config.scaled_density, 2.0);
        assert_eq!(config.tab_size, 16);
    }

    #[test]
    fn test_bad_tab_size_keeps_default() {
        let prefs = Preferences {
            tab_size: "wide".to_string(),
            ..Preferences::default()
        };
        let config = EditorConfig::from_preferences(&prefs, 1.0).unwrap();
        assert_eq!(config.tab_size, 4);
    }

    #[test]
    fn test_parse_font_size() {
        assert_eq!(parse_font_size("14").unwrap(), 14.0);
        assert!(matches!(parse_font_size(""), Err(EditorError::InvalidFontSize(_))));
        assert!(parse_font_size("3").is_err());
        assert!(parse_font_size("NaN").is_err());
        assert!(parse_font_size("inf").is_err());
        assert!(parse_font_size("big").is_err());
    }
}
