//! Settings screen controller
//!
//! Keeps the one-line summary shown under each preference in sync with the
//! store. The host calls [`SettingsPanel::refresh_all`] when the screen is
//! shown and [`SettingsPanel::on_preference_changed`] after each edit; a
//! font size change hands back the new [`EditorConfig`] so the host can
//! pass it to the editor view.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::config::{EditorConfig, Preferences};
use crate::error::{EditorError, Result};

/// Keys of the preference store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    ImagesFolder,
    OutputFolder,
    ServerAddress,
    FontSize,
    TabSize,
    Exe,
}

impl PreferenceKey {
    /// Every key, in screen order
    pub const ALL: [PreferenceKey; 6] = [
        PreferenceKey::ImagesFolder,
        PreferenceKey::OutputFolder,
        PreferenceKey::ServerAddress,
        PreferenceKey::FontSize,
        PreferenceKey::TabSize,
        PreferenceKey::Exe,
    ];

    /// The key's name in the store
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::ImagesFolder => "images_folder",
            PreferenceKey::OutputFolder => "output_folder",
            PreferenceKey::ServerAddress => "server_address",
            PreferenceKey::FontSize => "font_size",
            PreferenceKey::TabSize => "tab_size",
            PreferenceKey::Exe => "exe",
        }
    }

    /// Read this key's value from the store
    pub fn value<'a>(&self, prefs: &'a Preferences) -> &'a str {
        match self {
            PreferenceKey::ImagesFolder => &prefs.images_folder,
            PreferenceKey::OutputFolder => &prefs.output_folder,
            PreferenceKey::ServerAddress => &prefs.server_address,
            PreferenceKey::FontSize => &prefs.font_size,
            PreferenceKey::TabSize => &prefs.tab_size,
            PreferenceKey::Exe => &prefs.exe,
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferenceKey {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self> {
        PreferenceKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| EditorError::UnknownPreference(s.to_string()))
    }
}

/// How a preference is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKind {
    /// Free text
    Text,
    /// One of a fixed set of `(label, value)` choices
    List(&'static [(&'static str, &'static str)]),
}

/// A row of the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferenceEntry {
    pub key: PreferenceKey,
    pub title: &'static str,
    pub kind: PreferenceKind,
}

const FONT_SIZES: &[(&str, &str)] = &[
    ("Small", "12"),
    ("Medium", "14"),
    ("Large", "16"),
    ("Huge", "20"),
];

const TAB_SIZES: &[(&str, &str)] = &[("2 spaces", "2"), ("4 spaces", "4"), ("8 spaces", "8")];

const EXECUTABLES: &[(&str, &str)] = &[
    ("pdfLaTeX", "pdflatex"),
    ("XeLaTeX", "xelatex"),
    ("LuaLaTeX", "lualatex"),
];

/// The rows of the settings screen
pub const ENTRIES: [PreferenceEntry; 6] = [
    PreferenceEntry {
        key: PreferenceKey::ImagesFolder,
        title: "Images folder",
        kind: PreferenceKind::Text,
    },
    PreferenceEntry {
        key: PreferenceKey::OutputFolder,
        title: "Output folder",
        kind: PreferenceKind::Text,
    },
    PreferenceEntry {
        key: PreferenceKey::ServerAddress,
        title: "Server address",
        kind: PreferenceKind::Text,
    },
    PreferenceEntry {
        key: PreferenceKey::FontSize,
        title: "Font size",
        kind: PreferenceKind::List(FONT_SIZES),
    },
    PreferenceEntry {
        key: PreferenceKey::TabSize,
        title: "Tab size",
        kind: PreferenceKind::List(TAB_SIZES),
    },
    PreferenceEntry {
        key: PreferenceKey::Exe,
        title: "LaTeX executable",
        kind: PreferenceKind::List(EXECUTABLES),
    },
];

/// Summary text shown in place of secret values
const MASK: &str = "******";

/// Summaries for the settings screen
#[derive(Debug, Clone)]
pub struct SettingsPanel {
    entries: Vec<PreferenceEntry>,
    summaries: HashMap<PreferenceKey, String>,
    scaled_density: f32,
}

impl SettingsPanel {
    /// Create a panel for the standard rows
    pub fn new(scaled_density: f32) -> Self {
        Self::with_entries(ENTRIES.to_vec(), scaled_density)
    }

    /// Create a panel for a custom set of rows
    pub fn with_entries(entries: Vec<PreferenceEntry>, scaled_density: f32) -> Self {
        Self {
            entries,
            summaries: HashMap::new(),
            scaled_density,
        }
    }

    /// The rows, in screen order
    pub fn entries(&self) -> &[PreferenceEntry] {
        &self.entries
    }

    /// Current summary of a preference
    pub fn summary(&self, key: PreferenceKey) -> Option<&str> {
        self.summaries.get(&key).map(String::as_str)
    }

    /// Recompute every summary from the store
    ///
    /// Lists show the label of the selected choice; text shows the raw value,
    /// masked when the title mentions a password.
    pub fn refresh_all(&mut self, prefs: &Preferences) {
        for entry in &self.entries {
            let value = entry.key.value(prefs);
            let summary = match entry.kind {
                PreferenceKind::List(choices) => choices
                    .iter()
                    .find(|(_, v)| *v == value)
                    .map_or_else(String::new, |(label, _)| label.to_string()),
                PreferenceKind::Text if entry.title.to_lowercase().contains("password") => {
                    MASK.to_string()
                }
                PreferenceKind::Text => value.to_string(),
            };
            self.summaries.insert(entry.key, summary);
        }
    }

    /// Update the summary of the preference that just changed
    ///
    /// Text preferences are paths, so their summary always ends in `/`;
    /// lists show the stored value. Returns the new editor configuration
    /// when the font size changed and parses.
    pub fn on_preference_changed(
        &mut self,
        prefs: &Preferences,
        key: PreferenceKey,
    ) -> Option<EditorConfig> {
        let kind = self.entries.iter().find(|e| e.key == key)?.kind;
        let value = key.value(prefs);
        let summary = match kind {
            PreferenceKind::Text => ensure_folder_slash(value),
            PreferenceKind::List(_) => value.to_string(),
        };
        debug!(key = %key, summary = %summary, "preference changed");
        self.summaries.insert(key, summary);

        if key != PreferenceKey::FontSize {
            return None;
        }
        match EditorConfig::from_preferences(prefs, self.scaled_density) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(error = %e, "ignoring font size change");
                None
            }
        }
    }
}

/// Append a trailing `/` to a folder path if it lacks one
pub fn ensure_folder_slash(folder: &str) -> String {
    if folder.ends_with('/') {
        folder.to_string()
    } else {
        format!("{folder}/")
    }
}
