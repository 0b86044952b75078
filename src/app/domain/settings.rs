use serde::{Deserialize, Serialize};

use super::language::CodeLanguage;
use super::theme::{CodeTheme, resolve_theme};

pub const PADDING_MIN: u32 = 16;
pub const PADDING_MAX: u32 = 64;
pub const PADDING_STEP: u32 = 8;

/// How the current snippet is presented on the card.
///
/// Lives only for the session; nothing here is written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default)]
    pub language: CodeLanguage,

    #[serde(default = "default_theme_id")]
    pub theme_id: String,

    /// Outer card padding in pixels
    #[serde(default = "default_padding")]
    pub padding: u32,

    #[serde(default)]
    pub show_line_numbers: bool,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_window_controls")]
    pub window_controls: bool,
}

fn default_theme_id() -> String {
    "midnight".to_string()
}

fn default_padding() -> u32 {
    32
}

fn default_title() -> String {
    "script.js".to_string()
}

fn default_window_controls() -> bool {
    true
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            language: CodeLanguage::JavaScript,
            theme_id: default_theme_id(),
            padding: default_padding(),
            show_line_numbers: false,
            title: default_title(),
            window_controls: default_window_controls(),
        }
    }
}

/// Partial settings record; `None` fields are left untouched by [`EditorSettings::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsUpdate {
    pub language: Option<CodeLanguage>,
    pub theme_id: Option<String>,
    pub padding: Option<u32>,
    pub show_line_numbers: Option<bool>,
    pub title: Option<String>,
    pub window_controls: Option<bool>,
}

impl EditorSettings {
    /// Merge the given fields into the settings.
    ///
    /// Values are taken as-is: padding outside the slider range is kept.
    pub fn update(&mut self, changes: SettingsUpdate) {
        let SettingsUpdate {
            language,
            theme_id,
            padding,
            show_line_numbers,
            title,
            window_controls,
        } = changes;

        if let Some(language) = language {
            self.language = language;
        }
        if let Some(theme_id) = theme_id {
            self.theme_id = theme_id;
        }
        if let Some(padding) = padding {
            self.padding = padding;
        }
        if let Some(show) = show_line_numbers {
            self.show_line_numbers = show;
        }
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(controls) = window_controls {
            self.window_controls = controls;
        }
    }

    /// Theme to render with; unknown ids resolve to the first registry theme.
    pub fn resolve_theme(&self) -> &'static CodeTheme {
        resolve_theme(&self.theme_id)
    }
}

/// Snap a raw slider value onto the padding grid (16, 24, ... 64).
pub fn snap_padding(raw: f64) -> u32 {
    let min = PADDING_MIN as f64;
    let max = PADDING_MAX as f64;
    let step = PADDING_STEP as f64;
    let clamped = raw.clamp(min, max);
    let steps = ((clamped - min) / step).round();
    (min + steps * step) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::theme::THEMES;

    #[test]
    fn test_default_settings() {
        let settings = EditorSettings::default();
        assert_eq!(settings.language, CodeLanguage::JavaScript);
        assert_eq!(settings.theme_id, "midnight");
        assert_eq!(settings.padding, 32);
        assert!(!settings.show_line_numbers);
        assert_eq!(settings.title, "script.js");
        assert!(settings.window_controls);
    }

    #[test]
    fn test_update_merges_only_given_fields() {
        let mut settings = EditorSettings::default();
        settings.update(SettingsUpdate {
            padding: Some(64),
            show_line_numbers: Some(true),
            ..Default::default()
        });

        assert_eq!(settings.padding, 64);
        assert!(settings.show_line_numbers);
        assert_eq!(settings.title, "script.js");
        assert_eq!(settings.theme_id, "midnight");
        assert!(settings.window_controls);
    }

    #[test]
    fn test_empty_update_is_a_no_op() {
        let mut settings = EditorSettings::default();
        settings.update(SettingsUpdate::default());
        assert_eq!(settings, EditorSettings::default());
    }

    #[test]
    fn test_update_passes_out_of_range_padding_through() {
        let mut settings = EditorSettings::default();
        settings.update(SettingsUpdate {
            padding: Some(5),
            ..Default::default()
        });
        assert_eq!(settings.padding, 5);
    }

    #[test]
    fn test_unknown_theme_resolves_to_first() {
        let mut settings = EditorSettings::default();
        settings.update(SettingsUpdate {
            theme_id: Some("does-not-exist".to_string()),
            ..Default::default()
        });
        assert_eq!(settings.resolve_theme().id, THEMES[0].id);
    }

    #[test]
    fn test_snap_padding_grid() {
        assert_eq!(snap_padding(16.0), 16);
        assert_eq!(snap_padding(19.0), 16);
        assert_eq!(snap_padding(21.0), 24);
        assert_eq!(snap_padding(64.0), 64);
        assert_eq!(snap_padding(0.0), 16);
        assert_eq!(snap_padding(500.0), 64);

        for raw in 0..200 {
            let snapped = snap_padding(raw as f64);
            assert!((PADDING_MIN..=PADDING_MAX).contains(&snapped));
            assert_eq!((snapped - PADDING_MIN) % PADDING_STEP, 0);
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{"padding": 48, "language": "python"}"#;
        let settings: EditorSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.padding, 48);
        assert_eq!(settings.language, CodeLanguage::Python);
        assert_eq!(settings.title, "script.js");
        assert!(settings.window_controls);
    }
}
