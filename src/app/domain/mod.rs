//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Languages, themes and the default snippet
//! - Card settings
//! - Message types for the event system

pub mod language;
pub mod messages;
pub mod settings;
pub mod snippet;
pub mod theme;

pub use language::CodeLanguage;
pub use messages::Message;
pub use settings::{EditorSettings, SettingsUpdate};
pub use theme::{CodeTheme, THEMES};
