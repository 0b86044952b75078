//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (languages, themes, settings, messages)
//! - `controllers/` - Orchestration (snapshot session, layout, status)
//! - `services/` - Business operations (highlighting, rendering, rasterizing, enhancement, export)
//! - `infrastructure/` - External integrations (FLTK buffer, platform, config, logging, error)
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::snap::SnapController;
pub use domain::{CodeLanguage, EditorSettings, Message, SettingsUpdate};
pub use infrastructure::config::AppConfig;
pub use infrastructure::error::{AppError, Result};
