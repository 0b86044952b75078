//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - FLTK buffer utilities
//! - Platform paths, clock and dark-mode detection
//! - Startup configuration and logging
//! - Error types

pub mod buffer;
pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
