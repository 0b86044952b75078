//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Syntax highlighting
//! - Card rendering and rasterization
//! - AI enhancement
//! - Export sinks and slide host integration

pub mod enhance;
pub mod export;
pub mod host;
pub mod raster;
pub mod render;
pub mod syntax;
