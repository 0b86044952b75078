//! CodeSnap: paste code, get a styled, syntax-highlighted card ready for slides.

pub mod app;
pub mod ui;
