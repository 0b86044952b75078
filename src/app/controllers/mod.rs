//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the UI:
//! - Snapshot session and user actions
//! - Responsive panel layout
//! - Transient status text

pub mod layout;
pub mod snap;
pub mod status;
