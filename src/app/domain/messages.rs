use crate::app::controllers::layout::ViewTab;
use crate::app::controllers::snap::EnhanceStep;
use crate::app::controllers::status::StatusTicket;
use crate::app::services::export::ExportError;

use super::settings::SettingsUpdate;

/// All messages that can be sent through the FLTK channel.
/// Widget callbacks and worker threads send these; the dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    // Editor panel
    CodeChanged,
    Enhance,

    // Preview toolbar
    SettingsChanged(SettingsUpdate),

    // Layout
    SelectTab(ViewTab),
    WindowResized(i32),

    // Export
    Copy,
    Download,
    Insert,

    // Worker results
    EnhanceProgress(EnhanceStep),
    InsertFinished(Result<&'static str, ExportError>),
    StatusExpired(StatusTicket),

    WindowClose,
}
