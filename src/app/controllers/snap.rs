//! Session state and the four user actions: enhance, copy, download, insert.
//!
//! All mutation happens here, on the UI thread. Network work is packaged
//! into jobs that a worker thread runs; the result comes back through a
//! `finish_*` call. Each action has its own busy flag and there is no
//! exclusion between different actions.

use std::sync::Arc;

use crate::app::controllers::layout::{ViewLayout, ViewTab};
use crate::app::controllers::status::{StatusRegister, StatusTicket};
use crate::app::domain::language::CodeLanguage;
use crate::app::domain::settings::{EditorSettings, SettingsUpdate};
use crate::app::domain::snippet::DEFAULT_CODE;
use crate::app::services::enhance::{EnhanceError, TextGenerator, enhance_code, explain_code};
use crate::app::services::export::{ExportError, ExportSink, ExportSinks, SinkKind};
use crate::app::services::host::HostError;
use crate::app::services::raster::{Artifact, PreviewSurface, RasterError, RasterOptions, Rasterizer};
use crate::app::services::render::{Renderer, VisualTree};

pub const ENHANCE_FAILED_ALERT: &str = "Could not enhance code. Check API Key or Network.";

/// What the UI should do after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    None,
    /// A status was shown; expire it with this ticket after the display window
    Status(StatusTicket),
    /// Show a blocking alert
    Alert(String),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BusyFlags {
    pub enhance: bool,
    pub copy: bool,
    pub download: bool,
    pub insert: bool,
}

/// Progress of an enhancement, reported from the worker as it happens.
#[derive(Debug, Clone, PartialEq)]
pub enum EnhanceStep {
    Enhanced(Result<String, EnhanceError>),
    /// Empty when the explanation request failed
    Explained(String),
}

/// Enhance then explain, off the UI thread.
pub struct EnhanceJob {
    generator: Arc<dyn TextGenerator>,
    code: String,
    language: CodeLanguage,
}

impl EnhanceJob {
    /// The enhanced code is reported before the explanation is requested.
    /// Nothing is explained when enhancing fails.
    pub fn run(self, mut report: impl FnMut(EnhanceStep)) {
        match enhance_code(self.generator.as_ref(), &self.code, self.language.id()) {
            Ok(code) => {
                report(EnhanceStep::Enhanced(Ok(code.clone())));
                report(EnhanceStep::Explained(explain_code(self.generator.as_ref(), &code)));
            }
            Err(e) => report(EnhanceStep::Enhanced(Err(e))),
        }
    }
}

/// Host insertion of an already rasterized card, off the UI thread.
pub struct InsertJob {
    sink: ExportSink,
    artifact: Artifact,
}

impl InsertJob {
    pub fn run(self) -> Result<&'static str, ExportError> {
        self.sink.export(&self.artifact)
    }
}

pub struct SnapController {
    code: String,
    settings: EditorSettings,
    explanation: Option<String>,
    status: StatusRegister,
    busy: BusyFlags,
    layout: ViewLayout,
    renderer: Renderer,
    rasterizer: Rasterizer,
    surface: PreviewSurface,
    sinks: ExportSinks,
    generator: Arc<dyn TextGenerator>,
}

impl SnapController {
    pub fn new(sinks: ExportSinks, generator: Arc<dyn TextGenerator>, width: i32) -> Self {
        let mut controller = Self {
            code: DEFAULT_CODE.to_string(),
            settings: EditorSettings::default(),
            explanation: None,
            status: StatusRegister::new(),
            busy: BusyFlags::default(),
            layout: ViewLayout::new(width),
            renderer: Renderer::new(),
            rasterizer: Rasterizer::new(),
            surface: PreviewSurface::new(),
            sinks,
            generator,
        };
        controller.rerender();
        controller
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.current()
    }

    pub fn busy(&self) -> BusyFlags {
        self.busy
    }

    pub fn layout(&self) -> ViewLayout {
        self.layout
    }

    pub fn primary_sink(&self) -> SinkKind {
        self.sinks.primary.kind()
    }

    /// The card currently on the preview surface.
    pub fn tree(&self) -> Option<&VisualTree> {
        self.surface.tree()
    }

    pub fn set_code(&mut self, code: &str) {
        if self.code == code {
            return;
        }
        self.code = code.to_string();
        self.rerender();
    }

    pub fn update_settings(&mut self, changes: SettingsUpdate) {
        self.settings.update(changes);
        self.rerender();
    }

    pub fn resize(&mut self, width: i32) {
        self.layout.resize(width);
        self.surface.set_visible(self.layout.preview_visible());
    }

    pub fn select_tab(&mut self, tab: ViewTab) {
        self.layout.select_tab(tab);
        self.surface.set_visible(self.layout.preview_visible());
    }

    fn rerender(&mut self) {
        let tree = self
            .renderer
            .render(&self.code, &self.settings, self.settings.resolve_theme());
        self.surface.mount(tree);
        self.surface.set_visible(self.layout.preview_visible());
    }

    /// On-screen preview image; may come from the cache.
    pub fn preview_image(&mut self) -> Result<Artifact, RasterError> {
        self.rasterizer.rasterize(&self.surface, RasterOptions::preview())
    }

    pub fn can_enhance(&self) -> bool {
        !self.busy.enhance && !self.code.trim().is_empty()
    }

    /// Start an enhancement. Clears the previous explanation.
    pub fn begin_enhance(&mut self) -> Option<EnhanceJob> {
        if !self.can_enhance() {
            return None;
        }
        self.busy.enhance = true;
        self.explanation = None;
        Some(EnhanceJob {
            generator: Arc::clone(&self.generator),
            code: self.code.clone(),
            language: self.settings.language,
        })
    }

    /// Apply the enhanced code. Enhancement stays busy until the
    /// explanation arrives.
    pub fn finish_enhance(&mut self, result: Result<String, EnhanceError>) -> Feedback {
        match result {
            Ok(code) => {
                self.code = code;
                self.rerender();
                if self.layout.is_narrow() {
                    self.select_tab(ViewTab::Preview);
                }
                Feedback::None
            }
            Err(e) => {
                self.busy.enhance = false;
                log::error!("Enhancement failed: {e}");
                Feedback::Alert(ENHANCE_FAILED_ALERT.to_string())
            }
        }
    }

    pub fn finish_explain(&mut self, explanation: String) {
        self.busy.enhance = false;
        self.explanation = (!explanation.is_empty()).then_some(explanation);
    }

    pub fn apply_enhance_step(&mut self, step: EnhanceStep) -> Feedback {
        match step {
            EnhanceStep::Enhanced(result) => self.finish_enhance(result),
            EnhanceStep::Explained(explanation) => {
                self.finish_explain(explanation);
                Feedback::None
            }
        }
    }

    /// Copy the card to the clipboard.
    pub fn copy(&mut self) -> Feedback {
        let Some(sink) = self.sinks.get(SinkKind::Clipboard).cloned() else {
            return Feedback::None;
        };
        if self.busy.copy {
            return Feedback::None;
        }
        self.busy.copy = true;
        let result = self
            .rasterize_for(SinkKind::Clipboard)
            .and_then(|artifact| sink.export(&artifact));
        self.busy.copy = false;
        self.settle(SinkKind::Clipboard, result)
    }

    /// Save the card as a PNG file.
    pub fn download(&mut self) -> Feedback {
        let Some(sink) = self.sinks.get(SinkKind::File).cloned() else {
            return Feedback::None;
        };
        if self.busy.download {
            return Feedback::None;
        }
        self.busy.download = true;
        let result = self
            .rasterize_for(SinkKind::File)
            .and_then(|artifact| sink.export(&artifact));
        self.busy.download = false;
        self.settle(SinkKind::File, result)
    }

    /// Rasterize for host insertion. `Err` carries the feedback when nothing
    /// needs to run.
    pub fn begin_insert(&mut self) -> Result<InsertJob, Feedback> {
        let Some(sink) = self.sinks.get(SinkKind::HostInsertion).cloned() else {
            let err = ExportError::Insert(HostError::NotDetected.to_string());
            return Err(self.settle(SinkKind::HostInsertion, Err(err)));
        };
        if self.busy.insert {
            return Err(Feedback::None);
        }
        self.busy.insert = true;
        if let Some(pending) = SinkKind::HostInsertion.pending_status() {
            self.status.show(pending);
        }

        match self.rasterize_for(SinkKind::HostInsertion) {
            Ok(artifact) => Ok(InsertJob { sink, artifact }),
            Err(e) => {
                self.busy.insert = false;
                Err(self.settle(SinkKind::HostInsertion, Err(e)))
            }
        }
    }

    pub fn finish_insert(&mut self, result: Result<&'static str, ExportError>) -> Feedback {
        self.busy.insert = false;
        self.settle(SinkKind::HostInsertion, result)
    }

    /// Clear the status if `ticket` is still current.
    pub fn expire_status(&mut self, ticket: StatusTicket) -> bool {
        self.status.expire(ticket)
    }

    fn rasterize_for(&mut self, kind: SinkKind) -> Result<Artifact, ExportError> {
        self.rasterizer
            .rasterize(&self.surface, RasterOptions::export())
            .map_err(|e| ExportError::from_raster(kind, e))
    }

    fn settle(&mut self, kind: SinkKind, result: Result<&'static str, ExportError>) -> Feedback {
        match result {
            Ok(text) => Feedback::Status(self.status.show(text)),
            Err(e) => {
                log::error!("{kind:?} export failed: {e:?}");
                if kind.pending_status().is_some() {
                    self.status.clear();
                }
                Feedback::Alert(e.to_string())
            }
        }
    }
}
