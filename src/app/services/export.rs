//! Export sinks: where a rasterized card goes.
//!
//! The primary sink is chosen once at startup. Inside a slide host the card
//! is inserted into the active slide; everywhere else it goes to the system
//! clipboard. Saving a PNG file is always available as a second sink.

use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::app::infrastructure::platform::epoch_millis;
use crate::app::services::host::{HostAutomation, insert_image_to_slide};
use crate::app::services::raster::{Artifact, RasterError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    /// Any clipboard failure, including a hidden preview. The cause is only logged.
    #[error("Could not copy. Please ensure you are on the Preview tab.")]
    Copy(String),

    #[error("Switch to Preview tab to download")]
    DownloadNotMounted,

    /// The card is on screen but could not be drawn.
    #[error("Could not create the card image: {0}")]
    Render(String),

    #[error("Could not save image: {0}")]
    Save(String),

    #[error("Failed to insert into Slide: {0}")]
    Insert(String),
}

impl ExportError {
    /// Map a rasterization failure to the message for `kind`.
    pub fn from_raster(kind: SinkKind, err: RasterError) -> Self {
        match (kind, err) {
            (SinkKind::Clipboard, RasterError::NotMounted) => {
                ExportError::Copy(RasterError::NotMounted.to_string())
            }
            (SinkKind::File, RasterError::NotMounted) => ExportError::DownloadNotMounted,
            (SinkKind::Clipboard | SinkKind::File, e) => ExportError::Render(e.to_string()),
            (SinkKind::HostInsertion, RasterError::NotMounted) => {
                ExportError::Insert("Preview not active".to_string())
            }
            (SinkKind::HostInsertion, e) => ExportError::Insert(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Clipboard,
    File,
    HostInsertion,
}

impl SinkKind {
    pub fn success_status(self) -> &'static str {
        match self {
            SinkKind::Clipboard => "Copied!",
            SinkKind::File => "Saved!",
            SinkKind::HostInsertion => "Inserted!",
        }
    }

    /// Status shown while the export runs, if any.
    pub fn pending_status(self) -> Option<&'static str> {
        match self {
            SinkKind::HostInsertion => Some("Inserting..."),
            _ => None,
        }
    }

    /// Footer button label.
    pub fn label(self) -> &'static str {
        match self {
            SinkKind::Clipboard => "Copy",
            SinkKind::File => "PNG",
            SinkKind::HostInsertion => "Insert to Slide",
        }
    }
}

/// System clipboard seam.
pub trait ClipboardWriter: Send + Sync {
    fn write_image(&self, artifact: &Artifact) -> Result<(), String>;
}

/// Writes images through `arboard`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_image(&self, artifact: &Artifact) -> Result<(), String> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| e.to_string())?;
        clipboard
            .set_image(arboard::ImageData {
                width: artifact.width as usize,
                height: artifact.height as usize,
                bytes: Cow::Borrowed(artifact.rgba.as_slice()),
            })
            .map_err(|e| e.to_string())
    }
}

/// `codesnap-<epoch-ms>.png`
pub fn snapshot_file_name(millis: u128) -> String {
    format!("codesnap-{millis}.png")
}

/// Saves PNG files into one directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn save(&self, artifact: &Artifact) -> Result<PathBuf, ExportError> {
        let png = artifact
            .to_png()
            .map_err(|e| ExportError::Save(e.to_string()))?;
        let path = self.dir.join(snapshot_file_name(epoch_millis()));
        fs::write(&path, png).map_err(|e| ExportError::Save(e.to_string()))?;
        log::info!("Saved card to {}", path.display());
        Ok(path)
    }
}

/// One output strategy, ready to receive an image.
#[derive(Clone)]
pub enum ExportSink {
    Clipboard(Arc<dyn ClipboardWriter>),
    File(FileSink),
    HostInsertion(Arc<dyn HostAutomation>),
}

impl ExportSink {
    pub fn kind(&self) -> SinkKind {
        match self {
            ExportSink::Clipboard(_) => SinkKind::Clipboard,
            ExportSink::File(_) => SinkKind::File,
            ExportSink::HostInsertion(_) => SinkKind::HostInsertion,
        }
    }

    /// Deliver `artifact`; returns the status text for success.
    ///
    /// Host insertion talks to the host over the network and blocks, so
    /// callers run that variant off the UI thread.
    pub fn export(&self, artifact: &Artifact) -> Result<&'static str, ExportError> {
        match self {
            ExportSink::Clipboard(clipboard) => {
                clipboard
                    .write_image(artifact)
                    .map_err(ExportError::Copy)?;
            }
            ExportSink::File(files) => {
                files.save(artifact)?;
            }
            ExportSink::HostInsertion(host) => {
                let data_url = artifact
                    .to_data_url()
                    .map_err(|e| ExportError::Insert(e.to_string()))?;
                insert_image_to_slide(Some(host.as_ref()), &data_url)
                    .map_err(|e| ExportError::Insert(e.to_string()))?;
            }
        }
        Ok(self.kind().success_status())
    }
}

/// The sinks offered for this session.
#[derive(Clone)]
pub struct ExportSinks {
    /// Host insertion when a host was detected, the clipboard otherwise
    pub primary: ExportSink,
    pub file: ExportSink,
}

impl ExportSinks {
    pub fn select(
        host: Option<Arc<dyn HostAutomation>>,
        clipboard: Arc<dyn ClipboardWriter>,
        download_dir: PathBuf,
    ) -> Self {
        let primary = match host {
            Some(host) => ExportSink::HostInsertion(host),
            None => ExportSink::Clipboard(clipboard),
        };
        log::info!("Primary export sink: {:?}", primary.kind());
        Self {
            primary,
            file: ExportSink::File(FileSink::new(download_dir)),
        }
    }

    pub fn get(&self, kind: SinkKind) -> Option<&ExportSink> {
        [&self.primary, &self.file]
            .into_iter()
            .find(|sink| sink.kind() == kind)
    }
}
