//! Slide host integration.
//!
//! When CodeSnap runs next to an office suite that exposes an automation
//! bridge, the card can be inserted straight into the active slide. The host
//! is detected once at startup and injected as an optional trait object.

use std::sync::{Arc, LazyLock};

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app::infrastructure::config::AppConfig;
use crate::app::infrastructure::platform::epoch_millis;

/// Picture placement on the slide, in points
pub const PICTURE_LEFT: f32 = 100.0;
pub const PICTURE_TOP: f32 = 100.0;
/// Office automation booleans: msoFalse / msoTrue
const MSO_FALSE: i32 = 0;
const MSO_TRUE: i32 = -1;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("Slide host environment not detected.")]
    NotDetected,

    #[error("Host file system API not available.")]
    FileSystemUnavailable,

    #[error("Host could not write the image to {0}.")]
    WriteRejected(String),

    #[error("No active slide selected.")]
    NoActiveSlide,

    #[error("Host bridge request failed: {0}")]
    Bridge(String),
}

/// Opaque slide reference handed out by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideHandle(pub String);

/// Opaque shape reference handed out by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeHandle(pub String);

/// Which optional host sub-APIs are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HostCapabilities {
    #[serde(default)]
    pub file_system: bool,
    #[serde(default)]
    pub environment: bool,
}

/// `AddPicture(FileName, LinkToFile, SaveWithDocument, Left, Top)` arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PictureRequest {
    pub file_path: String,
    pub link_to_file: i32,
    pub save_with_document: i32,
    pub left: f32,
    pub top: f32,
}

/// Automation API exposed by the slide host.
pub trait HostAutomation: Send + Sync {
    fn capabilities(&self) -> Result<HostCapabilities, HostError>;
    fn temp_path(&self) -> Result<String, HostError>;
    /// Decode `base64` and write it to `path`; `false` when the host refuses.
    fn write_base64_to_file(&self, path: &str, base64: &str) -> Result<bool, HostError>;
    fn active_slide(&self) -> Result<Option<SlideHandle>, HostError>;
    fn add_picture(&self, slide: &SlideHandle, picture: &PictureRequest) -> Result<ShapeHandle, HostError>;
    fn select_shape(&self, shape: &ShapeHandle) -> Result<(), HostError>;
}

static DATA_URL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:image/[a-z]+;base64,").expect("valid data URL pattern")
});

/// Drop the `data:image/...;base64,` header, leaving the raw payload.
pub fn strip_data_url_prefix(data_url: &str) -> &str {
    match DATA_URL_PREFIX.find(data_url) {
        Some(m) => &data_url[m.end()..],
        None => data_url,
    }
}

/// Write the encoded image to the host's temp directory and place it on the
/// active slide. Returns the new shape, already selected.
pub fn insert_image_to_slide(
    host: Option<&dyn HostAutomation>,
    data_url: &str,
) -> Result<ShapeHandle, HostError> {
    let host = host.ok_or(HostError::NotDetected)?;

    let caps = host.capabilities()?;
    if !caps.file_system || !caps.environment {
        return Err(HostError::FileSystemUnavailable);
    }

    let temp_dir = host.temp_path()?;
    let file_path = format!(
        "{}/codesnap_temp_{}.png",
        temp_dir.trim_end_matches(['/', '\\']),
        epoch_millis()
    );

    let payload = strip_data_url_prefix(data_url);
    if !host.write_base64_to_file(&file_path, payload)? {
        return Err(HostError::WriteRejected(file_path));
    }

    let slide = host.active_slide()?.ok_or(HostError::NoActiveSlide)?;
    let shape = host.add_picture(
        &slide,
        &PictureRequest {
            file_path,
            link_to_file: MSO_FALSE,
            save_with_document: MSO_TRUE,
            left: PICTURE_LEFT,
            top: PICTURE_TOP,
        },
    )?;
    host.select_shape(&shape)?;

    log::info!("Inserted card into slide {} as shape {}", slide.0, shape.0);
    Ok(shape)
}

/// Startup check for the slide host. Evaluated once; the result is kept for
/// the whole session.
pub fn detect_host(config: &AppConfig) -> Option<Arc<dyn HostAutomation>> {
    let url = config.host_bridge_url.as_deref()?.trim();
    if url.is_empty() {
        return None;
    }
    log::info!("Slide host bridge configured at {url}");
    Some(Arc::new(HttpHostBridge::new(url, config.request_timeout_secs)))
}

// --- HTTP bridge ---

#[derive(Deserialize)]
struct TempPathReply {
    path: String,
}

#[derive(Serialize)]
struct WriteFileBody<'a> {
    path: &'a str,
    base64: &'a str,
}

#[derive(Deserialize)]
struct WriteFileReply {
    #[serde(default)]
    ok: bool,
}

#[derive(Deserialize)]
struct ActiveSlideReply {
    #[serde(default)]
    slide: Option<String>,
}

#[derive(Deserialize)]
struct AddPictureReply {
    shape: String,
}

/// Talks JSON over HTTP to the automation bridge running inside the host.
#[derive(Debug, Clone)]
pub struct HttpHostBridge {
    base_url: String,
    timeout_secs: u64,
}

impl HttpHostBridge {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, HostError> {
        let response = minreq::get(self.url(path))
            .with_timeout(self.timeout_secs)
            .send()
            .map_err(|e| HostError::Bridge(e.to_string()))?;
        Self::decode(response)
    }

    fn post<B: Serialize, T: for<'de> Deserialize<'de>>(&self, path: &str, body: &B) -> Result<T, HostError> {
        let response = minreq::post(self.url(path))
            .with_timeout(self.timeout_secs)
            .with_json(body)
            .map_err(|e| HostError::Bridge(e.to_string()))?
            .send()
            .map_err(|e| HostError::Bridge(e.to_string()))?;
        Self::decode(response)
    }

    fn decode<T: for<'de> Deserialize<'de>>(response: minreq::Response) -> Result<T, HostError> {
        if !(200..300).contains(&response.status_code) {
            return Err(HostError::Bridge(format!(
                "{} {}",
                response.status_code, response.reason_phrase
            )));
        }
        let body = response
            .as_str()
            .map_err(|e| HostError::Bridge(e.to_string()))?;
        serde_json::from_str(body).map_err(|e| HostError::Bridge(e.to_string()))
    }
}

impl HostAutomation for HttpHostBridge {
    fn capabilities(&self) -> Result<HostCapabilities, HostError> {
        self.get("/capabilities")
    }

    fn temp_path(&self) -> Result<String, HostError> {
        let reply: TempPathReply = self.get("/env/temp-path")?;
        Ok(reply.path)
    }

    fn write_base64_to_file(&self, path: &str, base64: &str) -> Result<bool, HostError> {
        let reply: WriteFileReply = self.post("/fs/write-base64", &WriteFileBody { path, base64 })?;
        Ok(reply.ok)
    }

    fn active_slide(&self) -> Result<Option<SlideHandle>, HostError> {
        let reply: ActiveSlideReply = self.get("/slides/active")?;
        Ok(reply.slide.map(SlideHandle))
    }

    fn add_picture(&self, slide: &SlideHandle, picture: &PictureRequest) -> Result<ShapeHandle, HostError> {
        let reply: AddPictureReply = self.post(&format!("/slides/{}/pictures", slide.0), picture)?;
        Ok(ShapeHandle(reply.shape))
    }

    fn select_shape(&self, shape: &ShapeHandle) -> Result<(), HostError> {
        let _: serde_json::Value = self.post(&format!("/shapes/{}/select", shape.0), &serde_json::json!({}))?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::sync::Mutex;

    /// In-memory host used by tests.
    pub struct FakeHost {
        pub caps: HostCapabilities,
        pub accept_writes: bool,
        pub slide: Option<SlideHandle>,
        pub written: Mutex<Vec<(String, String)>>,
        pub pictures: Mutex<Vec<PictureRequest>>,
        pub selected: Mutex<Vec<ShapeHandle>>,
    }

    impl FakeHost {
        pub fn ready() -> Self {
            Self {
                caps: HostCapabilities { file_system: true, environment: true },
                accept_writes: true,
                slide: Some(SlideHandle("slide-1".to_string())),
                written: Mutex::new(Vec::new()),
                pictures: Mutex::new(Vec::new()),
                selected: Mutex::new(Vec::new()),
            }
        }
    }

    impl HostAutomation for FakeHost {
        fn capabilities(&self) -> Result<HostCapabilities, HostError> {
            Ok(self.caps)
        }

        fn temp_path(&self) -> Result<String, HostError> {
            Ok("/tmp/".to_string())
        }

        fn write_base64_to_file(&self, path: &str, base64: &str) -> Result<bool, HostError> {
            self.written.lock().unwrap().push((path.to_string(), base64.to_string()));
            Ok(self.accept_writes)
        }

        fn active_slide(&self) -> Result<Option<SlideHandle>, HostError> {
            Ok(self.slide.clone())
        }

        fn add_picture(&self, _slide: &SlideHandle, picture: &PictureRequest) -> Result<ShapeHandle, HostError> {
            self.pictures.lock().unwrap().push(picture.clone());
            Ok(ShapeHandle("shape-7".to_string()))
        }

        fn select_shape(&self, shape: &ShapeHandle) -> Result<(), HostError> {
            self.selected.lock().unwrap().push(shape.clone());
            Ok(())
        }
    }
}
