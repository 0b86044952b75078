//! Turn the mounted card into pixels.
//!
//! The card tree is serialized to SVG and drawn with resvg. Exports always
//! rasterize at 2x and bypass the preview cache so the image reflects the
//! card as it is right now. Cards too tall for that ratio are drawn at the
//! largest ratio that still fits.

pub mod svg;

use std::sync::{Arc, LazyLock};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use resvg::usvg::fontdb;
use thiserror::Error;

use crate::app::services::render::VisualTree;

/// Supersampling factor for exported images
pub const EXPORT_PIXEL_RATIO: f32 = 2.0;

/// Largest side, in device pixels, we are willing to allocate
const MAX_DIMENSION: u32 = 16_384;

/// Loading system fonts is slow, so the database is built once and shared.
static FONTDB: LazyLock<Arc<fontdb::Database>> = LazyLock::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    log::debug!("Loaded {} font faces for card text", db.len());
    Arc::new(db)
});

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RasterError {
    #[error("The preview is not visible")]
    NotMounted,

    #[error("Could not build card image: {0}")]
    Svg(String),

    #[error("Card size {0}x{1} is out of range")]
    Size(u32, u32),

    #[error("Could not encode PNG: {0}")]
    Encode(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    pub pixel_ratio: f32,
    /// Skip the cached image and draw again
    pub cache_bust: bool,
}

impl RasterOptions {
    /// Settings used by every export sink.
    pub fn export() -> Self {
        Self {
            pixel_ratio: EXPORT_PIXEL_RATIO,
            cache_bust: true,
        }
    }

    /// On-screen preview, allowed to reuse the last drawing.
    pub fn preview() -> Self {
        Self {
            pixel_ratio: 1.0,
            cache_bust: false,
        }
    }
}

/// Straight (non-premultiplied) RGBA image.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Artifact {
    pub fn to_png(&self) -> Result<Vec<u8>, RasterError> {
        use image::ImageEncoder;
        use image::codecs::png::PngEncoder;

        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(&self.rgba, self.width, self.height, image::ExtendedColorType::Rgba8)
            .map_err(|e| RasterError::Encode(e.to_string()))?;
        Ok(png)
    }

    /// PNG as an inline `data:` URL.
    pub fn to_data_url(&self) -> Result<String, RasterError> {
        let png = self.to_png()?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }
}

/// The place the card is shown. Only a visible surface can be rasterized.
#[derive(Debug, Clone, Default)]
pub struct PreviewSurface {
    tree: Option<VisualTree>,
    visible: bool,
}

impl PreviewSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a freshly rendered card on the surface.
    pub fn mount(&mut self, tree: VisualTree) {
        self.tree = Some(tree);
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The card root, if it is currently on screen.
    pub fn root(&self) -> Option<&VisualTree> {
        if self.visible { self.tree.as_ref() } else { None }
    }

    /// The rendered card regardless of visibility.
    pub fn tree(&self) -> Option<&VisualTree> {
        self.tree.as_ref()
    }
}

struct CacheEntry {
    tree: VisualTree,
    pixel_ratio: f32,
    artifact: Artifact,
}

#[derive(Default)]
pub struct Rasterizer {
    cache: Option<CacheEntry>,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rasterize whatever is mounted on `surface`.
    pub fn rasterize(
        &mut self,
        surface: &PreviewSurface,
        options: RasterOptions,
    ) -> Result<Artifact, RasterError> {
        let tree = surface.root().ok_or(RasterError::NotMounted)?;

        if !options.cache_bust
            && let Some(entry) = &self.cache
            && entry.pixel_ratio == options.pixel_ratio
            && entry.tree == *tree
        {
            return Ok(entry.artifact.clone());
        }

        let artifact = rasterize_tree(tree, options.pixel_ratio)?;
        self.cache = Some(CacheEntry {
            tree: tree.clone(),
            pixel_ratio: options.pixel_ratio,
            artifact: artifact.clone(),
        });
        Ok(artifact)
    }
}

/// Largest ratio up to `pixel_ratio` at which a `width` x `height` card
/// stays within [`MAX_DIMENSION`] on both sides.
pub fn fit_pixel_ratio(width: f32, height: f32, pixel_ratio: f32) -> f32 {
    let limit = MAX_DIMENSION as f32;
    pixel_ratio.min(limit / width).min(limit / height)
}

/// Draw a card tree at the given device pixel ratio, lowered if needed.
pub fn rasterize_tree(tree: &VisualTree, pixel_ratio: f32) -> Result<Artifact, RasterError> {
    let ratio = fit_pixel_ratio(tree.width(), tree.height(), pixel_ratio);
    if ratio < pixel_ratio {
        log::warn!(
            "Card {}x{} is too large for {pixel_ratio}x, drawing at {ratio:.3}x",
            tree.width(),
            tree.height()
        );
    }
    let width = ((tree.width() * ratio).ceil() as u32).min(MAX_DIMENSION);
    let height = ((tree.height() * ratio).ceil() as u32).min(MAX_DIMENSION);
    if width == 0 || height == 0 {
        return Err(RasterError::Size(width, height));
    }

    let svg = svg::to_svg(tree);
    let opts = resvg::usvg::Options {
        fontdb: FONTDB.clone(),
        ..Default::default()
    };
    let svg_tree =
        resvg::usvg::Tree::from_str(&svg, &opts).map_err(|e| RasterError::Svg(e.to_string()))?;

    let mut pixmap =
        resvg::tiny_skia::Pixmap::new(width, height).ok_or(RasterError::Size(width, height))?;
    resvg::render(
        &svg_tree,
        resvg::tiny_skia::Transform::from_scale(ratio, ratio),
        &mut pixmap.as_mut(),
    );

    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    log::debug!("Rasterized card at {ratio}x: {width}x{height}");
    Ok(Artifact { width, height, rgba })
}
