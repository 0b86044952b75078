use fltk::{
    enums::ColorDepth,
    frame::Frame,
    group::Scroll,
    image::RgbImage,
    prelude::*,
};

use crate::app::services::raster::Artifact;

/// Gap between the scroll area edge and the card
const PREVIEW_MARGIN: i32 = 16;

/// Position of the card inside the scroll area: centered when it fits,
/// pinned to the margin otherwise.
pub fn card_origin(area: (i32, i32, i32, i32), card: (i32, i32)) -> (i32, i32) {
    let (x, y, w, h) = area;
    let (cw, ch) = card;
    let left = if cw + 2 * PREVIEW_MARGIN <= w { x + (w - cw) / 2 } else { x + PREVIEW_MARGIN };
    let top = if ch + 2 * PREVIEW_MARGIN <= h { y + (h - ch) / 2 } else { y + PREVIEW_MARGIN };
    (left, top)
}

/// Put the rasterized card on screen.
pub fn show_artifact(
    scroll: &mut Scroll,
    frame: &mut Frame,
    artifact: &Artifact,
) -> Result<(), FltkError> {
    let (w, h) = (artifact.width as i32, artifact.height as i32);
    let image = RgbImage::new(&artifact.rgba, w, h, ColorDepth::Rgba8)?;
    let (x, y) = card_origin((scroll.x(), scroll.y(), scroll.w(), scroll.h()), (w, h));
    frame.resize(x, y, w, h);
    frame.set_image(Some(image));
    scroll.redraw();
    Ok(())
}
