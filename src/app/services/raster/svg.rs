//! Serialize a card tree into an SVG document for resvg.

use std::fmt::Write;

use crate::app::domain::theme::{Background, Rgba};
use crate::app::services::render::layout::{
    CARD_RADIUS, CHAR_WIDTH, DOT_DIAMETER, DOT_GAP, FONT_FAMILY, FONT_SIZE, LINE_HEIGHT,
    PANEL_RADIUS, TITLE_BAR_PADDING_X, TITLE_FONT_SIZE,
};
use crate::app::services::render::{TitleBar, VisualTree, WINDOW_DOTS};

/// Panel fill over the card background (black at 20%)
const PANEL_FILL: Rgba = Rgba::rgba(0, 0, 0, 51);
/// Panel outline (white at 10%)
const PANEL_STROKE: Rgba = Rgba::rgba(255, 255, 255, 26);
/// Title bar tint (white at 5%)
const TITLE_BAR_FILL: Rgba = Rgba::rgba(255, 255, 255, 13);

pub fn to_svg(tree: &VisualTree) -> String {
    let g = &tree.geometry;
    let mut svg = String::with_capacity(4096);

    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = num(g.width),
        h = num(g.height),
    );

    write_background(&mut svg, tree);

    // Window panel
    let p = g.panel;
    let _ = write!(
        svg,
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" {} {}/>"#,
        num(p.x),
        num(p.y),
        num(p.w),
        num(p.h),
        num(PANEL_RADIUS),
        paint("fill", PANEL_FILL),
        paint("stroke", PANEL_STROKE),
    );

    if let (Some(bar), Some(rect)) = (&tree.title_bar, g.title_bar) {
        write_title_bar(&mut svg, bar, rect.x, rect.y, rect.w, rect.h);
    }

    write_code(&mut svg, tree);

    svg.push_str("</svg>");
    svg
}

fn write_background(svg: &mut String, tree: &VisualTree) {
    let g = &tree.geometry;
    let fill = match tree.background {
        Background::Transparent => return,
        Background::Solid(color) => paint("fill", color),
        Background::LinearGradient { angle_deg, stops } => {
            let (x1, y1, x2, y2) = gradient_vector(angle_deg);
            let _ = write!(
                svg,
                r#"<defs><linearGradient id="card-bg" x1="{}" y1="{}" x2="{}" y2="{}">"#,
                num(x1),
                num(y1),
                num(x2),
                num(y2),
            );
            for stop in stops {
                let _ = write!(
                    svg,
                    r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
                    num(stop.offset),
                    stop.color.hex(),
                    num(stop.color.opacity()),
                );
            }
            svg.push_str("</linearGradient></defs>");
            r#"fill="url(#card-bg)""#.to_string()
        }
    };
    let _ = write!(
        svg,
        r#"<rect x="0" y="0" width="{}" height="{}" rx="{}" {}/>"#,
        num(g.width),
        num(g.height),
        num(CARD_RADIUS),
        fill,
    );
}

fn write_title_bar(svg: &mut String, bar: &TitleBar, x: f32, y: f32, w: f32, h: f32) {
    let _ = write!(
        svg,
        r#"<rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
        num(x),
        num(y),
        num(w),
        num(h),
        paint("fill", TITLE_BAR_FILL),
    );
    let _ = write!(
        svg,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
        num(x),
        num(y + h),
        num(x + w),
        num(y + h),
        paint("stroke", TITLE_BAR_FILL),
    );

    let cy = y + h / 2.0;
    if bar.controls {
        let r = DOT_DIAMETER / 2.0;
        for (i, color) in WINDOW_DOTS.iter().enumerate() {
            let cx = x + TITLE_BAR_PADDING_X + r + i as f32 * (DOT_DIAMETER + DOT_GAP);
            let _ = write!(
                svg,
                r#"<circle cx="{}" cy="{}" r="{}" {}/>"#,
                num(cx),
                num(cy),
                num(r),
                paint("fill", *color),
            );
        }
    }

    if let Some(title) = &bar.title {
        let _ = write!(
            svg,
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" text-anchor="middle" dominant-baseline="central" {}>{}</text>"#,
            num(x + w / 2.0),
            num(cy),
            FONT_FAMILY,
            num(TITLE_FONT_SIZE),
            paint("fill", bar.title_color),
            escape(title),
        );
    }
}

fn write_code(svg: &mut String, tree: &VisualTree) {
    let g = &tree.geometry;
    let code = &tree.code;
    let top = g.code_area.y + code.inner_padding;
    let left = g.code_area.x + code.inner_padding;
    let text_x = left + g.gutter_width;
    // Baseline sits a little below the middle of the line box
    let baseline_offset = (LINE_HEIGHT + FONT_SIZE) / 2.0 - 2.0;

    for (i, line) in code.lines.iter().enumerate() {
        let baseline = top + i as f32 * LINE_HEIGHT + baseline_offset;

        if code.line_numbers && !line.continuation {
            let _ = write!(
                svg,
                r#"<text x="{}" y="{}" font-family="{}" font-size="{}" text-anchor="end" {}>{}</text>"#,
                num(text_x - FONT_SIZE),
                num(baseline),
                FONT_FAMILY,
                num(FONT_SIZE),
                paint("fill", code.gutter_color),
                line.number,
            );
        }

        if line.spans.is_empty() {
            continue;
        }

        let _ = write!(
            svg,
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" xml:space="preserve">"#,
            num(text_x),
            num(baseline),
            FONT_FAMILY,
            num(FONT_SIZE),
        );
        let mut column = 0usize;
        for span in &line.spans {
            // Pin every span to its grid column so proportional fallback fonts
            // cannot drift the layout
            let _ = write!(
                svg,
                r#"<tspan x="{}" {}{}{}>{}</tspan>"#,
                num(text_x + column as f32 * CHAR_WIDTH),
                paint("fill", span.color),
                if span.bold { r#" font-weight="bold""# } else { "" },
                if span.italic { r#" font-style="italic""# } else { "" },
                escape(&span.text),
            );
            column += span.text.chars().count();
        }
        svg.push_str("</text>");
    }
}

/// Map a CSS gradient angle onto objectBoundingBox coordinates.
pub fn gradient_vector(angle_deg: f32) -> (f32, f32, f32, f32) {
    let rad = angle_deg.to_radians();
    let (dx, dy) = (rad.sin() * 0.5, -rad.cos() * 0.5);
    (0.5 - dx, 0.5 - dy, 0.5 + dx, 0.5 + dy)
}

fn paint(attr: &str, color: Rgba) -> String {
    if color.a == 255 {
        format!(r#"{attr}="{}""#, color.hex())
    } else {
        format!(r#"{attr}="{}" {attr}-opacity="{}""#, color.hex(), num(color.opacity()))
    }
}

/// Compact number formatting: integers without a fraction, others to 3 places.
fn num(v: f32) -> String {
    if (v - v.round()).abs() < 0.0005 {
        format!("{}", v.round() as i64)
    } else {
        let s = format!("{v:.3}");
        s.trim_end_matches('0').to_string()
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}
