//! Fixed card metrics, in CSS pixels at 1x.

pub const FONT_SIZE: f32 = 14.0;
pub const LINE_HEIGHT: f32 = 22.0;
/// Monospace advance, 0.6em
pub const CHAR_WIDTH: f32 = FONT_SIZE * 0.6;
pub const FONT_FAMILY: &str = "'JetBrains Mono', 'Fira Code', 'DejaVu Sans Mono', Menlo, Consolas, monospace";

/// Padding inside the code block, independent of the card padding.
pub const CODE_PADDING: f32 = 24.0;

pub const TITLE_BAR_HEIGHT: f32 = 36.0;
pub const TITLE_BAR_PADDING_X: f32 = 16.0;
pub const TITLE_FONT_SIZE: f32 = 12.0;
pub const TITLE_CHAR_WIDTH: f32 = TITLE_FONT_SIZE * 0.6;
pub const DOT_DIAMETER: f32 = 12.0;
pub const DOT_GAP: f32 = 8.0;
/// Three dots plus the gap that keeps the title clear of them
pub const DOTS_WIDTH: f32 = DOT_DIAMETER * 3.0 + DOT_GAP * 3.0;

pub const CARD_RADIUS: f32 = 12.0;
pub const PANEL_RADIUS: f32 = 8.0;
pub const MIN_CARD_WIDTH: f32 = 300.0;

/// Code lines longer than this continue on the next row.
pub const WRAP_COLUMNS: usize = 100;
/// A long title may widen the panel up to the width of a full code row.
pub const MAX_TITLE_BAR_WIDTH: f32 = CODE_PADDING * 2.0 + WRAP_COLUMNS as f32 * CHAR_WIDTH;

/// Gutter is at least 2em wide, plus 1em gap before the code.
pub const GUTTER_MIN_WIDTH: f32 = FONT_SIZE * 2.0;
pub const GUTTER_GAP: f32 = FONT_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Resolved positions of the card parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardGeometry {
    pub width: f32,
    pub height: f32,
    /// Translucent window panel inside the card padding
    pub panel: Rect,
    /// Title bar strip at the top of the panel, if shown
    pub title_bar: Option<Rect>,
    /// Area holding gutter + code, including the code padding
    pub code_area: Rect,
    /// Width reserved for line numbers (zero when hidden)
    pub gutter_width: f32,
}

/// Width of the line-number gutter for `line_count` lines, gap included.
pub fn gutter_width(line_count: usize) -> f32 {
    let digits = line_count.max(1).to_string().len() as f32;
    (digits * CHAR_WIDTH).max(GUTTER_MIN_WIDTH) + GUTTER_GAP
}

/// Space kept free on both sides of the centered title.
pub fn title_inset(controls: bool) -> f32 {
    TITLE_BAR_PADDING_X + if controls { DOTS_WIDTH } else { 0.0 }
}

/// Title bar width that shows `columns` title characters in full.
pub fn title_bar_width(columns: usize, controls: bool) -> f32 {
    title_inset(controls) * 2.0 + columns as f32 * TITLE_CHAR_WIDTH
}

/// How many title characters fit in a bar `width` wide.
pub fn title_capacity(width: f32, controls: bool) -> usize {
    let free = width - title_inset(controls) * 2.0;
    ((free / TITLE_CHAR_WIDTH) + 1e-3).floor().max(0.0) as usize
}

/// Lay the card out around the code.
///
/// `row_count` is the number of drawn rows after wrapping, `line_count` the
/// number of source lines (it sizes the gutter). `title_bar` is the width
/// the title bar would like, or `None` when there is no bar.
pub fn measure(
    padding: f32,
    max_columns: usize,
    row_count: usize,
    line_count: usize,
    title_bar: Option<f32>,
    line_numbers: bool,
) -> CardGeometry {
    let gutter = if line_numbers { gutter_width(line_count) } else { 0.0 };
    let code_w = CODE_PADDING * 2.0 + gutter + max_columns as f32 * CHAR_WIDTH;
    let code_h = CODE_PADDING * 2.0 + row_count.max(1) as f32 * LINE_HEIGHT;
    let bar_w = title_bar.map_or(0.0, |w| w.min(MAX_TITLE_BAR_WIDTH));
    let bar_h = if title_bar.is_some() { TITLE_BAR_HEIGHT } else { 0.0 };

    let panel_w = code_w.max(bar_w).max(MIN_CARD_WIDTH - padding * 2.0);
    let width = panel_w + padding * 2.0;
    let height = code_h + bar_h + padding * 2.0;

    let panel = Rect { x: padding, y: padding, w: panel_w, h: bar_h + code_h };
    let title_bar = title_bar.map(|_| Rect { x: padding, y: padding, w: panel_w, h: bar_h });
    let code_area = Rect { x: padding, y: padding + bar_h, w: panel_w, h: code_h };

    CardGeometry {
        width,
        height,
        panel,
        title_bar,
        code_area,
        gutter_width: gutter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gutter_has_minimum_width() {
        assert_eq!(gutter_width(1), GUTTER_MIN_WIDTH + GUTTER_GAP);
        assert_eq!(gutter_width(99), GUTTER_MIN_WIDTH + GUTTER_GAP);
        assert!(gutter_width(100_000) > GUTTER_MIN_WIDTH + GUTTER_GAP);
    }

    #[test]
    fn test_narrow_code_uses_min_card_width() {
        let g = measure(32.0, 3, 1, 1, None, false);
        assert_eq!(g.width, MIN_CARD_WIDTH);
        assert_eq!(g.panel.w, MIN_CARD_WIDTH - 64.0);
    }

    #[test]
    fn test_padding_surrounds_panel() {
        let g = measure(64.0, 80, 10, 10, Some(0.0), true);
        assert_eq!(g.panel.x, 64.0);
        assert_eq!(g.panel.y, 64.0);
        assert_eq!(g.width, g.panel.w + 128.0);
        assert_eq!(g.height, g.panel.h + 128.0);
    }

    #[test]
    fn test_title_bar_pushes_code_down() {
        let with_bar = measure(16.0, 10, 2, 2, Some(0.0), false);
        let without = measure(16.0, 10, 2, 2, None, false);
        assert_eq!(with_bar.code_area.y - without.code_area.y, TITLE_BAR_HEIGHT);
        assert!(with_bar.title_bar.is_some());
        assert!(without.title_bar.is_none());
    }

    #[test]
    fn test_line_numbers_widen_code_area() {
        let plain = measure(16.0, 60, 5, 5, None, false);
        let numbered = measure(16.0, 60, 5, 5, None, true);
        assert!((numbered.width - plain.width - gutter_width(5)).abs() < 0.01);
        assert_eq!(plain.gutter_width, 0.0);
    }

    #[test]
    fn test_wrapped_rows_set_height_source_lines_set_gutter() {
        let g = measure(16.0, 10, 12, 3, None, true);
        assert_eq!(g.code_area.h, CODE_PADDING * 2.0 + 12.0 * LINE_HEIGHT);
        assert_eq!(g.gutter_width, gutter_width(3));
    }

    #[test]
    fn test_title_widens_panel_up_to_limit() {
        let want = title_bar_width(40, true);
        let g = measure(32.0, 1, 1, 1, Some(want), false);
        assert_eq!(g.panel.w, want);
        assert_eq!(g.title_bar.unwrap().w, want);

        let huge = measure(32.0, 1, 1, 1, Some(10_000.0), false);
        assert_eq!(huge.panel.w, MAX_TITLE_BAR_WIDTH);
    }

    #[test]
    fn test_title_capacity_matches_bar_width() {
        for columns in [0, 1, 9, 60, 113] {
            assert_eq!(title_capacity(title_bar_width(columns, true), true), columns);
            assert_eq!(title_capacity(title_bar_width(columns, false), false), columns);
        }
        assert_eq!(title_capacity(10.0, true), 0);
    }
}
