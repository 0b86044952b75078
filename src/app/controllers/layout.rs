/// Windows narrower than this show one panel at a time
pub const NARROW_BREAKPOINT: i32 = 768;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTab {
    Editor,
    Preview,
}

/// Responsive two-panel layout.
///
/// Wide windows show the editor and the preview side by side. Narrow ones
/// show a tab header and only the active panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLayout {
    width: i32,
    active_tab: ViewTab,
}

impl ViewLayout {
    pub fn new(width: i32) -> Self {
        Self {
            width,
            active_tab: ViewTab::Editor,
        }
    }

    pub fn resize(&mut self, width: i32) {
        self.width = width;
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn is_narrow(&self) -> bool {
        self.width < NARROW_BREAKPOINT
    }

    pub fn active_tab(&self) -> ViewTab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: ViewTab) {
        self.active_tab = tab;
    }

    pub fn editor_visible(&self) -> bool {
        !self.is_narrow() || self.active_tab == ViewTab::Editor
    }

    pub fn preview_visible(&self) -> bool {
        !self.is_narrow() || self.active_tab == ViewTab::Preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_shows_both_panels() {
        let layout = ViewLayout::new(1200);
        assert!(!layout.is_narrow());
        assert!(layout.editor_visible());
        assert!(layout.preview_visible());
    }

    #[test]
    fn test_narrow_shows_active_tab_only() {
        let mut layout = ViewLayout::new(500);
        assert!(layout.is_narrow());
        assert_eq!(layout.active_tab(), ViewTab::Editor);
        assert!(layout.editor_visible());
        assert!(!layout.preview_visible());

        layout.select_tab(ViewTab::Preview);
        assert!(!layout.editor_visible());
        assert!(layout.preview_visible());
    }

    #[test]
    fn test_breakpoint_edge() {
        assert!(ViewLayout::new(767).is_narrow());
        assert!(!ViewLayout::new(768).is_narrow());
    }

    #[test]
    fn test_resize_keeps_tab() {
        let mut layout = ViewLayout::new(500);
        layout.select_tab(ViewTab::Preview);
        layout.resize(1000);
        assert!(layout.editor_visible());
        layout.resize(600);
        assert!(!layout.editor_visible());
    }
}
