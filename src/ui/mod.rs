pub mod main_window;
pub mod preview_pane;
pub mod theme;
