use fltk::{enums::Color, prelude::*};

use super::main_window::MainWidgets;

/// Colors for the application chrome around the card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chrome {
    pub window: Color,
    pub panel: Color,
    pub text: Color,
    pub muted: Color,
    pub input: Color,
    pub selection: Color,
    pub accent: Color,
    pub accent_text: Color,
}

/// Light chrome, so the card is the only dark element on screen.
pub fn chrome() -> Chrome {
    Chrome {
        window: Color::from_rgb(243, 244, 246),
        panel: Color::White,
        text: Color::from_rgb(17, 24, 39),
        muted: Color::from_rgb(107, 114, 128),
        input: Color::White,
        selection: Color::from_rgb(173, 216, 230),
        accent: Color::from_rgb(79, 70, 229),
        accent_text: Color::White,
    }
}

pub fn apply_theme(w: &mut MainWidgets) {
    let c = chrome();

    w.wind.set_color(c.window);
    w.wind.set_label_color(c.text);
    w.editor_panel.set_color(c.panel);
    w.preview_panel.set_color(c.window);
    w.tab_header.set_color(c.panel);

    w.header.set_label_color(c.text);
    w.note_label.set_label_color(c.muted);
    w.status_frame.set_label_color(c.muted);

    w.title_input.set_color(c.input);
    w.title_input.set_text_color(c.text);

    w.code_editor.set_color(c.input);
    w.code_editor.set_text_color(c.text);
    w.code_editor.set_cursor_color(c.text);
    w.code_editor.set_selection_color(c.selection);

    w.note_display.set_color(c.panel);
    w.note_display.set_text_color(c.text);

    for choice in [&mut w.language_choice, &mut w.theme_choice] {
        choice.set_color(c.input);
        choice.set_text_color(c.text);
    }
    for check in [&mut w.line_numbers_check, &mut w.controls_check] {
        check.set_label_color(c.text);
    }
    w.preview_scroll.set_color(c.window);

    for button in [&mut w.enhance_btn, &mut w.primary_btn] {
        button.set_color(c.accent);
        button.set_label_color(c.accent_text);
    }
    for button in [&mut w.code_tab, &mut w.preview_tab, &mut w.png_btn] {
        button.set_color(c.panel);
        button.set_label_color(c.text);
    }

    w.wind.redraw();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrome_contrast() {
        let c = chrome();
        assert_ne!(c.accent, c.accent_text);
        assert_ne!(c.text, c.input);
        assert_ne!(c.muted, c.panel);
    }
}
