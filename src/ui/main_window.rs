use fltk::{
    app::Sender,
    button::{Button, CheckButton},
    enums::{Align, CallbackTrigger, Event, Font, FrameType},
    frame::Frame,
    group::{Flex, FlexType, Scroll},
    input::Input,
    menu::Choice,
    prelude::*,
    text::{TextBuffer, TextDisplay, TextEditor, WrapMode},
    valuator::HorNiceSlider,
    window::Window,
};

use crate::app::controllers::layout::ViewTab;
use crate::app::domain::language::CodeLanguage;
use crate::app::domain::messages::Message;
use crate::app::domain::settings::{
    EditorSettings, PADDING_MAX, PADDING_MIN, PADDING_STEP, SettingsUpdate, snap_padding,
};
use crate::app::domain::theme::{THEMES, theme_index};
use crate::app::services::export::SinkKind;

pub const WINDOW_WIDTH: i32 = 1180;
pub const WINDOW_HEIGHT: i32 = 720;
pub const TAB_HEADER_HEIGHT: i32 = 36;
const ROW_HEIGHT: i32 = 30;
const NOTE_HEIGHT: i32 = 96;
pub const EDITOR_PANEL_WIDTH: i32 = 420;

pub struct MainWidgets {
    pub wind: Window,
    pub root: Flex,
    pub tab_header: Flex,
    pub code_tab: Button,
    pub preview_tab: Button,
    pub body: Flex,

    // Editor panel
    pub editor_panel: Flex,
    pub header: Frame,
    pub title_input: Input,
    pub code_editor: TextEditor,
    pub code_buffer: TextBuffer,
    pub note_label: Frame,
    pub note_display: TextDisplay,
    pub note_buffer: TextBuffer,
    pub enhance_btn: Button,

    // Preview panel
    pub preview_panel: Flex,
    pub language_choice: Choice,
    pub theme_choice: Choice,
    pub padding_slider: HorNiceSlider,
    pub line_numbers_check: CheckButton,
    pub controls_check: CheckButton,
    pub preview_scroll: Scroll,
    pub preview_frame: Frame,
    pub status_frame: Frame,
    pub primary_btn: Button,
    pub png_btn: Button,
}

fn update_msg(changes: SettingsUpdate) -> Message {
    Message::SettingsChanged(changes)
}

pub fn build_main_window(
    sender: &Sender<Message>,
    settings: &EditorSettings,
    code: &str,
    primary: SinkKind,
) -> MainWidgets {
    let mut wind = Window::new(100, 100, WINDOW_WIDTH, WINDOW_HEIGHT, "CodeSnap");
    wind.set_xclass("CodeSnap");

    let mut root = Flex::new(0, 0, WINDOW_WIDTH, WINDOW_HEIGHT, None);
    root.set_type(FlexType::Column);

    // Code / Preview switcher, only shown on narrow windows
    let mut tab_header = Flex::default();
    tab_header.set_type(FlexType::Row);
    let mut code_tab = Button::default().with_label("Code");
    let mut preview_tab = Button::default().with_label("Preview");
    tab_header.end();
    root.fixed(&tab_header, TAB_HEADER_HEIGHT);
    code_tab.emit(*sender, Message::SelectTab(ViewTab::Editor));
    preview_tab.emit(*sender, Message::SelectTab(ViewTab::Preview));

    let mut body = Flex::default();
    body.set_type(FlexType::Row);

    // --- Editor panel ---
    let mut editor_panel = Flex::default();
    editor_panel.set_type(FlexType::Column);
    editor_panel.set_margin(12);
    editor_panel.set_pad(8);

    let mut header = Frame::default().with_label("CodeSnap");
    header.set_label_font(Font::HelveticaBold);
    header.set_label_size(18);
    header.set_align(Align::Left | Align::Inside);
    editor_panel.fixed(&header, ROW_HEIGHT);

    let mut title_input = Input::default();
    title_input.set_value(&settings.title);
    title_input.set_tooltip("Window title");
    title_input.set_trigger(CallbackTrigger::Changed);
    title_input.set_callback({
        let s = *sender;
        move |input| {
            s.send(update_msg(SettingsUpdate {
                title: Some(input.value()),
                ..Default::default()
            }))
        }
    });
    editor_panel.fixed(&title_input, ROW_HEIGHT);

    let mut code_buffer = TextBuffer::default();
    code_buffer.set_text(code);
    let mut code_editor = TextEditor::default();
    code_editor.set_buffer(code_buffer.clone());
    code_editor.set_text_font(Font::Courier);
    code_editor.set_text_size(14);
    code_buffer.add_modify_callback({
        let s = *sender;
        move |_pos, _inserted, _deleted, _restyled, _deleted_text| s.send(Message::CodeChanged)
    });

    let mut note_label = Frame::default().with_label("Slide Note");
    note_label.set_label_font(Font::HelveticaBold);
    note_label.set_label_size(12);
    note_label.set_align(Align::Left | Align::Inside);
    editor_panel.fixed(&note_label, 20);

    let note_buffer = TextBuffer::default();
    let mut note_display = TextDisplay::default();
    note_display.set_buffer(note_buffer.clone());
    note_display.wrap_mode(WrapMode::AtBounds, 0);
    note_display.set_text_size(12);
    editor_panel.fixed(&note_display, NOTE_HEIGHT);

    let mut enhance_btn = Button::default().with_label("AI Enhance");
    enhance_btn.emit(*sender, Message::Enhance);
    editor_panel.fixed(&enhance_btn, 36);

    editor_panel.end();
    body.fixed(&editor_panel, EDITOR_PANEL_WIDTH);

    // --- Preview panel ---
    let mut preview_panel = Flex::default();
    preview_panel.set_type(FlexType::Column);
    preview_panel.set_margin(12);
    preview_panel.set_pad(8);

    let mut toolbar = Flex::default();
    toolbar.set_type(FlexType::Row);
    toolbar.set_pad(8);

    let mut language_choice = Choice::default();
    for language in CodeLanguage::all() {
        language_choice.add_choice(language.label());
    }
    language_choice.set_value(settings.language.index() as i32);
    language_choice.set_callback({
        let s = *sender;
        move |c| {
            if let Some(language) = usize::try_from(c.value())
                .ok()
                .and_then(|i| CodeLanguage::all().get(i))
            {
                s.send(update_msg(SettingsUpdate {
                    language: Some(*language),
                    ..Default::default()
                }));
            }
        }
    });

    let mut theme_choice = Choice::default();
    for theme in THEMES {
        theme_choice.add_choice(theme.name);
    }
    theme_choice.set_value(theme_index(&settings.theme_id).unwrap_or(0) as i32);
    theme_choice.set_callback({
        let s = *sender;
        move |c| {
            if let Some(theme) = usize::try_from(c.value()).ok().and_then(|i| THEMES.get(i)) {
                s.send(update_msg(SettingsUpdate {
                    theme_id: Some(theme.id.to_string()),
                    ..Default::default()
                }));
            }
        }
    });

    let mut padding_slider = HorNiceSlider::default();
    padding_slider.set_bounds(PADDING_MIN as f64, PADDING_MAX as f64);
    padding_slider.set_step(PADDING_STEP as f64, 1);
    padding_slider.set_value(settings.padding as f64);
    padding_slider.set_tooltip("Padding");
    padding_slider.set_callback({
        let s = *sender;
        move |slider| {
            let padding = snap_padding(slider.value());
            slider.set_value(padding as f64);
            s.send(update_msg(SettingsUpdate {
                padding: Some(padding),
                ..Default::default()
            }));
        }
    });

    let mut line_numbers_check = CheckButton::default().with_label("Nums");
    line_numbers_check.set_checked(settings.show_line_numbers);
    line_numbers_check.set_callback({
        let s = *sender;
        move |b| {
            s.send(update_msg(SettingsUpdate {
                show_line_numbers: Some(b.is_checked()),
                ..Default::default()
            }))
        }
    });
    toolbar.fixed(&line_numbers_check, 70);

    let mut controls_check = CheckButton::default().with_label("Controls");
    controls_check.set_checked(settings.window_controls);
    controls_check.set_callback({
        let s = *sender;
        move |b| {
            s.send(update_msg(SettingsUpdate {
                window_controls: Some(b.is_checked()),
                ..Default::default()
            }))
        }
    });
    toolbar.fixed(&controls_check, 90);

    toolbar.end();
    preview_panel.fixed(&toolbar, ROW_HEIGHT);

    let mut preview_scroll = Scroll::default();
    preview_scroll.set_frame(FrameType::FlatBox);
    let mut preview_frame = Frame::default();
    preview_frame.set_frame(FrameType::NoBox);
    preview_scroll.end();

    let mut footer = Flex::default();
    footer.set_type(FlexType::Row);
    footer.set_pad(8);
    let mut status_frame = Frame::default();
    status_frame.set_align(Align::Left | Align::Inside);
    let mut primary_btn = Button::default().with_label(primary.label());
    footer.fixed(&primary_btn, 130);
    let primary_msg = match primary {
        SinkKind::HostInsertion => Message::Insert,
        _ => Message::Copy,
    };
    primary_btn.emit(*sender, primary_msg);
    let mut png_btn = Button::default().with_label(SinkKind::File.label());
    png_btn.emit(*sender, Message::Download);
    footer.fixed(&png_btn, 70);
    footer.end();
    preview_panel.fixed(&footer, 36);

    preview_panel.end();
    body.end();
    root.end();
    wind.end();
    wind.resizable(&root);
    wind.size_range(360, 480, 0, 0);

    wind.resize_callback({
        let s = *sender;
        move |_, _, _, w, _| s.send(Message::WindowResized(w))
    });
    wind.set_callback({
        let s = *sender;
        move |_| {
            if fltk::app::event() == Event::Close {
                s.send(Message::WindowClose);
            }
        }
    });

    MainWidgets {
        wind,
        root,
        tab_header,
        code_tab,
        preview_tab,
        body,
        editor_panel,
        header,
        title_input,
        code_editor,
        code_buffer,
        note_label,
        note_display,
        note_buffer,
        enhance_btn,
        preview_panel,
        language_choice,
        theme_choice,
        padding_slider,
        line_numbers_check,
        controls_check,
        preview_scroll,
        preview_frame,
        status_frame,
        primary_btn,
        png_btn,
    }
}
