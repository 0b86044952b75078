use fltk::{app, app::Sender, dialog, enums::Font, prelude::*};

use super::controllers::layout::ViewTab;
use super::controllers::snap::{Feedback, SnapController};
use super::controllers::status::STATUS_DURATION_MS;
use super::domain::messages::Message;
use super::infrastructure::buffer::{buffer_text_no_leak, replace_text_if_changed};
use super::services::raster::RasterError;
use crate::ui::main_window::{EDITOR_PANEL_WIDTH, MainWidgets, TAB_HEADER_HEIGHT};
use crate::ui::preview_pane::show_artifact;

/// Owns the controller and the widgets; every message is handled here on
/// the UI thread.
pub struct AppState {
    pub controller: SnapController,
    pub widgets: MainWidgets,
    pub sender: Sender<Message>,
}

impl AppState {
    pub fn new(controller: SnapController, widgets: MainWidgets, sender: Sender<Message>) -> Self {
        let mut state = Self {
            controller,
            widgets,
            sender,
        };
        state.sync_layout();
        state.refresh_preview();
        state.refresh_explanation();
        state.refresh_controls();
        state
    }

    /// Handle one message. Returns false when the app should exit.
    pub fn handle(&mut self, msg: Message) -> bool {
        match msg {
            Message::CodeChanged => {
                let text = buffer_text_no_leak(&self.widgets.code_buffer);
                self.controller.set_code(&text);
                self.refresh_preview();
                self.refresh_controls();
            }
            Message::SettingsChanged(changes) => {
                self.controller.update_settings(changes);
                self.refresh_preview();
            }
            Message::SelectTab(tab) => {
                self.controller.select_tab(tab);
                self.sync_layout();
                self.refresh_preview();
            }
            Message::WindowResized(width) => {
                self.controller.resize(width);
                self.sync_layout();
                self.refresh_preview();
            }
            Message::Enhance => self.enhance(),
            Message::EnhanceProgress(step) => {
                let feedback = self.controller.apply_enhance_step(step);
                replace_text_if_changed(&mut self.widgets.code_buffer, self.controller.code());
                self.sync_layout();
                self.refresh_preview();
                self.refresh_explanation();
                self.refresh_controls();
                self.apply_feedback(feedback);
            }
            Message::Copy => {
                let feedback = self.controller.copy();
                self.apply_feedback(feedback);
            }
            Message::Download => {
                let feedback = self.controller.download();
                self.apply_feedback(feedback);
            }
            Message::Insert => self.insert(),
            Message::InsertFinished(result) => {
                let feedback = self.controller.finish_insert(result);
                self.refresh_controls();
                self.apply_feedback(feedback);
            }
            Message::StatusExpired(ticket) => {
                if self.controller.expire_status(ticket) {
                    self.refresh_status();
                }
            }
            Message::WindowClose => {
                log::info!("Window closed, exiting");
                return false;
            }
        }
        true
    }

    fn enhance(&mut self) {
        let Some(job) = self.controller.begin_enhance() else {
            return;
        };
        self.refresh_explanation();
        self.refresh_controls();

        let s = self.sender;
        std::thread::spawn(move || {
            log::debug!("Enhancement worker started");
            job.run(|step| s.send(Message::EnhanceProgress(step)));
        });
    }

    fn insert(&mut self) {
        match self.controller.begin_insert() {
            Ok(job) => {
                self.refresh_status();
                self.refresh_controls();
                let s = self.sender;
                std::thread::spawn(move || {
                    log::debug!("Slide insertion worker started");
                    s.send(Message::InsertFinished(job.run()));
                });
            }
            Err(feedback) => self.apply_feedback(feedback),
        }
    }

    fn apply_feedback(&mut self, feedback: Feedback) {
        self.refresh_status();
        self.refresh_controls();
        match feedback {
            Feedback::None => {}
            Feedback::Status(ticket) => {
                let s = self.sender;
                app::add_timeout3(STATUS_DURATION_MS as f64 / 1000.0, move |_| {
                    s.send(Message::StatusExpired(ticket));
                });
            }
            Feedback::Alert(text) => dialog::alert_default(&text),
        }
    }

    /// Show or hide panels for the current width and tab.
    fn sync_layout(&mut self) {
        let layout = self.controller.layout();
        let w = &mut self.widgets;

        if layout.is_narrow() {
            w.tab_header.show();
            w.root.fixed(&w.tab_header, TAB_HEADER_HEIGHT);
            let editor_width = if layout.editor_visible() { layout.width() } else { 0 };
            w.body.fixed(&w.editor_panel, editor_width);
        } else {
            w.tab_header.hide();
            w.root.fixed(&w.tab_header, 0);
            w.body.fixed(&w.editor_panel, EDITOR_PANEL_WIDTH);
        }

        if layout.editor_visible() {
            w.editor_panel.show();
        } else {
            w.editor_panel.hide();
        }
        if layout.preview_visible() {
            w.preview_panel.show();
        } else {
            w.preview_panel.hide();
        }

        let active = layout.active_tab();
        for (button, tab) in [(&mut w.code_tab, ViewTab::Editor), (&mut w.preview_tab, ViewTab::Preview)] {
            if active == tab {
                button.set_label_font(Font::HelveticaBold);
            } else {
                button.set_label_font(Font::Helvetica);
            }
        }

        w.root.layout();
        w.wind.redraw();
    }

    fn refresh_preview(&mut self) {
        match self.controller.preview_image() {
            Ok(artifact) => {
                if let Err(e) = show_artifact(
                    &mut self.widgets.preview_scroll,
                    &mut self.widgets.preview_frame,
                    &artifact,
                ) {
                    log::warn!("Could not display preview: {e}");
                }
            }
            Err(RasterError::NotMounted) => {}
            Err(e) => log::warn!("Preview rasterization failed: {e}"),
        }
    }

    fn refresh_explanation(&mut self) {
        match self.controller.explanation() {
            Some(note) => {
                self.widgets.note_buffer.set_text(note);
                self.widgets.note_label.show();
                self.widgets.note_display.show();
            }
            None => {
                self.widgets.note_buffer.set_text("");
                self.widgets.note_label.hide();
                self.widgets.note_display.hide();
            }
        }
        self.widgets.editor_panel.layout();
    }

    fn refresh_status(&mut self) {
        let text = self.controller.status().unwrap_or("");
        self.widgets.status_frame.set_label(text);
        self.widgets.status_frame.redraw();
    }

    /// Busy labels and enabled state of the action buttons.
    fn refresh_controls(&mut self) {
        let busy = self.controller.busy();
        let w = &mut self.widgets;

        w.enhance_btn
            .set_label(if busy.enhance { "Enhancing..." } else { "AI Enhance" });
        if self.controller.can_enhance() {
            w.enhance_btn.activate();
        } else {
            w.enhance_btn.deactivate();
        }

        let primary_busy = busy.copy || busy.insert;
        if primary_busy {
            w.primary_btn.deactivate();
        } else {
            w.primary_btn.activate();
        }
        if busy.download {
            w.png_btn.deactivate();
        } else {
            w.png_btn.activate();
        }
    }
}
