use std::sync::Arc;

use fltk::{app, prelude::*};

use codesnap::app::infrastructure::platform::download_dir;
use codesnap::app::infrastructure::logging;
use codesnap::app::services::enhance::GeminiClient;
use codesnap::app::services::export::{ExportSinks, SystemClipboard};
use codesnap::app::services::host::detect_host;
use codesnap::app::state::AppState;
use codesnap::app::{AppConfig, Message, SnapController};
use codesnap::ui::main_window::{WINDOW_WIDTH, build_main_window};
use codesnap::ui::theme::apply_theme;

fn main() {
    logging::init();

    let config = AppConfig::load();
    if config.api_key.is_none() {
        log::warn!("No API key configured; AI Enhance will fail until GEMINI_API_KEY is set");
    }

    let host = detect_host(&config);
    let sinks = ExportSinks::select(host, Arc::new(SystemClipboard), download_dir());
    let generator = Arc::new(GeminiClient::from_config(&config));
    let controller = SnapController::new(sinks, generator, WINDOW_WIDTH);

    let app = app::App::default();
    let (sender, receiver) = app::channel::<Message>();

    let mut widgets = build_main_window(
        &sender,
        controller.settings(),
        controller.code(),
        controller.primary_sink(),
    );
    apply_theme(&mut widgets);
    widgets.wind.show();

    let mut state = AppState::new(controller, widgets, sender);

    while app.wait() {
        if let Some(msg) = receiver.recv()
            && !state.handle(msg)
        {
            app.quit();
        }
    }
}
