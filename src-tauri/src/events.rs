use crate::app_error::{AppError, AppErrorPayload};
use crate::models::{
    BackgroundPayload, ClockDisplay, IconPayload, NowPlayingPayload, PromptRequest, ShufflePayload,
};
use crate::surface::Surface;
use serde::Serialize;
use tauri::{AppHandle, Emitter};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

const CLOCK_TICK_EVENT: &str = "clock-tick";
const NOW_PLAYING_EVENT: &str = "now-playing";
const SHUFFLE_CHANGED_EVENT: &str = "shuffle-changed";
const BACKGROUND_CHANGED_EVENT: &str = "background-changed";
const ICONS_LOADED_EVENT: &str = "icons-loaded";
const PROMPT_REQUEST_EVENT: &str = "prompt-request";
const APP_ERROR_EVENT: &str = "app-error";

fn emit_event<S: Serialize + Clone>(app: &AppHandle, event: &str, payload: S) {
    if let Err(err) = app.emit(event, payload) {
        tracing::warn!(event, error = %err, "failed to emit event");
    }
}

pub fn emit_clock_tick(app: &AppHandle, display: &ClockDisplay) {
    emit_event(app, CLOCK_TICK_EVENT, display);
}

pub fn emit_now_playing(app: &AppHandle, payload: &NowPlayingPayload) {
    emit_event(app, NOW_PLAYING_EVENT, payload);
}

pub fn emit_shuffle_changed(app: &AppHandle, payload: &ShufflePayload) {
    emit_event(app, SHUFFLE_CHANGED_EVENT, payload);
}

pub fn emit_background_changed(app: &AppHandle, payload: &BackgroundPayload) {
    emit_event(app, BACKGROUND_CHANGED_EVENT, payload);
}

pub fn emit_icons_loaded(app: &AppHandle, icons: &[IconPayload]) {
    emit_event(app, ICONS_LOADED_EVENT, icons);
}

pub fn emit_prompt_request(app: &AppHandle, request: &PromptRequest) {
    emit_event(app, PROMPT_REQUEST_EVENT, request);
}

pub fn emit_app_error(app: &AppHandle, payload: AppErrorPayload) {
    emit_event(app, APP_ERROR_EVENT, payload);
}

/// Renders into the main window through events the page listens for.
pub struct TauriSurface {
    app: AppHandle,
}

impl TauriSurface {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl Surface for TauriSurface {
    fn show_clock(&mut self, display: &ClockDisplay) {
        emit_clock_tick(&self.app, display);
    }

    fn show_now_playing(&mut self, payload: &NowPlayingPayload) {
        emit_now_playing(&self.app, payload);
    }

    fn show_shuffle(&mut self, payload: &ShufflePayload) {
        emit_shuffle_changed(&self.app, payload);
    }

    fn show_background(&mut self, payload: &BackgroundPayload) {
        emit_background_changed(&self.app, payload);
    }

    fn show_icons(&mut self, icons: &[IconPayload]) {
        emit_icons_loaded(&self.app, icons);
    }

    fn notify(&mut self, title: &str, message: &str) {
        self.app
            .dialog()
            .message(message)
            .title(title)
            .kind(MessageDialogKind::Info)
            .show(|_| {});
    }

    fn report_error(&mut self, error: &AppError) {
        emit_app_error(&self.app, error.payload());
    }
}
