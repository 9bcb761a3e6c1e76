use crate::app_error::AppError;
use crate::app_state::UserCommand;
use crate::event_loop::LoopMessage;
use crate::events::emit_app_error;
use crate::models::PromptAnswer;
use crate::prompt_bridge::PromptBridge;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use tauri::{AppHandle, State};

/// Sending half of the event loop's queue, kept in managed state.
pub struct LoopHandle {
    sender: Sender<LoopMessage>,
}

impl LoopHandle {
    pub fn new(sender: Sender<LoopMessage>) -> Self {
        Self { sender }
    }

    pub fn send(&self, command: UserCommand) -> Result<(), AppError> {
        self.sender
            .send(LoopMessage::Command(command))
            .map_err(|_| AppError::system("The player is no longer running"))
    }

    pub fn shutdown(&self) {
        if self.sender.send(LoopMessage::Shutdown).is_err() {
            tracing::debug!("event loop already stopped");
        }
    }
}

#[tauri::command]
pub async fn open_files(handle: State<'_, LoopHandle>, app: AppHandle) -> Result<(), String> {
    forward(&handle, &app, UserCommand::OpenFiles)
}

#[tauri::command]
pub async fn previous_track(handle: State<'_, LoopHandle>, app: AppHandle) -> Result<(), String> {
    forward(&handle, &app, UserCommand::Previous)
}

#[tauri::command]
pub async fn play(handle: State<'_, LoopHandle>, app: AppHandle) -> Result<(), String> {
    forward(&handle, &app, UserCommand::Play)
}

#[tauri::command]
pub async fn pause(handle: State<'_, LoopHandle>, app: AppHandle) -> Result<(), String> {
    forward(&handle, &app, UserCommand::Pause)
}

#[tauri::command]
pub async fn stop(handle: State<'_, LoopHandle>, app: AppHandle) -> Result<(), String> {
    forward(&handle, &app, UserCommand::Stop)
}

#[tauri::command]
pub async fn next_track(handle: State<'_, LoopHandle>, app: AppHandle) -> Result<(), String> {
    forward(&handle, &app, UserCommand::Next)
}

#[tauri::command]
pub async fn toggle_shuffle(handle: State<'_, LoopHandle>, app: AppHandle) -> Result<(), String> {
    forward(&handle, &app, UserCommand::ToggleShuffle)
}

#[tauri::command]
pub async fn frontend_ready(bridge: State<'_, Arc<PromptBridge>>) -> Result<(), String> {
    bridge.mark_ready();
    Ok(())
}

#[tauri::command]
pub async fn answer_prompt(
    answer: PromptAnswer,
    bridge: State<'_, Arc<PromptBridge>>,
) -> Result<bool, String> {
    Ok(bridge.answer(answer))
}

fn forward(handle: &LoopHandle, app: &AppHandle, command: UserCommand) -> Result<(), String> {
    handle.send(command).map_err(|err| report_error(app, err))
}

fn report_error(app: &AppHandle, error: AppError) -> String {
    emit_app_error(app, error.payload());
    error.log();
    error.message().to_string()
}
