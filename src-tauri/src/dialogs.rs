use crate::events::emit_prompt_request;
use crate::models::PromptRequest;
use crate::prompt_bridge::PromptBridge;
use crate::prompts::{FileFilter, FilePicker, PromptError, Prompter};
use std::path::PathBuf;
use std::sync::Arc;
use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};

/// Native message boxes for questions, the page's modal for text input.
///
/// Every call blocks, so this must never run on the main thread.
pub struct TauriPrompter {
    app: AppHandle,
    bridge: Arc<PromptBridge>,
}

impl TauriPrompter {
    pub fn new(app: AppHandle, bridge: Arc<PromptBridge>) -> Self {
        Self { app, bridge }
    }

    pub fn wait_until_ready(&self) -> Result<(), PromptError> {
        self.bridge.wait_ready()
    }
}

impl Prompter for TauriPrompter {
    fn ask_text(&mut self, title: &str, message: &str) -> Result<Option<String>, PromptError> {
        let (id, answer) = self.bridge.register()?;
        emit_prompt_request(
            &self.app,
            &PromptRequest {
                id,
                title: title.to_string(),
                message: message.to_string(),
            },
        );
        answer.recv().map_err(|_| PromptError::Closed)
    }

    fn ask_yes_no(&mut self, title: &str, message: &str) -> Result<bool, PromptError> {
        self.bridge.ensure_open()?;
        let yes = self
            .app
            .dialog()
            .message(message)
            .title(title)
            .kind(MessageDialogKind::Info)
            .buttons(MessageDialogButtons::OkCancelCustom(
                "Yes".to_string(),
                "No".to_string(),
            ))
            .blocking_show();
        Ok(yes)
    }

    fn alert(&mut self, title: &str, message: &str) -> Result<(), PromptError> {
        self.bridge.ensure_open()?;
        self.app
            .dialog()
            .message(message)
            .title(title)
            .kind(MessageDialogKind::Info)
            .blocking_show();
        Ok(())
    }
}

pub struct TauriFilePicker {
    app: AppHandle,
}

impl TauriFilePicker {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl FilePicker for TauriFilePicker {
    fn choose_files(&mut self, title: &str, filters: &[FileFilter]) -> Vec<PathBuf> {
        let mut dialog = self.app.dialog().file().set_title(title);
        for filter in filters {
            dialog = dialog.add_filter(filter.name, filter.extensions);
        }
        dialog
            .blocking_pick_files()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|file| match file.into_path() {
                Ok(path) => Some(path),
                Err(err) => {
                    tracing::warn!(error = %err, "ignoring selection without a local path");
                    None
                }
            })
            .collect()
    }
}
