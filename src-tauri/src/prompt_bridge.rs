use crate::models::PromptAnswer;
use crate::prompts::PromptError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Condvar, Mutex};

#[derive(Debug, Default)]
struct Gate {
    ready: bool,
    closed: bool,
}

/// Hands text prompts to the webview and routes the answers back to the
/// thread that asked.
///
/// The asking thread blocks until the page has announced itself with
/// [`PromptBridge::mark_ready`], so no request is emitted before anything
/// listens for it.
#[derive(Debug, Default)]
pub struct PromptBridge {
    next_id: AtomicU64,
    pending: Mutex<HashMap<u64, Sender<Option<String>>>>,
    gate: Mutex<Gate>,
    changed: Condvar,
}

impl PromptBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        if let Ok(mut gate) = self.gate.lock() {
            gate.ready = true;
            self.changed.notify_all();
        }
    }

    /// Fails every waiting and future prompt with [`PromptError::Closed`].
    pub fn close(&self) {
        if let Ok(mut gate) = self.gate.lock() {
            gate.closed = true;
            self.changed.notify_all();
        }
        if let Ok(mut pending) = self.pending.lock() {
            pending.clear();
        }
    }

    pub fn ensure_open(&self) -> Result<(), PromptError> {
        let gate = self.gate.lock().map_err(|_| PromptError::Closed)?;
        if gate.closed {
            Err(PromptError::Closed)
        } else {
            Ok(())
        }
    }

    pub fn wait_ready(&self) -> Result<(), PromptError> {
        let mut gate = self.gate.lock().map_err(|_| PromptError::Closed)?;
        while !gate.ready && !gate.closed {
            gate = self.changed.wait(gate).map_err(|_| PromptError::Closed)?;
        }
        if gate.closed {
            Err(PromptError::Closed)
        } else {
            Ok(())
        }
    }

    /// Reserves an id for a new prompt. The receiver yields the answer, or
    /// disconnects if the bridge closes first.
    pub fn register(&self) -> Result<(u64, Receiver<Option<String>>), PromptError> {
        self.ensure_open()?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let (sender, receiver) = mpsc::channel();
        self.pending
            .lock()
            .map_err(|_| PromptError::Closed)?
            .insert(id, sender);
        Ok((id, receiver))
    }

    /// Delivers an answer. Returns false for unknown or already answered ids.
    pub fn answer(&self, answer: PromptAnswer) -> bool {
        let sender = match self.pending.lock() {
            Ok(mut pending) => pending.remove(&answer.id),
            Err(_) => None,
        };
        match sender {
            Some(sender) => sender.send(answer.value).is_ok(),
            None => {
                tracing::debug!(id = answer.id, "answer for unknown prompt");
                false
            }
        }
    }
}
