use crate::app_state::{AppState, UserCommand};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

const IDLE_WAIT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMessage {
    Command(UserCommand),
    Shutdown,
}

/// Runs due tasks and waits for commands in between, on the calling thread.
pub struct EventLoop {
    state: AppState,
    receiver: Receiver<LoopMessage>,
}

impl EventLoop {
    pub fn new(state: AppState, receiver: Receiver<LoopMessage>) -> Self {
        Self { state, receiver }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns on [`LoopMessage::Shutdown`] or once every sender is gone.
    pub fn run(&mut self) {
        tracing::info!("event loop started");
        loop {
            self.run_due(Instant::now());
            let timeout = self
                .state
                .next_deadline()
                .map(|deadline| deadline.saturating_duration_since(Instant::now()))
                .unwrap_or(IDLE_WAIT);
            match self.receiver.recv_timeout(timeout) {
                Ok(LoopMessage::Command(command)) => {
                    self.state.handle_command(command, Instant::now());
                }
                Ok(LoopMessage::Shutdown) => {
                    tracing::info!("event loop shutting down");
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::info!("command channel closed, event loop exiting");
                    break;
                }
            }
        }
    }

    /// Runs every task due at `now`, including ones scheduled while running.
    pub fn run_due(&mut self, now: Instant) -> usize {
        let mut ran = 0;
        while let Some(task) = self.state.pop_due(now) {
            self.state.run_task(task, now);
            ran += 1;
        }
        ran
    }
}
