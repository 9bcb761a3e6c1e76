use crate::playback_driver::{DriverCapabilities, PlaybackDriver, PlaybackError};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

const CAPABILITIES: DriverCapabilities = DriverCapabilities {
    pause: false,
    volume: false,
    playlist: false,
    end_of_track: true,
};

fn default_program() -> &'static str {
    if cfg!(target_os = "macos") {
        "afplay"
    } else {
        "paplay"
    }
}

/// Plays through the platform's command-line player, one process per track.
/// No pause or volume control, so it only backs the fixed-loop profile.
#[derive(Debug)]
pub struct SystemCommandDriver {
    program: String,
    loaded: Option<PathBuf>,
    child: Option<Child>,
    started_at: Option<Instant>,
}

impl Default for SystemCommandDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCommandDriver {
    pub fn new() -> Self {
        Self::with_program(default_program())
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            loaded: None,
            child: None,
            started_at: None,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn halt(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(err) = child.kill() {
                tracing::debug!(error = %err, "player process already gone");
            }
            if let Err(err) = child.wait() {
                tracing::debug!(error = %err, "failed to reap player process");
            }
        }
        self.started_at = None;
    }
}

impl PlaybackDriver for SystemCommandDriver {
    fn capabilities(&self) -> DriverCapabilities {
        CAPABILITIES
    }

    fn load(&mut self, path: &Path) -> Result<(), PlaybackError> {
        if !path.is_file() {
            return Err(PlaybackError::Open {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such audio file"),
            });
        }
        self.halt();
        self.loaded = Some(path.to_path_buf());
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let path = self.loaded.clone().ok_or(PlaybackError::NoTrackLoaded)?;
        self.halt();
        let child = Command::new(&self.program)
            .arg(&path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| PlaybackError::Device(format!("{}: {err}", self.program)))?;
        self.child = Some(child);
        self.started_at = Some(Instant::now());
        Ok(())
    }

    fn pause(&mut self) {
        tracing::debug!(program = %self.program, "pause not supported by system player");
    }

    fn unpause(&mut self) {}

    fn stop(&mut self) {
        self.halt();
    }

    fn set_volume(&mut self, _volume: f32) {}

    fn elapsed(&self) -> Duration {
        self.started_at
            .map(|started_at| started_at.elapsed())
            .unwrap_or_default()
    }

    fn track_finished(&mut self) -> Option<bool> {
        let finished = match self.child.as_mut() {
            Some(child) => !matches!(child.try_wait(), Ok(None)),
            None => true,
        };
        Some(finished)
    }
}

impl Drop for SystemCommandDriver {
    fn drop(&mut self) {
        self.halt();
    }
}
