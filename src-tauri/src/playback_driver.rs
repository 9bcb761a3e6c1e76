//! The audio seam: everything the player needs from whatever actually decodes
//! and renders sound.

use lofty::file::AudioFile;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("no track loaded")]
    NoTrackLoaded,
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },
    #[error("audio device error: {0}")]
    Device(String),
    #[error("failed to read the length of {}: {message}", path.display())]
    Probe { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverCapabilities {
    pub pause: bool,
    pub volume: bool,
    /// Able to switch between arbitrary tracks quickly enough for a playlist.
    pub playlist: bool,
    /// `track_finished` reports end of track instead of returning `None`.
    pub end_of_track: bool,
}

impl DriverCapabilities {
    pub const MIXER: Self = Self {
        pause: true,
        volume: true,
        playlist: true,
        end_of_track: true,
    };
}

/// A single audio channel. Loading a track replaces whatever was loaded
/// before; only one track is ever audible.
pub trait PlaybackDriver {
    fn capabilities(&self) -> DriverCapabilities;

    fn load(&mut self, path: &Path) -> Result<(), PlaybackError>;

    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    fn unpause(&mut self);

    fn stop(&mut self);

    /// `volume` is in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);

    /// Time the current track has been playing.
    fn elapsed(&self) -> Duration;

    /// `Some(true)` once the current track has run out. Drivers without end of
    /// track reporting return `None` and the caller compares
    /// [`PlaybackDriver::elapsed`] with [`PlaybackDriver::track_duration`].
    fn track_finished(&mut self) -> Option<bool> {
        None
    }

    fn track_duration(&self, path: &Path) -> Result<Duration, PlaybackError> {
        probe_duration(path)
    }
}

/// Reads the track length from the file's stream properties.
pub fn probe_duration(path: &Path) -> Result<Duration, PlaybackError> {
    let tagged = lofty::read_from_path(path).map_err(|err| PlaybackError::Probe {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    Ok(tagged.properties().duration())
}

/// Track name shown to the user: the file name without directories.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
