use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

/// Ordered track list with a cursor and the shuffle flag.
///
/// The cursor is only meaningful while the list is non-empty, and then always
/// points at a valid track.
#[derive(Debug)]
pub struct Playlist {
    tracks: Vec<PathBuf>,
    position: usize,
    shuffle: bool,
    rng: StdRng,
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new()
    }
}

impl Playlist {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            tracks: Vec::new(),
            position: 0,
            shuffle: false,
            rng,
        }
    }

    /// Replaces the tracks and rewinds to the first one.
    pub fn replace(&mut self, tracks: Vec<PathBuf>) {
        self.tracks = tracks;
        self.position = 0;
    }

    pub fn tracks(&self) -> &[PathBuf] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn position(&self) -> Option<usize> {
        if self.tracks.is_empty() {
            None
        } else {
            Some(self.position)
        }
    }

    pub fn current(&self) -> Option<&Path> {
        self.tracks.get(self.position).map(PathBuf::as_path)
    }

    pub fn is_shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn set_shuffle(&mut self, enabled: bool) {
        self.shuffle = enabled;
    }

    /// Moves to the next track: a uniform pick in shuffle mode (the current
    /// track included), otherwise one step forward wrapping to the start.
    pub fn advance(&mut self) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        if self.shuffle {
            return self.randomize();
        }
        self.position = (self.position + 1) % self.tracks.len();
        Some(self.position)
    }

    /// Moves to the previous track. Sequential mode stops at the first track
    /// rather than wrapping.
    pub fn retreat(&mut self) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        if self.shuffle {
            return self.randomize();
        }
        self.position = self.position.saturating_sub(1);
        Some(self.position)
    }

    pub fn randomize(&mut self) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        self.position = self.rng.random_range(0..self.tracks.len());
        Some(self.position)
    }
}
