use std::path::PathBuf;
use std::time::Duration;

const ASSETS_DIR_VAR: &str = "COUNTDOWN_ASSETS_DIR";
const AUDIO_DRIVER_VAR: &str = "COUNTDOWN_AUDIO_DRIVER";
const LOOP_TRACK_VAR: &str = "COUNTDOWN_LOOP_TRACK";
const VOLUME_VAR: &str = "COUNTDOWN_VOLUME";
const DEBUG_LOGGING_VAR: &str = "DEBUG_LOGGING";

pub const BACKGROUND_WIDTH: u32 = 1191;
pub const BACKGROUND_HEIGHT: u32 = 671;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverKind {
    /// In-process mixer with pause, volume and end-of-track reporting.
    #[default]
    Mixer,
    /// External player process, one fixed looped track.
    System,
}

impl DriverKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mixer" | "rodio" => Some(Self::Mixer),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub tick: Duration,
    pub poll: Duration,
    pub skip_delay: Duration,
    pub track_gap: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(1000),
            poll: Duration::from_millis(100),
            skip_delay: Duration::from_millis(100),
            track_gap: Duration::from_millis(500),
        }
    }
}

/// An environment value that was ignored in favour of the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedSetting {
    pub variable: &'static str,
    pub value: String,
    pub fallback: &'static str,
}

/// Startup settings. Nothing here is written back to disk; every run starts
/// from the defaults and the process environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub assets_dir: PathBuf,
    pub audio_driver: DriverKind,
    pub loop_track: Option<PathBuf>,
    pub volume: f32,
    pub debug_logging: bool,
    pub timings: Timings,
    pub background_size: (u32, u32),
    /// Read before logging exists, so reported later by [`AppSettings::report_rejected`].
    pub rejected: Vec<RejectedSetting>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            audio_driver: DriverKind::default(),
            loop_track: None,
            volume: 1.0,
            debug_logging: false,
            timings: Timings::default(),
            background_size: (BACKGROUND_WIDTH, BACKGROUND_HEIGHT),
            rejected: Vec::new(),
        }
    }
}

impl AppSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(dir) = lookup(ASSETS_DIR_VAR).filter(|value| !value.trim().is_empty()) {
            settings.assets_dir = PathBuf::from(dir);
        }

        if let Some(value) = lookup(AUDIO_DRIVER_VAR) {
            match DriverKind::parse(&value) {
                Some(kind) => settings.audio_driver = kind,
                None => settings.rejected.push(RejectedSetting {
                    variable: AUDIO_DRIVER_VAR,
                    value,
                    fallback: "mixer",
                }),
            }
        }

        settings.loop_track = lookup(LOOP_TRACK_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        if let Some(value) = lookup(VOLUME_VAR) {
            match value.trim().parse::<f32>() {
                Ok(volume) if volume.is_finite() => settings.volume = volume.clamp(0.0, 1.0),
                _ => settings.rejected.push(RejectedSetting {
                    variable: VOLUME_VAR,
                    value,
                    fallback: "full volume",
                }),
            }
        }

        settings.debug_logging = lookup(DEBUG_LOGGING_VAR).is_some();
        settings
    }

    /// Warns about every ignored value. Call once the subscriber is installed.
    pub fn report_rejected(&self) {
        for rejected in &self.rejected {
            tracing::warn!(
                variable = rejected.variable,
                value = %rejected.value,
                fallback = rejected.fallback,
                "ignoring invalid setting"
            );
        }
    }
}
