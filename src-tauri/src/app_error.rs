use crate::assets::AssetError;
use crate::background::BackgroundError;
use crate::countdown::ConfigError;
use crate::playback_driver::PlaybackError;
use crate::setup_flow::SetupError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppErrorKind {
    System,
    Config,
    Asset,
    Playback,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppErrorPayload {
    pub kind: AppErrorKind,
    pub message: String,
    pub detail: Option<String>,
    pub recoverable: bool,
}

/// User-facing error: a short message for the window plus the underlying
/// error text for the log.
#[derive(Debug, Clone)]
pub struct AppError {
    kind: AppErrorKind,
    message: String,
    detail: Option<String>,
    recoverable: bool,
}

impl AppError {
    pub fn new(kind: AppErrorKind, message: impl Into<String>, recoverable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
            recoverable,
        }
    }

    pub fn with_detail(
        kind: AppErrorKind,
        message: impl Into<String>,
        detail: impl Into<String>,
        recoverable: bool,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: Some(detail.into()),
            recoverable,
        }
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::System, message, true)
    }

    pub fn kind(&self) -> AppErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn is_recoverable(&self) -> bool {
        self.recoverable
    }

    pub fn payload(&self) -> AppErrorPayload {
        AppErrorPayload {
            kind: self.kind,
            message: self.message.clone(),
            detail: self.detail.clone(),
            recoverable: self.recoverable,
        }
    }

    /// Writes the error to the log with the most specific text available.
    pub fn log(&self) {
        let text = self.detail().unwrap_or(self.message());
        if self.is_recoverable() {
            tracing::warn!(kind = ?self.kind, "{text}");
        } else {
            tracing::error!(kind = ?self.kind, "{text}");
        }
    }
}

impl From<PlaybackError> for AppError {
    fn from(error: PlaybackError) -> Self {
        let detail = error.to_string();
        let message = match error {
            PlaybackError::NoTrackLoaded => "No track is loaded",
            PlaybackError::Open { .. } => "The audio file could not be opened",
            PlaybackError::Decode { .. } => "The audio file format is not supported",
            PlaybackError::Device(_) => "The audio device is not available",
            PlaybackError::Probe { .. } => "The track length could not be read",
        };
        Self::with_detail(AppErrorKind::Playback, message, detail, true)
    }
}

impl From<AssetError> for AppError {
    fn from(error: AssetError) -> Self {
        let detail = error.to_string();
        let message = match error {
            AssetError::Missing(_) => "Required application files are missing",
            AssetError::Read { .. } => "An application file could not be read",
        };
        Self::with_detail(AppErrorKind::Asset, message, detail, false)
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let detail = error.to_string();
        let message = match error {
            ConfigError::InvalidFormat(_) => "Enter the time as HH:MM",
            ConfigError::OutOfRange(_) => "That time of day does not exist",
        };
        Self::with_detail(AppErrorKind::Config, message, detail, true)
    }
}

impl From<SetupError> for AppError {
    fn from(error: SetupError) -> Self {
        match error {
            SetupError::Config(inner) => inner.into(),
            SetupError::Background(inner) => {
                let detail = inner.to_string();
                let message = match inner {
                    BackgroundError::Open { .. } => "The background image could not be opened",
                    BackgroundError::Encode(_) => "The background image could not be prepared",
                };
                Self::with_detail(AppErrorKind::Asset, message, detail, true)
            }
            SetupError::Prompt(inner) => Self::with_detail(
                AppErrorKind::System,
                "Setup was closed before it finished",
                inner.to_string(),
                false,
            ),
        }
    }
}
