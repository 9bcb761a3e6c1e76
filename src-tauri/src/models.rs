use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockDisplay {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub text: String,
}

impl ClockDisplay {
    pub fn from_duration(remaining: Duration) -> Self {
        let total = remaining.as_secs();
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;
        Self {
            hours,
            minutes,
            seconds,
            text: format!("{hours:02} : {minutes:02} : {seconds:02}"),
        }
    }

    pub fn zero() -> Self {
        Self::from_duration(Duration::ZERO)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlayingPayload {
    pub text: String,
    pub state: PlaybackState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShufflePayload {
    pub enabled: bool,
    pub icon_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundPayload {
    pub name: String,
    pub data_url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconPayload {
    pub name: String,
    pub color: String,
    pub data_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRequest {
    pub id: u64,
    pub title: String,
    pub message: String,
}

/// Answer sent back by the frontend for a text prompt. `None` means the
/// prompt was cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptAnswer {
    pub id: u64,
    pub value: Option<String>,
}
