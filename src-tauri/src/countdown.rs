use crate::models::ClockDisplay;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("expected a time as HH:MM, got {0:?}")]
    InvalidFormat(String),
    #[error("{0:?} is not a time of day")]
    OutOfRange(String),
}

/// Checks `input` against `^[0-2][0-9]:[0-5][0-9]$`.
///
/// The hour half of the pattern admits 24 through 29. Those strings pass here
/// and are rejected later by [`parse_time_of_day`] with
/// [`ConfigError::OutOfRange`].
pub fn matches_time_pattern(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 5
        && matches!(bytes[0], b'0'..=b'2')
        && bytes[1].is_ascii_digit()
        && bytes[2] == b':'
        && matches!(bytes[3], b'0'..=b'5')
        && bytes[4].is_ascii_digit()
}

pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, ConfigError> {
    if !matches_time_pattern(input) {
        return Err(ConfigError::InvalidFormat(input.to_string()));
    }
    let hour: u32 = input[0..2]
        .parse()
        .map_err(|_| ConfigError::InvalidFormat(input.to_string()))?;
    let minute: u32 = input[3..5]
        .parse()
        .map_err(|_| ConfigError::InvalidFormat(input.to_string()))?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| ConfigError::OutOfRange(input.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    pub display: ClockDisplay,
    /// Set on the single tick that observed the target being reached.
    pub expired_now: bool,
    /// Set on the single tick after expiry that should raise the "get ready"
    /// notice.
    pub notify: bool,
}

#[derive(Debug, Clone)]
pub struct CountdownEngine {
    target: NaiveDateTime,
    expired: bool,
    notified: bool,
}

impl CountdownEngine {
    pub fn new(target: NaiveDateTime) -> Self {
        Self {
            target,
            expired: false,
            notified: false,
        }
    }

    /// Builds an engine counting down to `input` (HH:MM) on `today`.
    pub fn configure(input: &str, today: NaiveDate) -> Result<Self, ConfigError> {
        let time = parse_time_of_day(input)?;
        Ok(Self::new(today.and_time(time)))
    }

    pub fn target(&self) -> NaiveDateTime {
        self.target
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Remaining time at `now`, floored to whole seconds and clamped at zero.
    pub fn remaining_at(&self, now: NaiveDateTime) -> Duration {
        if self.expired {
            return Duration::ZERO;
        }
        let remaining = self.target - now;
        if remaining <= TimeDelta::zero() {
            Duration::ZERO
        } else {
            Duration::from_secs(remaining.num_seconds().max(0) as u64)
        }
    }

    /// Recomputes the display from the wall clock. Never decrements a stored
    /// counter, so late or skipped ticks do not drift.
    pub fn tick(&mut self, now: NaiveDateTime) -> TickOutcome {
        let remaining = self.target - now;
        if !self.expired && remaining > TimeDelta::zero() {
            return TickOutcome {
                display: ClockDisplay::from_duration(self.remaining_at(now)),
                expired_now: false,
                notify: false,
            };
        }

        let expired_now = !self.expired;
        let notify = !expired_now && !self.notified;
        self.expired = true;
        if notify {
            self.notified = true;
        }
        TickOutcome {
            display: ClockDisplay::zero(),
            expired_now,
            notify,
        }
    }
}
