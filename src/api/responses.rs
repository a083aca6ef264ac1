//! API request and response structures

use std::time::Duration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::{clock_state::clamped_duration, ClockSnapshot, ClockUpdate, DurationPicker},
    utils::format_clock,
};

/// Body of duration-setting requests.
///
/// Fields are signed so out-of-range values are clamped rather than rejected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DurationRequest {
    #[serde(default)]
    pub minutes: i64,
    #[serde(default)]
    pub seconds: i64,
}

impl DurationRequest {
    /// Minutes and seconds with negatives raised to zero
    pub fn fields(&self) -> (u64, u64) {
        (self.minutes.max(0) as u64, self.seconds.max(0) as u64)
    }

    /// The clamped duration this request asks for
    pub fn duration(&self) -> Duration {
        let (minutes, seconds) = self.fields();
        clamped_duration(minutes, seconds)
    }
}

/// API response structure for clock control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub applied: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub clock: ClockSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, applied: bool, message: String, clock: ClockSnapshot) -> Self {
        Self {
            status,
            applied,
            message,
            timestamp: Utc::now(),
            clock,
        }
    }

    /// Response for an action that changed the clock
    pub fn applied(message: String, clock: ClockSnapshot) -> Self {
        Self::new("applied".to_string(), true, message, clock)
    }

    /// Response for an action the clock ignored
    pub fn ignored(message: String, clock: ClockSnapshot) -> Self {
        Self::new("ignored".to_string(), false, message, clock)
    }

    /// Pick the applied or ignored form from a clock update
    pub fn from_update(update: ClockUpdate, applied: &str, ignored: &str) -> Self {
        if update.applied {
            Self::applied(applied.to_string(), update.clock)
        } else {
            Self::ignored(ignored.to_string(), update.clock)
        }
    }
}

/// Duration dialog draft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerResponse {
    pub minutes: u64,
    pub seconds: u64,
    pub display: String,
}

impl From<DurationPicker> for PickerResponse {
    fn from(picker: DurationPicker) -> Self {
        Self {
            minutes: picker.minutes,
            seconds: picker.seconds,
            display: format_clock(picker.to_duration()),
        }
    }
}

/// Full status response with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub clock: ClockSnapshot,
    pub picker: PickerResponse,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
