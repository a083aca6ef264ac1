//! Draft state of the duration dialog

use std::{str::FromStr, time::Duration};
use serde::{Deserialize, Serialize};

use super::clock_state::{clamped_duration, MAX_MINUTES, MAX_SECONDS};

/// Which picker column a control acts on
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickerField {
    Minutes,
    Seconds,
}

impl PickerField {
    fn max(self) -> u64 {
        match self {
            PickerField::Minutes => MAX_MINUTES,
            PickerField::Seconds => MAX_SECONDS,
        }
    }
}

impl FromStr for PickerField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minutes" => Ok(PickerField::Minutes),
            "seconds" => Ok(PickerField::Seconds),
            other => Err(format!("Unknown picker field: {}", other)),
        }
    }
}

/// Minutes and seconds being edited before they are applied to the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationPicker {
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationPicker {
    /// Seed the picker from an existing duration
    pub fn from_duration(duration: Duration) -> Self {
        let total = duration.as_secs();
        Self {
            minutes: (total / 60).min(MAX_MINUTES),
            seconds: (total % 60).min(MAX_SECONDS),
        }
    }

    /// Overwrite both columns, clamping each to its range
    pub fn set(&mut self, minutes: u64, seconds: u64) {
        self.minutes = minutes.min(MAX_MINUTES);
        self.seconds = seconds.min(MAX_SECONDS);
    }

    pub fn increment(&mut self, field: PickerField) {
        self.adjust(field, 1);
    }

    pub fn decrement(&mut self, field: PickerField) {
        self.adjust(field, -1);
    }

    /// Move `field` by `delta` steps, saturating at its bounds
    pub fn adjust(&mut self, field: PickerField, delta: i64) {
        let value = match field {
            PickerField::Minutes => &mut self.minutes,
            PickerField::Seconds => &mut self.seconds,
        };
        let next = if delta.is_negative() {
            value.saturating_sub(delta.unsigned_abs())
        } else {
            value.saturating_add(delta as u64)
        };
        *value = next.min(field.max());
    }

    /// The duration this picker would configure
    pub fn to_duration(&self) -> Duration {
        clamped_duration(self.minutes, self.seconds)
    }
}

impl Default for DurationPicker {
    fn default() -> Self {
        Self::from_duration(super::clock_state::DEFAULT_DURATION)
    }
}
