//! Clock face formatting

use std::time::Duration;

/// Render a remaining time as `m:ss.t`
pub fn format_clock(time: Duration) -> String {
    let tenths_total = time.as_millis() / 100;
    let minutes = tenths_total / 600;
    let seconds = (tenths_total / 10) % 60;
    let tenths = tenths_total % 10;
    format!("{}:{:02}.{}", minutes, seconds, tenths)
}
