//! State management module
//!
//! The clock state machine, the duration picker and the shared application
//! state that wraps them.

pub mod clock_state;
pub mod duration_picker;
pub mod app_state;

// Re-export main types
pub use clock_state::{ClockSnapshot, ClockState, Player, PlayerClock};
pub use duration_picker::{DurationPicker, PickerField};
pub use app_state::{AppState, ClockUpdate};
