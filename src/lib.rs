//! Chess Clock - A two-player chess clock served over HTTP
//!
//! This library provides the clock state machine, the background task that
//! ticks the running clock, and the HTTP endpoints that act as its tap targets.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, ClockState, Player};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
