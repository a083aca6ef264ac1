//! Utility functions module
//!
//! Formatting and process signal helpers shared by the server.

pub mod format;
pub mod signals;

pub use format::format_clock;
pub use signals::shutdown_signal;
