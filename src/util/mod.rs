//! Shared utilities: clocks, timing helpers and logging setup

#[cfg(unix)]
pub mod fast_time;
pub mod logging;
pub mod time;
