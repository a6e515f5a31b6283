//! Ambient services: logging, time, and the contact submission worker.

pub mod log_dirs;
pub mod submit;
pub mod time_source;
pub mod tracing_setup;
