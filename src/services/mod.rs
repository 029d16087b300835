//! Process-level services for the command-line tools.

pub mod diagnostic_log;
pub mod tracing_setup;
