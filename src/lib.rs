// Theme maintenance library - exposes all job modules for the binaries and tests

pub mod catalog;
pub mod config;
pub mod css;
pub mod json_io;
pub mod preferences;
pub mod theme;
pub mod versions;

#[cfg(feature = "runtime")]
pub mod services;
