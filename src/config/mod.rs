//! Project configuration
//!
//! The only configuration the CLI consumes is the project's
//! `CMakePresets.json`; it doubles as the project-root marker.

pub mod presets;
