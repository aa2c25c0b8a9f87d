//! Command implementations
//!
//! Each command module provides a clap-derived struct and execute method.

pub mod build;
pub mod clean;
pub mod format;
pub mod reload;
pub mod run;
pub mod targets;
pub mod test;
