//! Build orchestration
//!
//! `cmake` drives CMake configure/build through the project's presets;
//! `logfilter` condenses a failed build's output to the lines that
//! matter.

pub mod cmake;
pub mod logfilter;
