//! v CLI - build orchestration for the v project
//!
//! A command-line wrapper around CMake presets, Ninja and clang-format:
//! configure, build, run, clean, list, format and test the project's
//! targets with fuzzy name matching and filtered build logs.
//!
//! ## Architecture
//!
//! ```text
//! Rust CLI → commands/ → build/ + targets/ → cmake / ninja / clang-format
//! ```

mod build;
mod cli;
mod commands;
mod config;
mod error;
mod exec;
mod targets;
mod utils;

use clap::Parser;
use console::style;

use cli::Cli;
use error::VcliError;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli.execute() {
        let code = match err.downcast_ref::<VcliError>() {
            Some(verr) => {
                verr.display_with_hints();
                verr.exit_code()
            }
            None => {
                eprintln!("{} {:#}", style("ERROR:").red().bold(), err);
                1
            }
        };
        std::process::exit(code);
    }
}
