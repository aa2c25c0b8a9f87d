//! CLI argument parsing using clap derive macros

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{
    build::BuildCommand, clean::CleanCommand, format::FormatCommand, reload::ReloadCommand,
    run::RunCommand, targets::TargetsCommand, test::TestCommand,
};

/// v - build orchestration for the v project
///
/// A thin CLI over CMake presets, Ninja and clang-format for the
/// vclient/vserver/vlib codebase.
#[derive(Parser, Debug)]
#[command(name = "v")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (children run with V_LOG_LEVEL=trace)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build targets via CMake presets
    Build(BuildCommand),

    /// Build and run an executable target
    Run(RunCommand),

    /// Clean the build directory
    Clean(CleanCommand),

    /// Reconfigure the CMake cache for the current preset
    Reload(ReloadCommand),

    /// List all available targets
    #[command(visible_alias = "list-targets")]
    Targets(TargetsCommand),

    /// Format sources with clang-format
    #[command(visible_alias = "fmt")]
    Format(FormatCommand),

    /// Build and run all tests
    Test(TestCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // Set up terminal colors
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        // Execute the subcommand
        match self.command {
            Commands::Build(cmd) => cmd.execute(self.verbose),
            Commands::Run(cmd) => cmd.execute(self.verbose),
            Commands::Clean(cmd) => cmd.execute(self.verbose),
            Commands::Reload(cmd) => cmd.execute(self.verbose),
            Commands::Targets(cmd) => cmd.execute(self.verbose),
            Commands::Format(cmd) => cmd.execute(self.verbose),
            Commands::Test(cmd) => cmd.execute(self.verbose),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_asserts() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fmt_alias_parses() {
        let cli = Cli::try_parse_from(["v", "fmt", "vclient"]).unwrap();
        assert!(matches!(cli.command, Commands::Format(_)));
    }

    #[test]
    fn test_run_trailing_args() {
        let cli = Cli::try_parse_from(["v", "run", "vclient", "--release", "--", "--fps", "60"])
            .unwrap();
        match cli.command {
            Commands::Run(cmd) => {
                assert_eq!(cmd.target, "vclient");
                assert!(cmd.release);
                assert_eq!(cmd.args, vec!["--fps", "60"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_verbose_after_subcommand() {
        let cli = Cli::try_parse_from(["v", "build", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }
}
