//! Targets command implementation
//!
//! Lists everything the registry knows about, grouped by kind.

use anyhow::Result;
use clap::Args;
use console::style;

use crate::build::cmake::{BuildMode, CmakeDriver};
use crate::targets::{TargetKind, TargetRegistry};
use crate::utils::paths::find_project_root;
use crate::utils::terminal::print_warning;

/// Display order for target groups.
const KIND_ORDER: [TargetKind; 4] = [
    TargetKind::Executable,
    TargetKind::Library,
    TargetKind::Test,
    TargetKind::Experiment,
];

/// List all available targets in this project
#[derive(Args, Debug)]
pub struct TargetsCommand {
    /// Use the Release build configuration for discovery
    #[arg(long)]
    pub release: bool,
}

impl TargetsCommand {
    /// Execute the targets command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let project_root = find_project_root()?;
        let mode = BuildMode::from_release(self.release);
        let driver = CmakeDriver::new(project_root, mode, verbose);

        println!(
            "[targets] Discovering targets using {} configuration...",
            mode
        );

        let registry = TargetRegistry::detect(driver.project_root(), &driver.build_dir());

        if registry.is_empty() {
            print_warning("no targets found");
            return Ok(());
        }

        println!("[targets] Found {} targets:\n", registry.len());

        for kind in KIND_ORDER {
            let mut names: Vec<&str> = registry
                .iter()
                .filter(|(_, k)| *k == kind)
                .map(|(n, _)| n)
                .collect();
            if names.is_empty() {
                continue;
            }
            names.sort_unstable();

            println!("  {}", style(kind.group_name()).bold());
            for name in names {
                println!("    {:<20} ({})", name, kind);
            }
            println!();
        }

        println!("Usage examples:");
        println!("  v run vclient             # Build and run vclient");
        println!("  v build vtest_domain      # Build a single test target");
        println!("  v build vlib --release    # Build vlib in Release mode");
        println!("  v test                    # Build and run every test");
        println!();
        println!("All build commands support --release, --verbose, and --full flags");

        Ok(())
    }
}
