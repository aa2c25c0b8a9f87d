//! Clean command implementation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use walkdir::WalkDir;

use crate::build::cmake::BuildMode;
use crate::utils::paths::find_project_root;
use crate::utils::terminal::{format_size, print_warning};

/// Directory entries preserved by a partial clean (downloaded deps).
const KEEP_ENTRIES: [&str; 1] = ["extern"];

/// Clean the build directory
#[derive(Args, Debug)]
pub struct CleanCommand {
    /// Remove the entire build directory instead of a partial clean
    #[arg(long)]
    pub all: bool,

    /// Clean the Release build directory instead of Debug
    #[arg(long)]
    pub release: bool,
}

impl CleanCommand {
    /// Execute the clean command
    pub fn execute(self, _verbose: bool) -> Result<()> {
        let project_root = find_project_root()?;
        let mode = BuildMode::from_release(self.release);
        let bdir = project_root.join(mode.dir_name());

        if !bdir.exists() {
            print_warning(&format!("build dir does not exist: {}", bdir.display()));
            return Ok(());
        }

        let freed = dir_size(&bdir);

        if self.all {
            println!("[clean] Removing {}", bdir.display());
            fs::remove_dir_all(&bdir)
                .with_context(|| format!("Failed to remove {}", bdir.display()))?;
        } else {
            println!("[clean] Removing contents of {}", bdir.display());
            clean_contents(&bdir)?;
        }

        println!("[clean] Freed {}", format_size(freed));
        Ok(())
    }
}

/// Remove everything inside `bdir` except the keep-list entries.
fn clean_contents(bdir: &Path) -> Result<()> {
    for entry in fs::read_dir(bdir).with_context(|| format!("Failed to read {}", bdir.display()))? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name();
        if KEEP_ENTRIES.iter().any(|k| name == *k) {
            continue;
        }
        if path.is_dir() {
            fs::remove_dir_all(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        } else {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
    }
    Ok(())
}

fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter_map(|e| e.metadata().ok())
        .filter(|m| m.is_file())
        .map(|m| m.len())
        .sum()
}
