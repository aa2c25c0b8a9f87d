//! Reload command implementation

use anyhow::Result;
use clap::Args;

use crate::build::cmake::{BuildMode, CmakeDriver};
use crate::utils::paths::find_project_root;

/// Reconfigure the CMake cache for the current preset
#[derive(Args, Debug)]
pub struct ReloadCommand {
    /// Reconfigure the Release preset instead of Debug
    #[arg(long)]
    pub release: bool,
}

impl ReloadCommand {
    /// Execute the reload command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let project_root = find_project_root()?;
        let mode = BuildMode::from_release(self.release);
        let driver = CmakeDriver::new(project_root, mode, verbose);
        driver.configure()
    }
}
