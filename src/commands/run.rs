//! Run command implementation
//!
//! Resolves a target name, builds it, then executes the produced binary
//! from the build directory.

use anyhow::Result;
use clap::Args;

use crate::build::cmake::{BuildMode, CmakeDriver};
use crate::commands::build::build_target;
use crate::error::VcliError;
use crate::exec::log_level_env;
use crate::exec::subprocess::run_command;
use crate::targets::{artifact_path, TargetRegistry};
use crate::utils::paths::find_project_root;

/// Build and run an executable target
#[derive(Args, Debug)]
pub struct RunCommand {
    /// Target name (vclient, vserver, vtest_domain, ...); partial names
    /// are matched fuzzily
    pub target: String,

    /// Use Release build (default Debug)
    #[arg(long)]
    pub release: bool,

    /// Show full build output instead of the filtered error view
    #[arg(long)]
    pub full: bool,

    /// Arguments to pass to the executable
    #[arg(last = true)]
    pub args: Vec<String>,
}

impl RunCommand {
    /// Execute the run command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let project_root = find_project_root()?;
        let mode = BuildMode::from_release(self.release);
        let driver = CmakeDriver::new(project_root, mode, verbose);

        let registry = TargetRegistry::detect(driver.project_root(), &driver.build_dir());
        let name = registry.resolve(&self.target)?;
        // resolve() only returns registered names
        let kind = registry
            .kind(&name)
            .expect("resolved target must be registered");

        if !kind.is_runnable() {
            return Err(VcliError::NotRunnable { target: name, kind }.into());
        }

        driver.ensure_configured()?;
        build_target(&driver, Some(&name), self.full, verbose)?;

        let exe = artifact_path(&driver.build_dir(), &name, kind);
        if !exe.is_file() {
            return Err(VcliError::ArtifactMissing { path: exe }.into());
        }

        println!("[run] {}", exe.display());
        let envs = log_level_env(verbose);
        let result = run_command(&exe, &self.args, Some(&driver.build_dir()), &envs)?;

        if !result.success {
            return Err(VcliError::ProcessFailed {
                program: name,
                code: result.exit_code,
            }
            .into());
        }

        Ok(())
    }
}
