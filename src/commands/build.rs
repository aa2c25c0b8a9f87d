//! Build command implementation

use anyhow::Result;
use clap::Args;

use crate::build::cmake::{BuildMode, CmakeDriver};
use crate::build::logfilter::LogFilter;
use crate::error::VcliError;
use crate::exec::subprocess::{run_command, run_streaming};
use crate::exec::log_level_env;
use crate::targets::TargetRegistry;
use crate::utils::paths::find_project_root;

/// Build targets via CMake presets
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Target name (partial names are matched fuzzily); builds everything
    /// when omitted
    pub target: Option<String>,

    /// Build in Release mode (default Debug)
    #[arg(long)]
    pub release: bool,

    /// Show full build output instead of the filtered error view
    #[arg(long)]
    pub full: bool,
}

impl BuildCommand {
    /// Execute the build command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let project_root = find_project_root()?;
        let mode = BuildMode::from_release(self.release);
        let driver = CmakeDriver::new(project_root, mode, verbose);

        let resolved = match &self.target {
            Some(query) => {
                let registry = TargetRegistry::detect(driver.project_root(), &driver.build_dir());
                Some(registry.resolve(query)?)
            }
            None => None,
        };

        driver.ensure_configured()?;
        build_target(&driver, resolved.as_deref(), self.full, verbose)
    }
}

/// Build one target (or everything) through the matching build preset.
///
/// Shared by `build`, `run` and `test`. With `full` the child owns the
/// terminal; otherwise its combined output is buffered and filtered down
/// to error context windows, plus the log tail when the build failed.
pub fn build_target(
    driver: &CmakeDriver,
    target: Option<&str>,
    full: bool,
    verbose: bool,
) -> Result<()> {
    let cmake = CmakeDriver::find_cmake()?;
    let args = driver.build_args(target);
    let envs = log_level_env(verbose);

    println!("[build] cmake {}", args.join(" "));

    if full {
        let result = run_command(&cmake, &args, Some(driver.project_root()), &envs)?;
        if !result.success {
            return Err(VcliError::BuildFailed {
                code: result.exit_code,
            }
            .into());
        }
        return Ok(());
    }

    let result = run_streaming(&cmake, &args, Some(driver.project_root()), &envs)?;

    let report = LogFilter::default().apply(&result.lines, result.success);
    report.print("build");

    if !result.success {
        return Err(VcliError::BuildFailed {
            code: result.exit_code,
        }
        .into());
    }

    println!("[build] finished in {:.1}s", result.duration.as_secs_f64());
    Ok(())
}
