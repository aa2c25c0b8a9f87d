//! Test command implementation
//!
//! Builds everything, then runs each `vtest_*` executable under the
//! build directory's `tests/` folder. The process exit code is the
//! number of failing tests.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use console::style;

use crate::build::cmake::{BuildMode, CmakeDriver};
use crate::commands::build::build_target;
use crate::error::VcliError;
use crate::exec::subprocess::run_command;
use crate::exec::test_log_level_env;
use crate::targets::{exe_name, TEST_PREFIX};
use crate::utils::paths::find_project_root;
use crate::utils::terminal::print_success;

/// Build and run all tests
#[derive(Args, Debug)]
pub struct TestCommand {
    /// Use Release build (default Debug)
    #[arg(long)]
    pub release: bool,

    /// Show full build output instead of the filtered error view
    #[arg(long)]
    pub full: bool,
}

impl TestCommand {
    /// Execute the test command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let project_root = find_project_root()?;
        let mode = BuildMode::from_release(self.release);
        let driver = CmakeDriver::new(project_root, mode, verbose);

        driver.ensure_configured()?;
        // Build everything so tests are up to date
        build_target(&driver, None, self.full, verbose)?;

        let tests_dir = driver.build_dir().join("tests");
        let exes = find_test_exes(&tests_dir)?;
        if exes.is_empty() {
            bail!("No test executables found under {}", tests_dir.display());
        }

        println!("[test] Running {} tests...", exes.len());
        let envs = test_log_level_env(verbose);

        let mut failures = 0usize;
        for exe in &exes {
            let name = exe
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            println!("[test] {}", name);
            let result = run_command(exe, &[], Some(&driver.build_dir()), &envs)?;
            if !result.success {
                failures += 1;
                println!(
                    "[test] {}: {} (exit {})",
                    style("FAILED").red().bold(),
                    name,
                    result.exit_code
                );
            }
        }

        if failures > 0 {
            return Err(VcliError::TestsFailed { failures }.into());
        }

        print_success("all tests passed");
        Ok(())
    }
}

/// Test executables are files named `vtest_*` directly under `tests/`.
fn find_test_exes(tests_dir: &Path) -> Result<Vec<PathBuf>> {
    if !tests_dir.exists() {
        return Ok(Vec::new());
    }

    let mut exes = Vec::new();
    for entry in std::fs::read_dir(tests_dir)
        .with_context(|| format!("Failed to read {}", tests_dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        // Exact executable name only: skips .pdb/.d companions on Windows
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if file_name.starts_with(TEST_PREFIX) && file_name == exe_name(stem) {
            exes.push(path);
        }
    }

    exes.sort();
    Ok(exes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_test_exes_filters_by_prefix() {
        let dir = TempDir::new().unwrap();
        let tests_dir = dir.path();
        std::fs::write(tests_dir.join(exe_name("vtest_domain")), "").unwrap();
        std::fs::write(tests_dir.join(exe_name("vtest_net")), "").unwrap();
        std::fs::write(tests_dir.join(exe_name("helper")), "").unwrap();
        std::fs::create_dir(tests_dir.join("vtest_dir")).unwrap();

        let exes = find_test_exes(tests_dir).unwrap();
        let names: Vec<String> = exes
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec![exe_name("vtest_domain"), exe_name("vtest_net")]);
    }

    #[test]
    fn test_missing_tests_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let exes = find_test_exes(&dir.path().join("tests")).unwrap();
        assert!(exes.is_empty());
    }
}
