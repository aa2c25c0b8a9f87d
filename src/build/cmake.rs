//! CMake preset configuration and execution
//!
//! The project defines configure presets `debug`/`release` and build
//! presets `<mode>-<core target>` plus a general `<mode>-build`; this
//! module computes preset names and runs the configure step.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use crate::config::presets::PresetsFile;
use crate::error::VcliError;
use crate::targets::CORE_TARGETS;

/// Debug or Release build configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    #[default]
    Debug,
    Release,
}

impl BuildMode {
    pub fn from_release(release: bool) -> Self {
        if release {
            BuildMode::Release
        } else {
            BuildMode::Debug
        }
    }

    /// Configure preset name.
    pub fn preset(self) -> &'static str {
        match self {
            BuildMode::Debug => "debug",
            BuildMode::Release => "release",
        }
    }

    /// Build output directory name under the project root.
    pub fn dir_name(self) -> &'static str {
        match self {
            BuildMode::Debug => "cmake-build-debug",
            BuildMode::Release => "cmake-build-release",
        }
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildMode::Debug => write!(f, "Debug"),
            BuildMode::Release => write!(f, "Release"),
        }
    }
}

/// Preset-based CMake invoker for one project/mode pair
#[derive(Debug)]
pub struct CmakeDriver {
    project_root: PathBuf,
    mode: BuildMode,
    verbose: bool,
}

impl CmakeDriver {
    pub fn new(project_root: PathBuf, mode: BuildMode, verbose: bool) -> Self {
        Self {
            project_root,
            mode,
            verbose,
        }
    }

    pub fn project_root(&self) -> &PathBuf {
        &self.project_root
    }

    pub fn build_dir(&self) -> PathBuf {
        self.project_root.join(self.mode.dir_name())
    }

    /// Find CMake executable
    pub fn find_cmake() -> Result<PathBuf> {
        which::which("cmake").context("CMake not found. Please install CMake and add it to PATH.")
    }

    /// A build directory counts as configured once Ninja has a graph.
    pub fn is_configured(&self) -> bool {
        self.build_dir().join("build.ninja").exists()
    }

    /// Run the configure preset.
    ///
    /// `VCPKG_ROOT`, when set, is forwarded as the CMake toolchain file so
    /// vcpkg dependencies resolve the same way the IDE configures them.
    pub fn configure(&self) -> Result<()> {
        let presets = PresetsFile::load(&self.project_root)?;
        if !presets.has_configure_preset(self.mode.preset()) {
            return Err(VcliError::config_with_hint(
                format!(
                    "configure preset '{}' not found in CMakePresets.json",
                    self.mode.preset()
                ),
                "Check the project's CMakePresets.json; the CLI expects 'debug' and 'release' \
                 configure presets.",
            )
            .into());
        }

        let cmake = Self::find_cmake()?;

        let mut args: Vec<String> = vec!["--preset".into(), self.mode.preset().into()];
        if let Ok(vcpkg) = std::env::var("VCPKG_ROOT") {
            if !vcpkg.is_empty() {
                args.push("-D".into());
                args.push(format!(
                    "CMAKE_TOOLCHAIN_FILE={}/scripts/buildsystems/vcpkg.cmake",
                    vcpkg
                ));
            }
        }

        println!("[configure] cmake {}", args.join(" "));

        let mut cmd = Command::new(&cmake);
        cmd.current_dir(&self.project_root);
        cmd.args(&args);

        if self.verbose {
            eprintln!("Running: {:?}", cmd);
        }

        let status = cmd
            .stdin(Stdio::null())
            .status()
            .context("Failed to run CMake configure")?;

        if !status.success() {
            return Err(VcliError::BuildFailed {
                code: status.code().unwrap_or(-1),
            }
            .into());
        }

        Ok(())
    }

    /// Configure only when the Ninja graph is missing.
    pub fn ensure_configured(&self) -> Result<()> {
        if !self.is_configured() {
            self.configure()?;
        }
        Ok(())
    }

    /// Build preset for an optional target. Core targets have dedicated
    /// presets; everything else goes through the general build preset.
    pub fn build_preset(&self, target: Option<&str>) -> String {
        match target {
            Some(t) if CORE_TARGETS.contains(&t) => format!("{}-{}", self.mode.preset(), t),
            _ => format!("{}-build", self.mode.preset()),
        }
    }

    /// Arguments for `cmake` to build an optional target. Non-core
    /// targets need an explicit `--target` on top of the general preset.
    pub fn build_args(&self, target: Option<&str>) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "--build".into(),
            "--preset".into(),
            self.build_preset(target),
        ];
        if let Some(t) = target {
            if !CORE_TARGETS.contains(&t) {
                args.push("--target".into());
                args.push(t.into());
            }
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(mode: BuildMode) -> CmakeDriver {
        CmakeDriver::new(PathBuf::from("/proj"), mode, false)
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(BuildMode::from_release(false).preset(), "debug");
        assert_eq!(BuildMode::from_release(true).preset(), "release");
        assert_eq!(BuildMode::Debug.dir_name(), "cmake-build-debug");
        assert_eq!(BuildMode::Release.dir_name(), "cmake-build-release");
    }

    #[test]
    fn test_core_targets_use_dedicated_presets() {
        let d = driver(BuildMode::Debug);
        assert_eq!(d.build_preset(Some("vclient")), "debug-vclient");
        assert_eq!(d.build_preset(Some("vlib")), "debug-vlib");
        let r = driver(BuildMode::Release);
        assert_eq!(r.build_preset(Some("vserver")), "release-vserver");
    }

    #[test]
    fn test_other_targets_use_general_preset() {
        let d = driver(BuildMode::Debug);
        assert_eq!(d.build_preset(Some("vtest_domain")), "debug-build");
        assert_eq!(d.build_preset(None), "debug-build");
    }

    #[test]
    fn test_build_args_add_target_for_non_core() {
        let d = driver(BuildMode::Debug);
        assert_eq!(
            d.build_args(Some("vtest_net")),
            vec!["--build", "--preset", "debug-build", "--target", "vtest_net"]
        );
        assert_eq!(
            d.build_args(Some("vclient")),
            vec!["--build", "--preset", "debug-vclient"]
        );
        assert_eq!(d.build_args(None), vec!["--build", "--preset", "debug-build"]);
    }

    #[test]
    fn test_build_dir_follows_mode() {
        assert_eq!(
            driver(BuildMode::Release).build_dir(),
            PathBuf::from("/proj/cmake-build-release")
        );
    }
}
