//! Target model and registry
//!
//! A target is a named buildable unit. The registry maps names to kinds
//! and is rebuilt on every invocation: static knowledge of the project
//! layout seeds it, and Ninja's target list (when a build is configured)
//! extends it. The two steps are plain functions merged here so nothing
//! hides in global state.

pub mod resolver;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::VcliError;

/// Core targets that have dedicated CMake build presets.
pub const CORE_TARGETS: [&str; 3] = ["vclient", "vserver", "vlib"];

/// Prefix for per-directory test executables under `tests/`.
pub const TEST_PREFIX: &str = "vtest_";

/// Prefix for experiment binaries under `experiments/`.
pub const EXP_PREFIX: &str = "vexp_";

/// What a target builds into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Executable,
    Library,
    Test,
    Experiment,
}

impl TargetKind {
    /// Libraries cannot be run; everything else produces an executable.
    pub fn is_runnable(self) -> bool {
        !matches!(self, TargetKind::Library)
    }

    /// Group heading used by `v targets`.
    pub fn group_name(self) -> &'static str {
        match self {
            TargetKind::Executable => "Executables",
            TargetKind::Library => "Libraries",
            TargetKind::Test => "Tests",
            TargetKind::Experiment => "Experiments",
        }
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKind::Executable => write!(f, "executable"),
            TargetKind::Library => write!(f, "library"),
            TargetKind::Test => write!(f, "test"),
            TargetKind::Experiment => write!(f, "experiment"),
        }
    }
}

/// Name → kind mapping for one invocation
#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: BTreeMap<String, TargetKind>,
}

impl TargetRegistry {
    /// Build the registry: static seeding plus Ninja discovery.
    ///
    /// Static entries win over discovered ones; discovery failures are
    /// ignored (an unconfigured build directory is not an error).
    pub fn detect(project_root: &Path, build_dir: &Path) -> Self {
        let mut targets = seed_static(project_root);
        for (name, kind) in discover_ninja(build_dir) {
            targets.entry(name).or_insert(kind);
        }
        Self { targets }
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.targets.keys().cloned().collect()
    }

    pub fn kind(&self, name: &str) -> Option<TargetKind> {
        self.targets.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TargetKind)> {
        self.targets.iter().map(|(n, k)| (n.as_str(), *k))
    }

    /// Resolve a partial/fuzzy name against this registry.
    pub fn resolve(&self, query: &str) -> Result<String, VcliError> {
        resolver::resolve(query, &self.names())
    }
}

/// Static target seeding from the project layout.
///
/// The three core targets always exist; `tests/<name>/main.cpp` adds
/// `vtest_<name>` and `experiments/<name>/main.cpp` adds `vexp_<name>`.
pub fn seed_static(project_root: &Path) -> BTreeMap<String, TargetKind> {
    let mut targets = BTreeMap::new();

    targets.insert("vclient".to_string(), TargetKind::Executable);
    targets.insert("vserver".to_string(), TargetKind::Executable);
    targets.insert("vlib".to_string(), TargetKind::Library);

    for (dir, prefix, kind) in [
        ("tests", TEST_PREFIX, TargetKind::Test),
        ("experiments", EXP_PREFIX, TargetKind::Experiment),
    ] {
        let base = project_root.join(dir);
        let Ok(entries) = std::fs::read_dir(&base) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() && path.join("main.cpp").exists() {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    targets.insert(format!("{}{}", prefix, name), kind);
                }
            }
        }
    }

    targets
}

/// Additional targets discovered from `ninja -t targets`.
///
/// Returns nothing when the build directory is not configured or ninja
/// is unavailable; discovery is best-effort.
pub fn discover_ninja(build_dir: &Path) -> Vec<(String, TargetKind)> {
    if !build_dir.join("build.ninja").exists() {
        return Vec::new();
    }

    let output = Command::new("ninja")
        .args(["-t", "targets"])
        .current_dir(build_dir)
        .output();
    let Ok(output) = output else {
        return Vec::new();
    };
    if !output.status.success() {
        return Vec::new();
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_ninja_targets(&stdout)
}

/// Parse `ninja -t targets` output, keeping only project targets.
fn parse_ninja_targets(stdout: &str) -> Vec<(String, TargetKind)> {
    let mut found = Vec::new();
    for line in stdout.lines() {
        let name = line.split(':').next().unwrap_or("").trim();
        if is_project_target(name) {
            found.push((name.to_string(), classify(name)));
        }
    }
    found
}

/// External dependency and CMake utility targets are not ours; only the
/// core names and the `vtest_`/`vexp_` families count.
pub fn is_project_target(name: &str) -> bool {
    CORE_TARGETS.contains(&name) || name.starts_with(TEST_PREFIX) || name.starts_with(EXP_PREFIX)
}

/// Classify a project target by its name.
pub fn classify(name: &str) -> TargetKind {
    if name.starts_with(TEST_PREFIX) {
        TargetKind::Test
    } else if name.starts_with(EXP_PREFIX) {
        TargetKind::Experiment
    } else if name == "vlib" {
        TargetKind::Library
    } else {
        TargetKind::Executable
    }
}

/// Platform executable name (`.exe` suffix on Windows).
pub fn exe_name(name: &str) -> String {
    format!("{}{}", name, std::env::consts::EXE_SUFFIX)
}

/// Where a built artifact lives: tests under `<build>/tests/`, everything
/// else directly in the build directory.
pub fn artifact_path(build_dir: &Path, name: &str, kind: TargetKind) -> PathBuf {
    match kind {
        TargetKind::Test => build_dir.join("tests").join(exe_name(name)),
        _ => build_dir.join(exe_name(name)),
    }
}
