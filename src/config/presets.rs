//! CMakePresets.json loading and validation
//!
//! Preset names are validated before CMake is invoked so a typo'd or
//! incomplete presets file fails with a hint instead of a raw CMake
//! error.

use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::error::VcliError;

/// File name that marks the project root.
pub const PRESETS_FILE: &str = "CMakePresets.json";

/// Subset of CMakePresets.json the CLI cares about
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PresetsFile {
    #[serde(default)]
    pub configure_presets: Vec<PresetEntry>,
}

/// One preset entry; hidden presets are bases, not invocable ones
#[derive(Debug, Deserialize)]
pub struct PresetEntry {
    pub name: String,
    #[serde(default)]
    pub hidden: bool,
}

impl PresetsFile {
    /// Load and parse `<project_root>/CMakePresets.json`.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(PRESETS_FILE);
        let text = std::fs::read_to_string(&path).map_err(|e| {
            VcliError::config_with_hint(
                format!("failed to read {}: {}", path.display(), e),
                crate::error::hints::presets_not_found(),
            )
        })?;

        let presets: PresetsFile = serde_json::from_str(&text).map_err(|e| {
            VcliError::config_with_hint(
                format!("invalid {}: {}", path.display(), e),
                "Fix the JSON syntax in CMakePresets.json; CMake itself will reject it too.",
            )
        })?;

        Ok(presets)
    }

    pub fn has_configure_preset(&self, name: &str) -> bool {
        self.configure_presets
            .iter()
            .any(|p| p.name == name && !p.hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "version": 6,
        "configurePresets": [
            {"name": "base", "hidden": true, "generator": "Ninja"},
            {"name": "debug", "inherits": "base"},
            {"name": "release", "inherits": "base"}
        ],
        "buildPresets": [
            {"name": "debug-build", "configurePreset": "debug"},
            {"name": "debug-vclient", "configurePreset": "debug", "targets": "vclient"}
        ]
    }"#;

    #[test]
    fn test_load_sample() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(PRESETS_FILE), SAMPLE).unwrap();
        let presets = PresetsFile::load(dir.path()).unwrap();
        assert!(presets.has_configure_preset("debug"));
        assert!(presets.has_configure_preset("release"));
        assert!(!presets.has_configure_preset("profile"));
    }

    #[test]
    fn test_hidden_presets_are_not_invocable() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(PRESETS_FILE), SAMPLE).unwrap();
        let presets = PresetsFile::load(dir.path()).unwrap();
        assert!(!presets.has_configure_preset("base"));
    }

    #[test]
    fn test_missing_file_errors_with_hint() {
        let dir = TempDir::new().unwrap();
        let err = PresetsFile::load(dir.path()).unwrap_err();
        let err = err.downcast::<VcliError>().unwrap();
        assert!(matches!(err, VcliError::Config { hint: Some(_), .. }));
    }

    #[test]
    fn test_invalid_json_errors() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(PRESETS_FILE), "{not json").unwrap();
        assert!(PresetsFile::load(dir.path()).is_err());
    }
}
