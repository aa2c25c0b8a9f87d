//! Path utilities for the v CLI

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::presets::PRESETS_FILE;
use crate::error::{hints, VcliError};

/// Find the project root by looking for CMakePresets.json
pub fn find_project_root() -> Result<PathBuf> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    find_project_root_from(&current_dir)
}

/// Find the project root starting from a specific directory
pub fn find_project_root_from(start: &Path) -> Result<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join(PRESETS_FILE).exists() {
            return Ok(dir.to_path_buf());
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => {
                return Err(VcliError::config_with_hint(
                    format!(
                        "could not find {} in {} or any parent",
                        PRESETS_FILE,
                        start.display()
                    ),
                    hints::presets_not_found(),
                )
                .into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_finds_root_from_nested_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(PRESETS_FILE), "{}").unwrap();
        let nested = dir.path().join("client").join("net");
        std::fs::create_dir_all(&nested).unwrap();

        let root = find_project_root_from(&nested).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn test_missing_marker_is_config_error() {
        let dir = TempDir::new().unwrap();
        let err = find_project_root_from(dir.path()).unwrap_err();
        let err = err.downcast::<VcliError>().unwrap();
        assert!(matches!(err, VcliError::Config { .. }));
    }
}
