//! Tool detection and validation
//!
//! The CLI shells out to cmake, ninja and clang-format; this module
//! locates them and turns a missing tool into an error with install
//! instructions.

use std::path::PathBuf;
use std::process::Command;

use anyhow::Result;
use which::which;

use crate::error::{hints, VcliError};

/// Tool detection result
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Tool name
    pub name: String,
    /// Path to the tool executable
    pub path: PathBuf,
    /// Tool version string (if available)
    pub version: Option<String>,
}

/// Check if a tool exists and return its information
pub fn check_tool(tool_name: &str) -> Option<ToolInfo> {
    match which(tool_name) {
        Ok(path) => {
            let version = get_tool_version(tool_name);
            Some(ToolInfo {
                name: tool_name.to_string(),
                path,
                version,
            })
        }
        Err(_) => None,
    }
}

/// Get tool version by running `tool --version`
fn get_tool_version(tool_name: &str) -> Option<String> {
    let output = Command::new(tool_name).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    let version = String::from_utf8_lossy(&output.stdout);
    Some(version.lines().next().unwrap_or("").trim().to_string())
}

/// Require a tool to exist, return error with hint if missing
pub fn require_tool(tool_name: &str, required_for: &str) -> Result<ToolInfo> {
    match check_tool(tool_name) {
        Some(info) => Ok(info),
        None => {
            let hint = get_tool_hint(tool_name);
            Err(VcliError::missing_tool(tool_name, required_for, hint).into())
        }
    }
}

/// Install hint for a tool name
fn get_tool_hint(tool_name: &str) -> String {
    match tool_name {
        "cmake" => hints::cmake().to_string(),
        "ninja" => hints::ninja().to_string(),
        "clang-format" => hints::clang_format().to_string(),
        other => hints::generic(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_typed_error() {
        let err = require_tool("vcli-definitely-not-a-tool", "testing").unwrap_err();
        let err = err.downcast::<VcliError>().unwrap();
        match err {
            VcliError::MissingTool { tool, required_for, .. } => {
                assert_eq!(tool, "vcli-definitely-not-a-tool");
                assert_eq!(required_for, "testing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_check_missing_tool_is_none() {
        assert!(check_tool("vcli-definitely-not-a-tool").is_none());
    }
}
