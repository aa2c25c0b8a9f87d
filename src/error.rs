//! Error types and helpers for user-friendly error messages
//!
//! Every failure the CLI can hit is a `VcliError` variant with enough
//! context to print an actionable message and to pick the process exit
//! code in `main`.

use std::path::PathBuf;

use thiserror::Error;

use crate::targets::TargetKind;

/// Custom error types with helpful context and suggestions
#[derive(Error, Debug)]
pub enum VcliError {
    /// No registered target matched the user-supplied name
    #[error("Unknown target '{query}'")]
    UnknownTarget {
        query: String,
        /// All registered target names, sorted
        candidates: Vec<String>,
    },

    /// The target exists but does not produce a runnable executable
    #[error("Target '{target}' is not runnable (kind: {kind})")]
    NotRunnable { target: String, kind: TargetKind },

    /// Tool/executable not found or misconfigured
    #[error("Missing tool: {tool}")]
    MissingTool {
        tool: String,
        required_for: String,
        hint: String,
    },

    /// A CMake configure or build step exited non-zero
    #[error("Build failed with exit code {code}")]
    BuildFailed { code: i32 },

    /// A spawned executable (run target, test) exited non-zero
    #[error("'{program}' exited with code {code}")]
    ProcessFailed { program: String, code: i32 },

    /// The build reported success but the expected artifact is absent
    #[error("Executable not found: {path}")]
    ArtifactMissing { path: PathBuf },

    /// One or more test executables failed
    #[error("{failures} test(s) failed")]
    TestsFailed { failures: usize },

    /// Project layout / CMakePresets.json problems
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        hint: Option<String>,
    },
}

impl VcliError {
    /// Create a configuration error with a hint
    pub fn config_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create a missing tool error
    pub fn missing_tool(
        tool: impl Into<String>,
        required_for: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            required_for: required_for.into(),
            hint: hint.into(),
        }
    }

    /// Process exit code this error maps to.
    ///
    /// Child exit codes and test failure counts pass through so the
    /// wrapper's status mirrors the underlying failure; everything else
    /// is a plain 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            VcliError::BuildFailed { code } | VcliError::ProcessFailed { code, .. } => {
                if *code > 0 {
                    *code
                } else {
                    1
                }
            }
            VcliError::TestsFailed { failures } => (*failures).min(i32::MAX as usize) as i32,
            _ => 1,
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        match self {
            VcliError::UnknownTarget { candidates, .. } => {
                if !candidates.is_empty() {
                    eprintln!("\n{}", style("AVAILABLE TARGETS:").cyan().bold());
                    for name in candidates {
                        eprintln!("  • {}", name);
                    }
                }
                eprintln!(
                    "\n{} Run `v targets` to list targets; partial names are matched fuzzily.",
                    style("HINT:").yellow().bold()
                );
            }
            VcliError::MissingTool { hint, .. } => {
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), hint);
            }
            VcliError::Config { hint: Some(h), .. } => {
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
            }
            VcliError::ArtifactMissing { .. } => {
                eprintln!(
                    "\n{} The build succeeded but produced no executable at the expected path. \
                     Check the target's CMake output location.",
                    style("HINT:").yellow().bold()
                );
            }
            _ => {}
        }

        eprintln!();
    }
}

/// Common error hints for missing tools
pub mod hints {
    /// Get hint for missing CMake
    pub fn cmake() -> &'static str {
        "Install CMake from https://cmake.org/ or use your package manager:\n\
         • macOS: brew install cmake\n\
         • Ubuntu: sudo apt install cmake\n\
         • Windows: winget install Kitware.CMake"
    }

    /// Get hint for missing Ninja
    pub fn ninja() -> &'static str {
        "Install Ninja from https://ninja-build.org/ or use your package manager:\n\
         • macOS: brew install ninja\n\
         • Ubuntu: sudo apt install ninja-build\n\
         • Windows: winget install Ninja-build.Ninja"
    }

    /// Get hint for missing clang-format
    pub fn clang_format() -> &'static str {
        "Install clang-format:\n\
         • macOS: brew install clang-format\n\
         • Ubuntu: sudo apt install clang-format\n\
         • Windows: winget install LLVM.LLVM"
    }

    /// Get hint for a missing or unreadable CMakePresets.json
    pub fn presets_not_found() -> &'static str {
        "Could not find CMakePresets.json in the current directory or any parent.\n\
         Run `v` from inside the v project checkout."
    }

    /// Generic hint for a tool with no dedicated instructions
    pub fn generic(tool: &str) -> String {
        format!("Install '{}' and make sure it is on your PATH.", tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_failed_exit_code_passthrough() {
        assert_eq!(VcliError::BuildFailed { code: 2 }.exit_code(), 2);
        assert_eq!(VcliError::BuildFailed { code: -1 }.exit_code(), 1);
    }

    #[test]
    fn test_tests_failed_exit_code_is_failure_count() {
        assert_eq!(VcliError::TestsFailed { failures: 3 }.exit_code(), 3);
    }

    #[test]
    fn test_unknown_target_exit_code() {
        let err = VcliError::UnknownTarget {
            query: "nope".into(),
            candidates: vec![],
        };
        assert_eq!(err.exit_code(), 1);
    }
}
