//! Format command implementation
//!
//! Runs clang-format in place over the project's C/C++ sources, scoped
//! to one core target's source tree when a target is given.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use walkdir::WalkDir;

use crate::exec::subprocess::run_command;
use crate::targets::{resolver, CORE_TARGETS};
use crate::utils::paths::find_project_root;
use crate::utils::terminal::{create_progress_bar, print_success, print_warning};
use crate::utils::tools::require_tool;

/// Extensions clang-format is applied to.
const SOURCE_EXTS: [&str; 4] = ["cpp", "hpp", "h", "c"];

/// Format sources with clang-format
#[derive(Args, Debug)]
pub struct FormatCommand {
    /// vclient, vserver or vlib (fuzzily matched); formats the whole
    /// project when omitted
    pub target: Option<String>,
}

impl FormatCommand {
    /// Execute the format command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let project_root = find_project_root()?;
        let clang_format = require_tool("clang-format", "formatting C++ sources")?;
        if verbose {
            if let Some(version) = &clang_format.version {
                println!("[format] using {} {}", clang_format.name, version);
            }
        }

        let roots = match &self.target {
            Some(query) => {
                let core: Vec<String> = CORE_TARGETS.iter().map(|s| s.to_string()).collect();
                let name = resolver::resolve(query, &core)?;
                vec![project_root.join(source_root(&name))]
            }
            None => vec![project_root.clone()],
        };

        let files = collect_files(&roots);
        if files.is_empty() {
            print_warning("no files found");
            return Ok(());
        }

        println!("[format] Formatting {} files...", files.len());
        let pb = create_progress_bar(files.len() as u64, "formatting");

        for file in &files {
            let args = vec!["-i".to_string(), file.display().to_string()];
            let result = run_command(&clang_format.path, &args, None, &[])
                .with_context(|| format!("Failed to format {}", file.display()))?;
            if !result.success {
                pb.abandon();
                anyhow::bail!(
                    "clang-format exited with code {} on {}",
                    result.exit_code,
                    file.display()
                );
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        print_success(&format!("formatted {} files", files.len()));
        Ok(())
    }
}

/// Source tree for a core target.
fn source_root(target: &str) -> &'static str {
    match target {
        "vclient" => "client",
        "vserver" => "server",
        _ => "common",
    }
}

/// Collect formattable sources under the given roots, skipping build
/// output, IDE state and vendored dependencies.
fn collect_files(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for root in roots {
        for entry in WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| !is_excluded_dir(e.path()))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && has_source_ext(path) {
                files.push(path.to_path_buf());
            }
        }
    }
    files.sort();
    files
}

fn has_source_ext(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SOURCE_EXTS.contains(&e))
        .unwrap_or(false)
}

fn is_excluded_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| {
            name == "extern"
                || name == ".idea"
                || name == ".venv"
                || name.starts_with("cmake-build-")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_skips_build_and_vendor_dirs() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("client")).unwrap();
        std::fs::write(root.join("client/app.cpp"), "").unwrap();
        std::fs::write(root.join("client/app.hpp"), "").unwrap();
        std::fs::write(root.join("client/notes.md"), "").unwrap();
        std::fs::create_dir_all(root.join("extern/sdl")).unwrap();
        std::fs::write(root.join("extern/sdl/sdl.h"), "").unwrap();
        std::fs::create_dir_all(root.join("cmake-build-debug")).unwrap();
        std::fs::write(root.join("cmake-build-debug/gen.cpp"), "").unwrap();
        std::fs::create_dir_all(root.join(".idea")).unwrap();
        std::fs::write(root.join(".idea/x.h"), "").unwrap();

        let files = collect_files(&[root.to_path_buf()]);
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["app.cpp", "app.hpp"]);
    }

    #[test]
    fn test_source_roots_for_core_targets() {
        assert_eq!(source_root("vclient"), "client");
        assert_eq!(source_root("vserver"), "server");
        assert_eq!(source_root("vlib"), "common");
    }

    #[test]
    fn test_collection_is_sorted() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("z.c"), "").unwrap();
        std::fs::write(dir.path().join("a.c"), "").unwrap();
        let files = collect_files(&[dir.path().to_path_buf()]);
        assert!(files[0].ends_with("a.c"));
        assert!(files[1].ends_with("z.c"));
    }
}
