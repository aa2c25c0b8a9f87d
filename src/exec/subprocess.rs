//! Synchronous subprocess execution
//!
//! Two modes: inherit the terminal for interactive children, or stream
//! the child's combined stdout/stderr into a line buffer for the build
//! log filter.

use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

/// Result of a subprocess execution
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code
    pub exit_code: i32,

    /// Captured combined stdout/stderr lines (empty when IO was inherited)
    pub lines: Vec<String>,

    /// Execution duration
    pub duration: Duration,
}

impl CommandResult {
    /// Create a CommandResult from an exit status
    pub fn from_status(status: ExitStatus, lines: Vec<String>, duration: Duration) -> Self {
        let exit_code = status.code().unwrap_or(-1);
        Self {
            success: status.success(),
            exit_code,
            lines,
            duration,
        }
    }
}

/// Run a command with the terminal inherited by the child.
pub fn run_command(
    program: &Path,
    args: &[String],
    cwd: Option<&Path>,
    envs: &[(String, String)],
) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    cmd.envs(envs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    cmd.stdin(Stdio::inherit());
    cmd.stdout(Stdio::inherit());
    cmd.stderr(Stdio::inherit());

    let status = cmd
        .status()
        .with_context(|| format!("Failed to execute {}", program.display()))?;

    Ok(CommandResult::from_status(status, Vec::new(), start.elapsed()))
}

/// Run a command and capture combined stdout/stderr line-by-line.
///
/// Both child streams write into one pipe so interleaving matches what a
/// terminal would have shown. The parent's writer handles must be closed
/// before reading or the loop never sees EOF, hence the explicit
/// `drop(cmd)` after spawning.
pub fn run_streaming(
    program: &Path,
    args: &[String],
    cwd: Option<&Path>,
    envs: &[(String, String)],
) -> Result<CommandResult> {
    let start = Instant::now();

    let (reader, writer) = io::pipe().context("Failed to create output pipe")?;
    let writer_clone = writer
        .try_clone()
        .context("Failed to duplicate output pipe")?;

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    cmd.envs(envs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    cmd.stdin(Stdio::null());
    cmd.stdout(writer);
    cmd.stderr(writer_clone);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("Failed to execute {}", program.display()))?;
    drop(cmd);

    let mut lines = Vec::new();
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .context("Failed to read child output")?;
        if read == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        lines.push(line.trim_end_matches(['\n', '\r']).to_string());
    }

    let status = child
        .wait()
        .with_context(|| format!("Failed to wait for {}", program.display()))?;

    Ok(CommandResult::from_status(status, lines, start.elapsed()))
}
