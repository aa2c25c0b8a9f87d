//! Build-log filtering
//!
//! Full CMake/Ninja output is noisy; on the default (non `--full`) path
//! we buffer the child's combined output and print only context windows
//! around error markers, plus a tail of the log when the build failed.

use std::collections::HashSet;

use console::style;

/// Marker scanned for, case-insensitively, in every output line.
pub const ERROR_MARKER: &str = "error: ";

/// Window/tail shaping for a buffered build log
#[derive(Debug, Clone)]
pub struct LogFilter {
    marker: String,
    before: usize,
    after: usize,
    tail_len: usize,
}

impl Default for LogFilter {
    fn default() -> Self {
        Self {
            marker: ERROR_MARKER.to_string(),
            before: 5,
            after: 6,
            tail_len: 50,
        }
    }
}

/// Shaped output: one line group per error marker, plus the failure tail
#[derive(Debug, PartialEq, Eq)]
pub struct FilterReport {
    /// Context windows around marker matches; overlapping windows are
    /// deduplicated so each source line appears at most once.
    pub windows: Vec<Vec<String>>,
    /// Last lines of the log, present only when the process failed.
    pub tail: Vec<String>,
}

impl LogFilter {
    /// Shape a buffered log. Pure: never fails, only informs output.
    ///
    /// Each marker match at index `i` yields the window `[i-5, i+6)`
    /// clipped to the log bounds. A non-zero exit (`success == false`)
    /// always adds the last 50 lines, marker matches or not.
    pub fn apply(&self, lines: &[String], success: bool) -> FilterReport {
        let marker = self.marker.to_lowercase();
        let matches: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.to_lowercase().contains(&marker))
            .map(|(i, _)| i)
            .collect();

        let mut shown: HashSet<usize> = HashSet::new();
        let mut windows = Vec::new();
        for &i in &matches {
            let start = i.saturating_sub(self.before);
            let end = (i + self.after).min(lines.len());
            let mut window = Vec::new();
            for j in start..end {
                if shown.insert(j) {
                    window.push(lines[j].clone());
                }
            }
            // A window fully swallowed by an earlier one adds nothing.
            if !window.is_empty() {
                windows.push(window);
            }
        }

        let tail = if success {
            Vec::new()
        } else {
            let start = lines.len().saturating_sub(self.tail_len);
            lines[start..].to_vec()
        };

        FilterReport { windows, tail }
    }
}

impl FilterReport {
    /// Print the report the way the build command shows it.
    pub fn print(&self, label: &str) {
        if self.windows.is_empty() {
            println!(
                "[{}] {}",
                label,
                style("Completed without errors").green()
            );
        } else {
            println!("[{}] {}", label, style("errors:").red().bold());
            for window in &self.windows {
                for line in window {
                    println!("{}", line);
                }
                println!("----");
            }
        }

        if !self.tail.is_empty() {
            println!(
                "[{}] {}",
                label,
                style(format!("last {} lines:", self.tail.len())).yellow().bold()
            );
            for line in &self.tail {
                println!("{}", line);
            }
        }
    }
}
