//! Subprocess execution and child environment handling
//!
//! All orchestration is synchronous: one child at a time, the CLI blocks
//! until it finishes.

pub mod subprocess;

use std::env;

/// Log-level variable propagated to every child process the CLI spawns.
pub const LOG_LEVEL_ENV: &str = "V_LOG_LEVEL";

/// Extra environment for build and run children.
///
/// `--verbose` forces trace logging in the child; otherwise the inherited
/// environment is left untouched.
pub fn log_level_env(verbose: bool) -> Vec<(String, String)> {
    if verbose {
        vec![(LOG_LEVEL_ENV.to_string(), "trace".to_string())]
    } else {
        Vec::new()
    }
}

/// Extra environment for test executables.
///
/// Tests default to `info` so debug/trace output stays quiet, but an
/// explicit `V_LOG_LEVEL` in the caller's environment wins.
pub fn test_log_level_env(verbose: bool) -> Vec<(String, String)> {
    if verbose {
        vec![(LOG_LEVEL_ENV.to_string(), "trace".to_string())]
    } else if env::var_os(LOG_LEVEL_ENV).is_none() {
        vec![(LOG_LEVEL_ENV.to_string(), "info".to_string())]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_verbose_forces_trace() {
        assert_eq!(
            log_level_env(true),
            vec![(LOG_LEVEL_ENV.to_string(), "trace".to_string())]
        );
        assert!(log_level_env(false).is_empty());
    }

    #[test]
    #[serial]
    fn test_tests_default_to_info() {
        env::remove_var(LOG_LEVEL_ENV);
        assert_eq!(
            test_log_level_env(false),
            vec![(LOG_LEVEL_ENV.to_string(), "info".to_string())]
        );
    }

    #[test]
    #[serial]
    fn test_explicit_level_wins_over_default() {
        env::set_var(LOG_LEVEL_ENV, "warn");
        assert!(test_log_level_env(false).is_empty());
        // verbose still overrides
        assert_eq!(
            test_log_level_env(true),
            vec![(LOG_LEVEL_ENV.to_string(), "trace".to_string())]
        );
        env::remove_var(LOG_LEVEL_ENV);
    }
}
