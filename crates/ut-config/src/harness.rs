//! Harness run settings (ut.toml)

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a finished run maps onto a process exit code
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ExitPolicy {
    /// Always exit with 0; failures are only reported
    AlwaysSuccess,
    /// Exit with 1 when the failure counter is non-zero
    #[default]
    FailOnErrors,
}

impl ExitPolicy {
    /// Exit code for a run that ended with `failures` recorded failures
    pub fn exit_code(self, failures: usize) -> i32 {
        match self {
            ExitPolicy::AlwaysSuccess => 0,
            ExitPolicy::FailOnErrors if failures > 0 => 1,
            ExitPolicy::FailOnErrors => 0,
        }
    }
}

/// Harness configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct HarnessConfig {
    /// Colorize diagnostic lines with ANSI escapes (default: true)
    pub color: bool,

    /// Exit code policy (default: fail-on-errors)
    pub exit_policy: ExitPolicy,

    /// Catch panicking tests, count them as one failure and keep going
    /// (default: false, a panic ends the run)
    pub contain_panics: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            color: true,
            exit_policy: ExitPolicy::default(),
            contain_panics: false,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })
    }

    /// Disable or enable colored output
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Set the exit code policy
    pub fn with_exit_policy(mut self, exit_policy: ExitPolicy) -> Self {
        self.exit_policy = exit_policy;
        self
    }

    /// Enable or disable panic containment
    pub fn with_contain_panics(mut self, contain_panics: bool) -> Self {
        self.contain_panics = contain_panics;
        self
    }
}
