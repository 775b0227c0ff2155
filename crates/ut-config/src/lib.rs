//! Harness Configuration
//!
//! Run settings for the `ut` test harness:
//! - Diagnostic coloring
//! - Exit code policy when failures were recorded
//! - Optional per-test panic containment
//!
//! Configuration is always loaded explicitly by the caller. The harness never
//! looks for a config file or reads environment variables on its own.
//!
//! # Example
//!
//! ```no_run
//! use ut_config::HarnessConfig;
//! use std::path::Path;
//!
//! let config = HarnessConfig::load_from_file(Path::new("ut.toml")).unwrap();
//! let code = config.exit_policy.exit_code(0);
//! ```

pub mod harness;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

pub use harness::{ExitPolicy, HarnessConfig};
