//! Execution environment capture for reproducibility
//!
//! A snapshot of the host taken at benchmark time and embedded in each
//! persisted record, so a corpus mixing machines can be told apart later.

use serde::{Deserialize, Serialize};

/// Host environment a benchmark record was produced on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvInfo {
    /// Operating system family (e.g. "linux", "macos")
    pub platform: String,
    /// CPU architecture (e.g. "x86_64", "aarch64")
    pub arch: String,
    /// Logical CPU count
    pub cpu_count: usize,
    /// Whether the optimizing-compiler axis was available at build time
    pub compiler_available: bool,
}

impl Default for EnvInfo {
    fn default() -> Self {
        Self {
            platform: "unknown".to_string(),
            arch: "unknown".to_string(),
            cpu_count: 0,
            compiler_available: false,
        }
    }
}

impl EnvInfo {
    /// Capture the current host environment
    #[must_use]
    pub fn capture() -> Self {
        Self {
            platform: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            cpu_count: std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get),
            compiler_available: cfg!(feature = "compiler"),
        }
    }
}
