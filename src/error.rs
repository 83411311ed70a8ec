//! Error types for the tuning lab
//!
//! The core follows a sentinel-over-exception policy: empty inputs, zero
//! durations, and absent candidates are well-defined outputs, not errors.
//! The variants here cover the remaining hard failures: caller bugs
//! (unknown preset/constraint/percentile names) and collaborator faults
//! (unreadable or malformed corpus files).

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, AfinarError>;

/// Errors surfaced by the tuning lab
#[derive(Debug, Error)]
pub enum AfinarError {
    /// Sweep preset name did not match any known preset
    #[error("unknown sweep preset '{name}' (expected: cpu_vision, cpu_text)")]
    UnknownPreset {
        /// The name that failed to parse
        name: String,
    },

    /// Recommendation constraint name did not match any known constraint
    #[error("unknown constraint '{name}' (expected: latency, throughput, balanced)")]
    UnknownConstraint {
        /// The name that failed to parse
        name: String,
    },

    /// Latency percentile selector did not match a reported percentile
    #[error("unknown latency percentile '{name}' (expected: p50, p90, p95, p99)")]
    UnknownPercentile {
        /// The name that failed to parse
        name: String,
    },

    /// Filesystem operation on a corpus or report path failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path the operation was attempted on
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A persisted corpus line failed to parse as a benchmark record
    ///
    /// The whole read fails rather than skipping the line: a silently
    /// truncated corpus would corrupt the statistical basis for
    /// recommendations.
    #[error("malformed benchmark record at {path}:{line}: {source}")]
    CorpusParse {
        /// Corpus file path
        path: String,
        /// 1-based line number of the offending record
        line: usize,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Serializing a benchmark record failed
    #[error("failed to serialize benchmark record: {0}")]
    Serialize(#[from] serde_json::Error),
}
