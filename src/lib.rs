//! # Afinar
//!
//! Afinar (Spanish: "to tune, to refine") measures and compares the
//! latency/throughput behavior of inference workloads under varying runtime
//! configurations, then distills the resulting corpus into per-model
//! configuration recommendations.
//!
//! The crate is the measurement-and-analysis pipeline only: an external
//! harness executes the actual workload and drives these components.
//!
//! - [`SegmentTimer`]: segmented stopwatch attributing wall-clock time to
//!   named pipeline phases across iterations
//! - [`metrics`]: pure percentile/throughput functions over latency samples
//! - [`sweep`]: deterministic Cartesian-product enumeration of the
//!   configuration space
//! - [`recommend`]: per-model best-configuration selection under a latency,
//!   throughput, or balanced constraint
//! - [`store`] / [`report`]: JSONL corpus persistence and markdown reporting
//!
//! ## Example
//!
//! ```rust
//! use afinar::{compute_percentiles, compute_throughput, DEFAULT_PERCENTILES};
//!
//! let latencies = vec![12.0, 14.0, 15.0, 19.0, 40.0];
//! let pcts = compute_percentiles(&latencies, &DEFAULT_PERCENTILES);
//! assert!(pcts["p50"] <= pcts["p99"]);
//!
//! let total_ms: f64 = latencies.iter().sum();
//! assert!(compute_throughput(latencies.len() as u64, total_ms) > 0.0);
//! ```
//!
//! ## Error policy
//!
//! Empty or degenerate measurement data degrades to sentinel outputs (zero
//! metrics, absent candidates); typed errors are reserved for caller bugs
//! (unknown preset/constraint names) and collaborator faults (malformed
//! corpus lines).

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)] // usize -> f64 for sample counts is safe
#![allow(clippy::cast_possible_truncation)] // f64 -> u64 for percentile keys is safe
#![allow(clippy::cast_sign_loss)] // percentile values are non-negative
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)] // documented on the fallible seams that need it
#![allow(clippy::float_cmp)] // exact sentinel values are part of the contract
#![allow(clippy::uninlined_format_args)]

/// Execution environment capture for reproducibility
pub mod env;
/// Error types and crate-wide `Result` alias
pub mod error;
/// Pure statistical functions over latency samples
pub mod metrics;
/// Persisted benchmark record schema
pub mod record;
/// Recommendation engine over a benchmark corpus
pub mod recommend;
/// Markdown report rendering
pub mod report;
/// Append-only JSONL corpus persistence
pub mod store;
/// Sweep enumeration over the configuration space
pub mod sweep;
/// Segmented per-phase stopwatch
pub mod timing;

pub use env::EnvInfo;
pub use error::{AfinarError, Result};
pub use metrics::{
    compute_percentiles, compute_samples_per_sec, compute_throughput, DEFAULT_PERCENTILES,
};
pub use record::{BenchmarkRun, LatencyPercentile};
pub use recommend::{
    compute_balanced_score, filter_valid_runs, format_recommendation, generate_recommendations,
    get_best_balanced, get_best_for_latency_budget, get_best_for_max_throughput, Constraint,
    RecommendationSet,
};
pub use report::{render_markdown, write_report, ReportOptions};
pub use store::{append_run, read_runs};
pub use sweep::{get_sweep_configs, SweepConfig, SweepPreset};
pub use timing::SegmentTimer;
