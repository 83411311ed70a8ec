//! Persisted benchmark record schema
//!
//! One `BenchmarkRun` is produced per completed benchmark run and appended
//! to the corpus as a single JSON line. Field names are the wire format and
//! must stay stable for corpus round-tripping; metrics that a harness may
//! legitimately omit are `Option`al and tolerated as absent on read.

use serde::{Deserialize, Serialize};

use crate::env::EnvInfo;
use crate::error::{AfinarError, Result};

/// Flat summary record for one completed benchmark run
///
/// Immutable after creation. The recommendation engine consumes `model`,
/// `batch_size`, `compile`, `threads`, the `latency_*` percentiles and
/// `throughput_rps`; the remaining fields are carried for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRun {
    /// Model identifier the run measured
    pub model: String,
    /// Device the run executed on
    #[serde(default)]
    pub device: String,
    /// Items per request
    #[serde(default)]
    pub batch_size: u32,
    /// Measured iterations
    #[serde(default)]
    pub iters: u32,
    /// Warmup iterations (excluded from metrics)
    #[serde(default)]
    pub warmup: u32,
    /// Whether the optimizing compiler was engaged
    #[serde(default)]
    pub compile: bool,
    /// Worker thread count, absent when the harness used its default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<u32>,
    /// Channels-last memory layout flag (display only)
    #[serde(default)]
    pub channels_last: bool,
    /// Quantization flag (display only)
    #[serde(default)]
    pub quantize: bool,
    /// Median end-to-end latency in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_p50: Option<f64>,
    /// 90th percentile end-to-end latency in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_p90: Option<f64>,
    /// 95th percentile end-to-end latency in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_p95: Option<f64>,
    /// 99th percentile end-to-end latency in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_p99: Option<f64>,
    /// Requests served per second
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput_rps: Option<f64>,
    /// Batch items processed per second
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_samples_per_sec: Option<f64>,
    /// Mean forward-phase time per batch in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_ms_per_batch: Option<f64>,
    /// Mean end-to-end time per batch in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_to_end_ms_per_batch: Option<f64>,
    /// Mean preprocess-phase time per batch (vision workloads only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprocess_ms_per_batch: Option<f64>,
    /// Mean postprocess-phase time per batch (vision workloads only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postprocess_ms_per_batch: Option<f64>,
    /// Peak resident set size in MB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_rss_mb: Option<f64>,
    /// Host environment snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<EnvInfo>,
}

impl Default for BenchmarkRun {
    fn default() -> Self {
        Self {
            model: String::new(),
            device: "cpu".to_string(),
            batch_size: 1,
            iters: 0,
            warmup: 0,
            compile: false,
            threads: None,
            channels_last: false,
            quantize: false,
            latency_p50: None,
            latency_p90: None,
            latency_p95: None,
            latency_p99: None,
            throughput_rps: None,
            effective_samples_per_sec: None,
            forward_ms_per_batch: None,
            end_to_end_ms_per_batch: None,
            preprocess_ms_per_batch: None,
            postprocess_ms_per_batch: None,
            peak_rss_mb: None,
            env: None,
        }
    }
}

/// Latency percentile a recommendation constraint reads from a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LatencyPercentile {
    /// Median latency
    P50,
    /// 90th percentile
    P90,
    /// 95th percentile
    P95,
    /// 99th percentile
    P99,
}

impl LatencyPercentile {
    /// Parse from a "p95"-style name
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::UnknownPercentile`] for names that do not match
    /// a reported percentile; an unrecognized selector is a caller bug, not
    /// empty data.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "p50" => Ok(Self::P50),
            "p90" => Ok(Self::P90),
            "p95" => Ok(Self::P95),
            "p99" => Ok(Self::P99),
            _ => Err(AfinarError::UnknownPercentile {
                name: s.to_string(),
            }),
        }
    }

    /// Read this percentile's latency from a record, `None` when unreported
    #[must_use]
    pub fn of(self, run: &BenchmarkRun) -> Option<f64> {
        match self {
            Self::P50 => run.latency_p50,
            Self::P90 => run.latency_p90,
            Self::P95 => run.latency_p95,
            Self::P99 => run.latency_p99,
        }
    }
}

impl std::fmt::Display for LatencyPercentile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::P50 => write!(f, "p50"),
            Self::P90 => write!(f, "p90"),
            Self::P95 => write!(f, "p95"),
            Self::P99 => write!(f, "p99"),
        }
    }
}
