//! Statistical measurement functions for latency and throughput
//!
//! All functions here are pure and infallible: empty inputs, zero time, and
//! negative time degrade to well-defined sentinel outputs (zero metrics)
//! rather than errors.

#![allow(clippy::cast_precision_loss)]

use std::collections::BTreeMap;

/// Percentiles reported by default: p50, p90, p95, p99
pub const DEFAULT_PERCENTILES: [f64; 4] = [50.0, 90.0, 95.0, 99.0];

/// Compute linear-interpolation percentiles of a latency sample set
///
/// For sorted values `v[0..n-1]`, percentile `p` is read at fractional index
/// `p/100 * (n-1)`, interpolating linearly between the two bracketing ranks.
/// Keys in the returned map are `"p50"`-style names.
///
/// An empty input maps every requested percentile to `0.0`; this is the
/// explicit empty-run policy, not an error.
#[must_use]
pub fn compute_percentiles(values: &[f64], percentiles: &[f64]) -> BTreeMap<String, f64> {
    if values.is_empty() {
        return percentiles
            .iter()
            .map(|&p| (percentile_key(p), 0.0))
            .collect();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();

    percentiles
        .iter()
        .map(|&p| {
            let value = if n == 1 {
                sorted[0]
            } else {
                let rank = p / 100.0 * (n - 1) as f64;
                let lo = rank.floor() as usize;
                let hi = rank.ceil() as usize;
                let frac = rank - lo as f64;
                sorted[lo] + (sorted[hi.min(n - 1)] - sorted[lo]) * frac
            };
            (percentile_key(p), value)
        })
        .collect()
}

/// Requests served per second: `total_requests / total_time_ms * 1000`
///
/// Returns `0.0` when `total_time_ms <= 0` (nothing was measured).
#[must_use]
pub fn compute_throughput(total_requests: u64, total_time_ms: f64) -> f64 {
    if total_time_ms <= 0.0 {
        return 0.0;
    }
    total_requests as f64 / total_time_ms * 1000.0
}

/// Samples processed per second, same guard as [`compute_throughput`]
///
/// Semantically distinct counter: one request may carry multiple samples
/// (batch items), so the two rates diverge for batch sizes above one.
#[must_use]
pub fn compute_samples_per_sec(total_samples: u64, total_time_ms: f64) -> f64 {
    if total_time_ms <= 0.0 {
        return 0.0;
    }
    total_samples as f64 / total_time_ms * 1000.0
}

/// Map-key name for a percentile ("p50", "p99.9")
fn percentile_key(p: f64) -> String {
    if p.fract() == 0.0 {
        format!("p{}", p as u64)
    } else {
        format!("p{p}")
    }
}
