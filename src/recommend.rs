//! Configuration recommendations from a corpus of benchmark records
//!
//! Pure functions over a corpus snapshot: filter out records without
//! meaningful measurements, group by model, and pick the best record per
//! model under a stated constraint. "No good configuration" is a
//! first-class `None` outcome threaded through to formatting, never an
//! error.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{AfinarError, Result};
use crate::record::{BenchmarkRun, LatencyPercentile};

/// Floor applied to degenerate (<= 0) p95 values in the balanced score.
///
/// Keeps the score finite for zero-latency measurements at the cost of not
/// distinguishing near-zero latencies from each other. Preserved as-is for
/// corpus compatibility; do not extend without new guidance.
const BALANCED_SCORE_LATENCY_FLOOR_MS: f64 = 1.0;

/// Optimization constraint a recommendation is selected under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constraint {
    /// Maximize throughput among records within a latency budget
    Latency,
    /// Maximize throughput unconditionally
    Throughput,
    /// Maximize the balanced throughput/latency score
    Balanced,
}

impl Constraint {
    /// Parse from the constraint's CLI name
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::UnknownConstraint`] for unrecognized names.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "latency" => Ok(Self::Latency),
            "throughput" => Ok(Self::Throughput),
            "balanced" => Ok(Self::Balanced),
            _ => Err(AfinarError::UnknownConstraint {
                name: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latency => write!(f, "latency"),
            Self::Throughput => write!(f, "throughput"),
            Self::Balanced => write!(f, "balanced"),
        }
    }
}

/// Per-model recommendations plus the records that back them
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecommendationSet {
    /// One formatted recommendation line per model, in model order
    pub recommendations: Vec<String>,
    /// Selected record per model; `None` when no candidate satisfied the
    /// constraint
    pub details: BTreeMap<String, Option<BenchmarkRun>>,
}

/// Keep only records with meaningful measurements
///
/// A record missing `latency_p95` or `throughput_rps`, or carrying a zero
/// value for either, is not-yet-meaningful data and is silently dropped.
/// Order of the remainder is preserved.
#[must_use]
pub fn filter_valid_runs(runs: &[BenchmarkRun]) -> Vec<BenchmarkRun> {
    runs.iter()
        .filter(|r| {
            r.latency_p95.is_some_and(|v| v != 0.0) && r.throughput_rps.is_some_and(|v| v != 0.0)
        })
        .cloned()
        .collect()
}

/// Balanced throughput/latency score: `throughput_rps / max(p95, 1.0)`
///
/// Higher is better. Absent metrics contribute their sentinel values
/// (throughput 0.0, p95 floored at 1.0).
#[must_use]
pub fn compute_balanced_score(run: &BenchmarkRun) -> f64 {
    let mut p95 = run.latency_p95.unwrap_or(BALANCED_SCORE_LATENCY_FLOOR_MS);
    if p95 <= 0.0 {
        p95 = BALANCED_SCORE_LATENCY_FLOOR_MS;
    }
    run.throughput_rps.unwrap_or(0.0) / p95
}

/// Highest-throughput record within a latency budget
///
/// Records whose `latency_<pct>` is absent are treated as infinitely slow
/// and excluded. Returns `None` when no record fits the budget.
#[must_use]
pub fn get_best_for_latency_budget<'a>(
    runs: &'a [BenchmarkRun],
    latency_pct: LatencyPercentile,
    budget_ms: f64,
) -> Option<&'a BenchmarkRun> {
    runs.iter()
        .filter(|r| latency_pct.of(r).unwrap_or(f64::INFINITY) <= budget_ms)
        .max_by(|a, b| {
            a.throughput_rps
                .unwrap_or(0.0)
                .partial_cmp(&b.throughput_rps.unwrap_or(0.0))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Highest-throughput record over the full set, `None` when empty
#[must_use]
pub fn get_best_for_max_throughput(runs: &[BenchmarkRun]) -> Option<&BenchmarkRun> {
    runs.iter().max_by(|a, b| {
        a.throughput_rps
            .unwrap_or(0.0)
            .partial_cmp(&b.throughput_rps.unwrap_or(0.0))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Best record by balanced score, `None` when empty
#[must_use]
pub fn get_best_balanced(runs: &[BenchmarkRun]) -> Option<&BenchmarkRun> {
    runs.iter().max_by(|a, b| {
        compute_balanced_score(a)
            .partial_cmp(&compute_balanced_score(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Render one recommendation line, or a "no configuration found" line
/// carrying `reason` when no record was selected
#[must_use]
pub fn format_recommendation(run: Option<&BenchmarkRun>, reason: &str) -> String {
    let Some(run) = run else {
        return format!("No configuration found ({reason})");
    };

    let compile_flag = if run.compile { "compile" } else { "no-compile" };
    let threads = run
        .threads
        .map_or_else(|| "?".to_string(), |t| t.to_string());
    let p95 = run.latency_p95.unwrap_or(0.0);
    let throughput = run.throughput_rps.unwrap_or(0.0);

    let mut extra = Vec::new();
    if run.channels_last {
        extra.push("channels_last");
    }
    if run.quantize {
        extra.push("quantize");
    }
    let extra_str = if extra.is_empty() {
        String::new()
    } else {
        format!(", {}", extra.join(", "))
    };

    format!(
        "{}: batch={}, {compile_flag}, threads={threads}{extra_str} \
         -> p95={p95:.1}ms, throughput={throughput:.1} req/s",
        run.model, run.batch_size
    )
}

/// Select and format the best configuration per model under `constraint`
///
/// Invalid records are filtered first, the remainder grouped by model name
/// in lexicographic order. An empty corpus yields an empty set, never an
/// error.
#[must_use]
pub fn generate_recommendations(
    runs: &[BenchmarkRun],
    constraint: Constraint,
    latency_pct: LatencyPercentile,
    latency_budget_ms: f64,
) -> RecommendationSet {
    let valid = filter_valid_runs(runs);
    if valid.is_empty() {
        return RecommendationSet::default();
    }

    let models: BTreeSet<&str> = valid.iter().map(|r| r.model.as_str()).collect();
    let mut set = RecommendationSet::default();

    for model in models {
        let model_runs: Vec<BenchmarkRun> = valid
            .iter()
            .filter(|r| r.model == model)
            .cloned()
            .collect();

        let (best, reason) = match constraint {
            Constraint::Latency => (
                get_best_for_latency_budget(&model_runs, latency_pct, latency_budget_ms),
                format!("within {latency_budget_ms}ms {latency_pct}"),
            ),
            Constraint::Throughput => (
                get_best_for_max_throughput(&model_runs),
                "max throughput".to_string(),
            ),
            Constraint::Balanced => (get_best_balanced(&model_runs), "balanced".to_string()),
        };

        set.recommendations
            .push(format_recommendation(best, &reason));
        set.details.insert(model.to_string(), best.cloned());
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(model: &str, p95: Option<f64>, rps: Option<f64>) -> BenchmarkRun {
        BenchmarkRun {
            model: model.to_string(),
            latency_p95: p95,
            throughput_rps: rps,
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_valid_runs_drops_incomplete() {
        let runs = vec![
            run("a", Some(10.0), Some(100.0)),
            run("a", Some(20.0), None),
            run("a", None, Some(50.0)),
            run("a", Some(15.0), Some(80.0)),
        ];
        let valid = filter_valid_runs(&runs);
        assert_eq!(valid.len(), 2);
        assert_eq!(valid[0].latency_p95, Some(10.0));
        assert_eq!(valid[1].latency_p95, Some(15.0));
    }

    #[test]
    fn test_filter_valid_runs_drops_zero_metrics() {
        let runs = vec![
            run("a", Some(0.0), Some(100.0)),
            run("a", Some(10.0), Some(0.0)),
        ];
        assert!(filter_valid_runs(&runs).is_empty());
    }

    #[test]
    fn test_compute_balanced_score() {
        let score = compute_balanced_score(&run("a", Some(10.0), Some(100.0)));
        assert_eq!(score, 10.0);
    }

    #[test]
    fn test_compute_balanced_score_zero_latency_floor() {
        let score = compute_balanced_score(&run("a", Some(0.0), Some(100.0)));
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_compute_balanced_score_absent_metrics() {
        assert_eq!(compute_balanced_score(&run("a", None, None)), 0.0);
    }

    #[test]
    fn test_best_for_latency_budget_picks_within_budget() {
        let runs = vec![
            run("a", Some(10.0), Some(100.0)),
            run("a", Some(20.0), Some(200.0)),
            run("a", Some(30.0), Some(300.0)),
        ];
        let best = get_best_for_latency_budget(&runs, LatencyPercentile::P95, 25.0)
            .expect("candidate within budget");
        assert_eq!(best.latency_p95, Some(20.0));
        assert_eq!(best.throughput_rps, Some(200.0));
    }

    #[test]
    fn test_best_for_latency_budget_none_within_budget() {
        let runs = vec![run("a", Some(100.0), Some(100.0))];
        assert!(get_best_for_latency_budget(&runs, LatencyPercentile::P95, 50.0).is_none());
    }

    #[test]
    fn test_best_for_latency_budget_absent_latency_excluded() {
        let runs = vec![run("a", None, Some(500.0)), run("a", Some(10.0), Some(50.0))];
        let best = get_best_for_latency_budget(&runs, LatencyPercentile::P95, 50.0)
            .expect("the measured record");
        assert_eq!(best.latency_p95, Some(10.0));
    }

    #[test]
    fn test_best_for_max_throughput() {
        let runs = vec![
            run("a", Some(10.0), Some(100.0)),
            run("a", Some(20.0), Some(300.0)),
            run("a", Some(30.0), Some(200.0)),
        ];
        let best = get_best_for_max_throughput(&runs).expect("non-empty");
        assert_eq!(best.throughput_rps, Some(300.0));
    }

    #[test]
    fn test_best_for_max_throughput_empty() {
        assert!(get_best_for_max_throughput(&[]).is_none());
    }

    #[test]
    fn test_best_balanced() {
        let runs = vec![
            run("a", Some(10.0), Some(100.0)), // score 10
            run("a", Some(20.0), Some(300.0)), // score 15
            run("a", Some(5.0), Some(50.0)),   // score 10
        ];
        let best = get_best_balanced(&runs).expect("non-empty");
        assert_eq!(best.latency_p95, Some(20.0));
        assert_eq!(best.throughput_rps, Some(300.0));
    }

    #[test]
    fn test_format_recommendation_absent_run() {
        let line = format_recommendation(None, "within 50ms p95");
        assert_eq!(line, "No configuration found (within 50ms p95)");
    }

    #[test]
    fn test_format_recommendation_full_line() {
        let mut r = run("resnet18", Some(12.34), Some(320.9));
        r.batch_size = 4;
        r.compile = true;
        r.threads = Some(8);
        r.channels_last = true;

        let line = format_recommendation(Some(&r), "balanced");
        assert!(line.starts_with("resnet18: batch=4, compile, threads=8, channels_last"));
        assert!(line.contains("p95=12.3ms"));
        assert!(line.contains("throughput=320.9 req/s"));
    }

    #[test]
    fn test_format_recommendation_absent_threads() {
        let r = run("m", Some(1.0), Some(1.0));
        let line = format_recommendation(Some(&r), "balanced");
        assert!(line.contains("threads=?"));
    }

    #[test]
    fn test_generate_recommendations_groups_by_model() {
        let mut a1 = run("resnet18", Some(10.0), Some(100.0));
        a1.batch_size = 1;
        let mut a2 = run("resnet18", Some(20.0), Some(300.0));
        a2.batch_size = 4;
        a2.compile = true;
        a2.threads = Some(8);
        let mut b = run("mobilenet", Some(5.0), Some(150.0));
        b.batch_size = 2;
        b.threads = Some(2);

        let result = generate_recommendations(
            &[a1, a2, b],
            Constraint::Balanced,
            LatencyPercentile::P95,
            50.0,
        );
        assert_eq!(result.recommendations.len(), 2);
        assert!(result.details.contains_key("resnet18"));
        assert!(result.details.contains_key("mobilenet"));
        // lexicographic model order
        assert!(result.recommendations[0].starts_with("mobilenet"));
        assert!(result.recommendations[1].starts_with("resnet18"));
    }

    #[test]
    fn test_generate_recommendations_grouping_independent_of_constraint() {
        let runs = vec![
            run("a", Some(10.0), Some(100.0)),
            run("b", Some(100.0), Some(100.0)),
        ];
        for constraint in [
            Constraint::Latency,
            Constraint::Throughput,
            Constraint::Balanced,
        ] {
            let result =
                generate_recommendations(&runs, constraint, LatencyPercentile::P95, 50.0);
            assert_eq!(result.recommendations.len(), 2, "{constraint}");
            assert_eq!(result.details.len(), 2, "{constraint}");
        }
    }

    #[test]
    fn test_generate_recommendations_budget_miss_is_absent_not_error() {
        let runs = vec![run("slow_model", Some(500.0), Some(10.0))];
        let result =
            generate_recommendations(&runs, Constraint::Latency, LatencyPercentile::P95, 50.0);
        assert_eq!(result.recommendations.len(), 1);
        assert!(result.recommendations[0].starts_with("No configuration found"));
        assert_eq!(result.details["slow_model"], None);
    }

    #[test]
    fn test_generate_recommendations_empty_corpus() {
        let result =
            generate_recommendations(&[], Constraint::Balanced, LatencyPercentile::P95, 50.0);
        assert!(result.recommendations.is_empty());
        assert!(result.details.is_empty());
    }

    #[test]
    fn test_constraint_parse() {
        assert_eq!(Constraint::parse("balanced").expect("valid"), Constraint::Balanced);
        assert!(Constraint::parse("best").is_err());
    }
}
