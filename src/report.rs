//! Markdown report over a benchmark corpus
//!
//! Renders the environment of the corpus, the per-model recommendations for
//! the chosen constraint, and a top-5 table per model ranked by balanced
//! score. Plain text only; plotting is a harness concern.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{AfinarError, Result};
use crate::record::{BenchmarkRun, LatencyPercentile};
use crate::recommend::{compute_balanced_score, generate_recommendations, Constraint};

/// How many configurations each per-model table shows
const TOP_CONFIGS_PER_MODEL: usize = 5;

/// Report parameters
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Constraint the recommendation section is selected under
    pub constraint: Constraint,
    /// Percentile the latency constraint reads
    pub latency_pct: LatencyPercentile,
    /// Budget for the latency constraint, in milliseconds
    pub latency_budget_ms: f64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            constraint: Constraint::Balanced,
            latency_pct: LatencyPercentile::P95,
            latency_budget_ms: 50.0,
        }
    }
}

/// Render the full markdown report as a string
#[must_use]
pub fn render_markdown(runs: &[BenchmarkRun], opts: &ReportOptions) -> String {
    let mut out = String::new();
    out.push_str("# Inference Tuning Report\n\n");

    render_environment(&mut out, runs);
    render_recommendations(&mut out, runs, opts);
    render_top_configs(&mut out, runs);

    out
}

/// Render the report and write it to `path`, creating parent directories
///
/// # Errors
///
/// Returns an error when the directory or file cannot be written.
pub fn write_report(runs: &[BenchmarkRun], opts: &ReportOptions, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| AfinarError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }
    std::fs::write(path, render_markdown(runs, opts)).map_err(|source| AfinarError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn render_environment(out: &mut String, runs: &[BenchmarkRun]) {
    let Some(env) = runs.iter().find_map(|r| r.env.as_ref()) else {
        return;
    };
    out.push_str("## Environment\n\n");
    let _ = writeln!(out, "- Platform: {} ({})", env.platform, env.arch);
    let _ = writeln!(out, "- CPU count: {}", env.cpu_count);
    let _ = writeln!(
        out,
        "- Optimizing compiler: {}",
        if env.compiler_available {
            "available"
        } else {
            "unavailable"
        }
    );
    out.push('\n');
}

fn render_recommendations(out: &mut String, runs: &[BenchmarkRun], opts: &ReportOptions) {
    let recs =
        generate_recommendations(runs, opts.constraint, opts.latency_pct, opts.latency_budget_ms);

    out.push_str("## Recommendations\n\n");
    let _ = writeln!(out, "Constraint: **{}**\n", opts.constraint);
    for rec in &recs.recommendations {
        let _ = writeln!(out, "- {rec}");
    }
    out.push('\n');
}

fn render_top_configs(out: &mut String, runs: &[BenchmarkRun]) {
    out.push_str("## Top Configurations by Balanced Score\n\n");

    let models: std::collections::BTreeSet<&str> =
        runs.iter().map(|r| r.model.as_str()).collect();

    for model in models {
        let mut scored: Vec<(&BenchmarkRun, f64)> = runs
            .iter()
            .filter(|r| r.model == model)
            .map(|r| (r, compute_balanced_score(r)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(TOP_CONFIGS_PER_MODEL);

        let _ = writeln!(out, "### {model}\n");
        out.push_str("| Batch | Compile | Threads | p95 (ms) | Throughput (req/s) | Score |\n");
        out.push_str("|-------|---------|---------|----------|--------------------|-------|\n");
        for (run, score) in scored {
            let compile = if run.compile { "yes" } else { "no" };
            let threads = run
                .threads
                .map_or_else(|| "N/A".to_string(), |t| t.to_string());
            let _ = writeln!(
                out,
                "| {} | {compile} | {threads} | {:.1} | {:.1} | {score:.2} |",
                run.batch_size,
                run.latency_p95.unwrap_or(0.0),
                run.throughput_rps.unwrap_or(0.0),
            );
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnvInfo;

    fn run(model: &str, batch: u32, p95: f64, rps: f64) -> BenchmarkRun {
        BenchmarkRun {
            model: model.to_string(),
            batch_size: batch,
            latency_p95: Some(p95),
            throughput_rps: Some(rps),
            ..Default::default()
        }
    }

    #[test]
    fn test_report_has_section_per_model() {
        let runs = vec![run("resnet18", 1, 10.0, 100.0), run("mobilenet", 2, 5.0, 150.0)];
        let report = render_markdown(&runs, &ReportOptions::default());

        assert!(report.contains("# Inference Tuning Report"));
        assert!(report.contains("### resnet18"));
        assert!(report.contains("### mobilenet"));
        assert!(report.contains("Constraint: **balanced**"));
    }

    #[test]
    fn test_report_caps_table_at_five_rows() {
        let runs: Vec<BenchmarkRun> = (1..=8)
            .map(|i| run("m", i, f64::from(i) * 10.0, 100.0))
            .collect();
        let report = render_markdown(&runs, &ReportOptions::default());

        let table_rows = report
            .lines()
            .filter(|l| l.starts_with("| ") && !l.contains("Batch"))
            .count();
        assert_eq!(table_rows, 5);
    }

    #[test]
    fn test_report_environment_from_first_record_carrying_one() {
        let mut r = run("m", 1, 10.0, 100.0);
        r.env = Some(EnvInfo {
            platform: "linux".to_string(),
            arch: "x86_64".to_string(),
            cpu_count: 16,
            compiler_available: true,
        });
        let report = render_markdown(&[r], &ReportOptions::default());

        assert!(report.contains("## Environment"));
        assert!(report.contains("- Platform: linux (x86_64)"));
        assert!(report.contains("- CPU count: 16"));
    }

    #[test]
    fn test_report_without_env_omits_environment_section() {
        let report = render_markdown(&[run("m", 1, 10.0, 100.0)], &ReportOptions::default());
        assert!(!report.contains("## Environment"));
    }

    #[test]
    fn test_write_report_creates_parent_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("reports").join("latest.md");

        write_report(&[run("m", 1, 10.0, 100.0)], &ReportOptions::default(), &path)
            .expect("write");
        let text = std::fs::read_to_string(&path).expect("read back");
        assert!(text.contains("# Inference Tuning Report"));
    }
}
