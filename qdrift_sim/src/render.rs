//! Terminal rendering for analysis reports.
//!
//! Pure string builders: callers decide whether and where to print them.

use qdrift_core::{AnalysisReport, Bucket, DistributionTable};
use std::fmt::Write;

/// Width of a full bar in the distribution chart.
pub const BAR_WIDTH: usize = 40;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Renders one bar per bucket, scaled to [`BAR_WIDTH`].
pub fn distribution_chart(table: &DistributionTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Collapse Distribution");
    let _ = writeln!(out, "{RULE}");
    for (bucket, count) in table.iter() {
        let ratio = table.frequency(bucket);
        let bar = "█".repeat((ratio * BAR_WIDTH as f64) as usize);
        let _ = writeln!(
            out,
            "{:<10} {:<width$} {} ({:.1}%)",
            bucket.name(),
            bar,
            count,
            ratio * 100.0,
            width = BAR_WIDTH
        );
    }
    out
}

/// Renders the metric/value table followed by the verdict line.
pub fn metrics_table(report: &AnalysisReport) -> String {
    let seed = report
        .config
        .seed()
        .map_or_else(|| "none".to_string(), |s| s.to_string());

    let rows = [
        ("Run", report.run_id.to_string()),
        ("Simulations", report.config.simulations().to_string()),
        ("Noise Level", format!("{:.2}%", report.config.noise() * 100.0)),
        ("Seed", seed),
        ("Collapse Bias", format!("{:.6}", report.metrics.bias)),
        ("Drift Entropy Score", format!("{:.6}", report.metrics.entropy_bits)),
        ("Fragility", report.metrics.fragility_level.to_string()),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "Q-Drift Analysis Report");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{:<22} {}", "Metric", "Value");
    for (metric, value) in rows {
        let _ = writeln!(out, "{metric:<22} {value}");
    }
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}", report.verdict);
    out
}

/// Renders one row per report of a noise sweep.
pub fn sweep_table(reports: &[AnalysisReport]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>7} {:>8} {:>8} {:>10} {:>10} {:>10} {:>9}",
        "noise", "stable", "drifted", "collapsed", "entropy", "bias", "fragility"
    );
    let _ = writeln!(out, "{RULE}");
    for report in reports {
        let d = &report.distribution;
        let _ = writeln!(
            out,
            "{:>7.3} {:>8} {:>8} {:>10} {:>10.6} {:>10.6} {:>9}",
            report.config.noise(),
            d.count(Bucket::Stable),
            d.count(Bucket::Drifted),
            d.count(Bucket::Collapsed),
            report.metrics.entropy_bits,
            report.metrics.bias,
            report.metrics.fragility_level.name()
        );
    }
    out
}
