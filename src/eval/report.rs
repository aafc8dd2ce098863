//! Rendering for evaluation runs: results table, headline metrics,
//! per-query precision/recall bars, and CSV export.

use crate::error::Result;
use crate::eval::metrics::{EvalRow, EvalSummary, TOP_K};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;

const TABLE_WIDTH: usize = 107;
const CHART_WIDTH: usize = 30;

/// Render the per-case results table.
///
/// Long queries and names are truncated to keep rows on one line; the CSV
/// export carries the full values.
pub fn render_table(rows: &[EvalRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:-<width$}", "", width = TABLE_WIDTH);
    let _ = writeln!(
        out,
        "{:<4} {:<34} {:<26} {:>5} {:>5} {:>6} {:>7} {:>6} {:>6}",
        "#", "Query", "Top Match", "Score", "Dur", "Dur OK", "Success", "P@3", "R@3"
    );
    let _ = writeln!(out, "{:-<width$}", "", width = TABLE_WIDTH);

    for (i, row) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4} {:<34} {:<26} {:>5.2} {:>5} {:>6} {:>7} {:>6.2} {:>6.2}",
            format!("Q{}", i + 1),
            truncate(&row.query, 34),
            truncate(&row.top_match, 26),
            row.skill_score,
            row.duration,
            yes_no(row.duration_ok),
            yes_no(row.success),
            row.precision,
            row.recall
        );
    }

    let _ = writeln!(out, "{:-<width$}", "", width = TABLE_WIDTH);
    out
}

/// Render headline metrics in percent, two decimals.
pub fn render_summary(summary: &EvalSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Evaluation Results ===");
    let _ = writeln!(out, "Cases:           {}", summary.cases);
    let _ = writeln!(
        out,
        "Top-1 Accuracy:  {:.2}%  ({}/{})",
        summary.accuracy * 100.0,
        summary.hits,
        summary.cases
    );
    let _ = writeln!(
        out,
        "Precision@{}:     {:.2}%",
        TOP_K,
        summary.avg_precision * 100.0
    );
    let _ = writeln!(
        out,
        "Recall@{}:        {:.2}%",
        TOP_K,
        summary.avg_recall * 100.0
    );
    out
}

/// Render paired precision/recall bars, one pair per query.
///
/// Bars span 0.0 to 1.0. Recall can run past 1.0; its bar clips at full
/// scale while the numeric label keeps the raw value.
pub fn render_chart(rows: &[EvalRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Precision@{} vs Recall@{} per Query ===", TOP_K, TOP_K);

    for (i, row) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4} P@{} |{}| {:.2}",
            format!("Q{}", i + 1),
            TOP_K,
            bar(row.precision),
            row.precision
        );
        let _ = writeln!(
            out,
            "{:<4} R@{} |{}| {:.2}",
            "",
            TOP_K,
            bar(row.recall),
            row.recall
        );
    }

    out
}

/// Serialize rows to CSV with the full column set, one record per case.
pub fn to_csv(rows: &[EvalRow]) -> String {
    let mut out = String::new();
    out.push_str(
        "Query,Expected Skills,Max Duration,Top Match,Matched Skills,\
         Skill Match Score,Duration,Duration OK,Success,Precision@K,Recall@K\n",
    );

    for row in rows {
        let fields = [
            csv_field(&row.query),
            csv_field(&join_skills(&row.expected_skills)),
            row.max_duration.to_string(),
            csv_field(&row.top_match),
            csv_field(&join_skills(&row.matched_skills)),
            row.skill_score.to_string(),
            row.duration.to_string(),
            row.duration_ok.to_string(),
            row.success.to_string(),
            row.precision.to_string(),
            row.recall.to_string(),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

/// Write the CSV export to `path`.
pub fn write_csv(rows: &[EvalRow], path: &Path) -> Result<()> {
    std::fs::write(path, to_csv(rows))?;
    Ok(())
}

fn join_skills(skills: &BTreeSet<String>) -> String {
    skills.iter().cloned().collect::<Vec<_>>().join(", ")
}

/// Quote a field per RFC 4180 when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

fn bar(value: f64) -> String {
    let filled = (value.clamp(0.0, 1.0) * CHART_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(CHART_WIDTH - filled))
}
