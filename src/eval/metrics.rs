//! Evaluation metrics: Jaccard skill scoring, Precision@K, Recall@K, and top-1 accuracy.

use crate::error::{Result, TestrecError};
use crate::eval::case::EvalCase;
use crate::eval::client::Recommendation;
use std::collections::BTreeSet;

/// Number of leading recommendations scored per case.
pub const TOP_K: usize = 3;

/// Duration substituted when a recommendation carries none. Large enough to
/// fail any realistic constraint, so untimed items never count as successes.
pub const MISSING_DURATION: f64 = 999.0;

/// A recommendation counts as a success only when its skill score is
/// strictly above this threshold (and its duration fits).
pub const SKILL_SCORE_THRESHOLD: f64 = 0.5;

/// Jaccard similarity between two skill sets: |intersection| / |union|.
/// Two empty sets are identical, so that case scores 1.0.
pub fn jaccard_similarity(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

/// Per-case evaluation detail.
///
/// Match fields (top match, matched skills, skill score, duration) describe
/// the rank-1 recommendation only; precision and recall count successes
/// across the whole scored window.
#[derive(Debug, Clone)]
pub struct EvalRow {
    pub query: String,
    pub expected_skills: BTreeSet<String>,
    pub max_duration: f64,
    pub top_match: String,
    pub matched_skills: BTreeSet<String>,
    /// Rank-1 skill score, rounded to two decimals for reporting.
    pub skill_score: f64,
    /// Rank-1 duration, [`MISSING_DURATION`] when the service sent none.
    pub duration: f64,
    pub duration_ok: bool,
    pub success: bool,
    pub precision: f64,
    pub recall: f64,
}

/// Aggregate metrics over all evaluated cases.
#[derive(Debug, Clone)]
pub struct EvalSummary {
    pub cases: usize,
    pub hits: usize,
    pub accuracy: f64,
    pub avg_precision: f64,
    pub avg_recall: f64,
}

/// Score one case against the service's recommendations.
///
/// Each of the first [`TOP_K`] recommendations counts as a success when its
/// lowercased skill set scores above [`SKILL_SCORE_THRESHOLD`] against the
/// expected skills and its duration fits the case's constraint.
///
/// Precision@K divides by K regardless of how many recommendations arrived.
/// Recall@K divides by min(K, expected skill count), or 1 when no skills
/// are expected, so it can exceed 1.0 when several top items pass against
/// a single expected skill.
pub fn score_case(case: &EvalCase, recommendations: &[Recommendation]) -> Result<EvalRow> {
    let first = recommendations.first().ok_or_else(|| {
        TestrecError::Eval(format!(
            "service returned no recommendations for query {:?}",
            case.query
        ))
    })?;

    let expected = case.expected_skill_set();

    let mut correct_in_top_k = 0;
    for rec in recommendations.iter().take(TOP_K) {
        let skill_score = jaccard_similarity(&expected, &rec.skill_set());
        let duration = rec.duration.unwrap_or(MISSING_DURATION);
        if skill_score > SKILL_SCORE_THRESHOLD && duration <= case.max_duration {
            correct_in_top_k += 1;
        }
    }

    let matched_skills = first.skill_set();
    let skill_score = jaccard_similarity(&expected, &matched_skills);
    let duration = first.duration.unwrap_or(MISSING_DURATION);
    let duration_ok = duration <= case.max_duration;
    let success = skill_score > SKILL_SCORE_THRESHOLD && duration_ok;

    let total_relevant = if expected.is_empty() {
        1
    } else {
        TOP_K.min(expected.len())
    };

    Ok(EvalRow {
        query: case.query.clone(),
        expected_skills: expected,
        max_duration: case.max_duration,
        top_match: first.name.clone(),
        matched_skills,
        skill_score: round2(skill_score),
        duration,
        duration_ok,
        success,
        precision: correct_in_top_k as f64 / TOP_K as f64,
        recall: correct_in_top_k as f64 / total_relevant as f64,
    })
}

/// Aggregate per-case rows into headline metrics.
/// A case is a hit when any scored recommendation succeeded, which is
/// exactly when its precision is non-zero.
pub fn summarize(rows: &[EvalRow]) -> Result<EvalSummary> {
    if rows.is_empty() {
        return Err(TestrecError::Eval(
            "no evaluation rows to summarize".to_string(),
        ));
    }

    let cases = rows.len();
    let hits = rows.iter().filter(|r| r.precision > 0.0).count();
    let avg_precision = rows.iter().map(|r| r.precision).sum::<f64>() / cases as f64;
    let avg_recall = rows.iter().map(|r| r.recall).sum::<f64>() / cases as f64;

    Ok(EvalSummary {
        cases,
        hits,
        accuracy: hits as f64 / cases as f64,
        avg_precision,
        avg_recall,
    })
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
