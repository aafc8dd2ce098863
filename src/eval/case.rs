//! Labeled case type for the evaluation dataset.

use crate::error::{Result, TestrecError};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

/// Single labeled evaluation case.
#[derive(Debug, Clone, Deserialize)]
pub struct EvalCase {
    /// Free-text hiring query sent to the recommendation service.
    pub query: String,
    /// Ground-truth skills a good recommendation should cover.
    pub expected_skills: Vec<String>,
    /// Upper bound on acceptable test duration, in minutes.
    pub max_duration: f64,
}

impl EvalCase {
    /// Expected skills, lowercased into a set for scoring.
    pub fn expected_skill_set(&self) -> BTreeSet<String> {
        self.expected_skills
            .iter()
            .map(|s| s.to_lowercase())
            .collect()
    }
}

/// Load labeled cases from a JSON file containing an array of cases.
///
/// Every case must carry all three fields; an empty dataset is rejected
/// because an evaluation over zero cases has no meaningful aggregates.
pub fn load_cases(path: &Path) -> Result<Vec<EvalCase>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| TestrecError::Eval(format!("failed to read {}: {}", path.display(), e)))?;

    let cases: Vec<EvalCase> = serde_json::from_str(&raw)
        .map_err(|e| TestrecError::Eval(format!("failed to parse {}: {}", path.display(), e)))?;

    if cases.is_empty() {
        return Err(TestrecError::Eval(format!(
            "no test cases in {}",
            path.display()
        )));
    }

    Ok(cases)
}
