//! Evaluation framework: labeled case dataset, service client, metrics, and reporting.

pub mod case;
pub mod client;
pub mod metrics;
pub mod report;

pub use case::{load_cases, EvalCase};
pub use client::{Recommendation, RecommendClient};
pub use metrics::{jaccard_similarity, score_case, summarize, EvalRow, EvalSummary, TOP_K};
