//! Per-answer grading results.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::evaluator::Evaluation;

/// The outcome of grading one answer from a sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeResult {
    /// Answer ID from the sheet.
    pub answer_id: String,
    pub question: String,
    pub response: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Embedder that produced the similarity signal.
    pub provider: String,
    /// Embedding model requested.
    pub model: String,
    pub evaluation: Evaluation,
    /// Wall-clock time spent grading this answer.
    pub latency_ms: u64,
    pub run_id: Uuid,
}

impl GradeResult {
    pub fn score(&self) -> f64 {
        self.evaluation.score
    }
}
