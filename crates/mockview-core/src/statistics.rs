//! Summary statistics over graded answers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::evaluator::SimilaritySource;
use crate::feedback::ScoreBand;
use crate::results::GradeResult;

/// How many answers landed in each feedback band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl BandCounts {
    fn record(&mut self, band: ScoreBand) {
        match band {
            ScoreBand::High => self.high += 1,
            ScoreBand::Medium => self.medium += 1,
            ScoreBand::Low => self.low += 1,
        }
    }
}

/// Distribution of scores across a set of answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub bands: BandCounts,
    /// Answers whose similarity fell back to the lexical measure.
    pub lexical_fallbacks: usize,
}

/// Summarize a group of results. An empty group yields all zeros.
pub fn summarize<'a>(results: impl IntoIterator<Item = &'a GradeResult>) -> ScoreSummary {
    let mut scores = Vec::new();
    let mut bands = BandCounts::default();
    let mut lexical_fallbacks = 0;

    for r in results {
        scores.push(r.score());
        bands.record(r.evaluation.band);
        if r.evaluation.similarity_source == SimilaritySource::Lexical {
            lexical_fallbacks += 1;
        }
    }

    if scores.is_empty() {
        return ScoreSummary::default();
    }

    scores.sort_by(f64::total_cmp);
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
    let mid = scores.len() / 2;
    let median = if scores.len() % 2 == 0 {
        (scores[mid - 1] + scores[mid]) / 2.0
    } else {
        scores[mid]
    };

    ScoreSummary {
        count: scores.len(),
        mean,
        median,
        std_dev: variance.sqrt(),
        min: scores[0],
        max: scores[scores.len() - 1],
        bands,
        lexical_fallbacks,
    }
}

/// Statistics for a whole grading run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradeStats {
    pub overall: ScoreSummary,
    /// Per-tag summaries. Untagged answers only count toward `overall`.
    pub per_tag: BTreeMap<String, ScoreSummary>,
}

/// Compute overall and per-tag statistics.
pub fn compute_grade_stats(results: &[GradeResult]) -> GradeStats {
    let mut by_tag: BTreeMap<&str, Vec<&GradeResult>> = BTreeMap::new();
    for r in results {
        for tag in &r.tags {
            by_tag.entry(tag.as_str()).or_default().push(r);
        }
    }

    GradeStats {
        overall: summarize(results),
        per_tag: by_tag
            .into_iter()
            .map(|(tag, group)| (tag.to_string(), summarize(group)))
            .collect(),
    }
}
