//! Grade report types with JSON persistence and regression detection.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Difficulty, Domain};
use crate::results::GradeResult;
use crate::statistics::GradeStats;

/// A complete grading report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub sheet: SheetSummary,
    /// Embedder used for the similarity signal.
    pub provider: String,
    pub model: String,
    /// Results in sheet order.
    pub results: Vec<GradeResult>,
    pub stats: GradeStats,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Summary of an answer sheet (without the answers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetSummary {
    pub id: String,
    pub name: String,
    pub domain: Domain,
    pub difficulty: Difficulty,
    pub answer_count: usize,
}

impl GradeReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradeReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare against a baseline report.
    ///
    /// `threshold` is in score points: a change larger than it in either
    /// direction counts as a regression or improvement.
    pub fn compare(&self, baseline: &GradeReport, threshold: f64) -> RegressionReport {
        let score_map = |report: &GradeReport| -> HashMap<String, f64> {
            report
                .results
                .iter()
                .map(|r| (r.answer_id.clone(), r.score()))
                .collect()
        };

        let baseline_scores = score_map(baseline);
        let current_scores = score_map(self);

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_answers = 0usize;

        for (answer_id, &current) in &current_scores {
            let Some(&baseline_score) = baseline_scores.get(answer_id) else {
                new_answers += 1;
                continue;
            };
            let change = ScoreChange {
                answer_id: answer_id.clone(),
                baseline_score,
                current_score: current,
                delta: current - baseline_score,
            };
            if change.delta < -threshold {
                regressions.push(change);
            } else if change.delta > threshold {
                improvements.push(change);
            } else {
                unchanged += 1;
            }
        }

        regressions.sort_by(|a, b| a.delta.total_cmp(&b.delta));
        improvements.sort_by(|a, b| b.delta.total_cmp(&a.delta));

        let removed_answers = baseline_scores
            .keys()
            .filter(|k| !current_scores.contains_key(*k))
            .count();

        RegressionReport {
            baseline_mean: baseline.stats.overall.mean,
            current_mean: self.stats.overall.mean,
            regressions,
            improvements,
            unchanged,
            new_answers,
            removed_answers,
        }
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionReport {
    pub baseline_mean: f64,
    pub current_mean: f64,
    /// Worst first.
    pub regressions: Vec<ScoreChange>,
    /// Best first.
    pub improvements: Vec<ScoreChange>,
    pub unchanged: usize,
    /// Answers in current but not baseline.
    pub new_answers: usize,
    /// Answers in baseline but not current.
    pub removed_answers: usize,
}

/// A significant score change for one answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreChange {
    pub answer_id: String,
    pub baseline_score: f64,
    pub current_score: f64,
    pub delta: f64,
}

impl RegressionReport {
    /// Format the regression report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));
        md.push_str(&format!(
            "**Mean score:** {:.2} → {:.2} ({:+.2})\n\n",
            self.baseline_mean,
            self.current_mean,
            self.current_mean - self.baseline_mean
        ));

        for (title, changes) in [
            ("Regressions", &self.regressions),
            ("Improvements", &self.improvements),
        ] {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Answer | Baseline | Current | Delta |\n");
            md.push_str("|--------|----------|---------|-------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {} | {:.1} | {:.1} | {:+.1} |\n",
                    c.answer_id, c.baseline_score, c.current_score, c.delta
                ));
            }
            md.push('\n');
        }

        if self.new_answers > 0 || self.removed_answers > 0 {
            md.push_str(&format!(
                "{} new, {} removed answers\n",
                self.new_answers, self.removed_answers
            ));
        }

        md
    }

    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}
