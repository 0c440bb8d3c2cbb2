//! Batch grading engine.
//!
//! Grades every answer on a sheet concurrently, bounded by a semaphore.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::evaluator::ResponseEvaluator;
use crate::model::AnswerSheet;
use crate::report::{GradeReport, SheetSummary};
use crate::results::GradeResult;
use crate::statistics::compute_grade_stats;

/// Configuration for the grading engine.
#[derive(Debug, Clone)]
pub struct GradingConfig {
    /// Maximum answers graded at once.
    pub parallelism: usize,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self { parallelism: 4 }
    }
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_grade_start(&self, answer_id: &str);
    fn on_grade_complete(&self, result: &GradeResult);
    fn on_grade_error(&self, answer_id: &str, error: &str);
    fn on_sheet_complete(&self, total: usize, completed: usize, failed: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_grade_start(&self, _: &str) {}
    fn on_grade_complete(&self, _: &GradeResult) {}
    fn on_grade_error(&self, _: &str, _: &str) {}
    fn on_sheet_complete(&self, _: usize, _: usize, _: usize, _: Duration) {}
}

/// Grades answer sheets with a shared evaluator.
pub struct GradingEngine {
    evaluator: Arc<ResponseEvaluator>,
    config: GradingConfig,
}

impl GradingEngine {
    pub fn new(evaluator: Arc<ResponseEvaluator>, config: GradingConfig) -> Self {
        Self { evaluator, config }
    }

    /// Grade every answer on a sheet.
    ///
    /// Results come back in sheet order regardless of completion order.
    pub async fn grade(
        &self,
        sheet: &AnswerSheet,
        progress: &dyn ProgressReporter,
    ) -> Result<GradeReport> {
        let start = Instant::now();
        let run_id = Uuid::new_v4();
        let semaphore = Arc::new(Semaphore::new(self.config.parallelism.max(1)));
        let provider = self.evaluator.provider_name().to_string();
        let model = self.evaluator.config().model.clone();

        let mut futures = FuturesUnordered::new();

        for (index, answer) in sheet.answers.iter().enumerate() {
            let evaluator = Arc::clone(&self.evaluator);
            let semaphore = Arc::clone(&semaphore);
            let answer = answer.clone();
            let domain = sheet.domain;
            let provider = provider.clone();
            let model = model.clone();

            futures.push(async move {
                let answer_id = answer.id.clone();
                let inner = async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|_| anyhow::anyhow!("semaphore closed"))?;

                    progress.on_grade_start(&answer.id);
                    let graded_at = Instant::now();
                    let evaluation = evaluator
                        .evaluate(&answer.question, &answer.response, domain)
                        .await;

                    Ok::<_, anyhow::Error>(GradeResult {
                        answer_id: answer.id,
                        question: answer.question,
                        response: answer.response,
                        tags: answer.tags,
                        provider,
                        model,
                        evaluation,
                        latency_ms: graded_at.elapsed().as_millis() as u64,
                        run_id,
                    })
                };
                (index, answer_id, inner.await)
            });
        }

        let mut results = Vec::new();
        let mut completed = 0usize;
        let mut failed = 0usize;
        let total = futures.len();

        while let Some((index, answer_id, result)) = futures.next().await {
            match result {
                Ok(graded) => {
                    progress.on_grade_complete(&graded);
                    results.push((index, graded));
                    completed += 1;
                }
                Err(e) => {
                    tracing::error!("grading failed for {answer_id}: {e:#}");
                    progress.on_grade_error(&answer_id, &e.to_string());
                    failed += 1;
                }
            }
        }

        let elapsed = start.elapsed();
        progress.on_sheet_complete(total, completed, failed, elapsed);

        results.sort_by_key(|(index, _)| *index);
        let results: Vec<GradeResult> = results.into_iter().map(|(_, r)| r).collect();
        let stats = compute_grade_stats(&results);

        tracing::info!(
            sheet = %sheet.id,
            answers = total,
            mean = %format!("{:.2}", stats.overall.mean),
            elapsed_ms = elapsed.as_millis() as u64,
            "graded sheet"
        );

        Ok(GradeReport {
            id: run_id,
            created_at: chrono::Utc::now(),
            sheet: SheetSummary {
                id: sheet.id.clone(),
                name: sheet.name.clone(),
                domain: sheet.domain,
                difficulty: sheet.difficulty,
                answer_count: sheet.answers.len(),
            },
            provider,
            model,
            results,
            stats,
            duration_ms: elapsed.as_millis() as u64,
        })
    }
}
