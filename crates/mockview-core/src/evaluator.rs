//! Answer scoring.
//!
//! A score out of 10 blends three signals:
//!
//! - semantic similarity between the answer and the question (embedding
//!   cosine, with a lexical fallback when the embedder is unavailable)
//! - domain relevance, the share of domain keywords the answer mentions
//! - surface quality, from length, sentence count, and word diversity
//!
//! The blended score is clamped to [0, 10] and paired with canned feedback.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::error::ProviderError;
use crate::feedback::{format_feedback, FeedbackThresholds, ScoreBand};
use crate::model::Domain;
use crate::text;
use crate::traits::{cosine_similarity, EmbedRequest, Embedder};

/// Maximum score.
pub const MAX_SCORE: f64 = 10.0;

/// Keyword hits at which relevance saturates.
pub const RELEVANCE_SATURATION: usize = 5;

/// Word count at which the length signal saturates.
pub const LENGTH_SATURATION: usize = 200;

/// Sentence count at which the complexity signal saturates.
pub const SENTENCE_SATURATION: usize = 10;

/// Relative weight of each signal in the final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_semantic")]
    pub semantic: f64,
    #[serde(default = "default_relevance")]
    pub relevance: f64,
    #[serde(default = "default_quality")]
    pub quality: f64,
}

fn default_semantic() -> f64 {
    0.5
}
fn default_relevance() -> f64 {
    0.3
}
fn default_quality() -> f64 {
    0.2
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            semantic: default_semantic(),
            relevance: default_relevance(),
            quality: default_quality(),
        }
    }
}

impl ScoringWeights {
    /// Check that weights are finite, non-negative, and not all zero.
    pub fn validate(&self) -> Result<()> {
        let all = [self.semantic, self.relevance, self.quality];
        anyhow::ensure!(
            all.iter().all(|w| w.is_finite() && *w >= 0.0),
            "scoring weights must be non-negative numbers"
        );
        anyhow::ensure!(
            all.iter().sum::<f64>() > 0.0,
            "at least one scoring weight must be positive"
        );
        Ok(())
    }

    /// Blend component scores (each in [0, 1]) into a score out of 10.
    pub fn blend(&self, similarity: f64, relevance: f64, quality: f64) -> f64 {
        let total = (similarity * self.semantic + relevance * self.relevance + quality * self.quality)
            * MAX_SCORE;
        if total.is_nan() {
            return 0.0;
        }
        total.clamp(0.0, MAX_SCORE)
    }
}

/// Surface-level quality measurements of an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub word_count: usize,
    pub sentence_count: usize,
    /// Unique lowercase words over total words.
    pub diversity: f64,
    pub length_score: f64,
    pub complexity_score: f64,
    /// Combined quality in [0, 1].
    pub score: f64,
}

/// Where the semantic similarity figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilaritySource {
    /// Cosine similarity of provider embeddings.
    Embedding,
    /// Term-frequency cosine, used when embedding failed.
    Lexical,
    /// Not computed (empty answer).
    Skipped,
}

/// Full evaluation of one answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// Final score in [0, 10].
    pub score: f64,
    /// Similarity between answer and question in [0, 1].
    pub semantic_similarity: f64,
    pub similarity_source: SimilaritySource,
    /// Domain relevance in [0, 1].
    pub relevance: f64,
    /// Domain keywords the answer mentions.
    pub found_concepts: Vec<String>,
    pub quality: QualityMetrics,
    pub band: ScoreBand,
    pub feedback: String,
}

impl Evaluation {
    /// Score rounded to one decimal place for display.
    pub fn display_score(&self) -> String {
        format!("{:.1}/10", self.score)
    }
}

/// Find domain keywords in a response.
///
/// Returns relevance in [0, 1], saturating at [`RELEVANCE_SATURATION`] hits,
/// and the keywords found, in catalog order.
pub fn domain_relevance(response: &str, domain: Domain) -> (f64, Vec<String>) {
    let tokens = text::preprocess_tokens(response);
    let found: Vec<String> = catalog::evaluation_keywords(domain)
        .iter()
        .filter(|k| text::contains_phrase(&tokens, k))
        .map(|k| k.to_string())
        .collect();
    let relevance = (found.len() as f64 / RELEVANCE_SATURATION as f64).min(1.0);
    (relevance, found)
}

/// Measure length, structure, and vocabulary diversity of a response.
pub fn response_quality(response: &str) -> QualityMetrics {
    let words: Vec<&str> = response.split_whitespace().collect();
    let word_count = words.len();
    let sentence_count = text::sentence_count(response);
    let unique: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let diversity = unique.len() as f64 / word_count.max(1) as f64;

    let length_score = (word_count as f64 / LENGTH_SATURATION as f64).min(1.0);
    let complexity_score = (sentence_count as f64 / SENTENCE_SATURATION as f64).min(1.0);
    let score = length_score * 0.4 + complexity_score * 0.3 + diversity * 0.3;

    QualityMetrics {
        word_count,
        sentence_count,
        diversity,
        length_score,
        complexity_score,
        score,
    }
}

/// Evaluator configuration.
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    /// Embedding model requested from the provider.
    pub model: String,
    pub weights: ScoringWeights,
    pub thresholds: FeedbackThresholds,
    /// Retries on transient provider errors.
    pub max_retries: u32,
    /// Initial delay between retries; doubles each retry.
    pub retry_delay: Duration,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            model: "lexical-hash-384".to_string(),
            weights: ScoringWeights::default(),
            thresholds: FeedbackThresholds::default(),
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

/// Scores answers against their questions.
pub struct ResponseEvaluator {
    embedder: Arc<dyn Embedder>,
    config: EvaluatorConfig,
    rng: Mutex<StdRng>,
}

impl ResponseEvaluator {
    pub fn new(embedder: Arc<dyn Embedder>, config: EvaluatorConfig) -> Self {
        Self {
            embedder,
            config,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Seed the feedback RNG, for reproducible feedback text.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Name of the underlying embedder.
    pub fn provider_name(&self) -> &str {
        self.embedder.name()
    }

    /// Similarity between response and question in [0, 1].
    ///
    /// Falls back to lexical similarity when the embedder keeps failing.
    pub async fn semantic_similarity(
        &self,
        response: &str,
        question: &str,
    ) -> (f64, SimilaritySource) {
        match self.embedding_similarity(response, question).await {
            Ok(similarity) => (similarity, SimilaritySource::Embedding),
            Err(e) => {
                tracing::warn!(
                    provider = self.embedder.name(),
                    "embedding failed, using lexical similarity: {e:#}"
                );
                (
                    text::lexical_similarity(response, question),
                    SimilaritySource::Lexical,
                )
            }
        }
    }

    async fn embedding_similarity(&self, response: &str, question: &str) -> Result<f64> {
        let request = EmbedRequest {
            model: self.config.model.clone(),
            inputs: vec![response.to_string(), question.to_string()],
        };

        let start = Instant::now();
        let mut retry_delay = self.config.retry_delay;
        let mut last_error = None;

        for retry in 0..=self.config.max_retries {
            if retry > 0 {
                tokio::time::sleep(retry_delay).await;
                retry_delay = (retry_delay * 2).min(Duration::from_secs(60));
            }

            match self.embedder.embed(&request).await {
                Ok(embedded) => {
                    let [a, b] = embedded.embeddings.as_slice() else {
                        anyhow::bail!(ProviderError::InvalidResponse(format!(
                            "expected 2 embeddings, got {}",
                            embedded.embeddings.len()
                        )));
                    };
                    let similarity = cosine_similarity(a, b) as f64;
                    tracing::debug!(
                        similarity,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "embedding similarity"
                    );
                    return Ok(similarity.clamp(0.0, 1.0));
                }
                Err(e) => {
                    if let Some(provider_error) = e.downcast_ref::<ProviderError>() {
                        if provider_error.is_permanent() {
                            return Err(e);
                        }
                        if let Some(ms) = provider_error.retry_after_ms() {
                            retry_delay = Duration::from_millis(ms);
                        }
                    }
                    tracing::debug!(retry, "embedding request failed: {e}");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("unknown error")))
    }

    /// Score a response to a question.
    pub async fn evaluate(&self, question: &str, response: &str, domain: Domain) -> Evaluation {
        let (semantic_similarity, similarity_source) = if response.trim().is_empty() {
            (0.0, SimilaritySource::Skipped)
        } else {
            self.semantic_similarity(response, question).await
        };

        let (relevance, found_concepts) = domain_relevance(response, domain);
        let quality = response_quality(response);

        let score = if similarity_source == SimilaritySource::Skipped {
            0.0
        } else {
            self.config
                .weights
                .blend(semantic_similarity, relevance, quality.score)
        };
        let band = self.config.thresholds.band(score);

        let feedback = {
            let mut rng = self.rng.lock().unwrap_or_else(|p| p.into_inner());
            format_feedback(&mut *rng, band, &found_concepts, domain)
        };

        tracing::info!(
            %domain,
            score = %format!("{score:.2}"),
            similarity = %format!("{semantic_similarity:.3}"),
            relevance,
            quality = %format!("{:.3}", quality.score),
            "evaluated answer"
        );

        Evaluation {
            score,
            semantic_similarity,
            similarity_source,
            relevance,
            found_concepts,
            quality,
            band,
            feedback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{EmbedResponse, ModelInfo};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Returns the same vector for every input.
    struct ConstantEmbedder;

    #[async_trait]
    impl Embedder for ConstantEmbedder {
        fn name(&self) -> &str {
            "constant"
        }

        async fn embed(&self, request: &EmbedRequest) -> Result<EmbedResponse> {
            Ok(EmbedResponse {
                embeddings: request.inputs.iter().map(|_| vec![1.0, 0.5, 0.25]).collect(),
                model: request.model.clone(),
                latency_ms: 0,
            })
        }

        fn available_models(&self) -> Vec<ModelInfo> {
            vec![]
        }
    }

    /// Always fails with the given error kind.
    struct FailingEmbedder {
        permanent: bool,
        calls: AtomicU32,
    }

    #[async_trait]
    impl Embedder for FailingEmbedder {
        fn name(&self) -> &str {
            "failing"
        }

        async fn embed(&self, _request: &EmbedRequest) -> Result<EmbedResponse> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if self.permanent {
                Err(ProviderError::AuthenticationFailed("bad key".into()).into())
            } else {
                Err(ProviderError::NetworkError("connection reset".into()).into())
            }
        }

        fn available_models(&self) -> Vec<ModelInfo> {
            vec![]
        }
    }

    fn fast_config() -> EvaluatorConfig {
        EvaluatorConfig {
            max_retries: 2,
            retry_delay: Duration::from_millis(1),
            ..Default::default()
        }
    }

    const GOOD_ANSWER: &str = "Good architecture starts with clear module boundaries. \
        I rely on design patterns where they fit, and on testing at every layer. \
        Continuous integration runs the test suite on each commit. \
        Code review catches security and performance problems early. \
        Documentation keeps the API understandable for other teams.";

    #[test]
    fn relevance_counts_keywords() {
        let (relevance, found) = domain_relevance(GOOD_ANSWER, Domain::SoftwareDevelopment);
        assert!(found.contains(&"design patterns".to_string()));
        assert!(found.contains(&"continuous integration".to_string()));
        assert!(found.contains(&"api".to_string()));
        assert_eq!(relevance, 1.0);

        let (relevance, found) = domain_relevance("I like turtles.", Domain::SoftwareDevelopment);
        assert_eq!(relevance, 0.0);
        assert!(found.is_empty());
    }

    #[test]
    fn relevance_is_partial_below_saturation() {
        let (relevance, found) =
            domain_relevance("We track ROI and run A/B testing.", Domain::Marketing);
        assert_eq!(found, vec!["ROI".to_string(), "A/B testing".to_string()]);
        assert!((relevance - 0.4).abs() < 1e-9);
    }

    #[test]
    fn relevance_matches_plural_keywords() {
        let (_, found) = domain_relevance("We design REST APIs.", Domain::SoftwareDevelopment);
        assert!(found.contains(&"api".to_string()), "found: {found:?}");
    }

    #[test]
    fn quality_metrics() {
        let q = response_quality("One two three. Four five six.");
        assert_eq!(q.word_count, 6);
        assert_eq!(q.sentence_count, 2);
        assert_eq!(q.diversity, 1.0);
        assert!((q.length_score - 0.03).abs() < 1e-9);
        assert!((q.complexity_score - 0.2).abs() < 1e-9);
        assert!((q.score - (0.03 * 0.4 + 0.2 * 0.3 + 0.3)).abs() < 1e-9);

        let empty = response_quality("");
        assert_eq!(empty.word_count, 0);
        assert_eq!(empty.score, 0.0);
    }

    #[test]
    fn blend_is_clamped() {
        let w = ScoringWeights::default();
        assert_eq!(w.blend(1.0, 1.0, 1.0), 10.0);
        assert_eq!(w.blend(0.0, 0.0, 0.0), 0.0);
        assert_eq!(w.blend(5.0, 5.0, 5.0), 10.0);
        assert_eq!(w.blend(-3.0, 0.0, 0.0), 0.0);

        let heavy = ScoringWeights {
            semantic: 2.0,
            relevance: 2.0,
            quality: 2.0,
        };
        assert_eq!(heavy.blend(1.0, 1.0, 1.0), 10.0);
    }

    #[test]
    fn weights_validation() {
        assert!(ScoringWeights::default().validate().is_ok());
        let negative = ScoringWeights {
            semantic: -0.1,
            ..Default::default()
        };
        assert!(negative.validate().is_err());
        let zero = ScoringWeights {
            semantic: 0.0,
            relevance: 0.0,
            quality: 0.0,
        };
        assert!(zero.validate().is_err());
    }

    #[tokio::test]
    async fn identical_embeddings_score_high() {
        let evaluator = ResponseEvaluator::new(Arc::new(ConstantEmbedder), fast_config()).with_seed(1);
        let eval = evaluator
            .evaluate(
                "What are the best practices for design patterns?",
                GOOD_ANSWER,
                Domain::SoftwareDevelopment,
            )
            .await;

        assert_eq!(eval.similarity_source, SimilaritySource::Embedding);
        assert!((eval.semantic_similarity - 1.0).abs() < 1e-6);
        assert!(eval.score >= 8.0, "score was {}", eval.score);
        assert!(eval.score <= MAX_SCORE);
        assert_eq!(eval.band, ScoreBand::High);
        assert!(eval
            .found_concepts
            .iter()
            .any(|c| eval.feedback.contains(c.as_str())));
    }

    #[tokio::test]
    async fn empty_answer_scores_zero_without_embedding() {
        let embedder = Arc::new(FailingEmbedder {
            permanent: false,
            calls: AtomicU32::new(0),
        });
        let evaluator = ResponseEvaluator::new(embedder.clone(), fast_config());
        let eval = evaluator
            .evaluate("What is SEO?", "   ", Domain::Marketing)
            .await;
        assert_eq!(eval.score, 0.0);
        assert_eq!(eval.similarity_source, SimilaritySource::Skipped);
        assert_eq!(eval.band, ScoreBand::Low);
        assert_eq!(embedder.calls.load(Ordering::Relaxed), 0);
        assert!(!eval.feedback.is_empty());
    }

    #[tokio::test]
    async fn transient_errors_retry_then_fall_back() {
        let embedder = Arc::new(FailingEmbedder {
            permanent: false,
            calls: AtomicU32::new(0),
        });
        let evaluator = ResponseEvaluator::new(embedder.clone(), fast_config());
        let eval = evaluator
            .evaluate(
                "Explain feature engineering.",
                "Feature engineering turns raw data into model inputs.",
                Domain::DataScience,
            )
            .await;

        assert_eq!(eval.similarity_source, SimilaritySource::Lexical);
        assert!(eval.semantic_similarity > 0.0);
        assert_eq!(embedder.calls.load(Ordering::Relaxed), 3);
        assert!((0.0..=MAX_SCORE).contains(&eval.score));
    }

    #[tokio::test]
    async fn permanent_errors_do_not_retry() {
        let embedder = Arc::new(FailingEmbedder {
            permanent: true,
            calls: AtomicU32::new(0),
        });
        let evaluator = ResponseEvaluator::new(embedder.clone(), fast_config());
        let (_, source) = evaluator
            .semantic_similarity("an answer", "a question")
            .await;
        assert_eq!(source, SimilaritySource::Lexical);
        assert_eq!(embedder.calls.load(Ordering::Relaxed), 1);
    }
}
