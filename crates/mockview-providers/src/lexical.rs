//! Offline feature-hashing embedder.
//!
//! Needs no network or model weights: each preprocessed token is hashed into
//! a fixed-size vector with a signed bucket, then the vector is L2-normalized.
//! Similar wording gives similar vectors, which is enough for scoring when no
//! real embedding service is configured.

use std::time::Instant;

use async_trait::async_trait;

use mockview_core::error::ProviderError;
use mockview_core::text::preprocess_tokens;
use mockview_core::traits::{EmbedRequest, EmbedResponse, Embedder, ModelInfo};

/// Default vector length.
pub const DEFAULT_DIMENSIONS: usize = 384;

/// Model name of the default-sized embedder.
pub const LEXICAL_MODEL: &str = "lexical-hash-384";

/// Model name for a hashing embedder with `dimensions` buckets.
pub fn lexical_model_name(dimensions: usize) -> String {
    format!("lexical-hash-{dimensions}")
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(FNV_OFFSET, |hash, b| (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME))
}

/// Deterministic bag-of-words embedder.
pub struct HashingEmbedder {
    dimensions: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// The only model this embedder serves, named after its vector length.
    pub fn model_name(&self) -> String {
        lexical_model_name(self.dimensions)
    }

    /// Embed one text. Text with no content words maps to the zero vector.
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        for token in preprocess_tokens(text) {
            let hash = fnv1a(token.as_bytes());
            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        }
        vector
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    fn name(&self) -> &str {
        "lexical"
    }

    async fn embed(&self, request: &EmbedRequest) -> anyhow::Result<EmbedResponse> {
        let model = self.model_name();
        if request.model != model {
            return Err(ProviderError::ModelNotFound(format!(
                "'{}' (the lexical provider only serves {model})",
                request.model
            ))
            .into());
        }

        let start = Instant::now();
        let embeddings = request.inputs.iter().map(|t| self.embed_text(t)).collect();
        Ok(EmbedResponse {
            embeddings,
            model,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn available_models(&self) -> Vec<ModelInfo> {
        vec![ModelInfo {
            id: self.model_name(),
            name: "Lexical feature hashing".into(),
            provider: "lexical".into(),
            dimensions: self.dimensions,
            cost_per_1k_input: 0.0,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockview_core::traits::cosine_similarity;

    #[test]
    fn fnv_reference_values() {
        assert_eq!(fnv1a(b""), FNV_OFFSET);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn vectors_are_unit_length() {
        let embedder = HashingEmbedder::default();
        let v = embedder.embed_text("Feature engineering improves model accuracy.");
        assert_eq!(v.len(), DEFAULT_DIMENSIONS);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn stop_words_only_is_zero() {
        let embedder = HashingEmbedder::default();
        assert!(embedder.embed_text("the and of").iter().all(|x| *x == 0.0));
    }

    #[test]
    fn related_text_is_more_similar() {
        let embedder = HashingEmbedder::default();
        let question = embedder.embed_text("How do you prevent overfitting in machine learning models?");
        let on_topic = embedder.embed_text("Overfitting in models is prevented with regularization and more training data for machine learning.");
        let off_topic = embedder.embed_text("Our brand campaign focused on social media engagement.");
        assert!(cosine_similarity(&question, &on_topic) > cosine_similarity(&question, &off_topic));
    }

    #[tokio::test]
    async fn embed_returns_one_vector_per_input() {
        let embedder = HashingEmbedder::new(16);
        let response = embedder
            .embed(&EmbedRequest {
                model: "lexical-hash-16".into(),
                inputs: vec!["one".into(), "two".into(), "three".into()],
            })
            .await
            .unwrap();
        assert_eq!(response.embeddings.len(), 3);
        assert!(response.embeddings.iter().all(|v| v.len() == 16));
    }

    #[tokio::test]
    async fn model_name_follows_dimensions() {
        assert_eq!(HashingEmbedder::default().model_name(), LEXICAL_MODEL);

        let embedder = HashingEmbedder::new(128);
        let models = embedder.available_models();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, "lexical-hash-128");
        assert_eq!(models[0].dimensions, 128);

        let response = embedder
            .embed(&EmbedRequest {
                model: "lexical-hash-128".into(),
                inputs: vec!["schema design".into()],
            })
            .await
            .unwrap();
        assert_eq!(response.model, "lexical-hash-128");
        assert_eq!(response.embeddings[0].len(), 128);

        let wrong = embedder
            .embed(&EmbedRequest {
                model: LEXICAL_MODEL.into(),
                inputs: vec!["schema design".into()],
            })
            .await;
        assert!(wrong.is_err());
    }

    #[tokio::test]
    async fn unknown_model_is_rejected() {
        let embedder = HashingEmbedder::default();
        let err = embedder
            .embed(&EmbedRequest {
                model: "text-embedding-3-small".into(),
                inputs: vec!["x".into()],
            })
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<ProviderError>().unwrap().is_permanent());
    }
}
