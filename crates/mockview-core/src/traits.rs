//! Core trait definitions for embedding providers.
//!
//! The `Embedder` trait is implemented by the `mockview-providers` crate; the
//! evaluator only ever sees it as an opaque text-to-vector black box.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for backends that turn text into embedding vectors.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Human-readable provider name (e.g. "openai").
    fn name(&self) -> &str;

    /// Embed every input, returning one vector per input in order.
    async fn embed(&self, request: &EmbedRequest) -> anyhow::Result<EmbedResponse>;

    /// List known embedding models for this provider.
    fn available_models(&self) -> Vec<ModelInfo>;
}

/// Request to embed one or more texts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedRequest {
    /// Model identifier (e.g. "text-embedding-3-small").
    pub model: String,
    /// Texts to embed.
    pub inputs: Vec<String>,
}

/// Response from an embedding request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedResponse {
    /// One vector per input, in request order.
    pub embeddings: Vec<Vec<f32>>,
    /// Model that produced the embeddings.
    pub model: String,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Information about an available embedding model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier.
    pub id: String,
    /// Human-readable model name.
    pub name: String,
    /// Provider name.
    pub provider: String,
    /// Output vector length.
    pub dimensions: usize,
    /// Cost per 1K input tokens in USD.
    pub cost_per_1k_input: f64,
}

/// Cosine similarity between two vectors, in [-1, 1].
///
/// Zero vectors and mismatched lengths yield 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_identical() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_opposite() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_orthogonal() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    }

    #[test]
    fn cosine_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }
}
