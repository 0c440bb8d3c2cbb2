//! Mock embedder for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use mockview_core::traits::{EmbedRequest, EmbedResponse, Embedder, ModelInfo};

/// A mock embedder for exercising the evaluator without real API calls.
///
/// Inputs containing a registered substring get that vector; everything
/// else gets the default vector.
pub struct MockEmbedder {
    /// Map of input substring → vector.
    vectors: HashMap<String, Vec<f32>>,
    default_vector: Vec<f32>,
    call_count: AtomicU32,
    last_request: Mutex<Option<EmbedRequest>>,
}

impl MockEmbedder {
    pub fn new(vectors: HashMap<String, Vec<f32>>) -> Self {
        Self {
            vectors,
            default_vector: vec![1.0, 0.0, 0.0],
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// A mock that embeds every input to the same vector, so every
    /// similarity is 1.
    pub fn with_fixed_vector(vector: Vec<f32>) -> Self {
        Self {
            default_vector: vector,
            ..Self::new(HashMap::new())
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<EmbedRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn embed(&self, request: &EmbedRequest) -> anyhow::Result<EmbedResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap_or_else(|p| p.into_inner()) = Some(request.clone());

        let embeddings = request
            .inputs
            .iter()
            .map(|input| {
                self.vectors
                    .iter()
                    .find(|(key, _)| input.contains(key.as_str()))
                    .map(|(_, v)| v.clone())
                    .unwrap_or_else(|| self.default_vector.clone())
            })
            .collect();

        Ok(EmbedResponse {
            embeddings,
            model: request.model.clone(),
            latency_ms: 1,
        })
    }

    fn available_models(&self) -> Vec<ModelInfo> {
        vec![ModelInfo {
            id: "mock-embed".into(),
            name: "Mock Embedding".into(),
            provider: "mock".into(),
            dimensions: self.default_vector.len(),
            cost_per_1k_input: 0.0,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(inputs: &[&str]) -> EmbedRequest {
        EmbedRequest {
            model: "mock-embed".into(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn fixed_vector() {
        let embedder = MockEmbedder::with_fixed_vector(vec![0.5, 0.5]);
        let response = embedder.embed(&request(&["a", "b"])).await.unwrap();
        assert_eq!(response.embeddings, vec![vec![0.5, 0.5], vec![0.5, 0.5]]);
        assert_eq!(embedder.call_count(), 1);
        assert_eq!(embedder.last_request().unwrap().inputs, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn substring_matching() {
        let mut vectors = HashMap::new();
        vectors.insert("testing".to_string(), vec![0.0, 1.0, 0.0]);

        let embedder = MockEmbedder::new(vectors);
        let response = embedder
            .embed(&request(&["unit testing matters", "something else"]))
            .await
            .unwrap();
        assert_eq!(response.embeddings[0], vec![0.0, 1.0, 0.0]);
        assert_eq!(response.embeddings[1], vec![1.0, 0.0, 0.0]);
    }
}
