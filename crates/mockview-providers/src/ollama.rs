//! Ollama (local model) embedding provider.

use std::time::Instant;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use mockview_core::error::ProviderError;
use mockview_core::traits::{EmbedRequest, EmbedResponse, Embedder, ModelInfo};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Ollama `/api/embed` provider.
pub struct OllamaEmbedder {
    base_url: String,
    client: reqwest::Client,
}

impl OllamaEmbedder {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn unreachable(&self) -> ProviderError {
        ProviderError::NetworkError(format!(
            "Ollama not reachable at {}. Is it running? Start with: ollama serve",
            self.base_url
        ))
    }
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct OllamaResponse {
    embeddings: Vec<Vec<f32>>,
    model: String,
}

#[derive(Deserialize)]
struct OllamaTagsResponse {
    models: Vec<OllamaModelEntry>,
}

#[derive(Deserialize)]
struct OllamaModelEntry {
    name: String,
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    fn name(&self) -> &str {
        "ollama"
    }

    #[instrument(skip(self, request), fields(model = %request.model, inputs = request.inputs.len()))]
    async fn embed(&self, request: &EmbedRequest) -> anyhow::Result<EmbedResponse> {
        let start = Instant::now();

        let body = OllamaRequest {
            model: &request.model,
            input: &request.inputs,
        };

        let response = self
            .client
            .post(format!("{}/api/embed", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else if e.is_connect() {
                    self.unreachable()
                } else {
                    ProviderError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(ProviderError::ModelNotFound(format!(
                "Model '{}' not found locally. Pull it with: ollama pull {}",
                request.model, request.model
            ))
            .into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        let api_response: OllamaResponse = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("failed to parse response: {e}"))
        })?;

        if api_response.embeddings.len() != request.inputs.len() {
            return Err(ProviderError::InvalidResponse(format!(
                "expected {} embeddings, got {}",
                request.inputs.len(),
                api_response.embeddings.len()
            ))
            .into());
        }

        Ok(EmbedResponse {
            embeddings: api_response.embeddings,
            model: api_response.model,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn available_models(&self) -> Vec<ModelInfo> {
        // Commonly pulled embedding models; `list_models_async` asks the server.
        [
            ("nomic-embed-text", "Nomic Embed Text", 768),
            ("mxbai-embed-large", "mxbai Embed Large", 1024),
            ("all-minilm", "all-MiniLM", 384),
        ]
        .into_iter()
        .map(|(id, name, dimensions)| ModelInfo {
            id: id.into(),
            name: name.into(),
            provider: "ollama".into(),
            dimensions,
            cost_per_1k_input: 0.0,
        })
        .collect()
    }
}

impl OllamaEmbedder {
    /// Fetch the models installed on the Ollama instance.
    ///
    /// Dimensions are not reported by the tags endpoint and are left at 0.
    pub async fn list_models_async(&self) -> anyhow::Result<Vec<ModelInfo>> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
            .map_err(|_| self.unreachable())?;

        let tags: OllamaTagsResponse = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("failed to parse tags response: {e}"))
        })?;

        Ok(tags
            .models
            .into_iter()
            .map(|m| ModelInfo {
                id: m.name.clone(),
                name: m.name,
                provider: "ollama".into(),
                dimensions: 0,
                cost_per_1k_input: 0.0,
            })
            .collect())
    }
}
