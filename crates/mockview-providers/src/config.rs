//! Configuration loading and embedder factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mockview_core::evaluator::{EvaluatorConfig, ScoringWeights};
use mockview_core::feedback::FeedbackThresholds;
use mockview_core::traits::Embedder;

use crate::lexical::{lexical_model_name, HashingEmbedder, DEFAULT_DIMENSIONS, LEXICAL_MODEL};
use crate::ollama::OllamaEmbedder;
use crate::openai::OpenAiEmbedder;

/// Configuration for a single embedding provider.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    OpenAI {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        org_id: Option<String>,
    },
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
    },
    Lexical {
        #[serde(default = "default_dimensions")]
        dimensions: usize,
    },
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::OpenAI {
                api_key: _,
                base_url,
                org_id,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("org_id", org_id)
                .finish(),
            ProviderConfig::Ollama { base_url } => f
                .debug_struct("Ollama")
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::Lexical { dimensions } => f
                .debug_struct("Lexical")
                .field("dimensions", dimensions)
                .finish(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_dimensions() -> usize {
    DEFAULT_DIMENSIONS
}

/// Scoring weights and feedback thresholds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: ScoringWeights,
    #[serde(default)]
    pub thresholds: FeedbackThresholds,
}

/// Top-level mockview configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockviewConfig {
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Embedding model requested from the default provider.
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Max retries on transient provider errors.
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    /// Initial delay between retries in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
    /// Max answers graded concurrently.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Output directory for reports and transcripts.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

fn default_provider() -> String {
    "lexical".to_string()
}
fn default_model() -> String {
    LEXICAL_MODEL.to_string()
}
fn default_retries() -> u32 {
    3
}
fn default_retry_delay() -> u64 {
    1000
}
fn default_parallelism() -> usize {
    4
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./mockview-results")
}

impl Default for MockviewConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider(),
            default_model: default_model(),
            max_retries: default_retries(),
            retry_delay_ms: default_retry_delay(),
            parallelism: default_parallelism(),
            output_dir: default_output_dir(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl MockviewConfig {
    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        self.scoring.weights.validate()?;
        self.scoring.thresholds.validate()?;
        anyhow::ensure!(self.parallelism > 0, "parallelism must be at least 1");
        if let Some(ProviderConfig::Lexical { dimensions }) =
            self.providers.get(&self.default_provider)
        {
            let expected = lexical_model_name((*dimensions).max(1));
            anyhow::ensure!(
                self.default_model == expected,
                "default_model '{}' does not match the lexical provider '{}' (expected '{expected}')",
                self.default_model,
                self.default_provider
            );
        }
        Ok(())
    }

    /// Evaluator settings for a model, defaulting to `default_model`.
    pub fn evaluator_config(&self, model: Option<&str>) -> EvaluatorConfig {
        EvaluatorConfig {
            model: model.unwrap_or(&self.default_model).to_string(),
            weights: self.scoring.weights,
            thresholds: self.scoring.thresholds,
            max_retries: self.max_retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
    }
    result
}

fn resolve_provider_config(config: &ProviderConfig) -> ProviderConfig {
    match config {
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => ProviderConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_deref().map(resolve_env_vars),
            org_id: org_id.as_deref().map(resolve_env_vars),
        },
        ProviderConfig::Ollama { base_url } => ProviderConfig::Ollama {
            base_url: resolve_env_vars(base_url),
        },
        lexical @ ProviderConfig::Lexical { .. } => lexical.clone(),
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `mockview.toml` in the current directory
/// 2. `~/.config/mockview/config.toml`
///
/// Environment variable overrides: `MOCKVIEW_OPENAI_KEY`, `MOCKVIEW_OLLAMA_URL`.
pub fn load_config() -> Result<MockviewConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<MockviewConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("mockview.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<MockviewConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MockviewConfig::default(),
    };

    apply_env_overrides(&mut config);

    config.providers = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_provider_config(v)))
        .collect();

    config.validate()?;
    Ok(config)
}

fn apply_env_overrides(config: &mut MockviewConfig) {
    if let Ok(key) = std::env::var("MOCKVIEW_OPENAI_KEY") {
        let entry = config
            .providers
            .entry("openai".into())
            .or_insert(ProviderConfig::OpenAI {
                api_key: String::new(),
                base_url: None,
                org_id: None,
            });
        if let ProviderConfig::OpenAI { api_key, .. } = entry {
            *api_key = key;
        }
    }

    if let Ok(url) = std::env::var("MOCKVIEW_OLLAMA_URL") {
        let entry = config
            .providers
            .entry("ollama".into())
            .or_insert(ProviderConfig::Ollama {
                base_url: default_ollama_url(),
            });
        if let ProviderConfig::Ollama { base_url } = entry {
            *base_url = url;
        }
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mockview"))
}

/// Create an embedder from its configuration.
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn Embedder>> {
    Ok(match config {
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => {
            anyhow::ensure!(
                !api_key.is_empty(),
                "OpenAI API key is empty; set MOCKVIEW_OPENAI_KEY or api_key in mockview.toml"
            );
            Arc::new(OpenAiEmbedder::new(api_key, base_url.clone(), org_id.clone())?)
        }
        ProviderConfig::Ollama { base_url } => Arc::new(OllamaEmbedder::new(base_url)?),
        ProviderConfig::Lexical { dimensions } => Arc::new(HashingEmbedder::new(*dimensions)),
    })
}

/// Look up a provider by name, defaulting to `default_provider`.
///
/// `lexical` is always available, even when not configured.
pub fn resolve_provider(config: &MockviewConfig, name: Option<&str>) -> Result<Arc<dyn Embedder>> {
    let name = name.unwrap_or(&config.default_provider);
    match config.providers.get(name) {
        Some(provider_config) => create_provider(provider_config)
            .with_context(|| format!("failed to create provider '{name}'")),
        None if name == "lexical" => Ok(Arc::new(HashingEmbedder::default())),
        None => {
            let mut known: Vec<&str> = config.providers.keys().map(String::as_str).collect();
            known.push("lexical");
            known.sort_unstable();
            known.dedup();
            anyhow::bail!(
                "provider '{name}' is not configured (available: {})",
                known.join(", ")
            )
        }
    }
}
