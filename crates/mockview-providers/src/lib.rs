//! mockview-providers — embedding provider integrations.
//!
//! Implements the `Embedder` trait for OpenAI-compatible APIs, Ollama, and an
//! offline lexical hashing embedder, plus configuration loading.

pub mod config;
pub mod lexical;
pub mod mock;
pub mod ollama;
pub mod openai;

pub use config::{
    create_provider, load_config, load_config_from, resolve_provider, MockviewConfig,
    ProviderConfig, ScoringConfig,
};
pub use mockview_core::error::ProviderError;
