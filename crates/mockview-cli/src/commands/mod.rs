pub mod ask;
pub mod chat;
pub mod compare;
pub mod domains;
pub mod evaluate;
pub mod grade;
pub mod init;
pub mod interview;
pub mod list_models;
pub mod references;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use mockview_core::evaluator::ResponseEvaluator;
use mockview_providers::config::{load_config_from, MockviewConfig};
use mockview_providers::resolve_provider;

/// Load config and build an evaluator for the chosen provider and model.
///
/// Without `--model`, the default provider uses `default_model` and any
/// other provider uses its first listed model.
pub(crate) fn build_evaluator(
    config_path: Option<&Path>,
    provider: Option<&str>,
    model: Option<&str>,
) -> Result<(MockviewConfig, ResponseEvaluator)> {
    let config = load_config_from(config_path)?;
    let embedder = resolve_provider(&config, provider)?;

    let model = match (model, provider) {
        (Some(m), _) => Some(m.to_string()),
        (None, Some(p)) if p != config.default_provider => {
            embedder.available_models().first().map(|m| m.id.clone())
        }
        _ => None,
    };
    tracing::debug!(provider = embedder.name(), model = ?model, "building evaluator");

    let evaluator = ResponseEvaluator::new(embedder, config.evaluator_config(model.as_deref()));
    Ok((config, evaluator))
}
