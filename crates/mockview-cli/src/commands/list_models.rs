//! The `mockview list-models` command.

use std::path::Path;

use anyhow::Result;

use mockview_providers::config::load_config_from;
use mockview_providers::resolve_provider;

pub fn execute(provider_filter: Option<&str>, config_path: Option<&Path>) -> Result<()> {
    let config = load_config_from(config_path)?;

    let mut names: Vec<&str> = config.providers.keys().map(String::as_str).collect();
    names.push("lexical");
    names.sort_unstable();
    names.dedup();

    if let Some(filter) = provider_filter {
        anyhow::ensure!(
            names.contains(&filter),
            "provider '{filter}' is not configured (available: {})",
            names.join(", ")
        );
        names.retain(|n| *n == filter);
    }

    for name in names {
        let provider = match resolve_provider(&config, Some(name)) {
            Ok(p) => p,
            Err(e) => {
                println!("Provider: {name} (unavailable: {e:#})\n");
                continue;
            }
        };
        let default_marker = if name == config.default_provider {
            " (default)"
        } else {
            ""
        };
        println!("Provider: {name}{default_marker}");
        for model in provider.available_models() {
            println!(
                "  {} - {} ({} dims, ${:.5} per 1K tokens)",
                model.id, model.name, model.dimensions, model.cost_per_1k_input,
            );
        }
        println!();
    }

    Ok(())
}
