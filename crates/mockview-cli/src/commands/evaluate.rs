//! The `mockview evaluate` command.

use std::path::Path;

use anyhow::Result;

use mockview_core::model::Domain;

use super::build_evaluator;

pub async fn execute(
    question: &str,
    answer: &str,
    domain: &str,
    provider: Option<&str>,
    model: Option<&str>,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let domain = Domain::resolve(domain);
    let (_, evaluator) = build_evaluator(config_path, provider, model)?;

    let evaluation = evaluator.evaluate(question, answer, domain).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
        return Ok(());
    }

    println!("Score: {}", evaluation.display_score());
    println!(
        "  similarity {:.2} ({:?}) | relevance {:.2} | quality {:.2}",
        evaluation.semantic_similarity,
        evaluation.similarity_source,
        evaluation.relevance,
        evaluation.quality.score
    );
    if !evaluation.found_concepts.is_empty() {
        println!("  concepts: {}", evaluation.found_concepts.join(", "));
    }
    println!("\n{}", evaluation.feedback);

    Ok(())
}
