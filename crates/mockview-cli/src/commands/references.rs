//! The `mockview references` command.

use anyhow::Result;

use mockview_core::model::Domain;
use mockview_core::references::{study_suggestions, topic_references, ReferenceSet};

pub fn execute(domain: &str, topic: Option<&str>, score: Option<f64>) -> Result<()> {
    if let Some(score) = score {
        anyhow::ensure!(
            (0.0..=10.0).contains(&score),
            "score must be between 0 and 10"
        );
    }

    let domain = Domain::resolve(domain);
    let refs = topic_references(domain, topic);

    println!("References for {domain}");
    print_references(&refs);

    let suggestions = study_suggestions(domain, topic, score);
    if !suggestions.is_empty() {
        println!("\nStudy suggestions:");
        for s in &suggestions {
            println!("  {s}");
        }
    }

    Ok(())
}

pub(crate) fn print_references(refs: &ReferenceSet) {
    for (category, items) in refs.categories() {
        if items.is_empty() {
            continue;
        }
        println!("\n{category}:");
        for r in items {
            println!("  {}", r.display());
        }
    }
}
