//! The `mockview ask` command.

use anyhow::Result;

use mockview_core::generator::QuestionGenerator;
use mockview_core::model::{Difficulty, Domain};

pub fn execute(domain: &str, difficulty: &str, count: usize, seed: Option<u64>) -> Result<()> {
    anyhow::ensure!(count >= 1, "count must be at least 1");

    let domain = Domain::resolve(domain);
    let difficulty = Difficulty::resolve(difficulty);
    let mut generator = seed
        .map(QuestionGenerator::with_seed)
        .unwrap_or_default();

    let mut asked = Vec::with_capacity(count);
    for i in 0..count {
        let question = generator.generate(domain, difficulty, &asked);
        if count == 1 {
            println!("{question}");
        } else {
            println!("{}. {question}", i + 1);
        }
        asked.push(question.text);
    }

    Ok(())
}
