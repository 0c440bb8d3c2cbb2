//! The `mockview init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("mockview.toml").exists() {
        println!("mockview.toml already exists, skipping.");
    } else {
        std::fs::write("mockview.toml", SAMPLE_CONFIG)?;
        println!("Created mockview.toml");
    }

    std::fs::create_dir_all("answer-sheets")?;
    let example_path = std::path::Path::new("answer-sheets/example.toml");
    if example_path.exists() {
        println!("answer-sheets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_SHEET)?;
        println!("Created answer-sheets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Optionally configure an embedding provider in mockview.toml");
    println!("  2. Run: mockview validate --sheet answer-sheets/example.toml");
    println!("  3. Run: mockview grade --sheet answer-sheets/example.toml --format all");
    println!("  4. Or practice live: mockview interview --domain software-development");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mockview configuration

default_provider = "lexical"
# The lexical model is named after its dimensions: lexical-hash-<dimensions>.
default_model = "lexical-hash-384"
max_retries = 3
retry_delay_ms = 1000
parallelism = 4
output_dir = "./mockview-results"

[providers.lexical]
type = "lexical"
dimensions = 384

# [providers.openai]
# type = "openai"
# api_key = "${OPENAI_API_KEY}"

# [providers.ollama]
# type = "ollama"
# base_url = "http://localhost:11434"

[scoring.weights]
semantic = 0.5
relevance = 0.3
quality = 0.2

[scoring.thresholds]
high = 7.5
medium = 5.0
"#;

const EXAMPLE_SHEET: &str = r#"[sheet]
id = "example"
name = "Example Answer Sheet"
description = "A few recorded answers to get started"
domain = "software-development"
difficulty = "intermediate"

[[answers]]
id = "testing-strategy"
question = "How would you implement testing in a project?"
response = """
I start with unit tests for the core logic and add integration tests around the
database and external services. Continuous integration runs the whole suite on
every pull request, and code review checks that new features come with tests.
"""
tags = ["testing"]

[[answers]]
id = "microservices-tradeoffs"
question = "What are the trade-offs between microservices and a monolithic architecture?"
response = """
Microservices let teams deploy independently and scale services separately, but
they add network latency and make debugging harder. A monolith is simpler to
build and test early on. I would pick based on team size and scalability needs.
"""
tags = ["architecture"]

[[answers]]
id = "short-answer"
question = "Can you explain the basic concept of version control?"
response = "It tracks changes."
tags = ["basics"]
"#;
