//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Run the binary isolated from any real config or environment overrides.
fn mockview(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("mockview").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("MOCKVIEW_OPENAI_KEY")
        .env_remove("MOCKVIEW_OLLAMA_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn sheets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../answer-sheets")
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    mockview(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mock interview practice"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    mockview(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mockview"));
}

#[test]
fn ask_prints_numbered_questions() {
    let dir = TempDir::new().unwrap();
    mockview(dir.path())
        .args(["ask", "--domain", "data-science", "--count", "3", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. "))
        .stdout(predicate::str::contains("3. "));
}

#[test]
fn ask_is_reproducible_with_seed() {
    let dir = TempDir::new().unwrap();
    let run = || {
        mockview(dir.path())
            .args(["ask", "--difficulty", "advanced", "--seed", "42"])
            .output()
            .unwrap()
            .stdout
    };
    let first = run();
    assert!(!first.is_empty());
    assert_eq!(first, run());
}

#[test]
fn evaluate_with_lexical_provider() {
    let dir = TempDir::new().unwrap();
    mockview(dir.path())
        .args([
            "evaluate",
            "--question",
            "How do you prevent overfitting in machine learning models?",
            "--answer",
            "I prevent overfitting with cross validation, regularization and more training data for the model.",
            "--domain",
            "data-science",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: "))
        .stdout(predicate::str::contains("/10"));
}

#[test]
fn evaluate_json_output() {
    let dir = TempDir::new().unwrap();
    let output = mockview(dir.path())
        .args([
            "evaluate",
            "--question",
            "How would you implement testing in a project?",
            "--answer",
            "Unit tests, integration tests and continuous integration on every pull request.",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let score = value["score"].as_f64().unwrap();
    assert!((0.0..=10.0).contains(&score));
    assert_eq!(value["similarity_source"], "embedding");
    assert!(value["feedback"].as_str().is_some_and(|f| !f.is_empty()));
}

#[test]
fn evaluate_empty_answer_scores_zero() {
    let dir = TempDir::new().unwrap();
    mockview(dir.path())
        .args(["evaluate", "--question", "What is SEO?", "--answer", "", "--domain", "marketing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 0.0/10"));
}

#[test]
fn evaluate_unknown_provider_fails() {
    let dir = TempDir::new().unwrap();
    mockview(dir.path())
        .args([
            "evaluate",
            "--question",
            "q",
            "--answer",
            "a",
            "--provider",
            "nope",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not configured"));
}

#[test]
fn chat_gives_topic_example() {
    let dir = TempDir::new().unwrap();
    mockview(dir.path())
        .args([
            "chat",
            "Can you give me an example?",
            "--question",
            "What are the best practices for clean code?",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("add_numbers"));
}

#[test]
fn references_with_suggestions() {
    let dir = TempDir::new().unwrap();
    mockview(dir.path())
        .args(["references", "--domain", "data-science", "--score", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Books:"))
        .stdout(predicate::str::contains("foundational"));
}

#[test]
fn references_rejects_out_of_range_score() {
    let dir = TempDir::new().unwrap();
    mockview(dir.path())
        .args(["references", "--score", "11"])
        .assert()
        .failure();
}

#[test]
fn domains_lists_specializations() {
    let dir = TempDir::new().unwrap();
    mockview(dir.path())
        .arg("domains")
        .assert()
        .success()
        .stdout(predicate::str::contains("data-science"))
        .stdout(predicate::str::contains("Machine Learning"))
        .stdout(predicate::str::contains("Brand Management"));
}

#[test]
fn list_models_includes_lexical() {
    let dir = TempDir::new().unwrap();
    mockview(dir.path())
        .arg("list-models")
        .assert()
        .success()
        .stdout(predicate::str::contains("lexical (default)"))
        .stdout(predicate::str::contains("lexical-hash-384"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    mockview(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created mockview.toml"))
        .stdout(predicate::str::contains("Created answer-sheets/example.toml"));

    assert!(dir.path().join("mockview.toml").exists());
    assert!(dir.path().join("answer-sheets/example.toml").exists());

    mockview(dir.path())
        .args(["validate", "--sheet", "answer-sheets/example.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 answers"))
        .stdout(predicate::str::contains("All answer sheets valid"));

    // The generated config must load.
    mockview(dir.path())
        .arg("list-models")
        .assert()
        .success();
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    mockview(dir.path()).arg("init").assert().success();

    mockview(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_directory() {
    let dir = TempDir::new().unwrap();
    mockview(dir.path())
        .arg("validate")
        .arg("--sheet")
        .arg(sheets_dir())
        .assert()
        .success()
        .stdout(predicate::str::contains("Software Fundamentals"))
        .stdout(predicate::str::contains("Data Science Basics"))
        .stdout(predicate::str::contains("Marketing Strategy"))
        .stdout(predicate::str::contains("[p-value] WARNING"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    mockview(dir.path())
        .args(["validate", "--sheet", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn bad_config_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("mockview.toml"),
        "[scoring.thresholds]\nhigh = 3.0\nmedium = 6.0\n",
    )
    .unwrap();

    mockview(dir.path())
        .arg("list-models")
        .assert()
        .failure()
        .stderr(predicate::str::contains("medium threshold"));
}

#[test]
fn interview_writes_transcript() {
    let dir = TempDir::new().unwrap();
    let transcript = dir.path().join("transcript.md");

    mockview(dir.path())
        .args(["interview", "--domain", "software-development", "--seed", "5"])
        .arg("--transcript")
        .arg(&transcript)
        .write_stdin(
            "I write unit tests and integration tests, and run them in continuous integration.\n\
             /chat any tips?\n/skip\n/progress\n/quit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Question: "))
        .stdout(predicate::str::contains("Score: "))
        .stdout(predicate::str::contains("Answered 1 question(s), skipped 1."));

    let content = std::fs::read_to_string(&transcript).unwrap();
    assert!(content.contains("## Question 1"));
}

#[test]
fn interview_ends_on_eof() {
    let dir = TempDir::new().unwrap();
    mockview(dir.path())
        .args(["interview", "--domain", "marketing"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Answered 0 question(s)"));
}
