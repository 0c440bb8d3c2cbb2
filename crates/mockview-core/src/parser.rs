//! TOML answer sheet parser.
//!
//! Loads answer sheets from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Answer, AnswerSheet, Difficulty, Domain};

#[derive(Debug, Deserialize)]
struct TomlSheetFile {
    sheet: TomlSheetHeader,
    #[serde(default)]
    answers: Vec<TomlAnswer>,
}

#[derive(Debug, Deserialize)]
struct TomlSheetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    domain: String,
    #[serde(default)]
    difficulty: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlAnswer {
    id: String,
    question: String,
    #[serde(default)]
    response: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// Parse a single TOML file into an `AnswerSheet`.
pub fn parse_answer_sheet(path: &Path) -> Result<AnswerSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer sheet: {}", path.display()))?;

    parse_answer_sheet_str(&content, path)
}

/// Parse a TOML string into an `AnswerSheet`.
pub fn parse_answer_sheet_str(content: &str, source_path: &Path) -> Result<AnswerSheet> {
    let parsed: TomlSheetFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let domain: Domain = parsed
        .sheet
        .domain
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{e}"))?;
    let difficulty: Difficulty = parsed
        .sheet
        .difficulty
        .as_deref()
        .map(str::parse::<Difficulty>)
        .transpose()
        .map_err(|e: String| anyhow::anyhow!("{e}"))?
        .unwrap_or_default();

    let answers = parsed
        .answers
        .into_iter()
        .map(|a| Answer {
            id: a.id,
            question: a.question,
            response: a.response,
            tags: a.tags,
        })
        .collect();

    Ok(AnswerSheet {
        id: parsed.sheet.id,
        name: parsed.sheet.name,
        description: parsed.sheet.description,
        domain,
        difficulty,
        answers,
    })
}

/// Recursively load all `.toml` answer sheets from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_sheet_directory(dir: &Path) -> Result<Vec<AnswerSheet>> {
    let mut sheets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();

        if path.is_dir() {
            sheets.extend(load_sheet_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_answer_sheet(&path) {
                Ok(sheet) => sheets.push(sheet),
                Err(e) => tracing::warn!("skipping {}: {e:#}", path.display()),
            }
        }
    }

    sheets.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(sheets)
}

/// Load one file, or every sheet under a directory.
pub fn load_sheets(path: &Path) -> Result<Vec<AnswerSheet>> {
    if path.is_dir() {
        load_sheet_directory(path)
    } else {
        Ok(vec![parse_answer_sheet(path)?])
    }
}

/// A warning from answer sheet validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The answer ID, when the warning is about one answer.
    pub answer_id: Option<String>,
    pub message: String,
}

/// Check an answer sheet for common mistakes.
pub fn validate_sheet(sheet: &AnswerSheet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if sheet.answers.is_empty() {
        warnings.push(ValidationWarning {
            answer_id: None,
            message: "sheet has no answers".into(),
        });
    }

    let mut seen_ids = HashSet::new();
    for answer in &sheet.answers {
        if !seen_ids.insert(&answer.id) {
            warnings.push(ValidationWarning {
                answer_id: Some(answer.id.clone()),
                message: format!("duplicate answer ID: {}", answer.id),
            });
        }
    }

    for answer in &sheet.answers {
        if answer.question.trim().is_empty() {
            warnings.push(ValidationWarning {
                answer_id: Some(answer.id.clone()),
                message: "question is empty".into(),
            });
        }
        if answer.response.trim().is_empty() {
            warnings.push(ValidationWarning {
                answer_id: Some(answer.id.clone()),
                message: "response is empty and will score 0".into(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[sheet]
id = "ds-practice"
name = "Data science practice"
domain = "data-science"
difficulty = "advanced"

[[answers]]
id = "overfitting"
question = "How would you detect overfitting in a regression model?"
response = """
I compare training and validation error. If the model does much better on the
training dataset, it is overfitting, so I add regularization or more data.
"""
tags = ["modeling"]

[[answers]]
id = "pipelines"
question = "Describe a feature engineering pipeline."
response = "Clean the data, encode categories, scale numeric features."
"#;

    #[test]
    fn parse_valid_toml() {
        let sheet = parse_answer_sheet_str(VALID_TOML, &PathBuf::from("s.toml")).unwrap();
        assert_eq!(sheet.id, "ds-practice");
        assert_eq!(sheet.domain, Domain::DataScience);
        assert_eq!(sheet.difficulty, Difficulty::Advanced);
        assert_eq!(sheet.answers.len(), 2);
        assert_eq!(sheet.answers[0].tags, vec!["modeling"]);
        assert!(sheet.answers[1].tags.is_empty());
    }

    #[test]
    fn difficulty_defaults_to_intermediate() {
        let toml = r#"
[sheet]
id = "m"
name = "Minimal"
domain = "marketing"
"#;
        let sheet = parse_answer_sheet_str(toml, &PathBuf::from("m.toml")).unwrap();
        assert_eq!(sheet.difficulty, Difficulty::Intermediate);
        assert!(sheet.answers.is_empty());
    }

    #[test]
    fn unknown_domain_is_an_error() {
        let toml = r#"
[sheet]
id = "x"
name = "X"
domain = "astrology"
"#;
        let err = parse_answer_sheet_str(toml, &PathBuf::from("x.toml")).unwrap_err();
        assert!(err.to_string().contains("unknown domain"));
    }

    #[test]
    fn parse_malformed_toml() {
        let result = parse_answer_sheet_str("not [valid toml }{", &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn validate_flags_problems() {
        let toml = r#"
[sheet]
id = "dupes"
name = "Dupes"
domain = "dev"

[[answers]]
id = "same"
question = "What is testing?"
response = "Checking behavior."

[[answers]]
id = "same"
question = "  "
response = ""
"#;
        let sheet = parse_answer_sheet_str(toml, &PathBuf::from("d.toml")).unwrap();
        let warnings = validate_sheet(&sheet);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
        assert!(warnings.iter().any(|w| w.message == "question is empty"));
        assert!(warnings.iter().any(|w| w.message.contains("will score 0")));
    }

    #[test]
    fn valid_sheet_has_no_warnings() {
        let sheet = parse_answer_sheet_str(VALID_TOML, &PathBuf::from("s.toml")).unwrap();
        assert!(validate_sheet(&sheet).is_empty());
    }

    #[test]
    fn load_directory_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("bad.toml"), "}{").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let sheets = load_sheet_directory(dir.path()).unwrap();
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].id, "ds-practice");

        let single = load_sheets(&dir.path().join("good.toml")).unwrap();
        assert_eq!(single.len(), 1);
    }
}
