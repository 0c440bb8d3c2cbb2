//! Interview sessions.
//!
//! A session asks one question at a time, scores each answer, and never
//! repeats a question it has already asked. Everything is discarded on reset.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::evaluator::{Evaluation, ResponseEvaluator};
use crate::generator::QuestionGenerator;
use crate::model::{Difficulty, Domain, Question};

/// One answered question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub question: Question,
    pub response: String,
    pub evaluation: Evaluation,
    pub answered_at: DateTime<Utc>,
}

/// Running totals for a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub answered: usize,
    pub skipped: usize,
    /// `None` until the first answer.
    pub average_score: Option<f64>,
    pub best_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSession {
    pub id: Uuid,
    pub domain: Domain,
    /// Display label, such as "Machine Learning".
    #[serde(default)]
    pub specialization: Option<String>,
    pub difficulty: Difficulty,
    pub started_at: DateTime<Utc>,
    pub current_question: Option<Question>,
    pub turns: Vec<Turn>,
    #[serde(default)]
    pub skipped: Vec<Question>,
}

impl InterviewSession {
    pub fn new(domain: Domain, difficulty: Difficulty) -> Self {
        Self {
            id: Uuid::new_v4(),
            domain,
            specialization: None,
            difficulty,
            started_at: Utc::now(),
            current_question: None,
            turns: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        let specialization = specialization.into();
        if !self.domain.specializations().contains(&specialization.as_str()) {
            tracing::warn!(
                domain = %self.domain,
                "'{specialization}' is not a known specialization"
            );
        }
        self.specialization = Some(specialization);
        self
    }

    /// Discard history and ask the first question.
    pub fn start(&mut self, generator: &mut QuestionGenerator) -> &Question {
        self.reset();
        tracing::info!(session = %self.id, domain = %self.domain, difficulty = %self.difficulty, "interview started");
        self.ask_next(generator)
    }

    /// Discard every question and answer.
    pub fn reset(&mut self) {
        self.id = Uuid::new_v4();
        self.started_at = Utc::now();
        self.current_question = None;
        self.turns.clear();
        self.skipped.clear();
    }

    /// Every question asked so far, including the current one.
    pub fn asked_questions(&self) -> Vec<String> {
        self.turns
            .iter()
            .map(|t| &t.question)
            .chain(&self.skipped)
            .chain(&self.current_question)
            .map(|q| q.text.clone())
            .collect()
    }

    fn ask_next(&mut self, generator: &mut QuestionGenerator) -> &Question {
        let asked = self.asked_questions();
        self.current_question
            .insert(generator.generate(self.domain, self.difficulty, &asked))
    }

    /// Score an answer to the current question, then move to the next one.
    pub async fn submit(
        &mut self,
        answer: &str,
        evaluator: &ResponseEvaluator,
        generator: &mut QuestionGenerator,
    ) -> Result<Turn, SessionError> {
        if answer.trim().is_empty() {
            return Err(SessionError::EmptyAnswer);
        }
        let question = self
            .current_question
            .clone()
            .ok_or(SessionError::NoActiveQuestion)?;

        let evaluation = evaluator
            .evaluate(&question.text, answer, self.domain)
            .await;
        let turn = Turn {
            question,
            response: answer.to_string(),
            evaluation,
            answered_at: Utc::now(),
        };
        self.turns.push(turn.clone());
        self.current_question = None;
        self.ask_next(generator);

        Ok(turn)
    }

    /// Drop the current question without answering it.
    pub fn skip(&mut self, generator: &mut QuestionGenerator) -> Result<&Question, SessionError> {
        let question = self
            .current_question
            .take()
            .ok_or(SessionError::NoActiveQuestion)?;
        tracing::debug!(question = %question.text, "skipped");
        self.skipped.push(question);
        Ok(self.ask_next(generator))
    }

    pub fn progress(&self) -> Progress {
        let scores: Vec<f64> = self.turns.iter().map(|t| t.evaluation.score).collect();
        let average_score =
            (!scores.is_empty()).then(|| scores.iter().sum::<f64>() / scores.len() as f64);
        let best_score = scores.iter().copied().reduce(f64::max);

        Progress {
            answered: self.turns.len(),
            skipped: self.skipped.len(),
            average_score,
            best_score,
        }
    }

    /// The most recent answered turn.
    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize session")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write session to {}", path.display()))?;
        Ok(())
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse session JSON")
    }
}
