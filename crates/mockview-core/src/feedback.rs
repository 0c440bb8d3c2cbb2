//! Canned feedback selection.
//!
//! Feedback is chosen from a band of templates by score and always names at
//! least one concept: the ones the answer mentioned, or a sample of the
//! domain's keywords when it mentioned none.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::generator::pick;
use crate::model::Domain;

/// Most concepts named in a single piece of feedback.
pub const MAX_FEEDBACK_CONCEPTS: usize = 3;

const CONCEPTS_PLACEHOLDER: &str = "{concepts}";

/// Score band used to pick feedback tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreBand::High => write!(f, "high"),
            ScoreBand::Medium => write!(f, "medium"),
            ScoreBand::Low => write!(f, "low"),
        }
    }
}

/// Score cut-offs (out of 10) between bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackThresholds {
    #[serde(default = "default_high")]
    pub high: f64,
    #[serde(default = "default_medium")]
    pub medium: f64,
}

fn default_high() -> f64 {
    7.5
}

fn default_medium() -> f64 {
    5.0
}

impl Default for FeedbackThresholds {
    fn default() -> Self {
        Self {
            high: default_high(),
            medium: default_medium(),
        }
    }
}

impl FeedbackThresholds {
    /// Both cut-offs must lie in [0, 10] with `medium <= high`.
    pub fn validate(&self) -> anyhow::Result<()> {
        let in_range = |t: f64| (0.0..=10.0).contains(&t);
        anyhow::ensure!(
            in_range(self.high) && in_range(self.medium),
            "feedback thresholds must be between 0 and 10"
        );
        anyhow::ensure!(
            self.medium <= self.high,
            "medium threshold ({}) is above high threshold ({})",
            self.medium,
            self.high
        );
        Ok(())
    }

    pub fn band(&self, score: f64) -> ScoreBand {
        if score >= self.high {
            ScoreBand::High
        } else if score >= self.medium {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}

fn templates(band: ScoreBand) -> &'static [&'static str] {
    match band {
        ScoreBand::High => &[
            "Excellent answer that covers the key aspects of the topic. You demonstrated good understanding of {concepts}.",
            "Strong response that effectively addresses the question. Your explanation of {concepts} was particularly good.",
            "Comprehensive answer that shows in-depth knowledge. The way you connected {concepts} was impressive.",
            "Very good response with clear explanations. Your understanding of {concepts} is evident.",
        ],
        ScoreBand::Medium => &[
            "Good answer that covers some important aspects. Consider exploring {concepts} in more depth.",
            "Solid response with some good points. To improve, you could elaborate more on {concepts}.",
            "Decent answer that shows understanding. Adding more specifics about {concepts} would strengthen it.",
            "Your answer demonstrates basic knowledge. Try to provide more concrete examples of {concepts} in practice.",
        ],
        ScoreBand::Low => &[
            "Your answer touches on the topic but lacks depth. Focus on strengthening your understanding of {concepts}.",
            "There are some gaps in your explanation. Study more about {concepts} to improve your knowledge.",
            "Your response is too general. Work on developing specific knowledge about {concepts}.",
            "The answer needs more specific details and technical accuracy. Review the fundamentals of {concepts}.",
        ],
    }
}

/// Pick at most [`MAX_FEEDBACK_CONCEPTS`] concepts to mention.
pub fn feedback_concepts<R: Rng + ?Sized>(
    rng: &mut R,
    found: &[String],
    domain: Domain,
) -> Vec<String> {
    if found.is_empty() {
        return catalog::evaluation_keywords(domain)
            .choose_multiple(rng, MAX_FEEDBACK_CONCEPTS)
            .map(|s| s.to_string())
            .collect();
    }
    if found.len() > MAX_FEEDBACK_CONCEPTS {
        return found
            .choose_multiple(rng, MAX_FEEDBACK_CONCEPTS)
            .cloned()
            .collect();
    }
    found.to_vec()
}

/// Build feedback text for a score.
///
/// Answers below the high band get one improvement suggestion appended after
/// a blank line.
pub fn format_feedback<R: Rng + ?Sized>(
    rng: &mut R,
    band: ScoreBand,
    found: &[String],
    domain: Domain,
) -> String {
    let concepts = feedback_concepts(rng, found, domain);
    let template = *pick(rng, templates(band));
    let mut feedback = template.replace(CONCEPTS_PLACEHOLDER, &concepts.join(", "));

    if band != ScoreBand::High {
        let focus = pick(rng, &concepts).clone();
        let suggestions = [
            format!("Try to provide more specific examples related to {focus}."),
            "Consider discussing practical applications of the concepts you mentioned.".to_string(),
            "Structure your answer with clear sections covering different aspects of the topic."
                .to_string(),
            "Include relevant industry best practices in your response.".to_string(),
            "Compare and contrast different approaches to demonstrate deeper understanding."
                .to_string(),
        ];
        let suggestion = pick(rng, &suggestions);
        feedback.push_str("\n\n");
        feedback.push_str(suggestion);
    }

    feedback
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn bands_follow_thresholds() {
        let t = FeedbackThresholds::default();
        assert_eq!(t.band(10.0), ScoreBand::High);
        assert_eq!(t.band(7.5), ScoreBand::High);
        assert_eq!(t.band(7.49), ScoreBand::Medium);
        assert_eq!(t.band(5.0), ScoreBand::Medium);
        assert_eq!(t.band(4.99), ScoreBand::Low);
        assert_eq!(t.band(0.0), ScoreBand::Low);
    }

    #[test]
    fn threshold_validation() {
        assert!(FeedbackThresholds::default().validate().is_ok());
        let inverted = FeedbackThresholds {
            high: 4.0,
            medium: 6.0,
        };
        assert!(inverted.validate().is_err());
        let out_of_range = FeedbackThresholds {
            high: 12.0,
            medium: 5.0,
        };
        assert!(out_of_range.validate().is_err());
    }

    #[test]
    fn feedback_names_found_concepts() {
        let mut rng = StdRng::seed_from_u64(9);
        let found = vec!["testing".to_string(), "security".to_string()];
        let text = format_feedback(&mut rng, ScoreBand::High, &found, Domain::SoftwareDevelopment);
        assert!(text.contains("testing, security"));
        assert!(!text.contains("\n\n"), "high band gets no suggestion");
    }

    #[test]
    fn feedback_falls_back_to_domain_keywords() {
        let mut rng = StdRng::seed_from_u64(11);
        for band in [ScoreBand::High, ScoreBand::Medium, ScoreBand::Low] {
            let text = format_feedback(&mut rng, band, &[], Domain::Marketing);
            let keywords = catalog::evaluation_keywords(Domain::Marketing);
            assert!(keywords.iter().any(|k| text.contains(k)), "{text}");
        }
    }

    #[test]
    fn lower_bands_get_a_suggestion() {
        let mut rng = StdRng::seed_from_u64(5);
        let found = vec!["regression".to_string()];
        let text = format_feedback(&mut rng, ScoreBand::Low, &found, Domain::DataScience);
        assert!(text.contains("\n\n"));
        assert!(text.contains("regression"));

        let (_, suggestion) = text.rsplit_once("\n\n").unwrap();
        assert!(
            suggestion.starts_with("Try to provide")
                || suggestion.starts_with("Consider discussing")
                || suggestion.starts_with("Structure your answer")
                || suggestion.starts_with("Include relevant")
                || suggestion.starts_with("Compare and contrast"),
            "unexpected suggestion: {suggestion}"
        );
    }

    #[test]
    fn at_most_three_concepts() {
        let mut rng = StdRng::seed_from_u64(1);
        let found: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
        let picked = feedback_concepts(&mut rng, &found, Domain::DataScience);
        assert_eq!(picked.len(), MAX_FEEDBACK_CONCEPTS);
        assert!(picked.iter().all(|p| found.contains(p)));
    }
}
