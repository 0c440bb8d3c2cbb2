//! Template-based question generation.
//!
//! A question is produced by picking a template for the requested domain and
//! difficulty and substituting one concept (or a related pair) into it.
//! Questions already asked in the session are avoided when possible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::{self, CONCEPT_PLACEHOLDER, RELATED_PLACEHOLDER};
use crate::model::{Difficulty, Domain, Question};

/// Substitution attempts before giving up on finding an unseen question.
pub const MAX_ATTEMPTS: usize = 10;

const PAIR_SUFFIX: &str = " (Please provide more specific details in your answer.)";
const SINGLE_SUFFIX: &str = " (Include specific examples in your answer.)";

/// Pick a random element of a non-empty slice.
pub(crate) fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Generates interview questions from the static question bank.
pub struct QuestionGenerator {
    rng: StdRng,
}

impl Default for QuestionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator, for reproducible runs and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a question that is not in `previous` if one can be found
    /// within [`MAX_ATTEMPTS`] draws.
    ///
    /// When every draw collides, a final draw is returned with a suffix asking
    /// for more detail, which keeps it distinct from the earlier question.
    pub fn generate(
        &mut self,
        domain: Domain,
        difficulty: Difficulty,
        previous: &[String],
    ) -> Question {
        let template = *pick(&mut self.rng, catalog::templates(domain, difficulty));

        for attempt in 0..MAX_ATTEMPTS {
            let question = self.fill(template, domain, difficulty);
            if !previous.iter().any(|p| p == &question.text) {
                return question;
            }
            tracing::debug!(attempt, "question already asked, drawing again");
        }

        let mut question = self.fill(template, domain, difficulty);
        if question.related_concept.is_some() {
            question.text.push_str(PAIR_SUFFIX);
        } else {
            question.text.push_str(SINGLE_SUFFIX);
        }
        question
    }

    fn fill(&mut self, template: &str, domain: Domain, difficulty: Difficulty) -> Question {
        if template.contains(RELATED_PLACEHOLDER) {
            let (concept, related) = *pick(&mut self.rng, catalog::related_pairs(domain));
            Question {
                text: template
                    .replace(CONCEPT_PLACEHOLDER, concept)
                    .replace(RELATED_PLACEHOLDER, related),
                domain,
                difficulty,
                concept: concept.to_string(),
                related_concept: Some(related.to_string()),
            }
        } else {
            let concept = *pick(&mut self.rng, catalog::concepts(domain));
            Question {
                text: template.replace(CONCEPT_PLACEHOLDER, concept),
                domain,
                difficulty,
                concept: concept.to_string(),
                related_concept: None,
            }
        }
    }
}

/// Generate a single question with a fresh generator.
pub fn generate_question(domain: Domain, difficulty: Difficulty, previous: &[String]) -> Question {
    QuestionGenerator::new().generate(domain, difficulty, previous)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_contains_its_concept() {
        let mut generator = QuestionGenerator::with_seed(7);
        for domain in Domain::ALL {
            for difficulty in Difficulty::ALL {
                for _ in 0..20 {
                    let q = generator.generate(domain, difficulty, &[]);
                    assert!(!q.text.is_empty());
                    assert!(q.text.contains(&q.concept), "{}", q.text);
                    if let Some(related) = &q.related_concept {
                        assert!(q.text.contains(related.as_str()));
                    }
                    assert!(!q.text.contains('{'), "unfilled placeholder: {}", q.text);
                }
            }
        }
    }

    #[test]
    fn seeded_generators_agree() {
        let a = QuestionGenerator::with_seed(42).generate(Domain::Marketing, Difficulty::Advanced, &[]);
        let b = QuestionGenerator::with_seed(42).generate(Domain::Marketing, Difficulty::Advanced, &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn avoids_previous_questions() {
        let mut generator = QuestionGenerator::with_seed(3);
        let mut asked: Vec<String> = Vec::new();
        for _ in 0..15 {
            let q = generator.generate(Domain::DataScience, Difficulty::Intermediate, &asked);
            assert!(!asked.contains(&q.text), "repeated: {}", q.text);
            asked.push(q.text);
        }
    }

    #[test]
    fn exhausted_bank_gets_suffix() {
        // Every possible question for this domain/difficulty is already asked.
        let domain = Domain::SoftwareDevelopment;
        let difficulty = Difficulty::Beginner;
        let mut previous = Vec::new();
        for template in catalog::templates(domain, difficulty) {
            if template.contains(RELATED_PLACEHOLDER) {
                for (c, r) in catalog::related_pairs(domain) {
                    previous.push(
                        template
                            .replace(CONCEPT_PLACEHOLDER, c)
                            .replace(RELATED_PLACEHOLDER, r),
                    );
                }
            } else {
                for c in catalog::concepts(domain) {
                    previous.push(template.replace(CONCEPT_PLACEHOLDER, c));
                }
            }
        }

        let q = QuestionGenerator::with_seed(1).generate(domain, difficulty, &previous);
        assert!(
            q.text.ends_with(PAIR_SUFFIX) || q.text.ends_with(SINGLE_SUFFIX),
            "{}",
            q.text
        );
        assert!(!previous.contains(&q.text));
        assert!(q.text.contains(&q.concept));
    }
}
