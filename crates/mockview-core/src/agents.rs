//! Follow-up interviewer agents.
//!
//! After an answer is scored, an agent asks a follow-up question whose tone
//! depends on the score: clarification for weak answers, coaching for middling
//! ones, and technical depth for strong ones.

use std::collections::HashMap;
use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, CONCEPT_PLACEHOLDER};
use crate::generator::pick;
use crate::model::Domain;
use crate::text;

/// Follow-ups an agent will ask before going quiet.
pub const MAX_CHATS: u32 = 5;

const FALLBACK_CONCEPT: &str = "this topic";

/// Interviewer persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    TechnicalExpert,
    ImprovementCoach,
    ClarificationSeeker,
}

impl AgentRole {
    pub const ALL: [AgentRole; 3] = [
        AgentRole::TechnicalExpert,
        AgentRole::ImprovementCoach,
        AgentRole::ClarificationSeeker,
    ];

    /// What this persona probes for.
    pub fn focus(self) -> &'static str {
        match self {
            AgentRole::TechnicalExpert => "technical depth",
            AgentRole::ImprovementCoach => "improvement suggestions",
            AgentRole::ClarificationSeeker => "clarity and understanding",
        }
    }

    /// Persona best suited to an answer with this score.
    pub fn for_score(score: f64) -> AgentRole {
        if score < 5.0 {
            AgentRole::ClarificationSeeker
        } else if score < 7.0 {
            AgentRole::ImprovementCoach
        } else {
            AgentRole::TechnicalExpert
        }
    }

    fn templates(self) -> &'static [&'static str] {
        match self {
            AgentRole::TechnicalExpert => &[
                "Could you elaborate more on {concept}?",
                "How would you implement {concept} in practice?",
                "What are the potential challenges in implementing {concept}?",
                "Can you explain the technical details of {concept}?",
                "What are the best practices when working with {concept}?",
            ],
            AgentRole::ImprovementCoach => &[
                "Have you considered learning more about {concept}?",
                "What resources would you use to improve your knowledge of {concept}?",
                "How would you approach learning {concept} in more depth?",
                "What practical projects could help you better understand {concept}?",
                "How do you plan to stay updated with {concept}?",
            ],
            AgentRole::ClarificationSeeker => &[
                "Could you clarify your approach to {concept}?",
                "What do you mean specifically when you mention {concept}?",
                "Can you provide an example of {concept} in action?",
                "How would you explain {concept} to a beginner?",
                "What are the key components of {concept}?",
            ],
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentRole::TechnicalExpert => write!(f, "technical expert"),
            AgentRole::ImprovementCoach => write!(f, "improvement coach"),
            AgentRole::ClarificationSeeker => write!(f, "clarification seeker"),
        }
    }
}

/// An interviewer that asks follow-up questions about a domain.
pub struct InterviewAgent {
    role: AgentRole,
    domain: Domain,
    chat_count: u32,
    rng: StdRng,
}

impl InterviewAgent {
    pub fn new(role: AgentRole, domain: Domain) -> Self {
        Self {
            role,
            domain,
            chat_count: 0,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn role(&self) -> AgentRole {
        self.role
    }

    pub fn chat_count(&self) -> u32 {
        self.chat_count
    }

    /// Ask a follow-up about the response, or `None` once the agent has
    /// reached [`MAX_CHATS`].
    ///
    /// The persona that phrases the question is picked by score, not by this
    /// agent's own role.
    pub fn generate_follow_up(&mut self, response: &str, score: f64) -> Option<String> {
        self.chat_count += 1;
        if self.chat_count >= MAX_CHATS {
            return None;
        }

        let concepts = self.extract_key_concepts(response);
        let template = *pick(&mut self.rng, AgentRole::for_score(score).templates());
        let concept = pick(&mut self.rng, &concepts);
        Some(template.replace(CONCEPT_PLACEHOLDER, concept))
    }

    /// Domain vocabulary terms that appear in the response, or
    /// `["this topic"]` when none do.
    pub fn extract_key_concepts(&self, response: &str) -> Vec<String> {
        let tokens = text::preprocess_tokens(response);
        let found: Vec<String> = catalog::follow_up_vocabulary(self.domain)
            .iter()
            .filter(|c| text::contains_phrase(&tokens, c))
            .map(|c| c.to_string())
            .collect();
        if found.is_empty() {
            vec![FALLBACK_CONCEPT.to_string()]
        } else {
            found
        }
    }

    /// A scenario phrase to frame discussion around.
    pub fn scenario(&mut self) -> &'static str {
        *pick(&mut self.rng, catalog::scenarios(self.domain))
    }

    /// At most three study suggestions for a score.
    pub fn improvement_suggestions(&self, score: f64) -> Vec<String> {
        let domain = self.domain;
        let mut suggestions = Vec::new();

        if score < 7.0 {
            suggestions.extend([
                format!("Consider studying more about core {domain} concepts"),
                "Try to provide more specific examples in your answers".to_string(),
                "Focus on practical applications of theoretical concepts".to_string(),
                format!("Look into real-world applications of {domain}"),
                "Practice explaining complex concepts clearly".to_string(),
            ]);
        }

        if score < 5.0 {
            suggestions.extend([
                "Review fundamental concepts in this area".to_string(),
                "Practice explaining technical concepts more clearly".to_string(),
                "Work on structured response formats".to_string(),
                "Consider taking some online courses in this domain".to_string(),
                "Try to build practical projects to reinforce your knowledge".to_string(),
            ]);
        }

        suggestions.truncate(3);
        suggestions
    }
}

/// One agent per persona for a domain.
pub fn create_interview_agents(domain: Domain) -> HashMap<AgentRole, InterviewAgent> {
    AgentRole::ALL
        .into_iter()
        .map(|role| (role, InterviewAgent::new(role, domain)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_by_score() {
        assert_eq!(AgentRole::for_score(2.0), AgentRole::ClarificationSeeker);
        assert_eq!(AgentRole::for_score(5.0), AgentRole::ImprovementCoach);
        assert_eq!(AgentRole::for_score(6.9), AgentRole::ImprovementCoach);
        assert_eq!(AgentRole::for_score(7.0), AgentRole::TechnicalExpert);
    }

    #[test]
    fn follow_up_mentions_a_found_concept() {
        let mut agent =
            InterviewAgent::new(AgentRole::TechnicalExpert, Domain::DataScience).with_seed(4);
        let question = agent
            .generate_follow_up("I tuned the model on a validation dataset.", 8.0)
            .unwrap();
        let concepts = agent.extract_key_concepts("I tuned the model on a validation dataset.");
        assert!(concepts.iter().any(|c| question.contains(c.as_str())), "{question}");
    }

    #[test]
    fn concepts_match_whole_words() {
        let agent = InterviewAgent::new(AgentRole::TechnicalExpert, Domain::SoftwareDevelopment);
        assert_eq!(
            agent.extract_key_concepts("Raising capital is hard."),
            vec!["this topic".to_string()]
        );
        let concepts = agent.extract_key_concepts("We built REST APIs.");
        assert!(concepts.contains(&"api".to_string()), "{concepts:?}");
    }

    #[test]
    fn follow_up_falls_back_to_this_topic() {
        let mut agent = InterviewAgent::new(AgentRole::ClarificationSeeker, Domain::Marketing);
        let question = agent.generate_follow_up("no idea", 1.0).unwrap();
        assert!(question.contains("this topic"), "{question}");
    }

    #[test]
    fn agent_goes_quiet_after_max_chats() {
        let mut agent = InterviewAgent::new(AgentRole::ImprovementCoach, Domain::SoftwareDevelopment);
        let asked = (0..10)
            .filter_map(|_| agent.generate_follow_up("some code", 6.0))
            .count();
        assert_eq!(asked as u32, MAX_CHATS - 1);
        assert_eq!(agent.chat_count(), 10);
    }

    #[test]
    fn suggestions_depend_on_score() {
        let agent = InterviewAgent::new(AgentRole::ImprovementCoach, Domain::DataScience);
        assert!(agent.improvement_suggestions(8.0).is_empty());
        let mid = agent.improvement_suggestions(6.0);
        assert_eq!(mid.len(), 3);
        assert!(mid[0].contains("Data Science"));
        assert_eq!(agent.improvement_suggestions(2.0).len(), 3);
    }

    #[test]
    fn one_agent_per_role() {
        let agents = create_interview_agents(Domain::Marketing);
        assert_eq!(agents.len(), 3);
        for (role, agent) in &agents {
            assert_eq!(agent.role(), *role);
        }
    }

    #[test]
    fn scenario_is_domain_specific() {
        let mut agent = InterviewAgent::new(AgentRole::TechnicalExpert, Domain::Marketing);
        let scenario = agent.scenario();
        assert!(catalog::scenarios(Domain::Marketing).contains(&scenario));
    }
}
