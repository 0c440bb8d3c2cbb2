//! Core data model types for mockview.
//!
//! Domains, difficulty levels, and the questions generated for them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A subject area with its own concept vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    SoftwareDevelopment,
    DataScience,
    Marketing,
}

impl Domain {
    /// Every domain, in catalog order. The first entry is the fallback domain.
    pub const ALL: [Domain; 3] = [
        Domain::SoftwareDevelopment,
        Domain::DataScience,
        Domain::Marketing,
    ];

    /// Human-readable name (e.g. "Data Science").
    pub fn display_name(self) -> &'static str {
        match self {
            Domain::SoftwareDevelopment => "Software Development",
            Domain::DataScience => "Data Science",
            Domain::Marketing => "Marketing",
        }
    }

    /// Short slug used on the command line and in file names.
    pub fn slug(self) -> &'static str {
        match self {
            Domain::SoftwareDevelopment => "software-development",
            Domain::DataScience => "data-science",
            Domain::Marketing => "marketing",
        }
    }

    /// Specializations offered for this domain.
    pub fn specializations(self) -> &'static [&'static str] {
        match self {
            Domain::SoftwareDevelopment => {
                &["Programming", "System Design", "Software Architecture"]
            }
            Domain::DataScience => &["Machine Learning", "Statistics", "Data Analysis"],
            Domain::Marketing => &["Digital Marketing", "Brand Management", "Market Research"],
        }
    }

    /// Parse a domain name, falling back to the first domain when unknown.
    pub fn resolve(name: &str) -> Domain {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(
                "unknown domain '{name}', falling back to {}",
                Domain::ALL[0]
            );
            Domain::ALL[0]
        })
    }
}

impl Default for Domain {
    fn default() -> Self {
        Domain::ALL[0]
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c == ' ' { '-' } else { c })
            .collect();
        match key.as_str() {
            "software-development" | "software" | "swe" | "dev" => {
                Ok(Domain::SoftwareDevelopment)
            }
            "data-science" | "data" | "ds" => Ok(Domain::DataScience),
            "marketing" | "mkt" => Ok(Domain::Marketing),
            _ => Err(format!("unknown domain: {s}")),
        }
    }
}

/// Question difficulty level.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    /// Parse a difficulty, falling back to `Intermediate` when unknown.
    pub fn resolve(name: &str) -> Difficulty {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!("unknown difficulty '{name}', using intermediate");
            Difficulty::Intermediate
        })
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "Beginner"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Advanced => write!(f, "Advanced"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "easy" | "junior" => Ok(Difficulty::Beginner),
            "intermediate" | "medium" | "mid" => Ok(Difficulty::Intermediate),
            "advanced" | "hard" | "senior" => Ok(Difficulty::Advanced),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A generated interview question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// The full question text shown to the candidate.
    pub text: String,
    /// Domain the question was drawn from.
    pub domain: Domain,
    /// Difficulty tier of the template.
    pub difficulty: Difficulty,
    /// Concept substituted into the template.
    pub concept: String,
    /// Second concept for comparison templates.
    #[serde(default)]
    pub related_concept: Option<String>,
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A batch of recorded answers to grade together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSheet {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Domain used for keyword relevance and feedback.
    pub domain: Domain,
    pub difficulty: Difficulty,
    pub answers: Vec<Answer>,
}

/// One question and the candidate's response to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: String,
    pub question: String,
    pub response: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_display_and_parse() {
        assert_eq!(Domain::DataScience.to_string(), "Data Science");
        assert_eq!(
            "Software Development".parse::<Domain>().unwrap(),
            Domain::SoftwareDevelopment
        );
        assert_eq!("data_science".parse::<Domain>().unwrap(), Domain::DataScience);
        assert_eq!("DS".parse::<Domain>().unwrap(), Domain::DataScience);
        assert_eq!("marketing".parse::<Domain>().unwrap(), Domain::Marketing);
        assert!("astrology".parse::<Domain>().is_err());
    }

    #[test]
    fn domain_resolve_falls_back_to_first() {
        assert_eq!(Domain::resolve("astrology"), Domain::SoftwareDevelopment);
        assert_eq!(Domain::resolve("marketing"), Domain::Marketing);
    }

    #[test]
    fn difficulty_parse_and_fallback() {
        assert_eq!("Advanced".parse::<Difficulty>().unwrap(), Difficulty::Advanced);
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Beginner);
        assert_eq!(Difficulty::resolve("System Design"), Difficulty::Intermediate);
        assert_eq!(Difficulty::default(), Difficulty::Intermediate);
    }

    #[test]
    fn every_domain_has_three_specializations() {
        for domain in Domain::ALL {
            assert_eq!(domain.specializations().len(), 3, "{domain}");
        }
    }

    #[test]
    fn domain_serde_uses_slug() {
        let json = serde_json::to_string(&Domain::DataScience).unwrap();
        assert_eq!(json, "\"data-science\"");
        let back: Domain = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Domain::DataScience);
    }
}
