//! Study references per domain.

use serde::{Deserialize, Serialize};

use crate::model::Domain;

/// A book, paper, or online resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Reference {
    fn work(title: &str, author: &str, year: u16) -> Self {
        Self {
            title: title.to_string(),
            author: Some(author.to_string()),
            year: Some(year),
            url: None,
        }
    }

    fn link(title: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            author: None,
            year: None,
            url: Some(url.to_string()),
        }
    }

    /// Markdown bullet for this reference.
    pub fn display(&self) -> String {
        match (&self.url, &self.author, self.year) {
            (Some(url), _, _) => format!("- [{}]({url})", self.title),
            (None, Some(author), Some(year)) => format!("- {} by {author} ({year})", self.title),
            _ => format!("- {}", self.title),
        }
    }
}

/// References grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSet {
    pub books: Vec<Reference>,
    pub papers: Vec<Reference>,
    pub online_resources: Vec<Reference>,
}

impl ReferenceSet {
    /// Categories in display order.
    pub fn categories(&self) -> [(&'static str, &[Reference]); 3] {
        [
            ("Books", &self.books),
            ("Papers", &self.papers),
            ("Online resources", &self.online_resources),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.papers.is_empty() && self.online_resources.is_empty()
    }

    fn map_categories(&self, f: impl Fn(&[Reference]) -> Vec<Reference>) -> ReferenceSet {
        ReferenceSet {
            books: f(&self.books),
            papers: f(&self.papers),
            online_resources: f(&self.online_resources),
        }
    }
}

/// Every reference for a domain.
pub fn domain_references(domain: Domain) -> ReferenceSet {
    match domain {
        Domain::SoftwareDevelopment => ReferenceSet {
            books: vec![
                Reference::work("Clean Code", "Robert C. Martin", 2008),
                Reference::work("Design Patterns", "Gang of Four", 1994),
                Reference::work("Refactoring", "Martin Fowler", 2018),
                Reference::work("The Pragmatic Programmer", "Andrew Hunt & David Thomas", 2019),
            ],
            papers: vec![
                Reference::work(
                    "On the Criteria To Be Used in Decomposing Systems into Modules",
                    "D.L. Parnas",
                    1972,
                ),
                Reference::work(
                    "No Silver Bullet: Essence and Accident in Software Engineering",
                    "Frederick P. Brooks",
                    1987,
                ),
            ],
            online_resources: vec![
                Reference::link("Martin Fowler's Blog", "https://martinfowler.com"),
                Reference::link(
                    "Clean Code Handbook",
                    "https://github.com/ryanmcdermott/clean-code-javascript",
                ),
                Reference::link(
                    "SOLID Principles",
                    "https://www.digitalocean.com/community/conceptual-articles/s-o-l-i-d-the-first-five-principles-of-object-oriented-design",
                ),
                Reference::link("Design Patterns", "https://refactoring.guru/design-patterns"),
            ],
        },
        Domain::DataScience => ReferenceSet {
            books: vec![
                Reference::work("Deep Learning", "Ian Goodfellow et al.", 2016),
                Reference::work("The Hundred-Page Machine Learning Book", "Andriy Burkov", 2019),
                Reference::work("Python for Data Analysis", "Wes McKinney", 2022),
                Reference::work(
                    "Introduction to Statistical Learning",
                    "James, Witten, Hastie, Tibshirani",
                    2021,
                ),
            ],
            papers: vec![
                Reference::work("Attention Is All You Need", "Vaswani et al.", 2017),
                Reference::work("Deep Residual Learning for Image Recognition", "He et al.", 2015),
            ],
            online_resources: vec![
                Reference::link("Papers With Code", "https://paperswithcode.com"),
                Reference::link("Distill.pub", "https://distill.pub"),
                Reference::link("Towards Data Science", "https://towardsdatascience.com"),
                Reference::link("Google AI Blog", "https://ai.googleblog.com"),
            ],
        },
        Domain::Marketing => ReferenceSet {
            books: vec![
                Reference::work("Marketing Management", "Philip Kotler", 2011),
                Reference::work("Digital Marketing Strategy", "Simon Kingsnorth", 2019),
                Reference::work(
                    "Contagious: How to Build Word of Mouth in the Digital Age",
                    "Jonah Berger",
                    2013,
                ),
            ],
            papers: vec![
                Reference::work(
                    "Digital Marketing: A Framework, Review and Research Agenda",
                    "P.K. Kannan",
                    2017,
                ),
                Reference::work(
                    "Social Media Marketing: A Literature Review and Future Research Directions",
                    "Tuten & Solomon",
                    2018,
                ),
            ],
            online_resources: vec![
                Reference::link("HubSpot Academy", "https://academy.hubspot.com"),
                Reference::link("Google Digital Garage", "https://learndigital.withgoogle.com"),
                Reference::link("Moz Blog", "https://moz.com/blog"),
                Reference::link(
                    "Content Marketing Institute",
                    "https://contentmarketinginstitute.com",
                ),
            ],
        },
    }
}

/// References whose titles mention the topic.
///
/// A title matches when it contains any topic word longer than three
/// characters. Categories with no match keep their first entry so the result
/// is never empty for a populated domain. A missing or blank topic returns
/// every reference.
pub fn topic_references(domain: Domain, topic: Option<&str>) -> ReferenceSet {
    let all = domain_references(domain);
    let Some(topic) = topic.filter(|t| !t.trim().is_empty()) else {
        return all;
    };

    let lower = topic.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().filter(|w| w.len() > 3).collect();

    all.map_categories(|refs| {
        let matched: Vec<Reference> = refs
            .iter()
            .filter(|r| {
                let title = r.title.to_lowercase();
                words.iter().any(|w| title.contains(w))
            })
            .cloned()
            .collect();
        if matched.is_empty() {
            refs.iter().take(1).cloned().collect()
        } else {
            matched
        }
    })
}

/// Reading suggestions pitched at the score.
pub fn study_suggestions(domain: Domain, topic: Option<&str>, score: Option<f64>) -> Vec<String> {
    let refs = topic_references(domain, topic);
    let mut suggestions = Vec::new();

    let Some(score) = score else {
        return suggestions;
    };

    if score < 5.0 {
        suggestions.push("Consider starting with foundational resources:".to_string());
        if let Some(book) = refs.books.first() {
            suggestions.push(format!("Recommended book: {}", book.title));
        }
        if let Some(site) = refs.online_resources.first() {
            suggestions.push(format!("Start here: {}", site.title));
        }
    } else if score < 7.0 {
        suggestions.push("To improve your knowledge, explore these intermediate resources:".to_string());
        if let Some(paper) = refs.papers.first() {
            suggestions.push(format!("Related paper: {}", paper.title));
        }
        if let Some(site) = refs.online_resources.last() {
            suggestions.push(format!("Practice here: {}", site.title));
        }
    } else {
        suggestions.push("To master the topic, dive into these advanced materials:".to_string());
        if let Some(paper) = refs.papers.last() {
            suggestions.push(format!("Advanced reading: {}", paper.title));
        }
    }

    suggestions
}
